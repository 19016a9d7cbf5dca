//! # Keyword Engine
//!
//! Groups keyword strings into clusters of related terms and picks a primary
//! keyword for each cluster.
//!
//! ## Architecture
//!
//! ```text
//! Keyword[]
//!     │
//!     ├──> Tokenizer
//!     │      └─ lowercase, split on non-word runs
//!     │
//!     ├──> Similarity Matrix (NxN, immutable)
//!     │      ├─ Jaccard over token sets
//!     │      ├─ SERP overlap augmenter (optional, mock)
//!     │      └─ Intent match augmenter (optional)
//!     │
//!     ├──> Agglomerative Merger
//!     │      ├─ mean pairwise similarity between clusters
//!     │      └─ stop at target count or below threshold
//!     │
//!     └──> Formatter
//!            └─ ClusterResult { primary, secondary, all }
//! ```

mod augment;
mod engine;
mod error;
mod format;
mod intent;
mod keyword;
mod merge;
mod options;
mod similarity;
mod tokenizer;

pub use augment::{
    IntentMatch, MockSerpOverlap, SimilarityAugmenter, INTENT_WEIGHT, SERP_WEIGHT,
};
pub use engine::{generate_clusters, ClusterReport, ClusteringEngine};
pub use error::{EngineError, Result};
pub use format::{format_clusters, primary_keyword, ClusterResult};
pub use intent::Intent;
pub use keyword::Keyword;
pub use merge::{merge_clusters, target_cluster_count, Cluster, MergeStep, MergeTrace, StopReason};
pub use options::ClusterOptions;
pub use similarity::{jaccard_similarity, PairwiseScorer, SimilarityMatrix};
pub use tokenizer::{token_set, tokenize};

use serde::Serialize;

use crate::augment::{IntentMatch, MockSerpOverlap, SimilarityAugmenter};
use crate::error::{EngineError, Result};
use crate::format::{format_clusters, ClusterResult};
use crate::keyword::Keyword;
use crate::merge::{merge_clusters, MergeTrace};
use crate::options::ClusterOptions;
use crate::similarity::{PairwiseScorer, SimilarityMatrix};

/// Output of one clustering run.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub clusters: Vec<ClusterResult>,
    pub trace: MergeTrace,
}

/// Keyword clustering engine.
///
/// Each call to [`generate`](Self::generate) builds its own similarity matrix
/// and working clusters, so one engine can serve many independent inputs.
/// Augmenters are reset at the start of every call; a seeded SERP source
/// therefore gives the same result for the same input on every call.
pub struct ClusteringEngine {
    options: ClusterOptions,
    scorer: PairwiseScorer,
}

impl ClusteringEngine {
    /// Engine with the mock SERP source (seeded from `options.serp_seed`).
    pub fn new(options: ClusterOptions) -> Self {
        let serp: Box<dyn SimilarityAugmenter> = match options.serp_seed {
            Some(seed) => Box::new(MockSerpOverlap::seeded(seed)),
            None => Box::new(MockSerpOverlap::new()),
        };
        Self::with_serp_source(options, serp)
    }

    /// Engine with a caller-provided SERP overlap source.
    ///
    /// The source is only consulted when `options.use_serp` is set.
    pub fn with_serp_source(options: ClusterOptions, serp: Box<dyn SimilarityAugmenter>) -> Self {
        let mut scorer = PairwiseScorer::new();
        if options.use_serp {
            scorer = scorer.with_augmenter(serp);
        }
        if options.intent_enabled() {
            scorer = scorer.with_augmenter(Box::new(IntentMatch));
        }
        Self { options, scorer }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Cluster `keywords`, whose indices must equal their positions.
    pub fn generate(&self, keywords: &[Keyword]) -> Result<ClusterReport> {
        if let Some((position, keyword)) = keywords
            .iter()
            .enumerate()
            .find(|(position, keyword)| keyword.index != *position)
        {
            return Err(EngineError::KeywordIndex {
                position,
                index: keyword.index,
            });
        }

        let augmenters: Vec<&str> = self.scorer.augmenters().collect();
        log::info!(
            "Clustering {} keywords (threshold={}, max_clusters={}, signals={:?})",
            keywords.len(),
            self.options.threshold,
            self.options.max_clusters,
            augmenters
        );

        self.scorer.reset();
        let matrix = SimilarityMatrix::build(keywords, &self.scorer);
        let (clusters, trace) =
            merge_clusters(&matrix, self.options.threshold, self.options.max_clusters);
        let clusters = format_clusters(&clusters, keywords);

        log::info!(
            "Formed {} clusters after {} merges",
            clusters.len(),
            trace.steps.len()
        );

        Ok(ClusterReport { clusters, trace })
    }
}

/// One-shot clustering of raw keyword texts.
///
/// Indices are assigned in input order. Empty input yields no clusters.
pub fn generate_clusters<S: AsRef<str>>(
    keywords: &[S],
    threshold: f64,
    max_clusters: usize,
    use_serp: bool,
    use_intent: bool,
) -> Vec<ClusterResult> {
    let options = ClusterOptions {
        threshold,
        max_clusters,
        use_serp,
        use_intent,
        ..ClusterOptions::default()
    };
    let keywords = Keyword::from_texts(keywords.iter().map(|k| k.as_ref().to_string()));
    ClusteringEngine::new(options)
        .generate(&keywords)
        .map(|report| report.clusters)
        .unwrap_or_default()
}

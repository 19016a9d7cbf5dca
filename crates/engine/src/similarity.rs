use ndarray::Array2;
use std::collections::HashSet;

use crate::augment::SimilarityAugmenter;
use crate::keyword::Keyword;
use crate::tokenizer::token_set;

/// Jaccard similarity of the token sets of two keywords.
///
/// Returns 0.0 when both keywords tokenize to nothing.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    jaccard(&token_set(a), &token_set(b))
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let common = a.intersection(b).count();
    common as f64 / union as f64
}

/// Scores keyword pairs: lexical Jaccard, then each augmenter in order.
pub struct PairwiseScorer {
    augmenters: Vec<Box<dyn SimilarityAugmenter>>,
}

impl PairwiseScorer {
    pub fn new() -> Self {
        Self {
            augmenters: Vec::new(),
        }
    }

    /// Append an augmenter. Augmenters apply in insertion order, each
    /// re-weighting the running score.
    pub fn with_augmenter(mut self, augmenter: Box<dyn SimilarityAugmenter>) -> Self {
        self.augmenters.push(augmenter);
        self
    }

    pub fn augmenters(&self) -> impl Iterator<Item = &str> {
        self.augmenters.iter().map(|a| a.name())
    }

    /// Rewind every augmenter before a new run.
    pub fn reset(&self) {
        for augmenter in &self.augmenters {
            augmenter.reset();
        }
    }

    /// Similarity of two distinct keywords in [0, 1].
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.score_with_tokens(a, b, &token_set(a), &token_set(b))
    }

    fn score_with_tokens(
        &self,
        a: &str,
        b: &str,
        tokens_a: &HashSet<String>,
        tokens_b: &HashSet<String>,
    ) -> f64 {
        let lexical = jaccard(tokens_a, tokens_b);
        self.augmenters
            .iter()
            .fold(lexical, |score, augmenter| augmenter.blend(score, a, b))
            .clamp(0.0, 1.0)
    }
}

impl Default for PairwiseScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Square, symmetric table of pairwise keyword similarities.
///
/// Rows and columns are addressed by `Keyword::index`. The diagonal is exactly
/// 1.0 regardless of augmenters.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Score every unordered pair once and mirror it across the diagonal.
    pub fn build(keywords: &[Keyword], scorer: &PairwiseScorer) -> Self {
        let n = keywords.len();
        let tokens: Vec<HashSet<String>> = keywords.iter().map(|k| token_set(&k.text)).collect();
        let mut scores = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            scores[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let score = scorer.score_with_tokens(
                    &keywords[i].text,
                    &keywords[j].text,
                    &tokens[i],
                    &tokens[j],
                );
                scores[[i, j]] = score;
                scores[[j, i]] = score;
            }
        }

        log::debug!("Built {n}x{n} similarity matrix");
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[[i, j]]
    }

    /// Mean similarity over every cross pair of the two index groups.
    pub fn mean_between(&self, left: &[usize], right: &[usize]) -> f64 {
        let pairs = left.len() * right.len();
        if pairs == 0 {
            return 0.0;
        }
        let total: f64 = left
            .iter()
            .flat_map(|&a| right.iter().map(move |&b| (a, b)))
            .map(|(a, b)| self.scores[[a, b]])
            .sum();
        total / pairs as f64
    }
}

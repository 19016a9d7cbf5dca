use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::intent::Intent;

/// Blend weight of the SERP overlap signal.
pub const SERP_WEIGHT: f64 = 0.3;

/// Blend weight of the intent match signal.
pub const INTENT_WEIGHT: f64 = 0.2;

/// Secondary similarity signal mixed into the lexical score.
///
/// Implementations return a signal in [0, 1] for a keyword pair; `blend`
/// re-weights the running score as `score * (1 - w) + signal * w`.
pub trait SimilarityAugmenter: Send + Sync {
    fn name(&self) -> &str;

    fn weight(&self) -> f64;

    fn signal(&self, a: &str, b: &str) -> f64;

    /// Called once before each clustering run. Stateful sources rewind here.
    fn reset(&self) {}

    fn blend(&self, score: f64, a: &str, b: &str) -> f64 {
        let weight = self.weight();
        score * (1.0 - weight) + self.signal(a, b) * weight
    }
}

/// Stand-in for search-results overlap between two keywords.
///
/// Draws a uniform value in [0.2, 0.7) and adds 0.3 (capped at 1.0) when one
/// keyword is a literal substring of the other. Replace with a real SERP data
/// source once one is available.
pub struct MockSerpOverlap {
    seed: Option<u64>,
    rng: Mutex<StdRng>,
}

impl MockSerpOverlap {
    const BASE_LOW: f64 = 0.2;
    const BASE_HIGH: f64 = 0.7;
    const CONTAINMENT_BOOST: f64 = 0.3;

    pub fn new() -> Self {
        Self {
            seed: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible draws for a given seed. [`reset`](SimilarityAugmenter::reset)
    /// restarts the sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockSerpOverlap {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityAugmenter for MockSerpOverlap {
    fn name(&self) -> &str {
        "mock-serp"
    }

    fn weight(&self) -> f64 {
        SERP_WEIGHT
    }

    fn signal(&self, a: &str, b: &str) -> f64 {
        let base = self.lock_rng().gen_range(Self::BASE_LOW..Self::BASE_HIGH);

        if a.contains(b) || b.contains(a) {
            (base + Self::CONTAINMENT_BOOST).min(1.0)
        } else {
            base
        }
    }

    fn reset(&self) {
        if let Some(seed) = self.seed {
            *self.lock_rng() = StdRng::seed_from_u64(seed);
        }
    }
}

/// Rewards pairs that share a coarse search intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentMatch;

impl IntentMatch {
    const SAME: f64 = 0.8;
    const DIFFERENT: f64 = 0.2;
}

impl SimilarityAugmenter for IntentMatch {
    fn name(&self) -> &str {
        "intent"
    }

    fn weight(&self) -> f64 {
        INTENT_WEIGHT
    }

    fn signal(&self, a: &str, b: &str) -> f64 {
        if Intent::classify(a) == Intent::classify(b) {
            Self::SAME
        } else {
            Self::DIFFERENT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serp_signal_range() {
        let serp = MockSerpOverlap::seeded(7);
        for _ in 0..200 {
            let s = serp.signal("running shoes", "car parts");
            assert!((0.2..0.7).contains(&s), "signal {s} out of range");
        }
    }

    #[test]
    fn test_serp_containment_boost() {
        let serp = MockSerpOverlap::seeded(7);
        for _ in 0..200 {
            let s = serp.signal("shoes", "running shoes");
            assert!((0.5..=1.0).contains(&s), "boosted signal {s} out of range");
        }
    }

    #[test]
    fn test_serp_seeded_is_reproducible() {
        let a = MockSerpOverlap::seeded(42);
        let b = MockSerpOverlap::seeded(42);
        let xs: Vec<f64> = (0..10).map(|_| a.signal("x", "y")).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.signal("x", "y")).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_serp_reset_restarts_seeded_sequence() {
        let serp = MockSerpOverlap::seeded(42);
        let first: Vec<f64> = (0..5).map(|_| serp.signal("x", "y")).collect();
        serp.reset();
        let second: Vec<f64> = (0..5).map(|_| serp.signal("x", "y")).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_intent_signal() {
        let intent = IntentMatch;
        assert_eq!(intent.signal("buy shoes", "shoe price"), 0.8);
        assert_eq!(intent.signal("buy shoes", "how to tie shoes"), 0.2);
        assert_eq!(intent.signal("nike", "adidas"), 0.8);
    }

    #[test]
    fn test_blend_formula() {
        let intent = IntentMatch;
        let blended = intent.blend(0.5, "nike", "adidas");
        assert!((blended - (0.5 * 0.8 + 0.8 * 0.2)).abs() < 1e-12);
    }
}

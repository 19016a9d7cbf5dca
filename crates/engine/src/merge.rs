use serde::Serialize;

use crate::similarity::SimilarityMatrix;

/// Working cluster: keyword indices in merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn singleton(index: usize) -> Self {
        Self {
            members: vec![index],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One merge performed by the agglomeration loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeStep {
    /// Keyword indices of the left cluster (lower position in the working set)
    pub left: Vec<usize>,
    /// Keyword indices of the right cluster
    pub right: Vec<usize>,
    /// Mean pairwise similarity between the two clusters
    pub similarity: f64,
}

/// Why the agglomeration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Cluster count reached the target
    TargetReached,
    /// No pair of clusters was at or above the threshold
    BelowThreshold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeTrace {
    pub target: usize,
    pub steps: Vec<MergeStep>,
    pub stop: StopReason,
}

/// Number of clusters the merger aims for: `min(max_clusters, ceil(n / 2))`.
pub fn target_cluster_count(keyword_count: usize, max_clusters: usize) -> usize {
    max_clusters.min(keyword_count.div_ceil(2))
}

/// Greedy average-linkage agglomeration over a precomputed similarity matrix.
///
/// Starts from one cluster per matrix row. Each round scans every pair
/// `(i, j)` with `i < j` and merges the most similar one; the first pair in
/// scan order wins ties. Pairs below `threshold` are never merged, so the
/// loop may stop above the target count.
///
/// Merged clusters are appended at the end of the working set, left members
/// first.
pub fn merge_clusters(
    matrix: &SimilarityMatrix,
    threshold: f64,
    max_clusters: usize,
) -> (Vec<Cluster>, MergeTrace) {
    let n = matrix.len();
    let target = target_cluster_count(n, max_clusters);
    let mut clusters: Vec<Cluster> = (0..n).map(Cluster::singleton).collect();
    let mut steps = Vec::new();

    let stop = loop {
        if clusters.len() <= target {
            break StopReason::TargetReached;
        }

        let Some((i, j, similarity)) = best_pair(&clusters, matrix, threshold) else {
            break StopReason::BelowThreshold;
        };

        // Remove the higher index first so `i` stays valid.
        let right = clusters.remove(j);
        let left = clusters.remove(i);

        log::debug!(
            "Merging clusters {:?} + {:?} (similarity {:.3})",
            left.members,
            right.members,
            similarity
        );

        let mut members = Vec::with_capacity(left.len() + right.len());
        members.extend_from_slice(&left.members);
        members.extend_from_slice(&right.members);
        clusters.push(Cluster { members });

        steps.push(MergeStep {
            left: left.members,
            right: right.members,
            similarity,
        });
    };

    log::debug!(
        "Merge loop stopped ({:?}): {} clusters, target {}, {} merges",
        stop,
        clusters.len(),
        target,
        steps.len()
    );

    (
        clusters,
        MergeTrace {
            target,
            steps,
            stop,
        },
    )
}

/// Most similar eligible pair, or `None` when nothing reaches `threshold`.
fn best_pair(
    clusters: &[Cluster],
    matrix: &SimilarityMatrix,
    threshold: f64,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let similarity = matrix.mean_between(&clusters[i].members, &clusters[j].members);
            if similarity < threshold {
                continue;
            }
            if best.map_or(true, |(_, _, current)| similarity > current) {
                best = Some((i, j, similarity));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;
    use crate::similarity::PairwiseScorer;

    fn matrix_for(texts: &[&str]) -> SimilarityMatrix {
        let keywords = Keyword::from_texts(texts.iter().copied());
        SimilarityMatrix::build(&keywords, &PairwiseScorer::new())
    }

    #[test]
    fn test_target_count() {
        assert_eq!(target_cluster_count(0, 10), 0);
        assert_eq!(target_cluster_count(1, 10), 1);
        assert_eq!(target_cluster_count(5, 10), 3);
        assert_eq!(target_cluster_count(10, 2), 2);
    }

    #[test]
    fn test_no_merge_below_threshold() {
        let matrix = matrix_for(&["apple pie", "car engine"]);
        let (clusters, trace) = merge_clusters(&matrix, 0.9, 10);
        assert_eq!(clusters, vec![Cluster::singleton(0), Cluster::singleton(1)]);
        assert_eq!(trace.stop, StopReason::BelowThreshold);
        assert!(trace.steps.is_empty());
    }

    #[test]
    fn test_merges_shared_token_pair_first() {
        let matrix = matrix_for(&["buy shoes", "buy boots", "car parts"]);
        let (clusters, trace) = merge_clusters(&matrix, 0.2, 2);
        assert_eq!(
            clusters,
            vec![Cluster::singleton(2), Cluster { members: vec![0, 1] }]
        );
        assert_eq!(trace.stop, StopReason::TargetReached);
        assert_eq!(trace.steps.len(), 1);
        assert!((trace.steps[0].similarity - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_target_already_met() {
        let matrix = matrix_for(&["buy shoes", "buy boots", "car parts"]);
        // ceil(3 / 2) = 2, so max_clusters 3 still leaves one merge to do
        let (clusters, _) = merge_clusters(&matrix, 0.2, 3);
        assert_eq!(clusters.len(), 2);

        let matrix = matrix_for(&["buy shoes"]);
        let (clusters, trace) = merge_clusters(&matrix, 0.2, 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(trace.stop, StopReason::TargetReached);
    }

    #[test]
    fn test_tie_goes_to_first_pair_in_scan_order() {
        // every pair shares nothing, threshold 0 makes them all eligible at 0.0
        let matrix = matrix_for(&["a", "b", "c"]);
        let (clusters, trace) = merge_clusters(&matrix, 0.0, 10);
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].left, vec![0]);
        assert_eq!(trace.steps[0].right, vec![1]);
        assert_eq!(
            clusters,
            vec![Cluster::singleton(2), Cluster { members: vec![0, 1] }]
        );
    }

    #[test]
    fn test_merged_clusters_keep_merging() {
        let matrix = matrix_for(&["seo", "seo tools", "seo tools free", "seo audit", "x", "y"]);
        let (clusters, trace) = merge_clusters(&matrix, 0.1, 1);
        let total: usize = clusters.iter().map(Cluster::len).sum();
        assert_eq!(total, 6);
        assert!(!trace.steps.is_empty());
        assert_eq!(trace.stop, StopReason::BelowThreshold);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = matrix_for(&[]);
        let (clusters, trace) = merge_clusters(&matrix, 0.5, 10);
        assert!(clusters.is_empty());
        assert_eq!(trace.stop, StopReason::TargetReached);
    }
}

use serde::{Deserialize, Serialize};

use crate::keyword::Keyword;
use crate::merge::Cluster;

/// Final cluster as handed to renderers and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    /// 1-based position in the output
    pub id: usize,
    /// Display name, "Cluster {id}"
    pub name: String,
    pub primary_keyword: String,
    /// Every keyword except the primary, in cluster order
    pub secondary_keywords: Vec<String>,
    pub all_keywords: Vec<String>,
}

/// Length in UTF-16 code units, so astral characters such as emoji count twice.
fn display_len(keyword: &str) -> usize {
    keyword.encode_utf16().count()
}

/// Position of the shortest keyword; ties keep the earliest.
fn primary_position(keywords: &[String]) -> Option<usize> {
    keywords
        .iter()
        .enumerate()
        .reduce(|best, candidate| {
            if display_len(best.1) <= display_len(candidate.1) {
                best
            } else {
                candidate
            }
        })
        .map(|(position, _)| position)
}

/// Shortest keyword of a cluster, the earliest one on ties.
pub fn primary_keyword(keywords: &[String]) -> Option<&str> {
    primary_position(keywords).map(|position| keywords[position].as_str())
}

/// Package working clusters as results, preserving their order.
///
/// Empty clusters are skipped; the merger never produces them.
pub fn format_clusters(clusters: &[Cluster], keywords: &[Keyword]) -> Vec<ClusterResult> {
    clusters
        .iter()
        .filter_map(|cluster| {
            let all_keywords: Vec<String> = cluster
                .members
                .iter()
                .map(|&index| keywords[index].text.clone())
                .collect();
            let primary = primary_position(&all_keywords)?;
            Some((all_keywords, primary))
        })
        .enumerate()
        .map(|(position, (all_keywords, primary))| {
            let id = position + 1;
            let secondary_keywords = all_keywords
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != primary)
                .map(|(_, text)| text.clone())
                .collect();
            ClusterResult {
                id,
                name: format!("Cluster {id}"),
                primary_keyword: all_keywords[primary].clone(),
                secondary_keywords,
                all_keywords,
            }
        })
        .collect()
}

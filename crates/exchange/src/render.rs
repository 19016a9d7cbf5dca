use keyword_engine::ClusterResult;
use serde::Serialize;

const ROOT_NAME: &str = "Keyword Clusters";
const TABLE_HEADERS: [&str; 4] = [
    "Cluster",
    "Primary Keyword",
    "Secondary Keywords",
    "Total Keywords",
];

/// Mind-map node: root → one node per cluster (primary) → secondary keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn from_clusters(clusters: &[ClusterResult]) -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            children: clusters
                .iter()
                .map(|cluster| Self {
                    name: cluster.primary_keyword.clone(),
                    children: cluster
                        .secondary_keywords
                        .iter()
                        .map(|keyword| Self::leaf(keyword))
                        .collect(),
                })
                .collect(),
        }
    }

    fn write_children(&self, prefix: &str, out: &mut String) {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(prefix);
            out.push_str(branch);
            out.push_str(&child.name);
            out.push('\n');
            child.write_children(&format!("{prefix}{indent}"), out);
        }
    }
}

/// Indented tree view of the cluster hierarchy.
pub fn render_tree(clusters: &[ClusterResult]) -> String {
    let root = HierarchyNode::from_clusters(clusters);
    let mut out = format!("{}\n", root.name);
    root.write_children("", &mut out);
    out
}

/// Fixed-width table with one row per cluster.
pub fn render_table(clusters: &[ClusterResult]) -> String {
    let rows: Vec<[String; 4]> = clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            [
                format!("Cluster {}", index + 1),
                cluster.primary_keyword.clone(),
                cluster.secondary_keywords.join(", "),
                cluster.all_keywords.len().to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

use std::io::Write;

use keyword_engine::{ClusterResult, Intent};

use crate::error::{ExchangeError, Result};

pub const CSV_HEADER: &str = "Cluster,Intent,Keyword Type,Keyword,Branded";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Fill the Intent column with the rule-based intent instead of "N/A"
    pub label_intent: bool,
}

/// Write clusters as CSV: one Primary row, then Secondary rows, per cluster.
///
/// Branded is always "No"; the engine does not detect brands.
pub fn export_csv<W: Write>(
    clusters: &[ClusterResult],
    options: CsvOptions,
    out: &mut W,
) -> Result<()> {
    if clusters.is_empty() {
        return Err(ExchangeError::NothingToExport);
    }

    writeln!(out, "{CSV_HEADER}")?;
    for (index, cluster) in clusters.iter().enumerate() {
        let label = format!("Cluster {}", index + 1);
        write_row(out, &label, "Primary", &cluster.primary_keyword, options)?;
        for keyword in &cluster.secondary_keywords {
            write_row(out, &label, "Secondary", keyword, options)?;
        }
    }
    out.flush()?;

    log::debug!("Exported {} clusters as CSV", clusters.len());
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    cluster: &str,
    kind: &str,
    keyword: &str,
    options: CsvOptions,
) -> Result<()> {
    let intent = if options.label_intent {
        Intent::classify(keyword).as_str()
    } else {
        "N/A"
    };
    writeln!(out, "{cluster},{intent},{kind},{},No", quote(keyword))?;
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Pretty JSON array of cluster results (camelCase fields).
pub fn export_json<W: Write>(clusters: &[ClusterResult], out: &mut W) -> Result<()> {
    if clusters.is_empty() {
        return Err(ExchangeError::NothingToExport);
    }
    serde_json::to_writer_pretty(&mut *out, clusters)?;
    writeln!(out)?;
    Ok(())
}

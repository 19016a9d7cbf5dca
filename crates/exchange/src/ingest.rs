use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{ExchangeError, Result};

/// Where a keyword list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordSource {
    /// Keywords typed directly (newline- or comma-separated)
    Inline(String),
    /// Keyword file; `.csv` is read as an upload with a header row
    File(PathBuf),
    Stdin,
}

impl KeywordSource {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// Split pasted keywords.
///
/// Newlines take precedence: when the text contains a newline each line is a
/// keyword, otherwise commas separate keywords. Entries are trimmed and blank
/// ones dropped.
pub fn parse_keywords(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let separator = if text.contains('\n') { '\n' } else { ',' };
    text.split(separator)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keywords from the first column of a CSV upload.
///
/// The first line is a header and is skipped. Double quotes are stripped from
/// the cell; quoted commas are not supported.
pub fn parse_csv_upload(content: &str) -> Vec<String> {
    content
        .split('\n')
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split(',').next())
        .map(|cell| cell.trim().replace('"', ""))
        .filter(|cell| !cell.is_empty())
        .collect()
}

pub fn read_keywords(source: &KeywordSource) -> Result<Vec<String>> {
    let keywords = match source {
        KeywordSource::Inline(text) => parse_keywords(text),
        KeywordSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            parse_keywords(&buf)
        }
        KeywordSource::File(path) => read_keyword_file(path)?,
    };
    log::debug!("Read {} keywords from {:?}", keywords.len(), source);
    Ok(keywords)
}

fn read_keyword_file(path: &Path) -> Result<Vec<String>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("xlsx") | Some("xls") => Err(ExchangeError::UnsupportedFormat(
            path.display().to_string(),
        )),
        Some("csv") => Ok(parse_csv_upload(&std::fs::read_to_string(path)?)),
        _ => Ok(parse_keywords(&std::fs::read_to_string(path)?)),
    }
}

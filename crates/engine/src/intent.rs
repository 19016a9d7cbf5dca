use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse search intent behind a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Question-style lookups ("how", "what", ...)
    Informational,
    /// Research before a purchase ("best", "vs", "review", ...)
    Commercial,
    /// Ready to buy ("buy", "price", ...)
    Transactional,
    /// Nothing matched; usually a brand or site name
    Navigational,
}

/// Substring signals in scan order. Later matches overwrite earlier ones.
const SIGNALS: &[(&str, Intent)] = &[
    ("how", Intent::Informational),
    ("what", Intent::Informational),
    ("why", Intent::Informational),
    ("when", Intent::Informational),
    ("best", Intent::Commercial),
    ("buy", Intent::Transactional),
    ("purchase", Intent::Transactional),
    ("shop", Intent::Transactional),
    ("price", Intent::Transactional),
    ("vs", Intent::Commercial),
    ("compare", Intent::Commercial),
    ("review", Intent::Commercial),
];

impl Intent {
    /// Resolve the intent of a keyword from substring signals.
    ///
    /// Signals are matched case-insensitively anywhere in the text ("show"
    /// contains "how"). The last matching signal wins, so "best price" is
    /// transactional and "buy vs rent" is commercial.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        SIGNALS
            .iter()
            .filter(|(signal, _)| lowered.contains(signal))
            .last()
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Navigational)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Intent::Informational => "informational",
            Intent::Commercial => "commercial",
            Intent::Transactional => "transactional",
            Intent::Navigational => "navigational",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

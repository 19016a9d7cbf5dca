use serde::{Deserialize, Serialize};

/// Input keyword with a stable position in the ingested list.
///
/// The index addresses rows and columns of the similarity matrix and is never
/// shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub index: usize,
    pub text: String,
}

impl Keyword {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Assign indices in input order.
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self::new(index, text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_input_order() {
        let keywords = Keyword::from_texts(["seo", "seo tools", "backlinks"]);
        let indices: Vec<usize> = keywords.iter().map(|k| k.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(keywords[1].text, "seo tools");
    }
}

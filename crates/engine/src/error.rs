use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid threshold {0}: expected a value in [0, 1]")]
    InvalidThreshold(f64),

    #[error("Invalid max clusters {0}: expected a positive integer")]
    InvalidMaxClusters(usize),

    #[error("Keyword at position {position} has index {index}")]
    KeywordIndex { position: usize, index: usize },

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),
}

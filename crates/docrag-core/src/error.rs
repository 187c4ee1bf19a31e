use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Chunk window parameters that would never advance.
    #[error("Invalid configuration: overlap ({overlap}) must be smaller than target ({target}) and target must be positive")]
    InvalidConfiguration { target: usize, overlap: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

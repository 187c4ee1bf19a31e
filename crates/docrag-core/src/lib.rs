pub mod chunking;
pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use chunking::{chunk, ChunkingConfig};
pub use error::{Error, Result};
pub use types::EMBEDDING_DIM;

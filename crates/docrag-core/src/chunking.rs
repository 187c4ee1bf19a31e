//! Overlapping word-window chunker.
//!
//! A document is split on whitespace and a window of `target` words slides
//! across it, advancing `target - overlap` words per step. Each window is
//! rejoined with single spaces.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_TARGET: usize = 800;
pub const DEFAULT_OVERLAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub target: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { target: DEFAULT_TARGET, overlap: DEFAULT_OVERLAP }
    }
}

impl ChunkingConfig {
    pub fn new(target: usize, overlap: usize) -> Result<Self> {
        let config = Self { target, overlap };
        config.validate()?;
        Ok(config)
    }

    /// Reject windows whose step would be zero.
    pub fn validate(&self) -> Result<()> {
        if self.target == 0 || self.overlap >= self.target {
            return Err(Error::InvalidConfiguration { target: self.target, overlap: self.overlap });
        }
        Ok(())
    }

    pub fn step(&self) -> usize { self.target - self.overlap }

    pub fn chunk(&self, text: &str) -> Result<Vec<String>> { chunk(text, self.target, self.overlap) }
}

/// Split `text` into overlapping windows of `target` words.
///
/// Text with no words yields no chunk. Text of at most `target` words yields
/// exactly one chunk. Longer text gets a window at every multiple of the step
/// below the word count, so the tail may be covered twice. Fails with [`Error::InvalidConfiguration`] when
/// `overlap >= target`.
pub fn chunk(text: &str, target: usize, overlap: usize) -> Result<Vec<String>> {
    let config = ChunkingConfig { target, overlap };
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() { return Ok(vec![]); }
    if words.len() <= target { return Ok(vec![words.join(" ")]); }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let end = (start + target).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += config.step();
    }
    Ok(chunks)
}

//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`APP_RETRIEVAL__CHUNK_TARGET=400` sets `retrieval.chunk_target`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::chunking::{ChunkingConfig, DEFAULT_OVERLAP, DEFAULT_TARGET};
use crate::error::Error;

pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// Tunables for indexing and querying, read from the `[retrieval]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub chunk_target: usize,
    pub chunk_overlap: usize,
    pub default_limit: usize,
    pub excerpt_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { chunk_target: DEFAULT_TARGET, chunk_overlap: DEFAULT_OVERLAP, default_limit: DEFAULT_LIMIT, excerpt_chars: DEFAULT_EXCERPT_CHARS }
    }
}

impl RetrievalConfig {
    pub fn chunking(&self) -> crate::error::Result<ChunkingConfig> {
        ChunkingConfig::new(self.chunk_target, self.chunk_overlap)
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.retrieval()?;
        Ok(config)
    }

    /// Build from an explicit figment; used by tests and embedders of the engine.
    pub fn from_figment(figment: Figment) -> Self { Self { figment } }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[retrieval]` table layered over defaults, with chunk parameters validated.
    pub fn retrieval(&self) -> crate::error::Result<RetrievalConfig> {
        let retrieval: RetrievalConfig = Figment::from(Serialized::defaults(RetrievalConfig::default()))
            .merge(self.figment.focus("retrieval"))
            .extract()
            .map_err(|e| Error::InvalidConfig(format!("retrieval: {e}")))?;
        retrieval.chunking()?;
        Ok(retrieval)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

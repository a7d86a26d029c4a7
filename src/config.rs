// Runtime configuration, read from environment variables.

use crate::routes::RouteSet;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_URL: &str = "http://localhost:12001";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend (`FACEBOX_URL`).
    pub base_url: String,
    /// Route set name (`FACEBOX_ROUTES`): `plain` or `prefixed`.
    pub routes: RouteSet,
    /// Where downloads are saved (`FACEBOX_OUTPUT_DIR`).
    pub output_dir: PathBuf,
    /// Most verbose log level written to stderr (`FACEBOX_LOG`).
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var("FACEBOX_URL").unwrap_or_else(|| DEFAULT_URL.into());
        let routes = match var("FACEBOX_ROUTES") {
            Some(name) => name.parse::<RouteSet>().context("Invalid FACEBOX_ROUTES")?,
            None => RouteSet::default(),
        };
        let output_dir = var("FACEBOX_OUTPUT_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_level = match var("FACEBOX_LOG") {
            Some(level) => level
                .trim()
                .parse::<Level>()
                .map_err(|_| anyhow::anyhow!("Invalid FACEBOX_LOG: {}", level))?,
            None => Level::WARN,
        };

        Ok(Config {
            base_url,
            routes,
            output_dir,
            log_level,
        })
    }
}

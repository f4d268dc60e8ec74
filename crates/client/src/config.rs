use std::path::PathBuf;

use anyhow::Context;

pub const API_URL_VAR: &str = "ADMINCONSOLE_API_URL";
pub const SESSION_PATH_VAR: &str = "ADMINCONSOLE_SESSION_PATH";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Where the console finds the proxy and keeps its session blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables fall back to
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("{API_URL_VAR} not set; using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });

        let session_path = match lookup(SESSION_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                let path = default_session_path()?;
                tracing::warn!(path = %path.display(), "{SESSION_PATH_VAR} not set; using platform data dir");
                path
            }
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_path,
        })
    }
}

/// `<data_dir>/adminconsole/session.json`.
pub fn default_session_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("adminconsole");
    dir.push("session.json");
    Ok(dir)
}

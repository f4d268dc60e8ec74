use std::net::SocketAddr;

use anyhow::Context;

pub const BACKEND_URL_VAR: &str = "BACKEND_API_URL";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Proxy settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub backend_url: String,
    pub bind_addr: SocketAddr,
}

impl ProxyConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend_url = lookup(BACKEND_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("{BACKEND_URL_VAR} not set; using {DEFAULT_BACKEND_URL}");
                DEFAULT_BACKEND_URL.to_string()
            });

        let bind_addr = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("{BIND_ADDR_VAR} not set; using {DEFAULT_BIND_ADDR}");
                DEFAULT_BIND_ADDR.to_string()
            });
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {BIND_ADDR_VAR}: {bind_addr:?}"))?;

        Ok(Self {
            backend_url: backend_url.trim().trim_end_matches('/').to_string(),
            bind_addr,
        })
    }
}

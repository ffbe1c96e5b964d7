//! Client configuration.
//!
//! A `ClientConfig` is fixed when the client is constructed and never
//! mutated afterwards; several differently configured clients can live in
//! the same process.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint path. Relative by default; the transport
    /// resolves it against its origin.
    pub base_url: String,
    /// Sent with every request. Per-call headers with the same name win.
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Base URL without a trailing slash, ready to prefix a `/path`.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

//! Resolution of media URLs against the API root.
//!
//! Message bodies reference media either by a server-relative path
//! (`/chat-attachments/...`) or by an absolute URL on one of the public
//! origins. Both are rebased onto the configured API root so that
//! development and staging builds fetch from the right host.

use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Result, ThreadMediaError};

/// URL resolver bound to one API root.
#[derive(Debug, Clone)]
pub struct ApiRoot {
    root: Url,
    rewrite_origins: Vec<String>,
}

impl ApiRoot {
    /// Build a resolver. `root` must be an absolute URL; a trailing `/` is
    /// added when missing. Origins are matched as string prefixes.
    pub fn new(root: &str, rewrite_origins: &[String]) -> Result<Self> {
        let root = Url::parse(&with_trailing_slash(root))
            .map_err(|e| ThreadMediaError::InvalidApiRoot(format!("{root}: {e}")))?;
        if root.cannot_be_a_base() {
            return Err(ThreadMediaError::InvalidApiRoot(root.to_string()));
        }

        let rewrite_origins = rewrite_origins
            .iter()
            .filter(|o| !o.trim().is_empty())
            .map(|o| with_trailing_slash(o.trim()))
            .collect();

        Ok(Self {
            root,
            rewrite_origins,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.root_url, &config.rewrite_origins)
    }

    /// The API root, always ending in `/`.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Resolve a raw `src` value. Never fails: input that cannot be rebased
    /// is returned unchanged.
    pub fn resolve(&self, raw: &str) -> String {
        if raw.starts_with('/') {
            return self.rebase(raw.trim_start_matches('/'), raw);
        }

        for origin in &self.rewrite_origins {
            if let Some(rest) = raw.strip_prefix(origin.as_str()) {
                return self.rebase(rest, raw);
            }
        }

        raw.to_string()
    }

    fn rebase(&self, path: &str, raw: &str) -> String {
        let joined = format!("{}{}", self.root.as_str(), path);
        match Url::parse(&joined) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!(url = raw, error = %e, "Rebased URL does not parse, keeping text");
                joined
            }
        }
    }
}

fn with_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    }
}

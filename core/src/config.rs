//! Client settings read from `GOODREADS_*` environment variables or `.env`.

use std::time::Duration;

use crate::client::DEFAULT_API_ROOT;
use crate::error::ApiError;

const DEFAULT_LIMIT: usize = 5;

/// Everything needed to talk to the service on behalf of one user.
///
/// Built once by the caller and handed to `Goodreads::from_config`; nothing
/// here is global.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_root: String,
    pub key: String,
    /// Issued alongside the key; no endpoint used here needs it.
    pub secret: Option<String>,
    pub user_id: String,
    /// Number of recent activity items `get_user` assembles.
    pub limit: usize,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_root", &self.api_root)
            .field("user_id", &self.user_id)
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            key: key.into(),
            secret: None,
            user_id: user_id.into(),
            limit: DEFAULT_LIMIT,
            timeout: None,
        }
    }

    /// Read `GOODREADS_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ApiError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            var("GOODREADS_KEY").unwrap_or_default(),
            var("GOODREADS_USER_ID").unwrap_or_default(),
        );
        config.secret = var("GOODREADS_SECRET");
        if let Some(root) = var("GOODREADS_API_ROOT") {
            config.api_root = root;
        }
        if let Some(limit) = var("GOODREADS_LIMIT") {
            config.limit = limit.trim().parse().map_err(|_| {
                ApiError::Config(format!("GOODREADS_LIMIT is not a count: {limit}"))
            })?;
        }
        if let Some(secs) = var("GOODREADS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ApiError::Config(format!("GOODREADS_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.key.is_empty() {
            return Err(ApiError::Config("GOODREADS_KEY is missing".into()));
        }
        if self.user_id.is_empty() {
            return Err(ApiError::Config("GOODREADS_USER_ID is missing".into()));
        }
        Ok(())
    }
}

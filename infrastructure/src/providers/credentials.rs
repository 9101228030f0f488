//! API key lookup

use std::fmt;

/// Where an adapter finds its API key.
///
/// Keys are read from the named environment variable on every call, so a
/// missing key surfaces as a deterministic error on the call that needs it
/// rather than at startup.
#[derive(Clone)]
pub struct ApiKeySource {
    env_var: String,
    fixed: Option<String>,
}

impl ApiKeySource {
    pub fn from_env(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
            fixed: None,
        }
    }

    /// A key supplied directly, bypassing the environment.
    pub fn fixed(key: impl Into<String>) -> Self {
        Self {
            env_var: String::new(),
            fixed: Some(key.into()),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// The key, if set and non-blank.
    pub fn resolve(&self) -> Option<String> {
        if let Some(key) = &self.fixed {
            return Some(key.clone());
        }
        std::env::var(&self.env_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

impl fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeySource")
            .field("env_var", &self.env_var)
            .field("fixed", &self.fixed.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

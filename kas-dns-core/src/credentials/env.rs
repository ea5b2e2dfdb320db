//! Process environment source

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::traits::{CredentialCandidate, CredentialSource};

/// Default variable holding the KAS login.
pub const DEFAULT_USER_VAR: &str = "ALL_INKL_KAS_USER";
/// Default variable holding the KAS password.
pub const DEFAULT_PASSWORD_VAR: &str = "ALL_INKL_KAS_PASSWORD";

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the login pair from two environment variables.
pub struct EnvSource {
    user_var: String,
    password_var: String,
    lookup: Lookup,
}

impl EnvSource {
    pub fn new(user_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self::with_lookup(user_var, password_var, |key| std::env::var(key).ok())
    }

    /// Same variables, read through `lookup` instead of the process environment.
    pub fn with_lookup<F>(user_var: impl Into<String>, password_var: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            user_var: user_var.into(),
            password_var: password_var.into(),
            lookup: Arc::new(lookup),
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new(DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR)
    }
}

#[async_trait]
impl CredentialSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>> {
        let candidate = CredentialCandidate::new(
            (self.lookup)(&self.user_var),
            (self.lookup)(&self.password_var),
        );
        Ok((!candidate.is_empty()).then_some(candidate))
    }
}

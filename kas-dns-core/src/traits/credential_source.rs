//! Credential source abstraction Trait

use async_trait::async_trait;
use kas_dns_provider::Credential;

use crate::credentials::normalize;
use crate::error::CoreResult;

/// Whatever one source found; either half may be missing.
///
/// Values are normalized on construction, so an all-whitespace value counts as missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialCandidate {
    pub account_id: Option<String>,
    pub secret: Option<String>,
}

impl CredentialCandidate {
    pub fn new(account_id: Option<String>, secret: Option<String>) -> Self {
        let clean = |v: Option<String>| v.map(|s| normalize(&s)).filter(|s| !s.is_empty());
        Self {
            account_id: clean(account_id),
            secret: clean(secret),
        }
    }

    /// The pair, if both halves are present.
    pub fn complete(self) -> Option<Credential> {
        match (self.account_id, self.secret) {
            (Some(account_id), Some(secret)) => Some(Credential { account_id, secret }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account_id.is_none() && self.secret.is_none()
    }
}

impl std::fmt::Debug for CredentialCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCandidate")
            .field("account_id", &self.account_id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Credential source Trait
///
/// Implementations:
/// - `EnvSource`: process environment
/// - `DotenvFileSource`: key=value file (`.env.local`)
/// - `PasswordManagerSource`: 1Password CLI (`op item get`)
/// - `RemoteHubSource`: credential tool on the automation hub
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Name used in logs and in the "tried" list of the final error
    fn name(&self) -> &str;

    /// Read the source once
    ///
    /// # Returns
    /// * `Ok(None)` - the source is not set up (no file, no variables, no CLI)
    /// * `Ok(Some(candidate))` - what was found, possibly incomplete
    /// * `Err(_)` - the source exists but could not be read
    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_normalizes_values() {
        let c = CredentialCandidate::new(Some("\"w0123456\\n\"".into()), Some(" 'pw' ".into()));
        assert_eq!(c.account_id.as_deref(), Some("w0123456"));
        assert_eq!(c.secret.as_deref(), Some("pw"));
    }

    #[test]
    fn blank_values_are_missing() {
        let c = CredentialCandidate::new(Some("  \"\" ".into()), None);
        assert!(c.is_empty());
        assert!(c.complete().is_none());
    }

    #[test]
    fn complete_requires_both_halves() {
        assert!(CredentialCandidate::new(Some("u".into()), None)
            .complete()
            .is_none());
        let cred = CredentialCandidate::new(Some("u".into()), Some("p".into()))
            .complete()
            .unwrap();
        assert_eq!(cred.account_id, "u");
        assert_eq!(cred.secret, "p");
    }

    #[test]
    fn debug_hides_secret() {
        let c = CredentialCandidate::new(Some("u".into()), Some("hunter2".into()));
        assert!(!format!("{c:?}").contains("hunter2"));
    }
}

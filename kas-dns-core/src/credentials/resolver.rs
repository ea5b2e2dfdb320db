//! Ordered credential resolution

use kas_dns_provider::Credential;

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialSource;

/// Tries credential sources in order and returns the first complete pair.
///
/// Each source is read at most once. Halves from different sources are never
/// combined; a partial pair or a failing source is logged and skipped.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Source names in priority order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn resolve(&self) -> CoreResult<Credential> {
        for source in &self.sources {
            match source.fetch().await {
                Ok(Some(candidate)) => {
                    let has_login = candidate.account_id.is_some();
                    if let Some(credential) = candidate.complete() {
                        log::info!("Using KAS credentials from {}", source.name());
                        return Ok(credential);
                    }
                    let missing = if has_login { "password" } else { "login" };
                    log::warn!("{} has an incomplete login ({missing} missing), skipping", source.name());
                }
                Ok(None) => log::debug!("{}: nothing found", source.name()),
                Err(e) if e.is_expected() => log::warn!("{e}"),
                Err(e) => log::error!("{e}"),
            }
        }

        Err(CoreError::CredentialsUnavailable {
            attempted: self.source_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StaticSource;

    #[tokio::test]
    async fn first_complete_pair_wins() {
        let resolver = CredentialResolver::new(vec![
            Box::new(StaticSource::empty("environment")),
            Box::new(StaticSource::pair("dotenv file", "w0123456", "from-file")),
            Box::new(StaticSource::pair("1password", "w0123456", "from-op")),
        ]);
        let cred = resolver.resolve().await.unwrap();
        assert_eq!(cred.secret, "from-file");
    }

    #[tokio::test]
    async fn partial_pairs_are_not_mixed() {
        let env = StaticSource::partial("environment", Some("w0123456"), None);
        let file = StaticSource::partial("dotenv file", None, Some("pw"));
        let env_calls = env.calls();
        let file_calls = file.calls();
        let resolver = CredentialResolver::new(vec![Box::new(env), Box::new(file)]);

        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::CredentialsUnavailable { ref attempted } if attempted == &["environment", "dotenv file"]
        ));
        assert_eq!(env_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(file_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_source_is_skipped_once() {
        let failing = StaticSource::failing("1password", "not signed in");
        let calls = failing.calls();
        let resolver = CredentialResolver::new(vec![
            Box::new(failing),
            Box::new(StaticSource::pair("hub credential tool", "w0123456", "pw")),
        ]);
        let cred = resolver.resolve().await.unwrap();
        assert_eq!(cred.account_id, "w0123456");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn later_sources_are_not_read_after_success() {
        let later = StaticSource::pair("1password", "x", "y");
        let calls = later.calls();
        let resolver = CredentialResolver::new(vec![
            Box::new(StaticSource::pair("environment", "w0123456", "pw")),
            Box::new(later),
        ]);
        resolver.resolve().await.unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_sources_is_unavailable() {
        let err = CredentialResolver::new(Vec::new()).resolve().await.unwrap_err();
        assert_eq!(err.to_string(), "No credentials found (tried: )");
    }
}

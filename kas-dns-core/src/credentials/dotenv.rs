//! `.env.local` file source

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialCandidate, CredentialSource};

use super::env::{DEFAULT_PASSWORD_VAR, DEFAULT_USER_VAR};

/// Default key=value file, relative to the working directory.
pub const DEFAULT_DOTENV_PATH: &str = ".env.local";

/// Reads the same two keys as [`EnvSource`](super::EnvSource) from a key=value file.
///
/// The file is read, never loaded into the process environment.
pub struct DotenvFileSource {
    path: PathBuf,
    user_key: String,
    password_key: String,
}

impl DotenvFileSource {
    pub fn new(
        path: impl Into<PathBuf>,
        user_key: impl Into<String>,
        password_key: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            user_key: user_key.into(),
            password_key: password_key.into(),
        }
    }

    fn error(&self, detail: impl std::fmt::Display) -> CoreError {
        CoreError::CredentialSource {
            source_name: self.name().to_string(),
            detail: format!("{}: {detail}", self.path.display()),
        }
    }
}

impl Default for DotenvFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_DOTENV_PATH, DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR)
    }
}

#[async_trait]
impl CredentialSource for DotenvFileSource {
    fn name(&self) -> &str {
        "dotenv file"
    }

    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, skipping", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.error(e)),
        };

        // later assignments override earlier ones
        let mut user = None;
        let mut password = None;
        for (key, value) in text.lines().filter_map(parse_line) {
            if key == self.user_key {
                user = Some(value.to_string());
            } else if key == self.password_key {
                password = Some(value.to_string());
            }
        }

        let candidate = CredentialCandidate::new(user, password);
        Ok((!candidate.is_empty()).then_some(candidate))
    }
}

/// Splits a `KEY=value` line; the value is returned verbatim.
///
/// No quote processing and no `$VAR` expansion: quoting debris is left to
/// [`normalize`](super::normalize), and a `$` in a password stays a `$`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_quoted_values() {
        let file = file_with(
            "# KAS login\nALL_INKL_KAS_USER=\"w0123456\"\nALL_INKL_KAS_PASSWORD='p@ss w0rd'\nOTHER=1\n",
        );
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let cred = src.fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.account_id, "w0123456");
        assert_eq!(cred.secret, "p@ss w0rd");
    }

    #[tokio::test]
    async fn strips_trailing_literal_newline() {
        let file = file_with("ALL_INKL_KAS_USER='w0123456\\n'\nALL_INKL_KAS_PASSWORD=secret\n");
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let cred = src.fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.account_id, "w0123456");
    }

    #[tokio::test]
    async fn dollar_signs_are_kept_verbatim() {
        let file = file_with("ALL_INKL_KAS_USER=w0123456\nALL_INKL_KAS_PASSWORD=Ab$xYz9!\n");
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let cred = src.fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.secret, "Ab$xYz9!");

        let file = file_with("ALL_INKL_KAS_USER=w0123456\nALL_INKL_KAS_PASSWORD=\"p$HOME${USER}x\"\n");
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let cred = src.fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.secret, "p$HOME${USER}x");
    }

    #[tokio::test]
    async fn export_prefix_comments_and_last_assignment() {
        let file = file_with(
            "  # old login\nexport ALL_INKL_KAS_USER=w0000000\n\nALL_INKL_KAS_USER = w0123456\nALL_INKL_KAS_PASSWORD=a=b\n",
        );
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let cred = src.fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.account_id, "w0123456");
        assert_eq!(cred.secret, "a=b");
    }

    #[test]
    fn parse_line_keeps_value_verbatim() {
        assert_eq!(parse_line("KEY=\"v a l\" "), Some(("KEY", "\"v a l\" ")));
        assert_eq!(parse_line("# KEY=x"), None);
        assert_eq!(parse_line("no separator"), None);
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let src = DotenvFileSource::new(
            dir.path().join(".env.local"),
            DEFAULT_USER_VAR,
            DEFAULT_PASSWORD_VAR,
        );
        assert!(src.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_without_keys_is_none() {
        let file = file_with("UNRELATED=1\n");
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        assert!(src.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn password_only_is_partial() {
        let file = file_with("ALL_INKL_KAS_PASSWORD=secret\n");
        let src = DotenvFileSource::new(file.path(), DEFAULT_USER_VAR, DEFAULT_PASSWORD_VAR);
        let candidate = src.fetch().await.unwrap().unwrap();
        assert!(candidate.account_id.is_none());
        assert_eq!(candidate.secret.as_deref(), Some("secret"));
    }
}

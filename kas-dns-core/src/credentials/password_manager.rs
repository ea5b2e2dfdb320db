//! 1Password CLI source

use std::io::ErrorKind;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialCandidate, CredentialSource};

pub const DEFAULT_OP_PROGRAM: &str = "op";
pub const DEFAULT_OP_ITEM: &str = "All-Inkl KAS (w014c572)";
pub const DEFAULT_OP_VAULT: &str = "Automation";

#[derive(Debug, Deserialize)]
struct OpItem {
    #[serde(default)]
    fields: Vec<OpField>,
}

#[derive(Debug, Deserialize)]
struct OpField {
    id: Option<String>,
    label: Option<String>,
    value: Option<String>,
}

impl OpField {
    fn is(&self, name: &str) -> bool {
        self.label.as_deref() == Some(name) || self.id.as_deref() == Some(name)
    }
}

/// Pulls the login pair out of `op item get <item> --vault <vault> --format json`.
///
/// The first field whose label or id is `username` supplies the login, the first
/// `password` field the secret.
pub struct PasswordManagerSource {
    program: String,
    item: String,
    vault: String,
}

impl PasswordManagerSource {
    pub fn new(item: impl Into<String>, vault: impl Into<String>) -> Self {
        Self {
            program: DEFAULT_OP_PROGRAM.to_string(),
            item: item.into(),
            vault: vault.into(),
        }
    }

    /// Run a different executable instead of `op` from `PATH`.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn error(&self, detail: impl Into<String>) -> CoreError {
        CoreError::CredentialSource {
            source_name: self.name().to_string(),
            detail: detail.into(),
        }
    }
}

impl Default for PasswordManagerSource {
    fn default() -> Self {
        Self::new(DEFAULT_OP_ITEM, DEFAULT_OP_VAULT)
    }
}

/// Extracts username and password from an `op item get` JSON document.
pub(crate) fn parse_item(json: &str) -> Result<CredentialCandidate, serde_json::Error> {
    let item: OpItem = serde_json::from_str(json)?;
    let field_value = |name: &str| {
        item.fields
            .iter()
            .find(|f| f.is(name))
            .and_then(|f| f.value.clone())
    };
    Ok(CredentialCandidate::new(
        field_value("username"),
        field_value("password"),
    ))
}

#[async_trait]
impl CredentialSource for PasswordManagerSource {
    fn name(&self) -> &str {
        "1password"
    }

    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>> {
        let output = Command::new(&self.program)
            .args(["item", "get", &self.item, "--vault", &self.vault, "--format", "json"])
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("'{}' not installed, skipping", self.program);
                return Ok(None);
            }
            Err(e) => return Err(self.error(format!("failed to run '{}': {e}", self.program))),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.error(format!(
                "'{} item get' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let candidate = parse_item(&stdout).map_err(|e| self.error(format!("invalid item JSON: {e}")))?;
        Ok((!candidate.is_empty()).then_some(candidate))
    }
}

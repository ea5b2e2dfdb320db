//! Settings file and the reconcile plan built from it
//!
//! Every field has a default, so a run without a settings file reproduces the
//! A-to-CNAME migration of the five localized subdomains.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kas_dns_provider::{
    DnsRecordSpec, RecordType, ACTION_DELETE_DNS_SETTINGS, ACTION_GET_DNS_SETTINGS,
    DEFAULT_HUB_ENDPOINT, DEFAULT_KAS_ENDPOINT, DEFAULT_NAMESERVER,
};
use serde::{Deserialize, Serialize};

use crate::credentials::{
    DEFAULT_DOTENV_PATH, DEFAULT_HUB_TOKEN_VAR, DEFAULT_OP_ITEM, DEFAULT_OP_VAULT,
    DEFAULT_PASSWORD_VAR, DEFAULT_USER_VAR,
};
use crate::error::{CoreError, CoreResult};

pub const DEFAULT_ZONE: &str = "baltic-ihub.com";
pub const DEFAULT_CNAME_TARGET: &str = "7c6be46a197dc3f0.vercel-dns-017.com.";
pub const DEFAULT_DELAY_SECS: u64 = 3;
pub const MAX_DELAY_SECS: u64 = 60;

/// Localized subdomains managed by default, with their language codes.
const DEFAULT_TARGETS: [(&str, &str); 5] = [
    ("notstromaggregat", "DE"),
    ("backup-generator", "EN"),
    ("groupe-electrogene", "FR"),
    ("noodaggregaat", "NL"),
    ("agregat-pradotworczy", "PL"),
];

/// Root of the TOML settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub kas: KasSettings,
    pub hub: HubSettings,
    pub credentials: CredentialSettings,
    pub reconcile: ReconcileSettings,
}

/// `[kas]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KasSettings {
    pub endpoint: String,
    pub nameserver: String,
    pub timeout_secs: u64,
}

impl Default for KasSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_KAS_ENDPOINT.to_string(),
            nameserver: DEFAULT_NAMESERVER.to_string(),
            timeout_secs: 60,
        }
    }
}

/// `[hub]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubSettings {
    pub endpoint: String,
    /// Environment variable holding the bearer token
    pub token_var: String,
    pub timeout_secs: u64,
    /// KAS action name -> hub tool name, on top of the built-in add mapping
    pub tools: BTreeMap<String, String>,
    /// Hub tool that hands out the KAS login; enables the remote credential source
    pub credential_tool: Option<String>,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_HUB_ENDPOINT.to_string(),
            token_var: DEFAULT_HUB_TOKEN_VAR.to_string(),
            timeout_secs: 30,
            tools: BTreeMap::new(),
            credential_tool: None,
        }
    }
}

/// `[credentials]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialSettings {
    pub user_var: String,
    pub password_var: String,
    pub dotenv_path: PathBuf,
    pub op_item: String,
    pub op_vault: String,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            user_var: DEFAULT_USER_VAR.to_string(),
            password_var: DEFAULT_PASSWORD_VAR.to_string(),
            dotenv_path: PathBuf::from(DEFAULT_DOTENV_PATH),
            op_item: DEFAULT_OP_ITEM.to_string(),
            op_vault: DEFAULT_OP_VAULT.to_string(),
        }
    }
}

/// Mode names as written in the settings file and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Add,
    Replace,
    Prune,
}

impl ModeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Prune => "prune",
        }
    }
}

impl std::str::FromStr for ModeName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            "prune" => Ok(Self::Prune),
            other => Err(CoreError::Config(format!(
                "unknown mode '{other}' (expected add, replace or prune)"
            ))),
        }
    }
}

/// `[reconcile]` plus its `[[reconcile.records]]` targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileSettings {
    pub zone: String,
    pub mode: ModeName,
    /// Type deleted by `replace` and `prune`
    pub remove_type: RecordType,
    pub delay_secs: u64,
    pub records: Vec<DnsRecordSpec>,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_string(),
            mode: ModeName::Replace,
            remove_type: RecordType::A,
            delay_secs: DEFAULT_DELAY_SECS,
            records: default_records(),
        }
    }
}

fn default_records() -> Vec<DnsRecordSpec> {
    DEFAULT_TARGETS
        .iter()
        .map(|(name, label)| {
            DnsRecordSpec::new(*name, RecordType::Cname, DEFAULT_CNAME_TARGET).with_label(*label)
        })
        .collect()
}

/// What the reconciler does per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Add the desired record only.
    Add,
    /// Delete records of `remove_type` under the target name, then add.
    Replace { remove_type: RecordType },
    /// Delete records of `remove_type` under the target name; add nothing.
    Prune { remove_type: RecordType },
}

impl ReconcileMode {
    /// Type deleted before adding, if any.
    pub fn remove_type(self) -> Option<RecordType> {
        match self {
            Self::Add => None,
            Self::Replace { remove_type } | Self::Prune { remove_type } => Some(remove_type),
        }
    }

    pub fn adds(self) -> bool {
        !matches!(self, Self::Prune { .. })
    }
}

impl std::fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Replace { remove_type } => write!(f, "replace {remove_type}"),
            Self::Prune { remove_type } => write!(f, "prune {remove_type}"),
        }
    }
}

/// Immutable input of one reconcile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub zone: String,
    pub targets: Vec<DnsRecordSpec>,
    pub mode: ReconcileMode,
    /// Pause between two targets; none after the last
    pub delay: Duration,
}

impl Settings {
    /// Read a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> CoreResult<()> {
        let reconcile = &self.reconcile;
        if reconcile.zone.trim().is_empty() {
            return Err(CoreError::Config("zone must not be empty".into()));
        }
        if reconcile.records.is_empty() {
            return Err(CoreError::Config("no target records configured".into()));
        }
        for (i, record) in reconcile.records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CoreError::Config(format!("record #{} has an empty name", i + 1)));
            }
            if record.value.trim().is_empty() {
                return Err(CoreError::Config(format!(
                    "record '{}' has an empty value",
                    record.name
                )));
            }
        }
        if reconcile.delay_secs > MAX_DELAY_SECS {
            return Err(CoreError::Config(format!(
                "delay_secs must be between 0 and {MAX_DELAY_SECS}, got {}",
                reconcile.delay_secs
            )));
        }
        Ok(())
    }

    /// Reject a hub run whose mode deletes records when the hub has no tool to list
    /// or delete them; otherwise every target would fail one by one.
    pub fn check_hub_tools(&self) -> CoreResult<()> {
        if self.reconcile.mode == ModeName::Add {
            return Ok(());
        }
        let missing: Vec<&str> = [ACTION_GET_DNS_SETTINGS, ACTION_DELETE_DNS_SETTINGS]
            .into_iter()
            .filter(|action| !self.hub.tools.contains_key(*action))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CoreError::Config(format!(
            "mode '{}' needs hub tools for {}; map them under [hub.tools] or use mode add",
            self.reconcile.mode.as_str(),
            missing.join(" and ")
        )))
    }

    /// Validate and freeze into a [`ReconcilePlan`].
    pub fn plan(&self) -> CoreResult<ReconcilePlan> {
        self.validate()?;
        let reconcile = &self.reconcile;
        let mode = match reconcile.mode {
            ModeName::Add => ReconcileMode::Add,
            ModeName::Replace => ReconcileMode::Replace {
                remove_type: reconcile.remove_type,
            },
            ModeName::Prune => ReconcileMode::Prune {
                remove_type: reconcile.remove_type,
            },
        };
        Ok(ReconcilePlan {
            zone: reconcile.zone.trim().to_string(),
            targets: reconcile.records.clone(),
            mode,
            delay: Duration::from_secs(reconcile.delay_secs),
        })
    }
}

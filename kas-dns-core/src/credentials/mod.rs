//! KAS login and hub token resolution

mod dotenv;
mod env;
mod normalize;
mod password_manager;
mod remote_hub;
mod resolver;

use std::sync::Arc;

use kas_dns_provider::HubClient;

pub use dotenv::{DotenvFileSource, DEFAULT_DOTENV_PATH};
pub use env::{EnvSource, DEFAULT_PASSWORD_VAR, DEFAULT_USER_VAR};
pub use normalize::normalize;
pub use password_manager::{
    PasswordManagerSource, DEFAULT_OP_ITEM, DEFAULT_OP_PROGRAM, DEFAULT_OP_VAULT,
};
pub use remote_hub::{RemoteHubSource, DEFAULT_HUB_TOKEN_VAR};
pub use resolver::CredentialResolver;

use crate::config::{CredentialSettings, HubSettings};
use crate::error::{CoreError, CoreResult};

/// Resolver over the standard sources: environment, dot-env file, 1Password and,
/// when `hub` is given, the hub credential tool.
pub fn default_resolver(
    settings: &CredentialSettings,
    hub: Option<(Arc<HubClient>, String)>,
) -> CredentialResolver {
    let mut sources: Vec<Box<dyn crate::traits::CredentialSource>> = vec![
        Box::new(EnvSource::new(&settings.user_var, &settings.password_var)),
        Box::new(DotenvFileSource::new(
            &settings.dotenv_path,
            &settings.user_var,
            &settings.password_var,
        )),
        Box::new(PasswordManagerSource::new(&settings.op_item, &settings.op_vault)),
    ];
    if let Some((client, tool)) = hub {
        sources.push(Box::new(RemoteHubSource::new(client, tool)));
    }
    CredentialResolver::new(sources)
}

/// Hub bearer token from the environment.
pub fn resolve_hub_token(token_var: &str) -> CoreResult<String> {
    hub_token_from(token_var, std::env::var(token_var).ok())
}

fn hub_token_from(token_var: &str, raw: Option<String>) -> CoreResult<String> {
    raw.map(|v| normalize(&v))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::CredentialsUnavailable {
            attempted: vec![format!("environment ({token_var})")],
        })
}

/// Shell instructions printed when no KAS login could be found.
pub fn remediation(settings: &CredentialSettings) -> String {
    format!(
        "Set the KAS login with one of:\n\
         1. Environment variables:\n   \
            export {user}=<login>\n   \
            export {pass}=<password>\n\
         2. A key=value file at {path} with the same two keys\n\
         3. 1Password (vault '{vault}', item '{item}'):\n   \
            op read 'op://{vault}/{item}/username'\n   \
            op read 'op://{vault}/{item}/password'",
        user = settings.user_var,
        pass = settings.password_var,
        path = settings.dotenv_path.display(),
        vault = settings.op_vault,
        item = settings.op_item,
    )
}

/// Shell instructions printed when the hub token is missing.
pub fn hub_token_remediation(settings: &HubSettings) -> String {
    format!(
        "Set the hub token:\n   \
            export {var}=<token>\n\
         or from 1Password:\n   \
            export {var}=$(op read 'op://Automation/MCP Hub Token/credential')",
        var = settings.token_var,
    )
}

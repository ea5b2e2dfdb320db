//! Hub error construction

use crate::error::ProviderError;
use crate::traits::ProviderErrorMapper;

use super::HubClient;

impl ProviderErrorMapper for HubClient {
    fn provider_name(&self) -> &'static str {
        "hub"
    }
}

impl HubClient {
    pub(crate) fn unsupported_action(&self, action: &str) -> ProviderError {
        ProviderError::UnsupportedAction {
            provider: self.provider_name().to_string(),
            action: action.to_string(),
        }
    }
}

//! KAS error construction

use crate::traits::ProviderErrorMapper;

use super::KasClient;

impl ProviderErrorMapper for KasClient {
    fn provider_name(&self) -> &'static str {
        "kas"
    }
}

//! Shared helpers for live tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use kas_dns_provider::{ApiClient, Credential, KasClient};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Live client plus the zone it may read.
pub struct TestContext {
    pub client: Arc<dyn ApiClient>,
    pub zone: String,
}

impl TestContext {
    /// KAS client from `ALL_INKL_KAS_USER`, `ALL_INKL_KAS_PASSWORD` and `TEST_ZONE`.
    pub fn kas() -> Option<Self> {
        let user = env::var("ALL_INKL_KAS_USER").ok()?;
        let password = env::var("ALL_INKL_KAS_PASSWORD").ok()?;
        let zone = env::var("TEST_ZONE").ok()?;
        let client = KasClient::new(Credential::new(user, password)).ok()?;
        Some(Self {
            client: Arc::new(client),
            zone,
        })
    }
}

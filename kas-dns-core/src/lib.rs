//! KAS DNS Core Library
//!
//! Everything between the wire clients and the command line:
//! - Credential resolution (environment, dot-env file, 1Password, hub credential tool)
//! - Settings file and the immutable reconcile plan
//! - Record reconciliation (list, delete stale, add) and the run summary
//!
//! The API client is injected as `Arc<dyn ApiClient>`, so the same reconciler runs
//! against the direct SOAP client, the hub relay, or a test double.

pub mod config;
pub mod credentials;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{ReconcileMode, ReconcilePlan, Settings};
pub use credentials::CredentialResolver;
pub use error::{CoreError, CoreResult};
pub use services::Reconciler;
pub use traits::{CredentialCandidate, CredentialSource};
pub use types::{OperationOutcome, OperationResult, RunSummary};

//! Credential source abstraction

mod credential_source;

pub use credential_source::{CredentialCandidate, CredentialSource};

//! Response classification
//!
//! KAS replies are matched by string and regex rather than parsed against a schema:
//! the success marker and the `faultstring` element are the only stable parts of the reply.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Outcome;
use crate::utils::log_sanitizer::snippet;

/// Literal marker the KAS API puts in the body of a successful reply.
pub const TRUE_MARKER: &str = "TRUE";

/// Maximum number of characters kept from an unrecognized body.
pub const SNIPPET_LIMIT: usize = 200;

/// Phrases (lowercase) that turn a fault into [`Outcome::AlreadyExists`].
const ALREADY_EXISTS_PHRASES: [&str; 2] = ["already exists", "bereits vorhanden"];

static FAULT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"<faultstring>([^<]+)</faultstring>").ok());

/// Classifies a raw SOAP reply.
///
/// The success marker is checked before the fault element.
pub fn interpret(raw: &str) -> Outcome {
    if raw.contains(TRUE_MARKER) {
        return Outcome::Success;
    }

    if let Some(message) = fault_message(raw) {
        return classify_fault(message);
    }

    Outcome::Unrecognized(snippet(raw, SNIPPET_LIMIT))
}

/// Text between the first `<faultstring>` tags, unmodified.
pub fn fault_message(raw: &str) -> Option<String> {
    FAULT_RE
        .as_ref()?
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Turns a provider fault message into an outcome, downgrading "already exists" faults.
pub fn classify_fault(message: String) -> Outcome {
    if is_already_exists(&message) {
        Outcome::AlreadyExists
    } else {
        Outcome::Fault(message)
    }
}

/// Whether a fault message reports an already existing record (English or German).
pub fn is_already_exists(message: &str) -> bool {
    let lower = message.to_lowercase();
    ALREADY_EXISTS_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

//! Utility modules.

/// Log sanitization and bounded snippets of response bodies.
pub mod log_sanitizer;

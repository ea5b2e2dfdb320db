//! Run result types

use std::fmt;
use std::time::Duration;

use kas_dns_provider::DnsRecordSpec;
use serde::Serialize;

/// How one target ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The desired record was added.
    Created,
    /// The provider already had the desired record.
    AlreadyExists,
    /// Matching records were deleted and nothing was added.
    Removed,
    Failed,
}

impl OperationOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::AlreadyExists => "already exists",
            Self::Removed => "removed",
            Self::Failed => "failed",
        })
    }
}

/// Result for one target record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub subject: DnsRecordSpec,
    pub outcome: OperationOutcome,
    pub detail: String,
}

impl OperationResult {
    pub fn new(subject: DnsRecordSpec, outcome: OperationOutcome, detail: impl Into<String>) -> Self {
        Self {
            subject,
            outcome,
            detail: detail.into(),
        }
    }

    pub fn failed(subject: DnsRecordSpec, detail: impl Into<String>) -> Self {
        Self::new(subject, OperationOutcome::Failed, detail)
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.subject.label {
            write!(f, "{label}: ")?;
        }
        write!(
            f,
            "{} {} -> {}: {}",
            self.subject.name, self.subject.record_type, self.subject.value, self.outcome
        )?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

/// Every target's result, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub results: Vec<OperationResult>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    /// Targets to retry by hand.
    pub fn failed(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    /// `"<ok>/<total> successful"`
    pub fn headline(&self) -> String {
        format!("{}/{} successful", self.success_count(), self.results.len())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "{} in {:.1}s", self.headline(), self.elapsed.as_secs_f64())?;
        if self.failure_count() > 0 {
            writeln!(f, "Failed:")?;
            for result in self.failed() {
                match &result.subject.label {
                    Some(label) => writeln!(f, "  {} ({label})", result.subject.name)?,
                    None => writeln!(f, "  {}", result.subject.name)?,
                }
            }
        }
        Ok(())
    }
}

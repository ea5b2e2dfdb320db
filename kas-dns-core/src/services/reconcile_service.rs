//! DNS record reconciliation service

use std::sync::Arc;

use kas_dns_provider::{ApiClient, DnsRecordSpec, Outcome, RecordType};
use tokio::time::{sleep, Instant};

use crate::config::ReconcilePlan;
use crate::types::{OperationOutcome, OperationResult, RunSummary};

/// Drives live DNS state toward the plan's target records.
///
/// Targets are processed one after another. Each target re-lists the zone, so
/// nothing is cached between targets or runs.
pub struct Reconciler {
    client: Arc<dyn ApiClient>,
    plan: ReconcilePlan,
}

/// What happened to the stale records of one target.
#[derive(Default)]
struct Cleanup {
    removed: usize,
    failures: Vec<String>,
}

impl Reconciler {
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>, plan: ReconcilePlan) -> Self {
        Self { client, plan }
    }

    pub fn plan(&self) -> &ReconcilePlan {
        &self.plan
    }

    /// Process every target; failures are recorded and the run continues.
    pub async fn run(&self) -> RunSummary {
        let started = Instant::now();
        let total = self.plan.targets.len();
        log::info!(
            "[{}] Reconciling {total} record(s) in {} ({})",
            self.client.id(),
            self.plan.zone,
            self.plan.mode
        );

        let mut results = Vec::with_capacity(total);
        for (index, target) in self.plan.targets.iter().enumerate() {
            let result = self.reconcile_target(target).await;
            if result.outcome.is_success() {
                log::info!("{result}");
            } else {
                log::warn!("{result}");
            }
            results.push(result);

            if index + 1 < total && !self.plan.delay.is_zero() {
                sleep(self.plan.delay).await;
            }
        }

        RunSummary {
            results,
            elapsed: started.elapsed(),
        }
    }

    async fn reconcile_target(&self, target: &DnsRecordSpec) -> OperationResult {
        let zone = &self.plan.zone;
        log::info!("Processing {}", target.fqdn(zone));

        let cleanup = match self.plan.mode.remove_type() {
            Some(remove_type) => match self.remove_stale(target, remove_type).await {
                Ok(cleanup) => cleanup,
                Err(detail) => return OperationResult::failed(target.clone(), detail),
            },
            None => Cleanup::default(),
        };

        if !self.plan.mode.adds() {
            return if cleanup.failures.is_empty() {
                let detail = match self.plan.mode.remove_type() {
                    Some(t) if cleanup.removed > 0 => {
                        format!("deleted {} {t} record(s)", cleanup.removed)
                    }
                    _ => "nothing to remove".to_string(),
                };
                OperationResult::new(target.clone(), OperationOutcome::Removed, detail)
            } else {
                OperationResult::failed(target.clone(), cleanup.failures.join("; "))
            };
        }

        let (outcome, add_detail) = match self.client.add_record(zone, target).await {
            Ok(Outcome::Success) => (OperationOutcome::Created, String::new()),
            Ok(Outcome::AlreadyExists) => (OperationOutcome::AlreadyExists, String::new()),
            Ok(other) => (OperationOutcome::Failed, format!("add: {other}")),
            Err(e) => (OperationOutcome::Failed, format!("add: {e}")),
        };

        let delete_failed = !cleanup.failures.is_empty();
        let mut details = Vec::new();
        if cleanup.removed > 0 {
            details.push(format!("deleted {} stale record(s)", cleanup.removed));
        }
        details.extend(cleanup.failures);
        if !add_detail.is_empty() {
            details.push(add_detail);
        }

        let outcome = if delete_failed {
            OperationOutcome::Failed
        } else {
            outcome
        };
        OperationResult::new(target.clone(), outcome, details.join("; "))
    }

    /// Delete every record under the target's name with the type being removed.
    ///
    /// `Err` only when the zone could not be listed.
    async fn remove_stale(
        &self,
        target: &DnsRecordSpec,
        remove_type: RecordType,
    ) -> Result<Cleanup, String> {
        let records = self
            .client
            .list_records(&self.plan.zone)
            .await
            .map_err(|e| format!("listing records failed: {e}"))?;

        let stale: Vec<_> = records
            .iter()
            .filter(|r| r.name == target.name && remove_type.matches(&r.record_type))
            .collect();
        log::debug!(
            "{} of {} record(s) match {} {remove_type}",
            stale.len(),
            records.len(),
            target.name
        );

        let mut cleanup = Cleanup::default();
        for record in stale {
            match self.client.delete_record(&record.id).await {
                Ok(outcome) if outcome.is_success() => {
                    log::info!(
                        "Deleted {} {} -> {} (id {})",
                        record.name,
                        record.record_type,
                        record.value,
                        record.id
                    );
                    cleanup.removed += 1;
                }
                Ok(outcome) => {
                    log::warn!("Delete of record {} failed: {outcome}", record.id);
                    cleanup
                        .failures
                        .push(format!("delete {}: {outcome}", record.id));
                }
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Delete of record {} failed: {e}", record.id);
                    } else {
                        log::error!("Delete of record {} failed: {e}", record.id);
                    }
                    cleanup.failures.push(format!("delete {}: {e}", record.id));
                }
            }
        }
        Ok(cleanup)
    }
}

//! Test helpers
//!
//! Scripted API client and in-memory credential sources.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use kas_dns_provider::{
    ActionParams, ApiClient, DnsRecordSpec, DnsRecordState, Outcome, ProviderError,
    Result as ProviderResult,
};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialCandidate, CredentialSource};

// ===== MockApiClient =====

/// One request seen by [`MockApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List { zone: String },
    Delete { record_id: String },
    Add { zone: String, name: String, record_type: String },
    Action { action: String },
}

/// In-memory [`ApiClient`].
///
/// `list_records` pops scripted replies first and falls back to the fixed record set.
/// Add and delete answer `Success` unless an outcome was scripted for the record name / id.
pub struct MockApiClient {
    records: Vec<DnsRecordState>,
    list_script: Mutex<VecDeque<ProviderResult<Vec<DnsRecordState>>>>,
    add_results: HashMap<String, ProviderResult<Outcome>>,
    delete_results: HashMap<String, ProviderResult<Outcome>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            list_script: Mutex::new(VecDeque::new()),
            add_results: HashMap::new(),
            delete_results: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_record(mut self, id: &str, name: &str, record_type: &str, value: &str) -> Self {
        self.records.push(DnsRecordState {
            id: id.to_string(),
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Answer the next not-yet-scripted list call with `result`.
    pub fn script_list(mut self, result: ProviderResult<Vec<DnsRecordState>>) -> Self {
        self.list_script.get_mut().push_back(result);
        self
    }

    pub fn add_result(mut self, name: &str, result: ProviderResult<Outcome>) -> Self {
        self.add_results.insert(name.to_string(), result);
        self
    }

    pub fn delete_result(mut self, record_id: &str, result: ProviderResult<Outcome>) -> Self {
        self.delete_results.insert(record_id.to_string(), result);
        self
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection refused".to_string(),
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn call(&self, action: &str, _params: &ActionParams) -> ProviderResult<Outcome> {
        self.calls.lock().await.push(MockCall::Action {
            action: action.to_string(),
        });
        Ok(Outcome::Success)
    }

    async fn list_records(&self, zone: &str) -> ProviderResult<Vec<DnsRecordState>> {
        self.calls.lock().await.push(MockCall::List {
            zone: zone.to_string(),
        });
        match self.list_script.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(self.records.clone()),
        }
    }

    async fn add_record(&self, zone: &str, spec: &DnsRecordSpec) -> ProviderResult<Outcome> {
        self.calls.lock().await.push(MockCall::Add {
            zone: zone.to_string(),
            name: spec.name.clone(),
            record_type: spec.record_type.to_string(),
        });
        self.add_results
            .get(&spec.name)
            .cloned()
            .unwrap_or(Ok(Outcome::Success))
    }

    async fn delete_record(&self, record_id: &str) -> ProviderResult<Outcome> {
        self.calls.lock().await.push(MockCall::Delete {
            record_id: record_id.to_string(),
        });
        self.delete_results
            .get(record_id)
            .cloned()
            .unwrap_or(Ok(Outcome::Success))
    }
}

// ===== StaticSource =====

enum StaticReply {
    Nothing,
    Found(CredentialCandidate),
    Fails(String),
}

/// Credential source with a fixed answer that counts how often it was read.
pub struct StaticSource {
    name: String,
    reply: StaticReply,
    calls: Arc<AtomicUsize>,
}

impl StaticSource {
    fn with_reply(name: &str, reply: StaticReply) -> Self {
        Self {
            name: name.to_string(),
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty(name: &str) -> Self {
        Self::with_reply(name, StaticReply::Nothing)
    }

    pub fn pair(name: &str, account_id: &str, secret: &str) -> Self {
        Self::partial(name, Some(account_id), Some(secret))
    }

    pub fn partial(name: &str, account_id: Option<&str>, secret: Option<&str>) -> Self {
        let candidate = CredentialCandidate::new(
            account_id.map(str::to_string),
            secret.map(str::to_string),
        );
        Self::with_reply(name, StaticReply::Found(candidate))
    }

    pub fn failing(name: &str, detail: &str) -> Self {
        Self::with_reply(name, StaticReply::Fails(detail.to_string()))
    }

    /// Shared read counter
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CredentialSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StaticReply::Nothing => Ok(None),
            StaticReply::Found(candidate) => Ok(Some(candidate.clone())),
            StaticReply::Fails(detail) => Err(CoreError::CredentialSource {
                source_name: self.name.clone(),
                detail: detail.clone(),
            }),
        }
    }
}

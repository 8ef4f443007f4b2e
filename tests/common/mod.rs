#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::json;

use graphflux::events::GraphEvent;
use graphflux::gateway::{GatewayError, RemoteGateway};
use graphflux::pipeline::{GraphStore, MemorySink, PipelineConfig};
use graphflux::types::{
    AlgorithmType, DfgFilters, FuzzyFilters, Graph, GraphParameter, ParamValue, ViewDraft,
};

/// Cloneable stand-in for the non-Clone `GatewayError`; rebuilt per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Unauthorized,
    NotFound,
    Server,
    Transport,
}

impl Failure {
    pub fn into_error(self) -> GatewayError {
        match self {
            Failure::Unauthorized => GatewayError::Unauthorized,
            Failure::NotFound => GatewayError::NotFound,
            Failure::Server => GatewayError::Server { status: 500 },
            Failure::Transport => GatewayError::Transport("connection reset by peer".into()),
        }
    }
}

/// One scripted response: optional delay before resolving, then the result.
pub struct Scripted<T> {
    pub delay: Duration,
    pub result: Result<T, Failure>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self::ok_after(Duration::ZERO, value)
    }

    pub fn ok_after(delay: Duration, value: T) -> Self {
        Self {
            delay,
            result: Ok(value),
        }
    }

    pub fn fail(failure: Failure) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(failure),
        }
    }
}

/// Record of one gateway invocation, with enough payload to assert on.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    FetchDraft(String),
    CommitDraft(String),
    FetchParameters(String),
    UpdateParameter(GraphParameter),
    ComputeDfg(String, DfgFilters),
    ComputeFuzzy(String, FuzzyFilters),
}

/// Programmable gateway. Scripted responses are consumed front-to-back per
/// operation; an empty queue falls back to a benign default so tests only
/// script what they assert on.
#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    drafts: Mutex<VecDeque<Scripted<ViewDraft>>>,
    parameters: Mutex<VecDeque<Scripted<Vec<GraphParameter>>>>,
    graphs: Mutex<VecDeque<Scripted<Graph>>>,
    commits: Mutex<VecDeque<Scripted<()>>>,
    update_delays: Mutex<FxHashMap<String, Duration>>,
    update_failures: Mutex<FxHashMap<String, Failure>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script_draft(&self, scripted: Scripted<ViewDraft>) {
        self.drafts.lock().unwrap().push_back(scripted);
    }

    pub fn script_parameters(&self, scripted: Scripted<Vec<GraphParameter>>) {
        self.parameters.lock().unwrap().push_back(scripted);
    }

    pub fn script_graph(&self, scripted: Scripted<Graph>) {
        self.graphs.lock().unwrap().push_back(scripted);
    }

    pub fn script_commit(&self, scripted: Scripted<()>) {
        self.commits.lock().unwrap().push_back(scripted);
    }

    pub fn delay_update(&self, param_id: &str, delay: Duration) {
        self.update_delays
            .lock()
            .unwrap()
            .insert(param_id.to_owned(), delay);
    }

    pub fn fail_update(&self, param_id: &str, failure: Failure) {
        self.update_failures
            .lock()
            .unwrap()
            .insert(param_id.to_owned(), failure);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count_calls(&self, predicate: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn resolve<T>(
        queue: &Mutex<VecDeque<Scripted<T>>>,
        default: impl FnOnce() -> T,
    ) -> Result<T, GatewayError> {
        let scripted = queue.lock().unwrap().pop_front();
        match scripted {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result.map_err(Failure::into_error)
            }
            None => Ok(default()),
        }
    }
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn fetch_draft(&self, view_id: &str) -> Result<ViewDraft, GatewayError> {
        self.record(GatewayCall::FetchDraft(view_id.to_owned()));
        Self::resolve(&self.drafts, || ViewDraft::new("draft-default")).await
    }

    async fn commit_draft(&self, draft_id: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::CommitDraft(draft_id.to_owned()));
        Self::resolve(&self.commits, || ()).await
    }

    async fn fetch_draft_parameters(
        &self,
        draft_id: &str,
    ) -> Result<Vec<GraphParameter>, GatewayError> {
        self.record(GatewayCall::FetchParameters(draft_id.to_owned()));
        Self::resolve(&self.parameters, Vec::new).await
    }

    async fn update_parameter(
        &self,
        param_id: &str,
        param: &GraphParameter,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::UpdateParameter(param.clone()));
        let delay = self
            .update_delays
            .lock()
            .unwrap()
            .get(param_id)
            .copied()
            .unwrap_or(Duration::ZERO);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let failure = self.update_failures.lock().unwrap().get(param_id).copied();
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }

    async fn compute_graph_dfg(
        &self,
        draft_id: &str,
        filters: &DfgFilters,
    ) -> Result<Graph, GatewayError> {
        self.record(GatewayCall::ComputeDfg(draft_id.to_owned(), filters.clone()));
        Self::resolve(&self.graphs, sample_graph).await
    }

    async fn compute_graph_fuzzy(
        &self,
        draft_id: &str,
        filters: &FuzzyFilters,
    ) -> Result<Graph, GatewayError> {
        self.record(GatewayCall::ComputeFuzzy(
            draft_id.to_owned(),
            filters.clone(),
        ));
        Self::resolve(&self.graphs, sample_graph).await
    }
}

/// Fast timings so debounce/timeout behavior is observable without slowing
/// the suite down.
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        debounce: Duration::from_millis(40),
        save_timeout: Duration::from_millis(60),
    }
}

pub fn spawn_store(gateway: Arc<MockGateway>) -> (GraphStore, MemorySink) {
    let store = GraphStore::spawn(gateway, test_config());
    let sink = MemorySink::new();
    store.add_sink(sink.clone());
    (store, sink)
}

/// Let the event loop and any in-flight workflows run.
pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

pub fn sample_graph() -> Graph {
    let mut graph = Graph {
        metrics: json!({"events": 120, "cases": 8}),
        ..Default::default()
    };
    graph
        .body
        .insert("nodes".into(), json!([{"id": "a"}, {"id": "b"}]));
    graph
}

pub fn draft(id: &str) -> ViewDraft {
    ViewDraft::new(id)
}

pub fn param(id: &str, method: AlgorithmType, key: &str, value: f64) -> GraphParameter {
    GraphParameter::new(id, method, key, value)
}

pub fn labels(events: &[GraphEvent]) -> Vec<&'static str> {
    events.iter().map(GraphEvent::label).collect()
}

pub fn count_label(events: &[GraphEvent], label: &str) -> usize {
    events.iter().filter(|e| e.label() == label).count()
}

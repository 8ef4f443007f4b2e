//! The trigger-keyed workflows of the orchestration pipeline.
//!
//! Each workflow is an independent reactive rule: it fires on one event,
//! reads a snapshot of current state at the moment it runs, calls the remote
//! gateway, and emits zero or more follow-up events back into the stream.
//! Failures never escape a workflow; they are folded into events (or the
//! session signal) by the shared [`failure`](super::failure) translator.
//!
//! Cancellation uses generation counters: the event loop bumps a workflow's
//! counter synchronously at trigger time, and a running task re-checks its
//! generation after every await, discarding stale results. This gives the
//! draft-creation and graph-refetch workflows their latest-wins semantics
//! without aborting tasks mid-flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::join_all;
use parking_lot::RwLock;
use tokio::task;
use tracing::{debug, instrument, warn};

use crate::events::GraphEvent;
use crate::gateway::{GatewayError, RemoteGateway};
use crate::state::GraphState;
use crate::types::{AlgorithmType, DfgFilters, FuzzyFilters, project_filter_map};

use super::config::PipelineConfig;
use super::failure;
use super::store::SessionSignal;

/// Shared environment handed to every workflow task.
pub(crate) struct PipelineContext {
    pub(crate) state: RwLock<GraphState>,
    pub(crate) gateway: Arc<dyn RemoteGateway>,
    pub(crate) events: flume::Sender<GraphEvent>,
    pub(crate) session: flume::Sender<SessionSignal>,
    pub(crate) config: PipelineConfig,
    draft_generation: AtomicU64,
    refetch_generation: AtomicU64,
}

impl PipelineContext {
    pub(crate) fn new(
        gateway: Arc<dyn RemoteGateway>,
        events: flume::Sender<GraphEvent>,
        session: flume::Sender<SessionSignal>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            state: RwLock::new(GraphState::default()),
            gateway,
            events,
            session,
            config,
            draft_generation: AtomicU64::new(0),
            refetch_generation: AtomicU64::new(0),
        }
    }

    /// Clone of the current state, taken synchronously at call time.
    pub(crate) fn snapshot(&self) -> GraphState {
        self.state.read().clone()
    }

    /// Emit a follow-up event into the stream. A closed stream only happens
    /// during shutdown; the follow-up is then dropped with a breadcrumb.
    pub(crate) fn emit(&self, event: GraphEvent) {
        if self.events.send(event).is_err() {
            warn!("event stream closed; follow-up event dropped");
        }
    }
}

/// Entry point called by the event loop for every processed event, after the
/// pure transition has been applied. Generation bumps happen here, on the
/// loop, so a burst of triggers supersedes deterministically in stream order.
pub(crate) fn trigger(ctx: &Arc<PipelineContext>, event: &GraphEvent) {
    match event {
        GraphEvent::CreateDraft(view_id) => {
            let generation = ctx.draft_generation.fetch_add(1, Ordering::SeqCst) + 1;
            let ctx = Arc::clone(ctx);
            let view_id = view_id.clone();
            task::spawn(async move { create_draft(ctx, view_id, generation).await });
        }
        GraphEvent::SetDraft(draft) => {
            // Post-load reset runs unconditionally; the parameter fetch is an
            // independent workflow on the same trigger.
            ctx.emit(GraphEvent::SetDfgFilters(DfgFilters::default()));
            ctx.emit(GraphEvent::SetFuzzyFilters(FuzzyFilters::default()));
            ctx.emit(GraphEvent::GetGraph);

            let ctx = Arc::clone(ctx);
            let draft_id = draft.id.clone();
            task::spawn(async move { fetch_parameters(ctx, draft_id).await });
        }
        GraphEvent::SaveDraft => {
            let ctx = Arc::clone(ctx);
            task::spawn(async move { save_draft(ctx).await });
        }
        GraphEvent::SaveDraftComplete => {
            let ctx = Arc::clone(ctx);
            task::spawn(async move { commit_draft(ctx).await });
        }
        GraphEvent::SetAlgorithmType(_) => {
            ctx.emit(GraphEvent::GetGraph);
        }
        GraphEvent::GetGraph => {
            let generation = ctx.refetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
            let ctx = Arc::clone(ctx);
            task::spawn(async move { refetch_graph(ctx, generation).await });
        }
        GraphEvent::SetUserParams(params) => {
            // Projection is pure; both filter shapes receive the same map and
            // each consumes only the keys relevant to its algorithm.
            let map = project_filter_map(params);
            ctx.emit(GraphEvent::SetDfgFilters(DfgFilters::from(map.clone())));
            ctx.emit(GraphEvent::SetFuzzyFilters(FuzzyFilters::from(map)));
        }
        _ => {}
    }
}

/// Draft-creation workflow. Latest-wins: a newer trigger makes this result
/// stale, and stale drafts must never reach state.
#[instrument(skip(ctx), fields(view_id = %view_id, generation))]
async fn create_draft(ctx: Arc<PipelineContext>, view_id: String, generation: u64) {
    let result = ctx.gateway.fetch_draft(&view_id).await;
    if ctx.draft_generation.load(Ordering::SeqCst) != generation {
        debug!("draft fetch superseded; discarding result");
        return;
    }
    match result {
        Ok(draft) => ctx.emit(GraphEvent::SetDraft(draft)),
        Err(err) => failure::translate(&ctx, err),
    }
}

/// Draft-parameters-fetch workflow, independent of the post-load reset.
#[instrument(skip(ctx), fields(draft_id = %draft_id))]
async fn fetch_parameters(ctx: Arc<PipelineContext>, draft_id: String) {
    match ctx.gateway.fetch_draft_parameters(&draft_id).await {
        Ok(params) => ctx.emit(GraphEvent::SetUserParams(params)),
        Err(err) => failure::translate(&ctx, err),
    }
}

/// Draft-save workflow: merge active filter values into the parameter
/// descriptors by key, then fan out one bounded persistence call per
/// parameter. All-or-nothing: any timeout or failure fails the whole fan-in
/// and `SaveDraftComplete` is withheld. Zero parameters settles immediately.
#[instrument(skip(ctx))]
async fn save_draft(ctx: Arc<PipelineContext>) {
    let snapshot = ctx.snapshot();
    let mut params = snapshot.user_params;
    for param in &mut params {
        let edited = match param.method {
            AlgorithmType::Dfg => snapshot.dfg_filters.get(&param.key),
            AlgorithmType::Fuzzy => snapshot.fuzzy_filters.get(&param.key),
        };
        if let Some(value) = edited {
            param.value = value.clone();
        }
    }

    let save_timeout = ctx.config.save_timeout;
    let calls = params.iter().map(|param| async {
        match tokio::time::timeout(save_timeout, ctx.gateway.update_parameter(&param.id, param))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        }
    });

    let outcomes = join_all(calls).await;
    let total = outcomes.len();
    let mut failures = outcomes.into_iter().filter_map(Result::err);
    if let Some(first) = failures.next() {
        warn!(
            failed = failures.count() + 1,
            total, "parameter save fan-in failed"
        );
        failure::translate(&ctx, first);
        return;
    }
    ctx.emit(GraphEvent::SaveDraftComplete);
}

/// Save-completion workflow: commit the draft by id, then reset it.
#[instrument(skip(ctx))]
async fn commit_draft(ctx: Arc<PipelineContext>) {
    let Some(draft) = ctx.snapshot().draft else {
        // Save completed with no draft loaded; reset anyway so the loading
        // flag cannot stay raised.
        warn!("save completed without a draft; skipping commit");
        ctx.emit(GraphEvent::ResetDraft);
        return;
    };
    match ctx.gateway.commit_draft(&draft.id).await {
        Ok(()) => ctx.emit(GraphEvent::ResetDraft),
        Err(err) => failure::translate(&ctx, err),
    }
}

/// Graph-refetch workflow. Debounced: the task sleeps through the quiet
/// period and proceeds only if no newer trigger arrived. Latest-wins: the
/// generation is re-checked after the remote call so a superseded response
/// never updates state.
#[instrument(skip(ctx), fields(generation))]
async fn refetch_graph(ctx: Arc<PipelineContext>, generation: u64) {
    tokio::time::sleep(ctx.config.debounce).await;
    if ctx.refetch_generation.load(Ordering::SeqCst) != generation {
        return; // collapsed into a newer trigger
    }

    let snapshot = ctx.snapshot();
    let Some(draft) = snapshot.draft.as_ref() else {
        debug!("refetch requested with no draft loaded");
        ctx.emit(GraphEvent::SetGraph(None));
        return;
    };

    let result = match snapshot.algorithm {
        AlgorithmType::Dfg => {
            ctx.gateway
                .compute_graph_dfg(&draft.id, &snapshot.dfg_filters)
                .await
        }
        AlgorithmType::Fuzzy => {
            ctx.gateway
                .compute_graph_fuzzy(&draft.id, &snapshot.fuzzy_filters)
                .await
        }
    };

    if ctx.refetch_generation.load(Ordering::SeqCst) != generation {
        debug!("graph computation superseded; discarding result");
        return;
    }
    match result {
        Ok(graph) => {
            let metrics = graph.metrics.clone();
            ctx.emit(GraphEvent::SetGraph(Some(graph)));
            ctx.emit(GraphEvent::SetGraphMetrics(metrics));
        }
        Err(err) => failure::translate(&ctx, err),
    }
}

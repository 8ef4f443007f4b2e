//! The graph store: event loop, sinks, and session signal.
//!
//! [`GraphStore`] owns the event stream. Dispatched events are processed in
//! emission order by one background task: the pure transition is applied,
//! the event is broadcast to registered sinks, and any matching workflows
//! are triggered. Follow-up events emitted by workflows re-enter the same
//! ordered stream.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::{sync::oneshot, task};
use tracing::debug;

use crate::events::GraphEvent;
use crate::gateway::RemoteGateway;
use crate::state::GraphState;

use super::config::PipelineConfig;
use super::workflows::{self, PipelineContext};

/// Outbound signal raised instead of a local failure event when a remote
/// call is rejected as unauthorized. Consumed by process-wide auth handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSignal {
    Expired,
}

/// Observer of the processed event stream. Sinks see every event exactly
/// once, in processing order, after its pure transition has been applied.
pub trait EventSink: Send + Sync {
    fn handle(&mut self, event: &GraphEvent);
}

/// In-memory sink for tests and snapshots.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<GraphEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all captured events.
    pub fn snapshot(&self) -> Vec<GraphEvent> {
        self.entries.lock().unwrap().clone()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl EventSink for MemorySink {
    fn handle(&mut self, event: &GraphEvent) {
        self.entries.lock().unwrap().push(event.clone());
    }
}

/// Forwards processed events to a flume channel (UI bridges, devtools).
pub struct ChannelSink {
    tx: flume::Sender<GraphEvent>,
}

impl ChannelSink {
    pub fn new(tx: flume::Sender<GraphEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn handle(&mut self, event: &GraphEvent) {
        // A dropped receiver just stops observation; the store keeps running.
        let _ = self.tx.send(event.clone());
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("event loop stopped; event not dispatched")]
    Closed,
}

/// State container plus orchestration pipeline behind one dispatch surface.
///
/// ```no_run
/// use std::sync::Arc;
/// use graphflux::events::GraphEvent;
/// use graphflux::gateway::HttpGateway;
/// use graphflux::pipeline::{GraphStore, PipelineConfig};
///
/// # async fn demo() {
/// let gateway = Arc::new(HttpGateway::new("https://pm.example.com/api"));
/// let store = GraphStore::spawn(gateway, PipelineConfig::default());
/// store
///     .dispatch(GraphEvent::CreateDraft("view-42".into()))
///     .unwrap();
/// # }
/// ```
pub struct GraphStore {
    ctx: Arc<PipelineContext>,
    sinks: Arc<Mutex<Vec<Box<dyn EventSink>>>>,
    session_rx: flume::Receiver<SessionSignal>,
    listener: Mutex<Option<ListenerState>>,
}

struct ListenerState {
    shutdown_tx: oneshot::Sender<()>,
    handle: task::JoinHandle<()>,
}

impl GraphStore {
    /// Start the store's event loop on the current tokio runtime.
    pub fn spawn(gateway: Arc<dyn RemoteGateway>, config: PipelineConfig) -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let (session_tx, session_rx) = flume::unbounded();
        let ctx = Arc::new(PipelineContext::new(gateway, event_tx, session_tx, config));
        let sinks: Arc<Mutex<Vec<Box<dyn EventSink>>>> = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let loop_ctx = Arc::clone(&ctx);
        let loop_sinks = Arc::clone(&sinks);
        let handle = task::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    recv = event_rx.recv_async() => match recv {
                        Err(_) => break,
                        Ok(event) => process(&loop_ctx, &loop_sinks, event),
                    }
                }
            }
        });

        Self {
            ctx,
            sinks,
            session_rx,
            listener: Mutex::new(Some(ListenerState {
                shutdown_tx,
                handle,
            })),
        }
    }

    /// Inject an event into the stream. Events are processed in dispatch
    /// order, interleaved with workflow follow-ups in emission order.
    pub fn dispatch(&self, event: GraphEvent) -> Result<(), DispatchError> {
        self.ctx.events.send(event).map_err(|_| DispatchError::Closed)
    }

    /// Clone of the current state.
    pub fn state(&self) -> GraphState {
        self.ctx.snapshot()
    }

    /// Register an observer of the processed event stream.
    pub fn add_sink<T: EventSink + 'static>(&self, sink: T) {
        self.sinks.lock().unwrap().push(Box::new(sink));
    }

    /// Receiver for session-expiry signals.
    pub fn session_signals(&self) -> flume::Receiver<SessionSignal> {
        self.session_rx.clone()
    }

    /// Stop the event loop. Already-spawned workflow tasks may still finish,
    /// but their follow-up events are dropped.
    pub async fn stop(&self) {
        let state = {
            let mut guard = self.listener.lock().expect("listener poisoned");
            guard.take()
        };
        if let Some(state) = state {
            let _ = state.shutdown_tx.send(());
            let _ = state.handle.await;
        }
    }
}

impl Drop for GraphStore {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listener.lock() {
            if let Some(state) = guard.take() {
                let _ = state.shutdown_tx.send(());
                state.handle.abort();
            }
        }
    }
}

fn process(
    ctx: &Arc<PipelineContext>,
    sinks: &Arc<Mutex<Vec<Box<dyn EventSink>>>>,
    event: GraphEvent,
) {
    debug!(event = event.label(), "processing event");
    ctx.state.write().apply(&event);
    for sink in sinks.lock().unwrap().iter_mut() {
        sink.handle(&event);
    }
    workflows::trigger(ctx, &event);
}

//! # graphflux: state and orchestration for a process-graph view
//!
//! `graphflux` is the client-side coordination layer of an interactive
//! process-graph visualization. It owns one slice of UI state (the "graph"
//! slice) and the asynchronous workflows that keep that state consistent
//! with a remote service while the user edits filters, switches mining
//! algorithms, or persists a working draft.
//!
//! ## Core concepts
//!
//! - **Events**: a closed vocabulary of messages ([`events::GraphEvent`]);
//!   the only way anything changes.
//! - **State**: one owned slice ([`state::GraphState`]) mutated exclusively
//!   by pure, per-event transitions.
//! - **Workflows**: trigger-keyed side-effect rules that read a state
//!   snapshot, call the remote gateway, and emit follow-up events back into
//!   the same ordered stream.
//! - **Gateway**: the remote service boundary ([`gateway::RemoteGateway`]),
//!   pluggable for tests; an HTTP implementation ships behind the `http`
//!   feature.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use graphflux::events::GraphEvent;
//! use graphflux::gateway::HttpGateway;
//! use graphflux::pipeline::{GraphStore, PipelineConfig, SessionSignal};
//!
//! # async fn demo() {
//! graphflux::telemetry::init();
//!
//! let gateway = Arc::new(HttpGateway::new("https://pm.example.com/api"));
//! let store = GraphStore::spawn(gateway, PipelineConfig::from_env());
//!
//! // Loading a draft kicks off the whole chain: filters reset, graph
//! // refetch, parameter fetch.
//! store
//!     .dispatch(GraphEvent::CreateDraft("view-42".into()))
//!     .unwrap();
//!
//! // Session expiry arrives out-of-band instead of as a local error.
//! let signals = store.session_signals();
//! tokio::spawn(async move {
//!     if let Ok(SessionSignal::Expired) = signals.recv_async().await {
//!         // route to login
//!     }
//! });
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! One background task processes events in emission order; workflows run as
//! spawned tasks whose remote calls complete out of order. Draft creation
//! and graph refetch use latest-wins cancellation (generation counters), so
//! a stale response never overwrites newer state. Graph refetches are
//! additionally debounced; draft saves fan out one bounded call per
//! parameter and join all-or-nothing.
//!
//! ## Module guide
//!
//! - [`events`] - The event vocabulary
//! - [`state`] - The graph state slice and its pure transitions
//! - [`pipeline`] - Store, workflows, sinks, configuration
//! - [`gateway`] - Remote service trait, error taxonomy, HTTP client
//! - [`types`] - Shared data model
//! - [`telemetry`] - Tracing bootstrap

pub mod events;
pub mod gateway;
pub mod pipeline;
pub mod state;
pub mod telemetry;
pub mod types;

//! Reactive orchestration pipeline for the graph slice.
//!
//! See [`store::GraphStore`] for the dispatch surface and
//! [`workflows`](self) internals for the trigger-keyed side-effect rules.

pub mod config;
mod failure;
pub mod store;
mod workflows;

pub use config::PipelineConfig;
pub use store::{ChannelSink, DispatchError, EventSink, GraphStore, MemorySink, SessionSignal};

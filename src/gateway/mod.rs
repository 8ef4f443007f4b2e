//! Remote service boundary.
//!
//! The pipeline depends only on [`RemoteGateway`]; the concrete transport is
//! pluggable. An HTTP implementation ships behind the `http` feature.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::types::{DfgFilters, FuzzyFilters, Graph, GraphParameter, ViewDraft};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::HttpGateway;

/// Status-carrying failure of a remote call.
///
/// The variants mirror the pipeline's error taxonomy: `Unauthorized` maps to
/// the session-expired signal, `NotFound`/`Server` degrade the view to an
/// empty graph, everything else surfaces as a generic failure message.
#[derive(Debug, Error, Diagnostic)]
pub enum GatewayError {
    #[error("unauthorized: the session is no longer valid")]
    #[diagnostic(code(graphflux::gateway::unauthorized))]
    Unauthorized,

    #[error("requested resource was not found")]
    #[diagnostic(code(graphflux::gateway::not_found))]
    NotFound,

    #[error("server error (status {status})")]
    #[diagnostic(code(graphflux::gateway::server))]
    Server { status: u16 },

    #[error("remote call timed out")]
    #[diagnostic(code(graphflux::gateway::timeout))]
    Timeout,

    #[error("transport error: {0}")]
    #[diagnostic(
        code(graphflux::gateway::transport),
        help("Check network connectivity and the configured base URL.")
    )]
    Transport(String),

    #[error("failed to decode response: {0}")]
    #[diagnostic(code(graphflux::gateway::decode))]
    Decode(#[from] serde_json::Error),
}

/// Request/response operations the orchestration pipeline consumes.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch (or create) the working draft for a view.
    async fn fetch_draft(&self, view_id: &str) -> Result<ViewDraft, GatewayError>;

    /// Commit a working draft by id.
    async fn commit_draft(&self, draft_id: &str) -> Result<(), GatewayError>;

    /// List the user-editable parameters of a draft.
    async fn fetch_draft_parameters(
        &self,
        draft_id: &str,
    ) -> Result<Vec<GraphParameter>, GatewayError>;

    /// Persist a single parameter value.
    async fn update_parameter(
        &self,
        param_id: &str,
        param: &GraphParameter,
    ) -> Result<(), GatewayError>;

    /// Compute the DFG graph for a draft under the given filters.
    async fn compute_graph_dfg(
        &self,
        draft_id: &str,
        filters: &DfgFilters,
    ) -> Result<Graph, GatewayError>;

    /// Compute the fuzzy graph for a draft under the given filters.
    async fn compute_graph_fuzzy(
        &self,
        draft_id: &str,
        filters: &FuzzyFilters,
    ) -> Result<Graph, GatewayError>;
}

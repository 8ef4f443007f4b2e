//! Shared translation of gateway failures into pipeline outcomes.
//!
//! Every workflow recovers at its boundary by routing errors through
//! [`translate`]; no failure terminates the event stream.

use tracing::{debug, warn};

use crate::events::GraphEvent;
use crate::gateway::GatewayError;

use super::store::SessionSignal;
use super::workflows::PipelineContext;

/// Fold a remote failure back into the stream.
///
/// - `Unauthorized` raises the session-expired signal and nothing else; the
///   loading flag is deliberately left untouched (see DESIGN.md).
/// - `NotFound` and `Server` degrade to an empty graph instead of an error.
/// - Everything else (timeouts included) becomes a generic failure event
///   carrying a human-readable message.
pub(crate) fn translate(ctx: &PipelineContext, err: GatewayError) {
    match err {
        GatewayError::Unauthorized => {
            warn!("remote call rejected as unauthorized; signaling session expiry");
            if ctx.session.send(SessionSignal::Expired).is_err() {
                warn!("session signal channel closed; expiry not delivered");
            }
        }
        GatewayError::NotFound | GatewayError::Server { .. } => {
            debug!(error = %err, "no graph data available; degrading to empty graph");
            ctx.emit(GraphEvent::SetGraph(None));
        }
        other => {
            warn!(error = %other, "remote call failed");
            ctx.emit(GraphEvent::GetFailed(other.to_string()));
        }
    }
}

//! The closed event vocabulary of the graph slice.
//!
//! Every change flowing through the store is one of these variants. UI code
//! and workflows alike communicate exclusively by dispatching events; the
//! state container applies one pure transition per variant and the pipeline
//! keys its workflows off the same stream.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{
    AlgorithmType, DfgFilters, EdgeWidthBounds, FuzzyFilters, Graph, GraphParameter, ValueMode,
    ViewDraft,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GraphEvent {
    /// A remote call failed in a way the user should see.
    GetFailed(String),
    /// Request a working draft for the given view id.
    CreateDraft(String),
    /// A draft was (re)loaded from the remote service.
    SetDraft(ViewDraft),
    /// Persist the current parameter edits.
    SaveDraft,
    /// All per-parameter writes settled successfully.
    SaveDraftComplete,
    SetAlgorithmType(AlgorithmType),
    SetDfgFilters(DfgFilters),
    SetFuzzyFilters(FuzzyFilters),
    /// Request a (debounced) graph recomputation.
    GetGraph,
    /// Computed graph arrived; `None` degrades the view to an empty graph.
    SetGraph(Option<Graph>),
    SetUserParams(Vec<GraphParameter>),
    SetGraphMetrics(Value),
    SetNodeEdgeMetrics(Value),
    SetNodeEdgeHighlighting(String),
    ResetNodeEdgeMetrics,
    ToggleSidebar,
    ToggleMetrics(usize),
    ChangeEdgeWidth(EdgeWidthBounds),
    ChangeGraphValue(ValueMode),
    ToggleOnPercent(bool),
    ResetDraft,
    ResetGraph,
    ResetGraphFilters,
    ResetGraphMetrics,
    ResetNodeEdgeHighlighting,
    ResetGraphCommonParams,
}

impl GraphEvent {
    /// Stable label for logging and sink output.
    pub fn label(&self) -> &'static str {
        match self {
            GraphEvent::GetFailed(_) => "get_failed",
            GraphEvent::CreateDraft(_) => "create_draft",
            GraphEvent::SetDraft(_) => "set_draft",
            GraphEvent::SaveDraft => "save_draft",
            GraphEvent::SaveDraftComplete => "save_draft_complete",
            GraphEvent::SetAlgorithmType(_) => "set_algorithm_type",
            GraphEvent::SetDfgFilters(_) => "set_dfg_filters",
            GraphEvent::SetFuzzyFilters(_) => "set_fuzzy_filters",
            GraphEvent::GetGraph => "get_graph",
            GraphEvent::SetGraph(_) => "set_graph",
            GraphEvent::SetUserParams(_) => "set_user_params",
            GraphEvent::SetGraphMetrics(_) => "set_graph_metrics",
            GraphEvent::SetNodeEdgeMetrics(_) => "set_node_edge_metrics",
            GraphEvent::SetNodeEdgeHighlighting(_) => "set_node_edge_highlighting",
            GraphEvent::ResetNodeEdgeMetrics => "reset_node_edge_metrics",
            GraphEvent::ToggleSidebar => "toggle_sidebar",
            GraphEvent::ToggleMetrics(_) => "toggle_metrics",
            GraphEvent::ChangeEdgeWidth(_) => "change_edge_width",
            GraphEvent::ChangeGraphValue(_) => "change_graph_value",
            GraphEvent::ToggleOnPercent(_) => "toggle_on_percent",
            GraphEvent::ResetDraft => "reset_draft",
            GraphEvent::ResetGraph => "reset_graph",
            GraphEvent::ResetGraphFilters => "reset_graph_filters",
            GraphEvent::ResetGraphMetrics => "reset_graph_metrics",
            GraphEvent::ResetNodeEdgeHighlighting => "reset_node_edge_highlighting",
            GraphEvent::ResetGraphCommonParams => "reset_graph_common_params",
        }
    }
}

impl fmt::Display for GraphEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

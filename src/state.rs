//! The graph state slice and its pure transitions.
//!
//! [`GraphState`] is the single mutable slice owned by the store. Every
//! mutation goes through [`GraphState::apply`], which dispatches to one
//! total, synchronous, infallible transition per event variant. No
//! transition performs I/O; side effects live exclusively in the
//! [`pipeline`](crate::pipeline) workflows.
//!
//! Loading-flag lifecycle: `CreateDraft`, `SaveDraft` and `GetGraph` raise
//! it; `SetDraft`, `SetGraph`, `GetFailed`, `ResetDraft` and `ResetGraph`
//! clear it. Every workflow that raises the flag emits (directly or through
//! the failure translator) an event that clears it again, with one
//! documented exception for session expiry (see DESIGN.md).

use serde::Serialize;
use serde_json::Value;

use crate::events::GraphEvent;
use crate::types::{
    AlgorithmType, DfgFilters, EdgeWidthBounds, FuzzyFilters, Graph, GraphParameter, ValueMode,
    ViewDraft,
};

/// Current value of the graph slice.
///
/// Nested entities (draft, graph, filter sets) are replaced wholesale by
/// transitions, never mutated in place by outside code. Both filter sets are
/// retained at all times; [`GraphState::algorithm`] selects the active one.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphState {
    /// True only while a workflow still owes the stream a follow-up event.
    pub loading: bool,
    /// Message of the last generic failure, surfaced by the UI.
    pub error: Option<String>,
    pub view_id: Option<String>,
    pub draft: Option<ViewDraft>,
    pub graph: Option<Graph>,
    pub dfg_filters: DfgFilters,
    pub fuzzy_filters: FuzzyFilters,
    pub user_params: Vec<GraphParameter>,
    pub algorithm: AlgorithmType,
    pub graph_metrics: Option<Value>,
    pub node_edge_metrics: Option<Value>,
    pub sidebar_visible: bool,
    pub metrics_tab: usize,
    pub show_percent: bool,
    pub edge_width: EdgeWidthBounds,
    pub value_mode: ValueMode,
    pub highlight: Option<String>,
}

impl GraphState {
    /// Apply the pure transition registered for `event`. Total: every event
    /// has exactly one transition and none of them can fail.
    pub fn apply(&mut self, event: &GraphEvent) {
        match event {
            GraphEvent::GetFailed(message) => self.get_failed(message),
            GraphEvent::CreateDraft(view_id) => self.create_draft(view_id),
            GraphEvent::SetDraft(draft) => self.set_draft(draft),
            GraphEvent::SaveDraft => self.save_draft(),
            GraphEvent::SaveDraftComplete => self.save_draft_complete(),
            GraphEvent::SetAlgorithmType(algorithm) => self.set_algorithm_type(*algorithm),
            GraphEvent::SetDfgFilters(filters) => self.set_dfg_filters(filters),
            GraphEvent::SetFuzzyFilters(filters) => self.set_fuzzy_filters(filters),
            GraphEvent::GetGraph => self.get_graph(),
            GraphEvent::SetGraph(graph) => self.set_graph(graph),
            GraphEvent::SetUserParams(params) => self.set_user_params(params),
            GraphEvent::SetGraphMetrics(metrics) => self.set_graph_metrics(metrics),
            GraphEvent::SetNodeEdgeMetrics(metrics) => self.set_node_edge_metrics(metrics),
            GraphEvent::SetNodeEdgeHighlighting(id) => self.set_node_edge_highlighting(id),
            GraphEvent::ResetNodeEdgeMetrics => self.reset_node_edge_metrics(),
            GraphEvent::ToggleSidebar => self.toggle_sidebar(),
            GraphEvent::ToggleMetrics(tab) => self.toggle_metrics(*tab),
            GraphEvent::ChangeEdgeWidth(bounds) => self.change_edge_width(*bounds),
            GraphEvent::ChangeGraphValue(mode) => self.change_graph_value(*mode),
            GraphEvent::ToggleOnPercent(on) => self.toggle_on_percent(*on),
            GraphEvent::ResetDraft => self.reset_draft(),
            GraphEvent::ResetGraph => self.reset_graph(),
            GraphEvent::ResetGraphFilters => self.reset_graph_filters(),
            GraphEvent::ResetGraphMetrics => self.reset_graph_metrics(),
            GraphEvent::ResetNodeEdgeHighlighting => self.reset_node_edge_highlighting(),
            GraphEvent::ResetGraphCommonParams => self.reset_graph_common_params(),
        }
    }

    /// The filter set active under the current algorithm selector, projected
    /// to the shared map shape.
    pub fn active_filter_keys(&self) -> impl Iterator<Item = &String> {
        match self.algorithm {
            AlgorithmType::Dfg => self.dfg_filters.0.keys(),
            AlgorithmType::Fuzzy => self.fuzzy_filters.0.keys(),
        }
    }

    fn get_failed(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_owned());
    }

    fn create_draft(&mut self, view_id: &str) {
        self.loading = true;
        self.error = None;
        self.view_id = Some(view_id.to_owned());
    }

    fn set_draft(&mut self, draft: &ViewDraft) {
        self.loading = false;
        self.draft = Some(draft.clone());
    }

    fn save_draft(&mut self) {
        self.loading = true;
    }

    fn save_draft_complete(&mut self) {
        // Loading stays raised: the commit workflow still owes a reset.
    }

    fn set_algorithm_type(&mut self, algorithm: AlgorithmType) {
        self.algorithm = algorithm;
    }

    fn set_dfg_filters(&mut self, filters: &DfgFilters) {
        self.dfg_filters = filters.clone();
    }

    fn set_fuzzy_filters(&mut self, filters: &FuzzyFilters) {
        self.fuzzy_filters = filters.clone();
    }

    fn get_graph(&mut self) {
        self.loading = true;
    }

    fn set_graph(&mut self, graph: &Option<Graph>) {
        self.loading = false;
        self.error = None;
        self.graph = graph.clone();
    }

    fn set_user_params(&mut self, params: &[GraphParameter]) {
        self.user_params = params.to_vec();
    }

    fn set_graph_metrics(&mut self, metrics: &Value) {
        self.graph_metrics = Some(metrics.clone());
    }

    fn set_node_edge_metrics(&mut self, metrics: &Value) {
        self.node_edge_metrics = Some(metrics.clone());
    }

    fn set_node_edge_highlighting(&mut self, id: &str) {
        self.highlight = Some(id.to_owned());
    }

    fn reset_node_edge_metrics(&mut self) {
        self.node_edge_metrics = None;
    }

    fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }

    fn toggle_metrics(&mut self, tab: usize) {
        self.metrics_tab = tab;
    }

    fn change_edge_width(&mut self, bounds: EdgeWidthBounds) {
        self.edge_width = bounds;
    }

    fn change_graph_value(&mut self, mode: ValueMode) {
        self.value_mode = mode;
    }

    fn toggle_on_percent(&mut self, on: bool) {
        self.show_percent = on;
    }

    fn reset_draft(&mut self) {
        self.draft = None;
        self.loading = false;
    }

    fn reset_graph(&mut self) {
        self.graph = None;
        self.loading = false;
    }

    fn reset_graph_filters(&mut self) {
        self.dfg_filters = DfgFilters::default();
        self.fuzzy_filters = FuzzyFilters::default();
    }

    fn reset_graph_metrics(&mut self) {
        self.graph_metrics = None;
    }

    fn reset_node_edge_highlighting(&mut self) {
        self.highlight = None;
    }

    fn reset_graph_common_params(&mut self) {
        self.sidebar_visible = false;
        self.metrics_tab = 0;
        self.show_percent = false;
        self.edge_width = EdgeWidthBounds::default();
        self.value_mode = ValueMode::default();
    }
}

//! Shared data model for the process-graph view.
//!
//! Everything the orchestration layer passes between the state container,
//! the workflows, and the remote gateway lives here. Payloads the view
//! treats as opaque (draft extras, graph body, metrics) are kept as raw
//! JSON values; only the fields the pipeline itself needs are typed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mining algorithm variant. Selects which remote compute operation is used
/// and which of the two retained filter sets is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    #[default]
    Dfg,
    Fuzzy,
}

/// Value shape shared by filter entries and user-editable parameters.
///
/// The remote service only deals in numbers and switches, so the untagged
/// representation round-trips cleanly through JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

/// Flat key→value mapping projected from a user-parameter list.
///
/// Both filter-set shapes are built from the same projection; each consumes
/// only the keys relevant to its algorithm, extra keys are harmless.
pub type FilterMap = FxHashMap<String, ParamValue>;

/// Filter set driving DFG graph computation. Retained in state even while
/// the fuzzy algorithm is active so switching back does not lose edits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DfgFilters(pub FilterMap);

/// Filter set driving fuzzy graph computation. Retained alongside
/// [`DfgFilters`]; exactly one of the two is active per [`AlgorithmType`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzyFilters(pub FilterMap);

macro_rules! filter_set_impl {
    ($name:ident) => {
        impl $name {
            pub fn get(&self, key: &str) -> Option<&ParamValue> {
                self.0.get(key)
            }

            pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
                self.0.insert(key.into(), value.into());
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<FilterMap> for $name {
            fn from(map: FilterMap) -> Self {
                Self(map)
            }
        }
    };
}

filter_set_impl!(DfgFilters);
filter_set_impl!(FuzzyFilters);

/// Server-identified working copy of a view configuration.
///
/// Owned by the remote service; the client caches it by reference until a
/// reset or replacement. Opaque beyond its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewDraft {
    pub id: String,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl ViewDraft {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extras: Map::new(),
        }
    }
}

/// User-adjustable parameter descriptor fetched per draft.
///
/// Never created or deleted client-side; the edited value is merged back
/// from the matching filter set and written individually on save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphParameter {
    pub id: String,
    pub method: AlgorithmType,
    pub key: String,
    pub value: ParamValue,
}

impl GraphParameter {
    pub fn new(
        id: impl Into<String>,
        method: AlgorithmType,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Computed visualization payload. Entirely produced by the remote service;
/// opaque except for the embedded metrics sub-object, which the pipeline
/// extracts into its own state field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub metrics: Value,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

/// Lower/upper bound for rendered edge widths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeWidthBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for EdgeWidthBounds {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

/// Which value the view displays on nodes and edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    #[default]
    Frequency,
    Duration,
}

/// Project a user-parameter list into the flat key→value mapping both
/// filter-set shapes are built from. Later entries win on duplicate keys.
pub fn project_filter_map(params: &[GraphParameter]) -> FilterMap {
    params
        .iter()
        .map(|param| (param.key.clone(), param.value.clone()))
        .collect()
}

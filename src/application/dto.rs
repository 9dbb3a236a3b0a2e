//! Wire-level request and response shapes for the JSON API.
//!
//! Field names follow the browser client: camelCase on the way in,
//! `objective_value` and friends on the way out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A field that should be a number but may arrive as a numeric string.
/// The mapping layer coerces it, rejecting anything non-numeric.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
    /// Anything else (bool, null, array, object); always rejected by the
    /// mapping layer with a precise message instead of a decode failure.
    Other(serde_json::Value),
}

impl Default for NumberOrText {
    fn default() -> Self {
        NumberOrText::Number(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDto {
    pub name: String,
    /// Objective coefficient; defaults to 0 so a request can rely solely
    /// on `objectiveFunction`.
    #[serde(default)]
    pub coef: NumberOrText,
    #[serde(default)]
    pub lower_bound: Option<NumberOrText>,
    #[serde(default)]
    pub upper_bound: Option<NumberOrText>,
    /// `continuous` (default), `integer` or `binary`
    #[serde(default, rename = "type")]
    pub variable_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstraintDto {
    pub lhs: String,
    pub operator: String,
    pub rhs: NumberOrText,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub variables: Vec<VariableDto>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDto>,
    #[serde(default = "default_objective_type")]
    pub objective_type: String,
    /// Optional objective written as an expression; overrides the
    /// per-variable `coef` fields when present and non-empty.
    #[serde(default)]
    pub objective_function: Option<String>,
}

fn default_objective_type() -> String {
    "maximize".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub solution: BTreeMap<String, f64>,
    /// `null` when the solver produced no finite optimum
    /// (infeasible or unbounded problems).
    pub objective_value: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverInfo {
    pub name: String,
    pub supports_mip: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolversResponse {
    pub solvers: Vec<SolverInfo>,
    pub default: String,
}

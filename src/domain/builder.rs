//! Assembly of a solver-ready [`Model`] from loosely-typed problem specs.

use std::collections::BTreeSet;

use thiserror::Error;

use super::error::DomainError;
use super::expression::{self, LinearExpression};
use super::models::{Constraint, Model, Objective, Variable};
use super::value_objects::{ConstraintType, OptimizationType, VariableType};

/// Declaration of one decision variable, as it arrives in a request.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub name: String,
    /// Objective coefficient of this variable.
    pub coef: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub variable_type: VariableType,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, coef: f64) -> Self {
        Self {
            name: name.into(),
            coef,
            lower_bound: None,
            upper_bound: None,
            variable_type: VariableType::Continuous,
        }
    }
}

/// Declaration of one constraint: a textual lhs, an operator and a bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSpec {
    pub lhs: String,
    pub operator: String,
    pub rhs: f64,
}

impl ConstraintSpec {
    pub fn new(lhs: impl Into<String>, operator: impl Into<String>, rhs: f64) -> Self {
        Self {
            lhs: lhs.into(),
            operator: operator.into(),
            rhs,
        }
    }
}

/// Rejection of a structurally invalid problem spec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duplicate variable `{0}`")]
    DuplicateVariable(String),

    #[error("invalid variable name `{0}`: must be an identifier")]
    InvalidVariableName(String),

    #[error("unknown constraint operator `{0}`, expected `<=`, `>=` or `=`")]
    UnknownOperator(String),

    #[error("unknown objective type `{0}`, expected `maximize` or `minimize`")]
    UnknownObjectiveType(String),

    #[error("unknown variable type `{0}`, expected `continuous`, `integer` or `binary`")]
    UnknownVariableType(String),

    #[error("{field} is not a number: `{value}`")]
    NonNumeric { field: &'static str, value: String },

    #[error("variable `{name}` has lower bound {lower} above upper bound {upper}")]
    InvalidBounds {
        name: String,
        lower: f64,
        upper: f64,
    },
}

/// Build an immutable [`Model`] from variable and constraint specs.
///
/// The objective is the parsed `objective_expression` when one is given,
/// otherwise the sum of `coef * variable` over the declared variables.
/// Construction is pure: nothing is solved here and no state escapes.
/// Zero variables or zero constraints produce a valid degenerate model.
pub fn build(
    variables: &[VariableSpec],
    constraints: &[ConstraintSpec],
    direction: OptimizationType,
    objective_expression: Option<&str>,
) -> Result<Model, DomainError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut built_variables = Vec::with_capacity(variables.len());

    for spec in variables {
        if !expression::is_valid_identifier(&spec.name) {
            return Err(ValidationError::InvalidVariableName(spec.name.clone()).into());
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(ValidationError::DuplicateVariable(spec.name.clone()).into());
        }
        built_variables.push(build_variable(spec)?);
    }

    let known = built_variables
        .iter()
        .map(|v: &Variable| v.name.clone())
        .collect::<BTreeSet<String>>();

    let mut built_constraints = Vec::with_capacity(constraints.len());
    for spec in constraints {
        let op = ConstraintType::parse(spec.operator.trim())
            .ok_or_else(|| ValidationError::UnknownOperator(spec.operator.clone()))?;
        let lhs = expression::parse(&spec.lhs, &known)?;
        built_constraints.push(Constraint::new(lhs, op, spec.rhs));
    }

    let objective = match objective_expression {
        Some(text) => expression::parse(text, &known)?,
        None => objective_from_coefficients(variables),
    };

    Ok(Model {
        variables: built_variables,
        objective: Objective::new(objective, direction),
        constraints: built_constraints,
    })
}

fn build_variable(spec: &VariableSpec) -> Result<Variable, DomainError> {
    let base = match spec.variable_type {
        VariableType::Continuous => Variable::continuous(&spec.name),
        VariableType::Integer => Variable::integer(&spec.name),
        VariableType::Binary => Variable::binary(&spec.name),
    };
    let lower = spec.lower_bound.unwrap_or(base.lower_bound);
    let upper = spec.upper_bound.or(base.upper_bound);

    if let Some(upper) = upper {
        if lower > upper {
            return Err(ValidationError::InvalidBounds {
                name: spec.name.clone(),
                lower,
                upper,
            }
            .into());
        }
    }

    Ok(base.with_bounds(lower, upper))
}

fn objective_from_coefficients(variables: &[VariableSpec]) -> LinearExpression {
    let mut objective = LinearExpression::new();
    for spec in variables {
        *objective
            .coefficients
            .entry(spec.name.clone())
            .or_insert(0.0) += spec.coef;
    }
    objective
}

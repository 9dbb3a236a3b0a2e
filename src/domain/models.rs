use std::collections::{BTreeMap, BTreeSet};

use super::expression::LinearExpression;
use super::value_objects::{ConstraintType, OptimizationType, SolutionStatus, VariableType};

/// Tolerance used when checking constraints that reference no variables.
const CONSTANT_CONSTRAINT_TOLERANCE: f64 = 1e-9;

/// Decision variable in an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable_type: VariableType::Continuous,
            lower_bound: 0.0,
            upper_bound: None,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable_type: VariableType::Integer,
            lower_bound: 0.0,
            upper_bound: None,
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: Some(1.0),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

/// Linear constraint: `lhs <op> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub lhs: LinearExpression,
    pub op: ConstraintType,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(lhs: LinearExpression, op: ConstraintType, rhs: f64) -> Self {
        Self { lhs, op, rhs }
    }

    /// The right-hand side after folding the lhs constant over:
    /// `x + 1 <= 4` is solved as `x <= 3`.
    pub fn effective_rhs(&self) -> f64 {
        self.rhs - self.lhs.constant
    }

    /// Whether the lhs references no variables at all.
    pub fn is_constant(&self) -> bool {
        self.lhs.coefficients.is_empty()
    }

    /// Evaluate a constant constraint. Only meaningful when
    /// [`is_constant`](Self::is_constant) holds.
    pub fn constant_holds(&self) -> bool {
        let lhs = self.lhs.constant;
        match self.op {
            ConstraintType::LessThanOrEqual => lhs <= self.rhs + CONSTANT_CONSTRAINT_TOLERANCE,
            ConstraintType::GreaterThanOrEqual => lhs >= self.rhs - CONSTANT_CONSTRAINT_TOLERANCE,
            ConstraintType::Equal => (lhs - self.rhs).abs() <= CONSTANT_CONSTRAINT_TOLERANCE,
        }
    }
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub expression: LinearExpression,
    pub direction: OptimizationType,
}

impl Objective {
    pub fn new(expression: LinearExpression, direction: OptimizationType) -> Self {
        Self {
            expression,
            direction,
        }
    }
}

/// Complete optimization problem, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub variables: Vec<Variable>,
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
}

impl Model {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Names of all declared variables, the universe expressions may use.
    pub fn variable_names(&self) -> BTreeSet<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.variables.iter().any(|v| v.is_integer())
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolutionStatus,
    /// Objective value at the returned point, when the solver produced one.
    /// Fractional values are reported as-is, never rounded.
    pub objective_value: Option<f64>,
    pub values: BTreeMap<String, f64>,
    pub message: String,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            values: BTreeMap::new(),
            message: message.into(),
        }
    }

    pub fn optimal(objective_value: f64, values: BTreeMap<String, f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            objective_value: Some(objective_value),
            values,
            message: "optimal solution found".to_string(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

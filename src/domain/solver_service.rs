// Domain service interface for solving optimization problems.
// Defines the contract every solver backend must follow; backends can be
// swapped without touching the business logic.

use super::models::{Model, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    #[error("solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Interface of an optimization backend.
///
/// Implementations translate the [`Model`] into their own representation,
/// run the solve, and report the outcome through [`Solution`] without
/// reinterpreting it. Values come back as `f64`; integrality is produced
/// by the backend for integer variables, never by rounding output.
pub trait SolverService: Send + Sync + std::fmt::Debug {
    /// Solve an optimization problem to optimality, or report why not.
    fn solve(&self, model: &Model) -> Result<Solution>;

    /// Re-check model invariants before handing the model to a backend.
    /// The builder upholds these already; a model assembled by hand goes
    /// through the same gate.
    fn validate(&self, model: &Model) -> Result<()> {
        let mut errors = Vec::new();
        let known = model.variable_names();

        for (i, constraint) in model.constraints.iter().enumerate() {
            for name in constraint.lhs.coefficients.keys() {
                if !known.contains(name) {
                    errors.push(format!(
                        "constraint {} references undeclared variable `{}`",
                        i, name
                    ));
                }
            }
        }
        for name in model.objective.expression.coefficients.keys() {
            if !known.contains(name) {
                errors.push(format!("objective references undeclared variable `{}`", name));
            }
        }
        for variable in &model.variables {
            if let Some(upper) = variable.upper_bound {
                if variable.lower_bound > upper {
                    errors.push(format!(
                        "variable `{}` has lower bound ({}) > upper bound ({})",
                        variable.name, variable.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Name of this solver backend
    fn name(&self) -> &str;

    /// Whether this backend supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expression::LinearExpression;
    use crate::domain::models::{Constraint, Objective, Variable};
    use crate::domain::value_objects::{ConstraintType, OptimizationType, SolutionStatus};

    #[derive(Debug)]
    struct NullSolver;

    impl SolverService for NullSolver {
        fn solve(&self, model: &Model) -> Result<Solution> {
            self.validate(model)?;
            Ok(Solution::new(SolutionStatus::NotSolved, "null backend"))
        }

        fn name(&self) -> &str {
            "null"
        }

        fn supports_mip(&self) -> bool {
            false
        }
    }

    #[test]
    fn validate_catches_undeclared_constraint_variables() {
        let mut lhs = LinearExpression::new();
        lhs.coefficients.insert("ghost".to_string(), 1.0);
        let model = Model {
            variables: vec![Variable::continuous("x")],
            objective: Objective::new(LinearExpression::new(), OptimizationType::Maximize),
            constraints: vec![Constraint::new(lhs, ConstraintType::LessThanOrEqual, 1.0)],
        };

        let err = NullSolver.solve(&model).unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(msg) if msg.contains("ghost")));
    }

    #[test]
    fn validate_accepts_a_degenerate_model() {
        let model = Model {
            variables: vec![],
            objective: Objective::new(LinearExpression::new(), OptimizationType::Minimize),
            constraints: vec![],
        };
        assert!(NullSolver.validate(&model).is_ok());
    }
}

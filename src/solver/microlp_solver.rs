use good_lp::solvers::microlp::microlp;

use crate::domain::{
    models::{Model, Solution},
    solver_service::{Result, SolverError, SolverService},
};

use super::good_lp_backend;

/// Adapter for [microlp](https://docs.rs/microlp), a pure-Rust simplex
/// implementation. Always available, but restricted to continuous
/// variables.
#[derive(Debug)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicrolpSolver {
    fn solve(&self, model: &Model) -> Result<Solution> {
        self.validate(model)?;
        if model.is_mixed_integer() {
            return Err(SolverError::SolverNotAvailable(
                "microlp does not solve mixed-integer problems; enable the `highs` feature"
                    .to_string(),
            ));
        }
        good_lp_backend::solve_with(model, microlp)
    }

    fn name(&self) -> &str {
        "microlp"
    }

    fn supports_mip(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::{self, ConstraintSpec, VariableSpec};
    use crate::domain::value_objects::{OptimizationType, SolutionStatus, VariableType};
    use float_eq::assert_float_eq;

    fn solve(
        variables: &[VariableSpec],
        constraints: &[ConstraintSpec],
        direction: OptimizationType,
    ) -> Solution {
        let model = builder::build(variables, constraints, direction, None).unwrap();
        MicrolpSolver::new().solve(&model).unwrap()
    }

    #[test]
    fn maximizes_to_the_optimal_vertex() {
        let solution = solve(
            &[VariableSpec::new("x", 3.0), VariableSpec::new("y", 5.0)],
            &[ConstraintSpec::new("x + y", "<=", 4.0)],
            OptimizationType::Maximize,
        );

        assert!(solution.is_optimal());
        assert_float_eq!(solution.objective_value.unwrap(), 20.0, abs <= 1e-6);
        assert_float_eq!(solution.values["x"], 0.0, abs <= 1e-6);
        assert_float_eq!(solution.values["y"], 4.0, abs <= 1e-6);
    }

    #[test]
    fn reports_infeasible_contradiction() {
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[
                ConstraintSpec::new("x", "<=", 1.0),
                ConstraintSpec::new("x", ">=", 2.0),
            ],
            OptimizationType::Maximize,
        );
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert_eq!(solution.objective_value, None);
    }

    #[test]
    fn reports_unbounded_objective() {
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[],
            OptimizationType::Maximize,
        );
        assert_eq!(solution.status, SolutionStatus::Unbounded);
    }

    #[test]
    fn fractional_optima_are_not_truncated() {
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[ConstraintSpec::new("2x", "<=", 1.0)],
            OptimizationType::Maximize,
        );
        assert_float_eq!(solution.objective_value.unwrap(), 0.5, abs <= 1e-6);
        assert_float_eq!(solution.values["x"], 0.5, abs <= 1e-6);
    }

    #[test]
    fn equality_constraints_pin_variables() {
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[ConstraintSpec::new("x", "=", 2.0)],
            OptimizationType::Minimize,
        );
        assert!(solution.is_optimal());
        assert_float_eq!(solution.values["x"], 2.0, abs <= 1e-6);
    }

    #[test]
    fn lhs_constants_fold_into_the_bound() {
        // x + 1 <= 4 is x <= 3
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[ConstraintSpec::new("x + 1", "<=", 4.0)],
            OptimizationType::Maximize,
        );
        assert_float_eq!(solution.values["x"], 3.0, abs <= 1e-6);
        assert_float_eq!(solution.objective_value.unwrap(), 3.0, abs <= 1e-6);
    }

    #[test]
    fn empty_model_solves_trivially() {
        let solution = solve(&[], &[], OptimizationType::Maximize);
        assert!(solution.is_optimal());
        assert_eq!(solution.objective_value, Some(0.0));
        assert!(solution.values.is_empty());
    }

    #[test]
    fn violated_constant_constraint_is_infeasible() {
        let solution = solve(
            &[VariableSpec::new("x", 1.0)],
            &[ConstraintSpec::new("5", "<=", 4.0)],
            OptimizationType::Maximize,
        );
        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn minimization_respects_lower_bounds() {
        let variables = [VariableSpec {
            name: "x".into(),
            coef: 2.0,
            lower_bound: Some(1.5),
            upper_bound: None,
            variable_type: VariableType::Continuous,
        }];
        let solution = solve(&variables, &[], OptimizationType::Minimize);
        assert!(solution.is_optimal());
        assert_float_eq!(solution.values["x"], 1.5, abs <= 1e-6);
        assert_float_eq!(solution.objective_value.unwrap(), 3.0, abs <= 1e-6);
    }

    #[test]
    fn integer_models_are_refused() {
        let variables = [VariableSpec {
            name: "x".into(),
            coef: 1.0,
            lower_bound: None,
            upper_bound: Some(10.0),
            variable_type: VariableType::Integer,
        }];
        let model =
            builder::build(&variables, &[], OptimizationType::Maximize, None).unwrap();
        let err = MicrolpSolver::new().solve(&model).unwrap_err();
        assert!(matches!(err, SolverError::SolverNotAvailable(_)));
    }
}

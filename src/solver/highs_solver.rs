use good_lp::solvers::highs::highs;

use crate::domain::{
    models::{Model, Solution},
    solver_service::{Result, SolverService},
};

use super::good_lp_backend;

/// Adapter for the [HiGHS](https://highs.dev) solver, which handles both
/// linear and mixed-integer programs.
#[derive(Debug)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, model: &Model) -> Result<Solution> {
        self.validate(model)?;
        good_lp_backend::solve_with(model, highs)
    }

    fn name(&self) -> &str {
        "highs"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

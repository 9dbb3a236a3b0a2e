// Solver adapters module

pub mod factory;

#[cfg(any(feature = "microlp", feature = "highs"))]
mod good_lp_backend;

#[cfg(feature = "highs")]
pub mod highs_solver;
#[cfg(feature = "microlp")]
pub mod microlp_solver;

pub use factory::SolverFactory;

#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
#[cfg(feature = "microlp")]
pub use microlp_solver::MicrolpSolver;

use std::sync::Arc;

use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};

#[cfg(feature = "highs")]
use super::highs_solver::HighsSolver;
#[cfg(feature = "microlp")]
use super::microlp_solver::MicrolpSolver;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Resolve a backend by its user-facing name (`auto`, `microlp`,
    /// `highs`).
    pub fn from_name(name: &str) -> Result<Arc<dyn SolverService>> {
        let backend = match name {
            "auto" => SolverBackend::Auto,
            "microlp" => SolverBackend::Microlp,
            "highs" => SolverBackend::Highs,
            other => {
                return Err(SolverError::SolverNotAvailable(format!(
                    "unknown solver `{other}`, expected auto, microlp or highs"
                )))
            }
        };
        Self::create(backend)
    }

    /// Create a solver for a specific backend.
    pub fn create(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            SolverBackend::Microlp => {
                #[cfg(feature = "microlp")]
                {
                    Ok(Arc::new(MicrolpSolver::new()))
                }
                #[cfg(not(feature = "microlp"))]
                {
                    Err(SolverError::SolverNotAvailable(
                        "the microlp backend is not compiled in".to_string(),
                    ))
                }
            }
            SolverBackend::Highs => {
                #[cfg(feature = "highs")]
                {
                    Ok(Arc::new(HighsSolver::new()))
                }
                #[cfg(not(feature = "highs"))]
                {
                    Err(SolverError::SolverNotAvailable(
                        "the highs backend is not compiled in".to_string(),
                    ))
                }
            }
        }
    }

    /// The preferred backend among those compiled in: HiGHS when present,
    /// microlp otherwise.
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        #[cfg(feature = "highs")]
        {
            Ok(Arc::new(HighsSolver::new()))
        }
        #[cfg(all(feature = "microlp", not(feature = "highs")))]
        {
            Ok(Arc::new(MicrolpSolver::new()))
        }
        #[cfg(not(any(feature = "microlp", feature = "highs")))]
        {
            Err(SolverError::SolverNotAvailable(
                "no solver backend compiled in".to_string(),
            ))
        }
    }

    /// All compiled-in backends, for the `/solvers` listing.
    pub fn available() -> Vec<Arc<dyn SolverService>> {
        #[allow(unused_mut)]
        let mut solvers: Vec<Arc<dyn SolverService>> = Vec::new();
        #[cfg(feature = "microlp")]
        solvers.push(Arc::new(MicrolpSolver::new()));
        #[cfg(feature = "highs")]
        solvers.push(Arc::new(HighsSolver::new()));
        solvers
    }
}

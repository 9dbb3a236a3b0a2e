use thiserror::Error;

use super::builder::ValidationError;
use super::expression::ParseError;
use super::solver_service::SolverError;

/// Everything that can go wrong between a problem spec and a solution.
///
/// The HTTP boundary maps the variants onto response statuses: parse and
/// validation failures are the client's fault, solver failures are ours.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl DomainError {
    /// Whether the failure originates in the request rather than the solver.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::Parse(_) | DomainError::Validation(_))
    }
}

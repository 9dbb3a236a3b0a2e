// Domain layer: business logic and rules
pub mod domain;

// Application layer: wire shapes, mapping and request handling
pub mod application;

// Infrastructure layer: server lifecycle and configuration
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintSpec, ConstraintType, DomainError, LinearExpression, Model, Objective,
    OptimizationType, ParseError, Solution, SolutionStatus, SolverBackend, SolverError,
    SolverService, ValidationError, Variable, VariableSpec, VariableType,
};

pub use application::{router, SharedSolver};

pub use infrastructure::{start_server, ServerConfig};

pub use solver::SolverFactory;

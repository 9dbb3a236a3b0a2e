// Domain layer: business logic and rules

pub mod builder;
pub mod error;
pub mod expression;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use builder::*;
pub use error::*;
pub use expression::{LinearExpression, ParseError};
pub use models::*;
pub use solver_service::{SolverError, SolverService};
pub use value_objects::*;

// Application layer: wire shapes, mapping and request handling

pub mod dto;
pub mod mappers;
pub mod rest_service;

pub use rest_service::{router, SharedSolver};

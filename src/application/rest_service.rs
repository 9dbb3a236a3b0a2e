// HTTP service implementation: routes, handlers and error mapping.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, warn};

use crate::application::dto::{
    ErrorResponse, OptimizeRequest, OptimizeResponse, SolverInfo, SolversResponse,
};
use crate::application::mappers;
use crate::domain::{error::DomainError, solver_service::SolverService};
use crate::solver::SolverFactory;

/// The solver chosen at startup, shared across request handlers.
pub type SharedSolver = Arc<dyn SolverService>;

/// Assemble the API router. Transport-level layers (CORS, tracing) are
/// applied by the server setup, not here, so tests can drive the routes
/// directly.
pub fn router(solver: SharedSolver) -> Router {
    Router::new()
        .route("/optimize", post(optimize))
        .route("/solvers", get(solvers))
        .with_state(solver)
}

async fn optimize(
    State(solver): State<SharedSolver>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    debug!(?request, "optimize request received");

    let model = mappers::request_to_model(&request)?;
    info!(
        variables = model.num_variables(),
        constraints = model.constraints.len(),
        direction = %model.objective.direction,
        solver = solver.name(),
        "solving model"
    );

    let solution = solver.solve(&model).map_err(DomainError::from)?;
    info!(status = %solution.status, "solve finished");

    Ok(Json(mappers::solution_to_response(&solution)))
}

async fn solvers(State(solver): State<SharedSolver>) -> Json<SolversResponse> {
    let solvers = SolverFactory::available()
        .iter()
        .map(|backend| SolverInfo {
            name: backend.name().to_string(),
            supports_mip: backend.supports_mip(),
        })
        .collect();

    Json(SolversResponse {
        solvers,
        default: solver.name().to_string(),
    })
}

/// Domain failure dressed for the wire: client mistakes are 400, solver
/// trouble is 500, both with an `{"error": ...}` body.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        warn!(error = %self.0, %status, "request failed");
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

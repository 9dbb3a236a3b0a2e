// Mappers: convert between wire DTOs and domain models.
// Keeps serde shapes out of the business logic.

use crate::domain::{
    builder::{self, ConstraintSpec, VariableSpec},
    error::DomainError,
    models::{Model, Solution},
    value_objects::{OptimizationType, VariableType},
    ValidationError,
};

use super::dto::{NumberOrText, OptimizeRequest, OptimizeResponse, VariableDto};

/// Turn a decoded request into a validated, solver-ready [`Model`].
pub fn request_to_model(request: &OptimizeRequest) -> Result<Model, DomainError> {
    let direction = OptimizationType::parse(request.objective_type.trim()).ok_or_else(|| {
        ValidationError::UnknownObjectiveType(request.objective_type.clone())
    })?;

    let variables = request
        .variables
        .iter()
        .map(variable_to_spec)
        .collect::<Result<Vec<_>, DomainError>>()?;

    let constraints = request
        .constraints
        .iter()
        .map(|dto| {
            Ok(ConstraintSpec {
                lhs: dto.lhs.clone(),
                operator: dto.operator.clone(),
                rhs: numeric(&dto.rhs, "constraint rhs")?,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    // An absent or blank objectiveFunction falls back to the coef fields.
    let objective_expression = request
        .objective_function
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    builder::build(&variables, &constraints, direction, objective_expression)
}

/// Shape a solved model for the wire.
pub fn solution_to_response(solution: &Solution) -> OptimizeResponse {
    OptimizeResponse {
        solution: solution.values.clone(),
        objective_value: solution.objective_value,
        status: solution.status.to_string(),
    }
}

fn variable_to_spec(dto: &VariableDto) -> Result<VariableSpec, DomainError> {
    let variable_type = match dto.variable_type.as_deref() {
        Some(text) => VariableType::parse(text.trim())
            .ok_or_else(|| ValidationError::UnknownVariableType(text.to_string()))?,
        None => VariableType::default(),
    };

    Ok(VariableSpec {
        name: dto.name.clone(),
        coef: numeric(&dto.coef, "variable coefficient")?,
        lower_bound: dto
            .lower_bound
            .as_ref()
            .map(|value| numeric(value, "variable lower bound"))
            .transpose()?,
        upper_bound: dto
            .upper_bound
            .as_ref()
            .map(|value| numeric(value, "variable upper bound"))
            .transpose()?,
        variable_type,
    })
}

fn numeric(value: &NumberOrText, field: &'static str) -> Result<f64, DomainError> {
    match value {
        NumberOrText::Number(n) => Ok(*n),
        NumberOrText::Text(text) => text.trim().parse().map_err(|_| {
            ValidationError::NonNumeric {
                field,
                value: text.clone(),
            }
            .into()
        }),
        NumberOrText::Other(other) => Err(ValidationError::NonNumeric {
            field,
            value: other.to_string(),
        }
        .into()),
    }
}

//! Shared translation from the domain [`Model`] to a `good_lp` problem.
//!
//! Backends differ only in the `good_lp` solver function they hand to
//! [`solve_with`]; the model walk, constant folding and status mapping
//! are identical for all of them.

use std::collections::{BTreeMap, HashMap};

use good_lp::{
    variable, variable::UnsolvedProblem, variables, Expression, ResolutionError,
    Solution as LpSolution, SolverModel, Variable as LpVariable,
};

use crate::domain::{
    models::{Model, Solution},
    solver_service::{Result, SolverError},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus},
};

pub(crate) fn solve_with<M>(
    model: &Model,
    backend: impl FnMut(UnsolvedProblem) -> M,
) -> Result<Solution>
where
    M: SolverModel<Error = ResolutionError>,
{
    // Constraints without variables never reach the backend: a violated
    // one settles the problem immediately, a satisfied one is dropped.
    for constraint in &model.constraints {
        if constraint.is_constant() && !constraint.constant_holds() {
            return Ok(Solution::new(
                SolutionStatus::Infeasible,
                format!(
                    "constant constraint `{} {} {}` cannot hold",
                    constraint.lhs.constant, constraint.op, constraint.rhs
                ),
            ));
        }
    }

    // A model without variables is trivially solved.
    if model.variables.is_empty() {
        return Ok(Solution::optimal(
            model.objective.expression.constant,
            BTreeMap::new(),
        ));
    }

    let mut vars = variables!();
    let mut lp_variables: Vec<(&str, LpVariable)> = Vec::with_capacity(model.num_variables());
    for var in &model.variables {
        let mut definition = variable().min(var.lower_bound);
        if let Some(upper) = var.upper_bound {
            definition = definition.max(upper);
        }
        if var.is_integer() {
            definition = definition.integer();
        }
        lp_variables.push((var.name.as_str(), vars.add(definition)));
    }
    let by_name: HashMap<&str, LpVariable> = lp_variables.iter().copied().collect();

    let objective = linear_expression(&model.objective.expression.coefficients, &by_name);
    let problem = match model.objective.direction {
        OptimizationType::Maximize => vars.maximise(objective),
        OptimizationType::Minimize => vars.minimise(objective),
    };

    let mut lp_model = problem.using(backend);
    for constraint in &model.constraints {
        if constraint.is_constant() {
            continue;
        }
        let lhs = linear_expression(&constraint.lhs.coefficients, &by_name);
        let rhs = constraint.effective_rhs();
        lp_model = match constraint.op {
            ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(rhs)),
            ConstraintType::Equal => lp_model.with(lhs.eq(rhs)),
            ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(rhs)),
        };
    }

    match lp_model.solve() {
        Ok(solved) => {
            let mut values = BTreeMap::new();
            for (name, lp_var) in &lp_variables {
                values.insert((*name).to_string(), solved.value(*lp_var));
            }
            let objective_value = model.objective.expression.evaluate(&values);
            Ok(Solution::optimal(objective_value, values))
        }
        Err(ResolutionError::Infeasible) => Ok(Solution::new(
            SolutionStatus::Infeasible,
            "problem is infeasible: no assignment satisfies all constraints",
        )),
        Err(ResolutionError::Unbounded) => Ok(Solution::new(
            SolutionStatus::Unbounded,
            "problem is unbounded: the objective can be improved without limit",
        )),
        Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
    }
}

fn linear_expression(
    coefficients: &BTreeMap<String, f64>,
    by_name: &HashMap<&str, LpVariable>,
) -> Expression {
    coefficients
        .iter()
        .filter_map(|(name, &coefficient)| {
            by_name
                .get(name.as_str())
                .map(|&lp_var| coefficient * lp_var)
        })
        .sum()
}

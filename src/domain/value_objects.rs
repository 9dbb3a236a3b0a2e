// Domain value objects representing core business concepts

use std::fmt;

/// Type of decision variable in the optimization problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableType {
    /// Continuous real number (x ∈ ℝ)
    #[default]
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

impl VariableType {
    /// Recognize the wire-level spelling of a variable type.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "continuous" => Some(VariableType::Continuous),
            "integer" => Some(VariableType::Integer),
            "binary" => Some(VariableType::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "continuous"),
            VariableType::Integer => write!(f, "integer"),
            VariableType::Binary => write!(f, "binary"),
        }
    }
}

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// Recognize a comparison operator as written in a request.
    /// `==` is accepted as an alias for `=`.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "<=" => Some(ConstraintType::LessThanOrEqual),
            "=" | "==" => Some(ConstraintType::Equal),
            ">=" => Some(ConstraintType::GreaterThanOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::LessThanOrEqual => write!(f, "<="),
            ConstraintType::Equal => write!(f, "="),
            ConstraintType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

impl OptimizationType {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "minimize" => Some(OptimizationType::Minimize),
            "maximize" => Some(OptimizationType::Maximize),
            _ => None,
        }
    }
}

impl fmt::Display for OptimizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationType::Minimize => write!(f, "minimize"),
            OptimizationType::Maximize => write!(f, "maximize"),
        }
    }
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Solving was not attempted or did not finish
    NotSolved,
    /// Solver finished without classifying the problem
    Undefined,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "optimal"),
            SolutionStatus::Infeasible => write!(f, "infeasible"),
            SolutionStatus::Unbounded => write!(f, "unbounded"),
            SolutionStatus::NotSolved => write!(f, "not-solved"),
            SolutionStatus::Undefined => write!(f, "undefined"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    /// Automatically select the best compiled-in solver
    Auto,
    /// microlp, a pure-Rust simplex implementation
    Microlp,
    /// HiGHS high-performance LP/MIP solver
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "auto"),
            SolverBackend::Microlp => write!(f, "microlp"),
            SolverBackend::Highs => write!(f, "highs"),
        }
    }
}

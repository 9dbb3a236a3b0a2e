//! Linear expression parsing.
//!
//! Constraint left-hand sides arrive as plain text (`"2x + 3y - 1"`). They
//! are lexed into tokens and reduced over a closed grammar: sums of signed
//! terms, each term a product of decimal literals and at most one declared
//! variable. There is no evaluation of arbitrary code and no grouping.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::Peekable;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{map, opt, recognize, value},
    multi::{many0, many0_count},
    sequence::{pair, preceded, terminated},
    Finish, IResult,
};
use thiserror::Error;

/// A linear expression over named decision variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    /// Aggregated coefficient per referenced variable
    pub coefficients: BTreeMap<String, f64>,
    /// Constant offset of the expression
    pub constant: f64,
}

impl LinearExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coefficient of `name`, 0 when the variable does not occur.
    pub fn coefficient(&self, name: &str) -> f64 {
        self.coefficients.get(name).copied().unwrap_or(0.0)
    }

    /// Evaluate the expression at the given variable assignment.
    /// Variables missing from `values` count as 0.
    pub fn evaluate(&self, values: &BTreeMap<String, f64>) -> f64 {
        self.coefficients
            .iter()
            .map(|(name, coefficient)| {
                coefficient * values.get(name).copied().unwrap_or(0.0)
            })
            .sum::<f64>()
            + self.constant
    }

    fn add_term(&mut self, coefficient: f64, variable: Option<String>) {
        match variable {
            Some(name) => *self.coefficients.entry(name).or_insert(0.0) += coefficient,
            None => self.constant += coefficient,
        }
    }
}

/// Failure to read an expression string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character `{0}` in expression")]
    UnexpectedCharacter(char),

    #[error("parenthesized grouping is not supported, expressions must be linear")]
    GroupingNotSupported,

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("nonlinear term: `{first}` multiplied by `{second}`")]
    NonlinearTerm { first: String, second: String },

    #[error("expected a number or variable, found `{0}`")]
    ExpectedTerm(String),

    #[error("expected a number or variable after `*`, found `{0}`")]
    ExpectedFactor(String),

    #[error("missing `+` or `-` before `{0}`")]
    MissingOperator(String),

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,
}

/// Whether `name` can serve as a decision-variable identifier:
/// an ASCII letter or underscore followed by letters, digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parse `input` into a [`LinearExpression`] over the declared variables.
///
/// Identifiers are lexed by maximal munch and then resolved against
/// `known_variables`, so a name that is a prefix of another (`x` vs `x1`)
/// can never be matched partially. The empty string parses to the zero
/// expression.
pub fn parse(
    input: &str,
    known_variables: &BTreeSet<String>,
) -> Result<LinearExpression, ParseError> {
    let tokens = lex(input)?;
    let mut tokens = tokens.into_iter().peekable();
    let mut expression = LinearExpression::new();

    let mut first = true;
    while tokens.peek().is_some() {
        let mut sign = 1.0;
        let mut signed = false;
        while let Some(Token::Plus | Token::Minus) = tokens.peek() {
            if matches!(tokens.next(), Some(Token::Minus)) {
                sign = -sign;
            }
            signed = true;
        }
        if !first && !signed {
            if let Some(token) = tokens.peek() {
                return Err(ParseError::MissingOperator(token.to_string()));
            }
        }
        let (coefficient, variable) = term(&mut tokens, known_variables)?;
        expression.add_term(sign * coefficient, variable);
        first = false;
    }

    Ok(expression)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
        }
    }
}

fn number(input: &str) -> IResult<&str, f64> {
    map(
        recognize(pair(digit1, opt(preceded(char('.'), digit1)))),
        // A recognized decimal literal always reads as f64.
        |literal: &str| literal.parse().unwrap(),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    preceded(
        multispace0,
        alt((
            map(number, Token::Number),
            map(identifier, |name: &str| Token::Ident(name.to_owned())),
            value(Token::Plus, char('+')),
            value(Token::Minus, char('-')),
            value(Token::Star, char('*')),
        )),
    )(input)
}

/// Tokenize the whole input. Anything the lexer cannot consume is an
/// error, with grouping characters called out separately.
fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let (rest, tokens) = terminated(many0(token), multispace0)(input)
        .finish()
        .map_err(|e: nom::error::Error<&str>| unconsumed(e.input))?;
    if rest.is_empty() {
        Ok(tokens)
    } else {
        Err(unconsumed(rest))
    }
}

fn unconsumed(rest: &str) -> ParseError {
    match rest.chars().next() {
        Some('(' | ')') => ParseError::GroupingNotSupported,
        Some(c) => ParseError::UnexpectedCharacter(c),
        None => ParseError::UnexpectedEnd,
    }
}

/// Read one term: a product of numeric factors and at most one variable.
/// Juxtaposition (`2x`) is implicit multiplication, permitted only when a
/// number directly precedes an identifier.
fn term(
    tokens: &mut Peekable<std::vec::IntoIter<Token>>,
    known_variables: &BTreeSet<String>,
) -> Result<(f64, Option<String>), ParseError> {
    let mut coefficient = 1.0;
    let mut variable: Option<String> = None;

    let mut last_was_number = match tokens.next() {
        Some(Token::Number(n)) => {
            coefficient *= n;
            true
        }
        Some(Token::Ident(name)) => {
            bind_variable(&mut variable, name, known_variables)?;
            false
        }
        Some(token) => return Err(ParseError::ExpectedTerm(token.to_string())),
        None => return Err(ParseError::UnexpectedEnd),
    };

    loop {
        match tokens.peek() {
            Some(Token::Star) => {
                tokens.next();
                match tokens.next() {
                    Some(Token::Number(n)) => {
                        coefficient *= n;
                        last_was_number = true;
                    }
                    Some(Token::Ident(name)) => {
                        bind_variable(&mut variable, name, known_variables)?;
                        last_was_number = false;
                    }
                    Some(token) => return Err(ParseError::ExpectedFactor(token.to_string())),
                    None => return Err(ParseError::UnexpectedEnd),
                }
            }
            Some(Token::Ident(_)) if last_was_number => {
                if let Some(Token::Ident(name)) = tokens.next() {
                    bind_variable(&mut variable, name, known_variables)?;
                    last_was_number = false;
                }
            }
            _ => break,
        }
    }

    Ok((coefficient, variable))
}

fn bind_variable(
    slot: &mut Option<String>,
    name: String,
    known_variables: &BTreeSet<String>,
) -> Result<(), ParseError> {
    if !known_variables.contains(&name) {
        return Err(ParseError::UnknownVariable(name));
    }
    match slot {
        Some(first) => Err(ParseError::NonlinearTerm {
            first: first.clone(),
            second: name,
        }),
        None => {
            *slot = Some(name);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn aggregates_repeated_variables() {
        let expr = parse("2x + 3x - y", &vars(&["x", "y"])).unwrap();
        assert_eq!(expr.coefficient("x"), 5.0);
        assert_eq!(expr.coefficient("y"), -1.0);
        assert_eq!(expr.constant, 0.0);
        assert_eq!(expr.coefficients.len(), 2);
    }

    #[test]
    fn maximal_munch_on_prefix_names() {
        let expr = parse("3x1 + 2x", &vars(&["x", "x1"])).unwrap();
        assert_eq!(expr.coefficient("x1"), 3.0);
        assert_eq!(expr.coefficient("x"), 2.0);
    }

    #[test]
    fn unknown_variable_is_rejected() {
        assert_eq!(
            parse("x + z", &vars(&["x", "y"])),
            Err(ParseError::UnknownVariable("z".into()))
        );
    }

    #[test]
    fn prefix_of_unknown_identifier_is_not_matched() {
        // `x1` must not be read as `x` followed by garbage.
        assert_eq!(
            parse("3x1", &vars(&["x"])),
            Err(ParseError::UnknownVariable("x1".into()))
        );
    }

    #[test]
    fn bare_variable_has_implicit_coefficient_one() {
        let expr = parse("x - y", &vars(&["x", "y"])).unwrap();
        assert_eq!(expr.coefficient("x"), 1.0);
        assert_eq!(expr.coefficient("y"), -1.0);
    }

    #[test]
    fn explicit_and_implicit_multiplication() {
        let known = vars(&["x"]);
        for text in ["2*x", "2 * x", "2x", "2 x", "x*2", "x * 2"] {
            let expr = parse(text, &known).unwrap();
            assert_eq!(expr.coefficient("x"), 2.0, "failed on {text:?}");
        }
    }

    #[test]
    fn constants_fold_into_offset() {
        let expr = parse("2*3 + x - 1.5", &vars(&["x"])).unwrap();
        assert_eq!(expr.constant, 4.5);
        assert_eq!(expr.coefficient("x"), 1.0);
    }

    #[test]
    fn decimal_coefficients() {
        let expr = parse("0.5x + 1.25y", &vars(&["x", "y"])).unwrap();
        assert_eq!(expr.coefficient("x"), 0.5);
        assert_eq!(expr.coefficient("y"), 1.25);
    }

    #[test]
    fn leading_and_doubled_signs() {
        let expr = parse("-x + -2", &vars(&["x"])).unwrap();
        assert_eq!(expr.coefficient("x"), -1.0);
        assert_eq!(expr.constant, -2.0);

        let expr = parse("- - x", &vars(&["x"])).unwrap();
        assert_eq!(expr.coefficient("x"), 1.0);
    }

    #[test]
    fn empty_input_is_the_zero_expression() {
        let expr = parse("   ", &vars(&["x"])).unwrap();
        assert_eq!(expr, LinearExpression::new());
    }

    #[test]
    fn grouping_is_rejected() {
        assert_eq!(
            parse("2*(x + y)", &vars(&["x", "y"])),
            Err(ParseError::GroupingNotSupported)
        );
    }

    #[test]
    fn foreign_characters_are_rejected() {
        assert_eq!(
            parse("x / 2", &vars(&["x"])),
            Err(ParseError::UnexpectedCharacter('/'))
        );
        assert_eq!(
            parse("x + 2; drop", &vars(&["x"])),
            Err(ParseError::UnexpectedCharacter(';'))
        );
    }

    #[test]
    fn nonlinear_products_are_rejected() {
        assert_eq!(
            parse("x*y", &vars(&["x", "y"])),
            Err(ParseError::NonlinearTerm {
                first: "x".into(),
                second: "y".into(),
            })
        );
        assert!(matches!(
            parse("x*x", &vars(&["x"])),
            Err(ParseError::NonlinearTerm { .. })
        ));
    }

    #[test]
    fn adjacent_terms_need_an_operator() {
        assert_eq!(
            parse("x 2", &vars(&["x"])),
            Err(ParseError::MissingOperator("2".into()))
        );
        assert_eq!(
            parse("x y", &vars(&["x", "y"])),
            Err(ParseError::MissingOperator("y".into()))
        );
    }

    #[test]
    fn dangling_operators_are_rejected() {
        assert_eq!(parse("x +", &vars(&["x"])), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse("2*", &vars(&["x"])), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse("* x", &vars(&["x"])),
            Err(ParseError::ExpectedTerm("*".into()))
        );
    }

    #[test]
    fn evaluate_applies_assignment() {
        let expr = parse("2x + 3y + 1", &vars(&["x", "y"])).unwrap();
        let assignment = BTreeMap::from([("x".to_string(), 2.0), ("y".to_string(), 1.0)]);
        assert_eq!(expr.evaluate(&assignment), 8.0);
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("x"));
        assert!(is_valid_identifier("x_1"));
        assert!(is_valid_identifier("_slack"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier("x-y"));
        assert!(!is_valid_identifier("preço"));
    }
}

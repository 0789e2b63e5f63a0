use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod algebra;
pub mod evaluator;
pub mod graph;
pub mod normalize;
pub mod stats;
pub mod syntax;

#[derive(Parser)]
#[grammar = "expr.pest"]
pub struct ExprParser;

#[derive(Error, Debug)]
pub enum CalcError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("Evaluation error: {0}")]
  EvaluationError(String),
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),
}

impl ExprParser {
  pub fn parse_expr(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  ExprParser::parse_expr(input)
}

/// Normalize raw user input and parse it into an expression tree.
///
/// This is the front door for every operation: the lexical rewrites run
/// first (`^` to `**`, implicit multiplication made explicit), then the
/// result goes through the grammar.
pub fn parse_expression(input: &str) -> Result<syntax::Expr, CalcError> {
  let normalized = normalize::normalize(input);
  let trimmed = normalized.trim();
  if trimmed.is_empty() {
    return Err(CalcError::EmptyInput);
  }
  let mut pairs = parse(trimmed)?;
  let program = pairs.next().ok_or(CalcError::EmptyInput)?;
  let expression = program
    .into_inner()
    .find(|p| p.as_rule() == Rule::Expression)
    .ok_or(CalcError::EmptyInput)?;
  Ok(syntax::pair_to_expr(expression))
}

// Re-export the most used entry points
pub use algebra::{binomial_expansion, solve_roots};
pub use evaluator::eval_numeric;
pub use syntax::Expr;

use mathsuite::parse;

#[cfg(test)]
mod tests {
  use mathsuite::Rule;
  use mathsuite::parse_expression;
  use mathsuite::syntax::expr_to_string;

  use super::*;

  #[test]
  fn test_parse_calculation() {
    let input = "1 + 2";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_symbolic_calculation() {
    let input = "x + 2";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_polynomial() {
    let input = "3*x**2 + 2*x + 1";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_function_call() {
    let input = "sqrt(4)";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_nested_function_calls() {
    let input = "sqrt(abs(x - 3))";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_expression() {
    let input = "1 + 2";
    let program = parse(input).unwrap().next().unwrap();
    let expression = program.into_inner().next().unwrap();
    assert_eq!(expression.as_rule(), Rule::Expression);
  }

  #[test]
  fn test_parse_leading_dot_real_literal() {
    let input = ".5 + x";
    let pair = parse(input).unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_unbalanced_parenthesis_fails() {
    assert!(parse("(x").is_err());
  }

  #[test]
  fn test_trailing_operator_fails() {
    assert!(parse("2 +").is_err());
  }

  #[test]
  fn test_pipeline_inserts_implicit_multiplication() {
    let expr = parse_expression("2x^2").unwrap();
    assert_eq!(expr_to_string(&expr), "2*x**2");
  }

  #[test]
  fn test_pipeline_keeps_factored_form() {
    let expr = parse_expression("(x-1)(x-2)").unwrap();
    assert_eq!(expr_to_string(&expr), "(x - 1)*(x - 2)");
  }

  #[test]
  fn test_prefix_minus_binds_looser_than_power() {
    let expr = parse_expression("-x^2").unwrap();
    assert_eq!(expr_to_string(&expr), "-x**2");
  }

  #[test]
  fn test_empty_input_fails() {
    assert!(parse_expression("   ").is_err());
  }
}

use mathsuite::eval_numeric;
use mathsuite::parse_expression;

fn eval(input: &str) -> f64 {
  eval_numeric(&parse_expression(input).unwrap()).unwrap()
}

#[test]
fn operator_precedence() {
  assert_eq!(eval("2+2*2"), 6.0);
  assert_eq!(eval("10-4/2"), 8.0);
}

#[test]
fn caret_powers() {
  assert_eq!(eval("2^10"), 1024.0);
  assert_eq!(eval("2^2^3"), 256.0);
}

#[test]
fn prefix_minus_binds_looser_than_power() {
  assert_eq!(eval("-3^2"), -9.0);
  assert_eq!(eval("(-3)^2"), 9.0);
}

#[test]
fn known_constants() {
  assert!((eval("2*pi") - 2.0 * std::f64::consts::PI).abs() < 1e-12);
  assert!((eval("e^2") - std::f64::consts::E.powi(2)).abs() < 1e-12);
}

#[test]
fn known_functions() {
  assert_eq!(eval("sqrt(16)"), 4.0);
  assert_eq!(eval("abs(0-5)"), 5.0);
  assert!((eval("sin(0)")).abs() < 1e-12);
  assert!((eval("log(e)") - 1.0).abs() < 1e-12);
}

#[test]
fn division_by_zero_is_nonfinite_not_an_error() {
  assert!(eval("1/0").is_infinite());
}

#[test]
fn domain_errors_are_nonfinite_not_errors() {
  assert!(eval("sqrt(0-1)").is_nan());
}

#[test]
fn unknown_symbol_is_an_error() {
  let expr = parse_expression("2*q").unwrap();
  assert!(eval_numeric(&expr).is_err());
}

#[test]
fn unknown_function_is_an_error() {
  let expr = parse_expression("gamma(2)").unwrap();
  assert!(eval_numeric(&expr).is_err());
}

#[test]
fn wrong_arity_is_an_error() {
  let expr = parse_expression("sqrt(1, 2)").unwrap();
  assert!(eval_numeric(&expr).is_err());
}

use mathsuite::graph::{DOMAIN_MAX, DOMAIN_MIN, NUM_SAMPLES, sample, sample_over};

#[test]
fn default_domain_and_sample_count() {
  let data = sample("x^2").unwrap();
  assert_eq!(data.xs.len(), NUM_SAMPLES);
  assert_eq!(data.ys.len(), NUM_SAMPLES);
  assert!((data.xs[0] - DOMAIN_MIN).abs() < 1e-12);
  assert!((data.xs[NUM_SAMPLES - 1] - DOMAIN_MAX).abs() < 1e-12);
  assert!(data.ys.iter().all(|y| y.is_finite()));
  assert_eq!(data.label(), "y = x**2");
}

#[test]
fn polynomial_with_implicit_multiplication() {
  let data = sample("(2x^4)+(2x)-1").unwrap();
  assert!(data.ys.iter().all(|y| y.is_finite()));
  // f(-10) = 2*10^4 - 20 - 1
  assert!((data.ys[0] - 19979.0).abs() < 1e-6);
}

#[test]
fn division_pole_propagates_nonfinite_samples() {
  let data = sample("1/(x+10)").unwrap();
  assert!(!data.ys[0].is_finite());
  assert!(data.ys[1].is_finite());
}

#[test]
fn domain_errors_become_nan_samples() {
  let data = sample("log(x)").unwrap();
  assert!(data.ys.iter().any(|y| !y.is_finite()));
  assert!(data.ys.iter().any(|y| y.is_finite()));
}

#[test]
fn known_constants_are_usable() {
  let data = sample_over("sin(pi*x)", 0.0, 2.0, 5).unwrap();
  assert!(data.ys.iter().all(|y| y.is_finite()));
}

#[test]
fn custom_domain() {
  let data = sample_over("x", 0.0, 1.0, 11).unwrap();
  assert_eq!(data.xs.len(), 11);
  assert!((data.xs[1] - 0.1).abs() < 1e-12);
  assert!((data.ys[10] - 1.0).abs() < 1e-12);
}

#[test]
fn unknown_symbol_is_an_error() {
  assert!(sample("x + z").is_err());
}

#[test]
fn unknown_function_is_an_error() {
  assert!(sample("sinh(x)").is_err());
}

#[test]
fn malformed_expression_is_an_error() {
  assert!(sample("x^").is_err());
}

#[test]
fn empty_domain_is_rejected() {
  assert!(sample_over("x", 1.0, 1.0, 10).is_err());
}

#[test]
fn single_point_grid_is_rejected() {
  assert!(sample_over("x", 0.0, 1.0, 1).is_err());
}

use mathsuite::normalize::normalize;

#[test]
fn caret_becomes_power_operator() {
  assert_eq!(normalize("x^2"), "x**2");
}

#[test]
fn digit_before_symbol_is_a_coefficient() {
  assert_eq!(normalize("2x"), "2*x");
}

#[test]
fn digit_before_group_is_a_coefficient() {
  assert_eq!(normalize("3(x+1)"), "3*(x+1)");
}

#[test]
fn adjacent_groups_multiply() {
  assert_eq!(normalize("(x)(x)"), "(x)*(x)");
}

#[test]
fn group_before_digit_multiplies() {
  assert_eq!(normalize("(x)2"), "(x)*2");
}

#[test]
fn combined_rewrites() {
  assert_eq!(normalize("(2x^4)+(2x)-1"), "(2*x**4)+(2*x)-1");
}

#[test]
fn digit_before_function_name_is_split_blindly() {
  // The rewrite is lexical: it does not protect function names.
  assert_eq!(normalize("2sqrt(4)"), "2*sqrt(4)");
}

#[test]
fn idempotent_on_normalized_input() {
  for input in [
    "2*x",
    "x**2",
    "3*(x+1)",
    "(x)*(x)",
    "a + b*c - d/e",
    "(2*x**4)+(2*x)-1",
  ] {
    let once = normalize(input);
    assert_eq!(normalize(&once), once);
  }
}

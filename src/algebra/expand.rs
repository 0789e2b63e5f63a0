use std::collections::HashMap;

use crate::CalcError;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator, expr_to_string};

// ─── Binomial expansion ─────────────────────────────────────────────

/// Result of expanding `(a + b)**n`.
pub struct Expansion {
  pub a: String,
  pub b: String,
  pub exponent: u32,
  pub expanded: Expr,
}

impl Expansion {
  /// Text block for the results pane.
  pub fn render(&self) -> String {
    format!(
      "BINOMIAL EXPANSION of ({} + {})**{}:\n\n{}",
      self.a,
      self.b,
      self.exponent,
      expr_to_string(&self.expanded)
    )
  }
}

/// Expand `(a + b)**n` symbolically from raw user input.
///
/// `a` and `b` are normalized and parsed independently, exactly as they
/// were typed into their own fields.
pub fn binomial_expansion(
  a: &str,
  b: &str,
  n: u32,
) -> Result<Expansion, CalcError> {
  let a_expr = crate::parse_expression(a)?;
  let b_expr = crate::parse_expression(b)?;
  let base = Expr::BinaryOp {
    op: BinaryOperator::Plus,
    left: Box::new(a_expr.clone()),
    right: Box::new(b_expr.clone()),
  };
  let power = Expr::BinaryOp {
    op: BinaryOperator::Power,
    left: Box::new(base),
    right: Box::new(Expr::Integer(n as i128)),
  };
  Ok(Expansion {
    a: expr_to_string(&a_expr),
    b: expr_to_string(&b_expr),
    exponent: n,
    expanded: expand_and_combine(&power),
  })
}

// ─── Expansion machinery ────────────────────────────────────────────

/// Expand an expression and combine like terms.
pub fn expand_and_combine(expr: &Expr) -> Expr {
  let expanded = expand_expr(expr);
  let terms = collect_additive_terms(&expanded);
  combine_and_build(terms)
}

/// Recursively expand products and positive integer powers of sums.
pub fn expand_expr(expr: &Expr) -> Expr {
  match expr {
    Expr::Integer(_)
    | Expr::Real(_)
    | Expr::Constant(_)
    | Expr::Identifier(_) => expr.clone(),

    Expr::BinaryOp { op, left, right } => {
      let left_exp = expand_expr(left);
      let right_exp = expand_expr(right);
      match op {
        BinaryOperator::Plus | BinaryOperator::Minus => Expr::BinaryOp {
          op: *op,
          left: Box::new(left_exp),
          right: Box::new(right_exp),
        },
        BinaryOperator::Times => distribute_product(&left_exp, &right_exp),
        BinaryOperator::Divide => {
          // Distribute a sum numerator across the division so each term
          // stays a plain product for the combiner.
          let left_terms = collect_additive_terms(&left_exp);
          if left_terms.len() > 1 {
            build_sum(
              left_terms
                .into_iter()
                .map(|t| Expr::BinaryOp {
                  op: BinaryOperator::Divide,
                  left: Box::new(t),
                  right: Box::new(right_exp.clone()),
                })
                .collect(),
            )
          } else {
            Expr::BinaryOp {
              op: BinaryOperator::Divide,
              left: Box::new(left_exp),
              right: Box::new(right_exp),
            }
          }
        }
        BinaryOperator::Power => {
          if let Expr::Integer(n) = &right_exp {
            if *n == 0 {
              return Expr::Integer(1);
            }
            if *n == 1 {
              return left_exp;
            }
            if *n >= 2 && is_sum(&left_exp) {
              return expand_power(&left_exp, *n);
            }
          }
          fold_power(&left_exp, &right_exp)
        }
      }
    }

    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let operand_exp = expand_expr(operand);
      let terms = collect_additive_terms(&operand_exp);
      let negated: Vec<Expr> =
        terms.into_iter().map(|t| negate_term(&t)).collect();
      build_sum(negated)
    }

    Expr::FunctionCall { name, args } => Expr::FunctionCall {
      name: name.clone(),
      args: args.iter().map(expand_expr).collect(),
    },
  }
}

/// Check if an expression is a sum.
pub fn is_sum(expr: &Expr) -> bool {
  matches!(
    expr,
    Expr::BinaryOp {
      op: BinaryOperator::Plus | BinaryOperator::Minus,
      ..
    }
  )
}

/// Split an expression into its additive terms, pushing signs inward.
pub fn collect_additive_terms(expr: &Expr) -> Vec<Expr> {
  match expr {
    Expr::BinaryOp {
      op: BinaryOperator::Plus,
      left,
      right,
    } => {
      let mut terms = collect_additive_terms(left);
      terms.extend(collect_additive_terms(right));
      terms
    }
    Expr::BinaryOp {
      op: BinaryOperator::Minus,
      left,
      right,
    } => {
      let mut terms = collect_additive_terms(left);
      terms.extend(
        collect_additive_terms(right)
          .into_iter()
          .map(|t| negate_term(&t)),
      );
      terms
    }
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => collect_additive_terms(operand)
      .into_iter()
      .map(|t| negate_term(&t))
      .collect(),
    _ => vec![expr.clone()],
  }
}

/// Distribute the product of two expanded expressions.
pub fn distribute_product(left: &Expr, right: &Expr) -> Expr {
  let left_terms = collect_additive_terms(left);
  let right_terms = collect_additive_terms(right);

  if left_terms.len() == 1 && right_terms.len() == 1 {
    return multiply_terms(&left_terms[0], &right_terms[0]);
  }

  let mut result_terms = Vec::new();
  for l in &left_terms {
    for r in &right_terms {
      result_terms.push(multiply_terms(l, r));
    }
  }
  build_sum(result_terms)
}

/// Multiply two non-sum terms.
pub fn multiply_terms(a: &Expr, b: &Expr) -> Expr {
  if let Expr::UnaryOp {
    op: UnaryOperator::Minus,
    operand,
  } = a
  {
    return negate_term(&multiply_terms(operand, b));
  }
  if let Expr::UnaryOp {
    op: UnaryOperator::Minus,
    operand,
  } = b
  {
    return negate_term(&multiply_terms(a, operand));
  }

  match (a, b) {
    (Expr::Integer(1), _) => b.clone(),
    (_, Expr::Integer(1)) => a.clone(),
    (Expr::Integer(0), _) | (_, Expr::Integer(0)) => Expr::Integer(0),
    (Expr::Integer(x), Expr::Integer(y)) => Expr::Integer(x * y),
    (Expr::Real(x), Expr::Real(y)) => Expr::Real(x * y),
    (Expr::Integer(x), Expr::Real(y)) | (Expr::Real(y), Expr::Integer(x)) => {
      Expr::Real(*x as f64 * y)
    }
    _ => {
      // Combine like bases: x * x -> x**2
      let mut factors = collect_multiplicative_factors(a);
      factors.extend(collect_multiplicative_factors(b));
      combine_product_factors(factors)
    }
  }
}

/// Combine multiplicative factors, merging like bases into powers.
pub fn combine_product_factors(factors: Vec<Expr>) -> Expr {
  // (sort_key, base, exponent)
  let mut base_exps: Vec<(String, Expr, Expr)> = Vec::new();
  let mut numeric_coeff = Expr::Integer(1);

  for f in &factors {
    match f {
      Expr::Integer(_) | Expr::Real(_) => {
        numeric_coeff = multiply_exprs(&numeric_coeff, f);
      }
      _ => {
        let (base, exp) = extract_base_and_exp(f);
        let key = expr_to_string(&base);
        if let Some(entry) = base_exps.iter_mut().find(|(k, _, _)| *k == key) {
          entry.2 = add_exprs(&entry.2, &exp);
        } else {
          base_exps.push((key, base, exp));
        }
      }
    }
  }

  let mut result_factors: Vec<Expr> = Vec::new();
  if !matches!(&numeric_coeff, Expr::Integer(1)) {
    result_factors.push(numeric_coeff);
  }

  for (_, base, exp) in base_exps {
    if matches!(&exp, Expr::Integer(0)) {
      continue;
    } else if matches!(&exp, Expr::Integer(1)) {
      result_factors.push(base);
    } else {
      result_factors.push(fold_power(&base, &exp));
    }
  }

  if result_factors.is_empty() {
    Expr::Integer(1)
  } else {
    build_product(result_factors)
  }
}

/// Extract base and exponent from a factor.
pub fn extract_base_and_exp(expr: &Expr) -> (Expr, Expr) {
  match expr {
    Expr::BinaryOp {
      op: BinaryOperator::Power,
      left,
      right,
    } => (*left.clone(), *right.clone()),
    _ => (expr.clone(), Expr::Integer(1)),
  }
}

/// Collect multiplicative factors from nested products.
pub fn collect_multiplicative_factors(expr: &Expr) -> Vec<Expr> {
  match expr {
    Expr::BinaryOp {
      op: BinaryOperator::Times,
      left,
      right,
    } => {
      let mut factors = collect_multiplicative_factors(left);
      factors.extend(collect_multiplicative_factors(right));
      factors
    }
    _ => vec![expr.clone()],
  }
}

/// Negate a term.
pub fn negate_term(t: &Expr) -> Expr {
  match t {
    Expr::Integer(n) => Expr::Integer(-n),
    Expr::Real(f) => Expr::Real(-f),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => *operand.clone(),
    _ => Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand: Box::new(t.clone()),
    },
  }
}

/// Expand (sum)^n by repeated distribution, combining as it goes to keep
/// the term count down.
pub fn expand_power(base: &Expr, n: i128) -> Expr {
  if n == 0 {
    return Expr::Integer(1);
  }
  if n == 1 {
    return base.clone();
  }
  let mut result = base.clone();
  for _ in 1..n {
    result = distribute_product(&result, base);
    let terms = collect_additive_terms(&result);
    result = combine_and_build(terms);
  }
  result
}

/// Build a sum from terms.
pub fn build_sum(terms: Vec<Expr>) -> Expr {
  if terms.is_empty() {
    return Expr::Integer(0);
  }
  let mut iter = terms.into_iter();
  let mut result = iter.next().unwrap();
  for t in iter {
    result = Expr::BinaryOp {
      op: BinaryOperator::Plus,
      left: Box::new(result),
      right: Box::new(t),
    };
  }
  result
}

/// Build a product from factors.
pub fn build_product(factors: Vec<Expr>) -> Expr {
  if factors.is_empty() {
    return Expr::Integer(1);
  }
  let mut iter = factors.into_iter();
  let mut result = iter.next().unwrap();
  for f in iter {
    result = Expr::BinaryOp {
      op: BinaryOperator::Times,
      left: Box::new(result),
      right: Box::new(f),
    };
  }
  result
}

/// Combine like terms, sort canonically, and build the final expression.
pub fn combine_and_build(terms: Vec<Expr>) -> Expr {
  // (sort_key, var_factors, coefficient)
  let mut term_map: Vec<(String, Vec<Expr>, Expr)> = Vec::new();

  for term in &terms {
    let (coeff, var_key, var_factors) = decompose_term(term);
    if let Some(entry) = term_map.iter_mut().find(|(k, _, _)| *k == var_key) {
      entry.2 = add_exprs(&entry.2, &coeff);
    } else {
      term_map.push((var_key, var_factors, coeff));
    }
  }

  // Constants first, then reverse-variable lexicographic ascending: sort
  // by the last variable's exponent, then the next-to-last, and so on.
  term_map.sort_by(|(ka, va, _), (kb, vb, _)| {
    match (ka.is_empty(), kb.is_empty()) {
      (true, true) => return std::cmp::Ordering::Equal,
      (true, false) => return std::cmp::Ordering::Less,
      (false, true) => return std::cmp::Ordering::Greater,
      _ => {}
    }
    let ea = extract_exponent_map(va);
    let eb = extract_exponent_map(vb);
    let mut all_vars: Vec<&String> = ea.keys().chain(eb.keys()).collect();
    all_vars.sort();
    all_vars.dedup();
    for var in all_vars.iter().rev() {
      let pa = ea.get(*var).copied().unwrap_or(0);
      let pb = eb.get(*var).copied().unwrap_or(0);
      if pa != pb {
        return pa.cmp(&pb);
      }
    }
    std::cmp::Ordering::Equal
  });

  let mut result_terms: Vec<Expr> = Vec::new();
  for (_, var_factors, coeff) in term_map {
    if is_zero(&coeff) {
      continue;
    }
    if var_factors.is_empty() {
      result_terms.push(coeff);
    } else if matches!(&coeff, Expr::Integer(1)) {
      result_terms.push(build_product(var_factors));
    } else if matches!(&coeff, Expr::Integer(-1)) {
      result_terms.push(negate_term(&build_product(var_factors)));
    } else {
      result_terms
        .push(multiply_exprs(&coeff, &build_product(var_factors)));
    }
  }

  if result_terms.is_empty() {
    Expr::Integer(0)
  } else {
    build_sum(result_terms)
  }
}

fn is_zero(expr: &Expr) -> bool {
  matches!(expr, Expr::Integer(0)) || matches!(expr, Expr::Real(r) if *r == 0.0)
}

/// Decompose a term into (numeric_coefficient, sort_key, variable_factors).
/// E.g. 3*x^2*y -> (3, "x**2*y", [x**2, y]).
pub fn decompose_term(term: &Expr) -> (Expr, String, Vec<Expr>) {
  match term {
    Expr::Integer(_) | Expr::Real(_) => (term.clone(), String::new(), vec![]),
    Expr::Identifier(_) | Expr::Constant(_) => {
      (Expr::Integer(1), expr_to_string(term), vec![term.clone()])
    }
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let (c, k, v) = decompose_term(operand);
      (negate_term(&c), k, v)
    }
    Expr::BinaryOp {
      op: BinaryOperator::Times,
      ..
    } => {
      let factors = collect_multiplicative_factors(term);
      let mut numeric_coeff = Expr::Integer(1);
      let mut var_factors: Vec<Expr> = Vec::new();

      for f in &factors {
        match f {
          Expr::Integer(_) | Expr::Real(_) => {
            numeric_coeff = multiply_exprs(&numeric_coeff, f);
          }
          Expr::UnaryOp {
            op: UnaryOperator::Minus,
            operand,
          } => {
            numeric_coeff = negate_term(&numeric_coeff);
            match operand.as_ref() {
              Expr::Integer(_) | Expr::Real(_) => {
                numeric_coeff = multiply_exprs(&numeric_coeff, operand);
              }
              _ => var_factors.push(*operand.clone()),
            }
          }
          _ => var_factors.push(f.clone()),
        }
      }

      var_factors.sort_by_key(expr_to_string);
      let key = var_factors
        .iter()
        .map(expr_to_string)
        .collect::<Vec<_>>()
        .join("*");
      (numeric_coeff, key, var_factors)
    }
    Expr::BinaryOp {
      op: BinaryOperator::Divide,
      left,
      right,
    } if matches!(right.as_ref(), Expr::Integer(_) | Expr::Real(_)) => {
      let (c, k, v) = decompose_term(left);
      (divide_numeric(&c, right), k, v)
    }
    Expr::BinaryOp {
      op: BinaryOperator::Power,
      ..
    } => (Expr::Integer(1), expr_to_string(term), vec![term.clone()]),
    _ => (Expr::Integer(1), expr_to_string(term), vec![term.clone()]),
  }
}

/// Extract a map of variable name -> exponent from variable factors.
/// E.g. [x**2, y] -> {"x": 2, "y": 1}.
pub fn extract_exponent_map(var_factors: &[Expr]) -> HashMap<String, i128> {
  let mut map = HashMap::new();
  for f in var_factors {
    match f {
      Expr::Identifier(name) => {
        *map.entry(name.clone()).or_insert(0) += 1;
      }
      Expr::BinaryOp {
        op: BinaryOperator::Power,
        left,
        right,
      } => {
        let name = expr_to_string(left);
        let exp = match right.as_ref() {
          Expr::Integer(n) => *n,
          _ => 1,
        };
        *map.entry(name).or_insert(0) += exp;
      }
      _ => {
        let name = expr_to_string(f);
        *map.entry(name).or_insert(0) += 1;
      }
    }
  }
  map
}

// ─── Numeric folding helpers ────────────────────────────────────────

/// Add two expressions, folding numeric operands.
pub fn add_exprs(a: &Expr, b: &Expr) -> Expr {
  match (a, b) {
    (Expr::Integer(0), _) => b.clone(),
    (_, Expr::Integer(0)) => a.clone(),
    (Expr::Integer(x), Expr::Integer(y)) => Expr::Integer(x + y),
    (Expr::Real(x), Expr::Real(y)) => Expr::Real(x + y),
    (Expr::Integer(x), Expr::Real(y)) | (Expr::Real(y), Expr::Integer(x)) => {
      Expr::Real(*x as f64 + y)
    }
    _ => Expr::BinaryOp {
      op: BinaryOperator::Plus,
      left: Box::new(a.clone()),
      right: Box::new(b.clone()),
    },
  }
}

/// Multiply two expressions, folding numeric operands.
pub fn multiply_exprs(a: &Expr, b: &Expr) -> Expr {
  match (a, b) {
    (Expr::Integer(1), _) => b.clone(),
    (_, Expr::Integer(1)) => a.clone(),
    (Expr::Integer(0), _) | (_, Expr::Integer(0)) => Expr::Integer(0),
    (Expr::Integer(x), Expr::Integer(y)) => Expr::Integer(x * y),
    (Expr::Real(x), Expr::Real(y)) => Expr::Real(x * y),
    (Expr::Integer(x), Expr::Real(y)) | (Expr::Real(y), Expr::Integer(x)) => {
      Expr::Real(*x as f64 * y)
    }
    _ => Expr::BinaryOp {
      op: BinaryOperator::Times,
      left: Box::new(a.clone()),
      right: Box::new(b.clone()),
    },
  }
}

/// Raise base to exponent, folding numeric operands.
fn fold_power(base: &Expr, exp: &Expr) -> Expr {
  match (base, exp) {
    (Expr::Integer(b), Expr::Integer(k)) if *k >= 0 && *k <= u32::MAX as i128 =>
    {
      match b.checked_pow(*k as u32) {
        Some(v) => Expr::Integer(v),
        None => Expr::Real((*b as f64).powf(*k as f64)),
      }
    }
    (Expr::Real(b), Expr::Integer(k)) if i32::try_from(*k).is_ok() => {
      Expr::Real(b.powi(*k as i32))
    }
    _ => Expr::BinaryOp {
      op: BinaryOperator::Power,
      left: Box::new(base.clone()),
      right: Box::new(exp.clone()),
    },
  }
}

fn divide_numeric(num: &Expr, den: &Expr) -> Expr {
  match (num, den) {
    (Expr::Integer(n), Expr::Integer(d)) if *d != 0 && n % d == 0 => {
      Expr::Integer(n / d)
    }
    (Expr::Integer(n), Expr::Integer(d)) if *d != 0 => {
      Expr::Real(*n as f64 / *d as f64)
    }
    (Expr::Real(n), Expr::Integer(d)) if *d != 0 => {
      Expr::Real(n / *d as f64)
    }
    (Expr::Integer(n), Expr::Real(d)) => Expr::Real(*n as f64 / d),
    (Expr::Real(n), Expr::Real(d)) => Expr::Real(n / d),
    _ => Expr::BinaryOp {
      op: BinaryOperator::Divide,
      left: Box::new(num.clone()),
      right: Box::new(den.clone()),
    },
  }
}

use nalgebra::DMatrix;
use num_complex::Complex64;

use super::expand::{collect_additive_terms, expand_and_combine};
use crate::CalcError;
use crate::evaluator::{constant_value, eval_numeric};
use crate::syntax::{
  BinaryOperator, Expr, UnaryOperator, contains_symbol, expr_to_string,
  format_real,
};

const LEADING_ZERO_TOL: f64 = 1.0e-12;
const RESULT_ZERO_TOL: f64 = 1.0e-10;

// ─── Solve ──────────────────────────────────────────────────────────

/// All roots of `expression = 0`, as numeric approximations.
///
/// Multiplicities are kept: a degree-n polynomial reports n roots.
pub struct RootSolution {
  pub equation: String,
  pub roots: Vec<Complex64>,
}

impl RootSolution {
  pub fn count(&self) -> usize {
    self.roots.len()
  }

  /// Text block for the results pane.
  pub fn render(&self) -> String {
    let mut out =
      format!("EQUATION: {}\n{}\n", self.equation, "─".repeat(70));
    out.push_str(&format!("Total Roots Found: {}\n\n", self.roots.len()));
    for (i, root) in self.roots.iter().enumerate() {
      out.push_str(&format!("Root x{}: {}\n", i + 1, format_root(root)));
    }
    out
  }
}

/// Solve `expression = 0` for `var` from raw user input.
///
/// The expression is normalized, parsed, expanded into a sum of monomials,
/// and read off as numeric coefficients per power of `var`. Degree 1 is
/// solved in closed form; higher degrees go through the eigenvalues of the
/// companion matrix, which yields every real and complex root at once.
pub fn solve_roots(input: &str, var: &str) -> Result<RootSolution, CalcError> {
  let expr = crate::parse_expression(input)?;
  let expanded = expand_and_combine(&expr);
  let ascending = polynomial_coefficients(&expanded, var)?;

  let descending: Vec<Complex64> = ascending
    .iter()
    .rev()
    .map(|&c| Complex64::new(c, 0.0))
    .collect();
  let trimmed = trim_leading_zeros(descending);
  let roots = companion_roots(&trimmed)?;

  Ok(RootSolution {
    equation: expr_to_string(&expr),
    roots,
  })
}

/// Coefficients of a univariate polynomial in `var`, ascending by power.
fn polynomial_coefficients(
  expr: &Expr,
  var: &str,
) -> Result<Vec<f64>, CalcError> {
  let mut coeffs = vec![0.0f64];
  for term in collect_additive_terms(expr) {
    let (c, p) = analyze_term(&term, var)?;
    if p < 0 {
      return Err(CalcError::EvaluationError(format!(
        "negative power of {var}: not a polynomial"
      )));
    }
    let p = p as usize;
    if coeffs.len() <= p {
      coeffs.resize(p + 1, 0.0);
    }
    coeffs[p] += c;
  }
  Ok(coeffs)
}

/// Reduce one monomial to (numeric coefficient, power of `var`).
fn analyze_term(term: &Expr, var: &str) -> Result<(f64, i64), CalcError> {
  match term {
    Expr::Integer(n) => Ok((*n as f64, 0)),
    Expr::Real(r) => Ok((*r, 0)),
    Expr::Constant(name) => constant_value(name)
      .map(|v| (v, 0))
      .ok_or_else(|| {
        CalcError::EvaluationError(format!("unknown constant `{name}`"))
      }),
    Expr::Identifier(name) => {
      if name == var {
        Ok((1.0, 1))
      } else {
        Err(CalcError::EvaluationError(format!(
          "unknown symbol `{name}` (expected a polynomial in {var})"
        )))
      }
    }
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let (c, p) = analyze_term(operand, var)?;
      Ok((-c, p))
    }
    Expr::BinaryOp {
      op: BinaryOperator::Times,
      left,
      right,
    } => {
      let (cl, pl) = analyze_term(left, var)?;
      let (cr, pr) = analyze_term(right, var)?;
      Ok((cl * cr, pl + pr))
    }
    Expr::BinaryOp {
      op: BinaryOperator::Divide,
      left,
      right,
    } => {
      let (cl, pl) = analyze_term(left, var)?;
      let (cr, pr) = analyze_term(right, var)?;
      if cr == 0.0 {
        return Err(CalcError::EvaluationError(
          "division by zero".to_string(),
        ));
      }
      Ok((cl / cr, pl - pr))
    }
    Expr::BinaryOp {
      op: BinaryOperator::Power,
      left,
      right,
    } => match right.as_ref() {
      Expr::Integer(k) => {
        let (c, p) = analyze_term(left, var)?;
        let k = *k as i64;
        Ok((c.powf(k as f64), p * k))
      }
      _ => {
        if contains_symbol(term, var) {
          Err(CalcError::EvaluationError(format!(
            "non-integer power of {var}: not a polynomial"
          )))
        } else {
          eval_numeric(term).map(|v| (v, 0))
        }
      }
    },
    Expr::FunctionCall { .. } => {
      if contains_symbol(term, var) {
        Err(CalcError::EvaluationError(format!(
          "function of {var}: not a polynomial"
        )))
      } else {
        eval_numeric(term).map(|v| (v, 0))
      }
    }
    _ => Err(CalcError::EvaluationError(
      "expression is not a polynomial".to_string(),
    )),
  }
}

/// Drop leading coefficients that are zero relative to the overall scale.
fn trim_leading_zeros(mut coeffs: Vec<Complex64>) -> Vec<Complex64> {
  if coeffs.is_empty() {
    return coeffs;
  }
  let scale = coeffs.iter().map(|c| c.norm()).fold(0.0_f64, f64::max);
  let tol = if scale == 0.0 {
    LEADING_ZERO_TOL
  } else {
    LEADING_ZERO_TOL * scale
  };
  let first_nonzero = coeffs
    .iter()
    .position(|c| c.norm() > tol)
    .unwrap_or(coeffs.len());
  coeffs.split_off(first_nonzero)
}

/// Roots from coefficients in descending order.
///
/// Degree 1 is solved directly; for higher degrees the companion matrix
/// of the monic polynomial is built and its eigenvalues are the roots.
fn companion_roots(
  coeffs: &[Complex64],
) -> Result<Vec<Complex64>, CalcError> {
  if coeffs.len() <= 1 {
    return Ok(Vec::new());
  }
  if coeffs.len() == 2 {
    let a = coeffs[0];
    let b = coeffs[1];
    return Ok(vec![canonicalize_root(-b / a)]);
  }

  let degree = coeffs.len() - 1;
  let leading = coeffs[0];

  let mut companion = DMatrix::<Complex64>::zeros(degree, degree);
  for row in 1..degree {
    companion[(row, row - 1)] = Complex64::new(1.0, 0.0);
  }
  for (idx, coeff) in coeffs.iter().enumerate().skip(1) {
    companion[(0, idx - 1)] = -(*coeff) / leading;
  }

  let eigenvalues = companion.clone().eigenvalues().ok_or_else(|| {
    CalcError::EvaluationError(
      "failed to compute eigenvalues of the companion matrix".to_string(),
    )
  })?;
  Ok(eigenvalues.iter().map(|&z| canonicalize_root(z)).collect())
}

/// Snap tiny real or imaginary parts to zero so near-real roots print
/// cleanly.
fn canonicalize_root(z: Complex64) -> Complex64 {
  if !z.re.is_finite() || !z.im.is_finite() {
    return z;
  }
  let mut real = z.re;
  let mut imag = z.im;
  let scale = 1.0 + real.abs();
  if imag.abs() <= RESULT_ZERO_TOL * scale {
    imag = 0.0;
  }
  if real.abs() <= RESULT_ZERO_TOL {
    real = 0.0;
  }
  Complex64::new(real, imag)
}

fn format_root(z: &Complex64) -> String {
  if z.im == 0.0 {
    format_real(z.re)
  } else if z.re == 0.0 {
    format!("{}*I", format_real(z.im))
  } else if z.im < 0.0 {
    format!("{} - {}*I", format_real(z.re), format_real(-z.im))
  } else {
    format!("{} + {}*I", format_real(z.re), format_real(z.im))
  }
}

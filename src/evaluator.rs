use crate::CalcError;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Function names the numeric evaluator understands. All take one argument.
pub const FUNCTIONS: &[&str] =
  &["sqrt", "sin", "cos", "tan", "exp", "log", "ln", "abs"];

/// Numeric value of a named constant, if it is one we know.
pub fn constant_value(name: &str) -> Option<f64> {
  match name {
    "pi" => Some(std::f64::consts::PI),
    "e" => Some(std::f64::consts::E),
    _ => None,
  }
}

/// Evaluate an expression with no free symbols.
pub fn eval_numeric(expr: &Expr) -> Result<f64, CalcError> {
  eval_bound(expr, &[])
}

/// Evaluate an expression with the given symbol bindings.
///
/// Arithmetic follows IEEE semantics: division by zero and domain errors
/// produce non-finite values rather than failing, so samples near a pole
/// come back as `inf`/`NaN`. Only unknown symbols and unknown functions
/// are reported as errors.
pub fn eval_bound(
  expr: &Expr,
  bindings: &[(&str, f64)],
) -> Result<f64, CalcError> {
  match expr {
    Expr::Integer(n) => Ok(*n as f64),
    Expr::Real(r) => Ok(*r),
    Expr::Constant(name) => constant_value(name).ok_or_else(|| {
      CalcError::EvaluationError(format!("unknown constant `{name}`"))
    }),
    Expr::Identifier(name) => bindings
      .iter()
      .find(|(sym, _)| *sym == name.as_str())
      .map(|(_, x)| *x)
      .ok_or_else(|| {
        CalcError::EvaluationError(format!("unknown symbol `{name}`"))
      }),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => Ok(-eval_bound(operand, bindings)?),
    Expr::BinaryOp { op, left, right } => {
      let l = eval_bound(left, bindings)?;
      let r = eval_bound(right, bindings)?;
      Ok(match op {
        BinaryOperator::Plus => l + r,
        BinaryOperator::Minus => l - r,
        BinaryOperator::Times => l * r,
        BinaryOperator::Divide => l / r,
        BinaryOperator::Power => l.powf(r),
      })
    }
    Expr::FunctionCall { name, args } => {
      let values = args
        .iter()
        .map(|a| eval_bound(a, bindings))
        .collect::<Result<Vec<_>, _>>()?;
      apply_function(name, &values)
    }
  }
}

fn apply_function(name: &str, args: &[f64]) -> Result<f64, CalcError> {
  if args.len() != 1 {
    return Err(CalcError::EvaluationError(format!(
      "{name} expects exactly 1 argument"
    )));
  }
  let x = args[0];
  match name {
    "sqrt" => Ok(x.sqrt()),
    "sin" => Ok(x.sin()),
    "cos" => Ok(x.cos()),
    "tan" => Ok(x.tan()),
    "exp" => Ok(x.exp()),
    "log" | "ln" => Ok(x.ln()),
    "abs" => Ok(x.abs()),
    _ => Err(CalcError::EvaluationError(format!(
      "unknown function `{name}`"
    ))),
  }
}

/// Verify that an expression can be evaluated as a function of `var`:
/// every symbol is `var` or a known constant, every function call is
/// known and has the right arity.
pub fn check_callable(expr: &Expr, var: &str) -> Result<(), CalcError> {
  match expr {
    Expr::Identifier(name) if name != var => Err(CalcError::EvaluationError(
      format!("unknown symbol `{name}`"),
    )),
    Expr::Constant(name) => match constant_value(name) {
      Some(_) => Ok(()),
      None => Err(CalcError::EvaluationError(format!(
        "unknown constant `{name}`"
      ))),
    },
    Expr::FunctionCall { name, args } => {
      if !FUNCTIONS.contains(&name.as_str()) {
        return Err(CalcError::EvaluationError(format!(
          "unknown function `{name}`"
        )));
      }
      if args.len() != 1 {
        return Err(CalcError::EvaluationError(format!(
          "{name} expects exactly 1 argument"
        )));
      }
      for arg in args {
        check_callable(arg, var)?;
      }
      Ok(())
    }
    Expr::BinaryOp { left, right, .. } => {
      check_callable(left, var)?;
      check_callable(right, var)
    }
    Expr::UnaryOp { operand, .. } => check_callable(operand, var),
    _ => Ok(()),
  }
}

/// Compile an expression into a callable function of one variable,
/// suitable for repeated evaluation over a sample grid. Run
/// [`check_callable`] first; evaluation failures after that point come
/// back as `NaN` samples.
pub fn compile<'a>(expr: &'a Expr, var: &'a str) -> impl Fn(f64) -> f64 + 'a {
  move |x| eval_bound(expr, &[(var, x)]).unwrap_or(f64::NAN)
}

use crate::CalcError;
use crate::evaluator::{check_callable, compile};
use crate::syntax::expr_to_string;

pub const DOMAIN_MIN: f64 = -10.0;
pub const DOMAIN_MAX: f64 = 10.0;
pub const NUM_SAMPLES: usize = 1000;

/// Paired sample arrays for line-plotting `y = f(x)`.
///
/// Undefined points (poles, domain errors) are kept as non-finite values
/// so a plotting layer can break the line there instead of losing the
/// whole curve.
pub struct GraphSamples {
  pub expression: String,
  pub xs: Vec<f64>,
  pub ys: Vec<f64>,
}

impl GraphSamples {
  /// Legend text for the sampled curve.
  pub fn label(&self) -> String {
    format!("y = {}", self.expression)
  }
}

/// Sample a function of `x` over the default domain.
pub fn sample(input: &str) -> Result<GraphSamples, CalcError> {
  sample_over(input, DOMAIN_MIN, DOMAIN_MAX, NUM_SAMPLES)
}

/// Sample a function of `x` over `[x_min, x_max]` with `n` evenly spaced
/// points, endpoints included.
pub fn sample_over(
  input: &str,
  x_min: f64,
  x_max: f64,
  n: usize,
) -> Result<GraphSamples, CalcError> {
  if n < 2 {
    return Err(CalcError::InvalidParameter(
      "need at least 2 sample points".to_string(),
    ));
  }
  if !(x_min < x_max) {
    return Err(CalcError::InvalidParameter(format!(
      "empty domain: [{x_min}, {x_max}]"
    )));
  }

  let expr = crate::parse_expression(input)?;
  check_callable(&expr, "x")?;
  let f = compile(&expr, "x");

  let step = (x_max - x_min) / (n - 1) as f64;
  let mut xs = Vec::with_capacity(n);
  let mut ys = Vec::with_capacity(n);
  for i in 0..n {
    let x = x_min + i as f64 * step;
    xs.push(x);
    ys.push(f(x));
  }

  Ok(GraphSamples {
    expression: expr_to_string(&expr),
    xs,
    ys,
  })
}

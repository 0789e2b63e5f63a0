use statrs::distribution::{Binomial, Discrete, DiscreteCDF, Poisson};

use crate::CalcError;

/// Discrete distribution choice with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
  Binomial { trials: u64, p: f64 },
  Poisson { rate: f64 },
}

/// Probability query against a threshold `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inequality {
  AtMost,
  AtLeast,
  Exactly,
}

impl Inequality {
  pub fn describe(&self, k: u64) -> String {
    match self {
      Inequality::AtMost => format!("x ≤ {k}"),
      Inequality::AtLeast => format!("x ≥ {k}"),
      Inequality::Exactly => format!("x = {k}"),
    }
  }
}

/// Evaluated probability plus the pmf samples for a bar chart.
pub struct DistributionSummary {
  pub probability: f64,
  pub support: Vec<u64>,
  pub pmf: Vec<f64>,
}

impl DistributionSummary {
  /// The probability line for the results pane, 6 decimal places.
  pub fn format_probability(&self, query: Inequality, k: u64) -> String {
    format!("P({}) = {:.6}", query.describe(k), self.probability)
  }
}

enum Model {
  Binomial(Binomial),
  Poisson(Poisson),
}

impl Model {
  fn pmf(&self, k: u64) -> f64 {
    match self {
      Model::Binomial(d) => d.pmf(k),
      Model::Poisson(d) => d.pmf(k),
    }
  }

  fn cdf(&self, k: u64) -> f64 {
    match self {
      Model::Binomial(d) => d.cdf(k),
      Model::Poisson(d) => d.cdf(k),
    }
  }
}

impl Distribution {
  fn model(&self) -> Result<Model, CalcError> {
    match *self {
      Distribution::Binomial { trials, p } => Binomial::new(p, trials)
        .map(Model::Binomial)
        .map_err(|e| CalcError::InvalidParameter(e.to_string())),
      Distribution::Poisson { rate } => Poisson::new(rate)
        .map(Model::Poisson)
        .map_err(|e| CalcError::InvalidParameter(e.to_string())),
    }
  }

  /// X-axis sample range for plotting: the full support for a binomial,
  /// and `0..3λ+5` for a Poisson, wide enough to show the bulk of the
  /// mass.
  fn support(&self) -> Vec<u64> {
    match *self {
      Distribution::Binomial { trials, .. } => (0..=trials).collect(),
      Distribution::Poisson { rate } => {
        (0..(rate * 3.0) as u64 + 5).collect()
      }
    }
  }
}

/// Evaluate a probability query and sample the pmf over the plotting
/// support.
///
/// `x ≥ k` is computed as `1 − cdf(k−1)`; below the support the cdf is
/// zero, so `P(x ≥ 0)` is exactly 1.
pub fn evaluate(
  dist: Distribution,
  query: Inequality,
  k: u64,
) -> Result<DistributionSummary, CalcError> {
  let model = dist.model()?;

  let probability = match query {
    Inequality::AtMost => model.cdf(k),
    Inequality::AtLeast => {
      if k == 0 {
        1.0
      } else {
        1.0 - model.cdf(k - 1)
      }
    }
    Inequality::Exactly => model.pmf(k),
  };

  let support = dist.support();
  let pmf = support.iter().map(|&x| model.pmf(x)).collect();

  Ok(DistributionSummary {
    probability,
    support,
    pmf,
  })
}

use mathsuite::stats::{Distribution, Inequality, evaluate};

mod binomial {
  use super::*;

  const DIST: Distribution = Distribution::Binomial {
    trials: 10,
    p: 0.5,
  };

  #[test]
  fn exact_mass_at_five_of_ten() {
    let summary = evaluate(DIST, Inequality::Exactly, 5).unwrap();
    // C(10,5) * 0.5^10 = 252/1024
    assert!((summary.probability - 0.24609375).abs() < 1e-9);
    assert_eq!(
      summary.format_probability(Inequality::Exactly, 5),
      "P(x = 5) = 0.246094"
    );
  }

  #[test]
  fn tails_partition_unit_mass() {
    let dist = Distribution::Binomial {
      trials: 12,
      p: 0.3,
    };
    for k in 0..=12 {
      let le = evaluate(dist, Inequality::AtMost, k).unwrap().probability;
      let ge = evaluate(dist, Inequality::AtLeast, k + 1)
        .unwrap()
        .probability;
      assert!((le + ge - 1.0).abs() < 1e-10, "k={k}: {le} + {ge}");
    }
  }

  #[test]
  fn at_least_zero_is_certain() {
    let summary = evaluate(DIST, Inequality::AtLeast, 0).unwrap();
    assert_eq!(summary.probability, 1.0);
  }

  #[test]
  fn support_covers_every_outcome() {
    let summary = evaluate(DIST, Inequality::AtMost, 3).unwrap();
    assert_eq!(summary.support, (0..=10).collect::<Vec<u64>>());
    assert_eq!(summary.pmf.len(), 11);
    let total: f64 = summary.pmf.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
  }

  #[test]
  fn mass_beyond_the_trial_count_is_zero() {
    let summary = evaluate(DIST, Inequality::Exactly, 15).unwrap();
    assert_eq!(summary.probability, 0.0);
  }

  #[test]
  fn out_of_range_probability_is_rejected() {
    let dist = Distribution::Binomial {
      trials: 10,
      p: 1.5,
    };
    assert!(evaluate(dist, Inequality::Exactly, 5).is_err());
  }
}

mod poisson {
  use super::*;

  #[test]
  fn exact_mass_matches_closed_form() {
    let dist = Distribution::Poisson { rate: 2.0 };
    let summary = evaluate(dist, Inequality::Exactly, 3).unwrap();
    let expected = 2.0_f64.powi(3) * (-2.0_f64).exp() / 6.0;
    assert!((summary.probability - expected).abs() < 1e-12);
  }

  #[test]
  fn tails_partition_unit_mass() {
    let dist = Distribution::Poisson { rate: 4.2 };
    for k in 0..15 {
      let le = evaluate(dist, Inequality::AtMost, k).unwrap().probability;
      let ge = evaluate(dist, Inequality::AtLeast, k + 1)
        .unwrap()
        .probability;
      assert!((le + ge - 1.0).abs() < 1e-10, "k={k}: {le} + {ge}");
    }
  }

  #[test]
  fn at_least_zero_is_certain() {
    let dist = Distribution::Poisson { rate: 2.5 };
    let summary = evaluate(dist, Inequality::AtLeast, 0).unwrap();
    assert_eq!(summary.probability, 1.0);
  }

  #[test]
  fn support_width_tracks_the_rate() {
    let dist = Distribution::Poisson { rate: 2.5 };
    let summary = evaluate(dist, Inequality::AtMost, 3).unwrap();
    // 0 .. floor(3 * 2.5) + 5
    assert_eq!(summary.support.len(), 12);
    assert_eq!(*summary.support.last().unwrap(), 11);
  }

  #[test]
  fn non_positive_rate_is_rejected() {
    for rate in [0.0, -1.0] {
      let dist = Distribution::Poisson { rate };
      assert!(evaluate(dist, Inequality::Exactly, 1).is_err());
    }
  }
}

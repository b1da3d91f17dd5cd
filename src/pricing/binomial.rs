//! # Binomial Lattice (European & American Options)
//!
//! Backward induction on a recombining binomial price lattice with
//! externally supplied up/down factors:
//! $$
//! V_n(j) = \Pi(S_n(j)),\qquad
//! V_i(j) = \max\!\big(0,\ \Pi(S_i(j)),\
//! e^{-r\Delta t}\left(pV_{i+1}(j)+(1-p)V_{i+1}(j+1)\right)\big),
//! $$
//! where the immediate-exercise comparand $\Pi(S_i(j))$ enters only for
//! American exercise, and
//! $$
//! \Delta t=\tau/n,\qquad p=\frac{e^{(r-q)\Delta t}-d}{u-d}.
//! $$
//!
//! Node index $j$ counts down-moves: layer $i$ holds
//! $S_i(0)=uS_{i-1}(0)$ along the pure-up path and
//! $S_i(j)=dS_{i-1}(j-1)$ for $j\ge 1$.
//!
//! $p$ is computed once per pricing call and is deliberately not checked
//! against $[0,1]$; parameters that push it outside still produce a lattice,
//! floored at zero node by node.

use crate::lattice::Lattice;
use crate::lattice::round_to;
use crate::pricing::OptionStyle;
use crate::pricing::OptionType;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

/// Decimal places kept in reported values and lattices.
pub const REPORT_DECIMALS: u32 = 4;

pub struct BinomialTreePricer {
  /// Spot level $S_0$.
  pub s: f64,
  /// Strike $K$.
  pub k: f64,
  /// Risk-free rate $r$.
  pub r: f64,
  /// Continuous dividend yield $q$.
  pub q: Option<f64>,
  /// Up factor $u$ per step.
  pub u: f64,
  /// Down factor $d$ per step.
  pub d: f64,
  /// Number of binomial time steps.
  pub steps: usize,
  /// Time-to-maturity in years.
  pub tau: Option<f64>,
  /// Evaluation date (optional if `tau` is set).
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date (optional if `tau` is set).
  pub expiration: Option<chrono::NaiveDate>,
  /// Option direction.
  pub option_type: OptionType,
  /// Exercise style.
  pub option_style: OptionStyle,
}

/// Fully populated outcome of one pricing call, rounded to
/// [`REPORT_DECIMALS`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTreeResult {
  /// Option value at the root node.
  pub value: f64,
  /// Stock-price lattice.
  pub stock_prices: Lattice,
  /// Option-value lattice.
  pub option_values: Lattice,
}

impl BinomialTreePricer {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    s: f64,
    k: f64,
    r: f64,
    q: Option<f64>,
    u: f64,
    d: f64,
    steps: usize,
    tau: Option<f64>,
    eval: Option<chrono::NaiveDate>,
    expiration: Option<chrono::NaiveDate>,
    option_type: OptionType,
    option_style: OptionStyle,
  ) -> Self {
    // Spot and strike are left to the caller: nonsensical values price
    // through and yield floored, possibly meaningless lattices.
    assert!(s.is_finite(), "s must be finite");
    assert!(k.is_finite(), "k must be finite");
    assert!(r.is_finite(), "r must be finite");
    if let Some(q) = q {
      assert!(q.is_finite(), "q must be finite");
    }
    assert!(u.is_finite() && d.is_finite(), "u and d must be finite");
    assert!(d > 0.0, "down factor must be positive");
    assert!(u > d, "up factor must exceed down factor");
    assert!(steps >= 1, "steps must be >= 1");

    Self {
      s,
      k,
      r,
      q,
      u,
      d,
      steps,
      tau,
      eval,
      expiration,
      option_type,
      option_style,
    }
  }

  /// Price the configured option, returning the root value together with
  /// both fully populated lattices.
  pub fn price_tree(&self) -> BinomialTreeResult {
    self.price_with(self.option_type, self.option_style)
  }

  fn price_with(&self, option_type: OptionType, option_style: OptionStyle) -> BinomialTreeResult {
    let tau = self.tau_or_from_dates();
    assert!(tau.is_finite() && tau > 0.0, "tau must be positive");

    let n = self.steps;
    let dt = tau / n as f64;
    let growth = ((self.r - self.q.unwrap_or(0.0)) * dt).exp();
    let p = (growth - self.d) / (self.u - self.d);
    let disc = (-self.r * dt).exp();

    let mut stock_prices = Lattice::new(n);
    stock_prices.set(0, 0, self.s);
    for i in 1..=n {
      stock_prices.set(i, 0, stock_prices.get(i - 1, 0) * self.u);
      for j in 1..=i {
        stock_prices.set(i, j, stock_prices.get(i - 1, j - 1) * self.d);
      }
    }

    let mut option_values = Lattice::new(n);
    for j in 0..=n {
      option_values.set(n, j, payoff(option_type, stock_prices.get(n, j), self.k));
    }

    for i in (0..n).rev() {
      for j in 0..=i {
        let continuation = disc
          * (p * option_values.get(i + 1, j) + (1.0 - p) * option_values.get(i + 1, j + 1));
        let value = match option_style {
          OptionStyle::American => continuation
            .max(payoff(option_type, stock_prices.get(i, j), self.k))
            .max(0.0),
          OptionStyle::European => continuation.max(0.0),
        };
        option_values.set(i, j, value);
      }
    }

    BinomialTreeResult {
      value: round_to(option_values.get(0, 0), REPORT_DECIMALS),
      stock_prices: stock_prices.rounded(REPORT_DECIMALS),
      option_values: option_values.rounded(REPORT_DECIMALS),
    }
  }
}

impl PricerExt for BinomialTreePricer {
  fn calculate_call_put(&self) -> (f64, f64) {
    (
      self.price_with(OptionType::Call, self.option_style).value,
      self.price_with(OptionType::Put, self.option_style).value,
    )
  }

  fn calculate_price(&self) -> f64 {
    self.price_tree().value
  }
}

impl TimeExt for BinomialTreePricer {
  fn tau(&self) -> Option<f64> {
    self.tau
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    self.eval
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    self.expiration
  }
}

fn payoff(option_type: OptionType, s: f64, k: f64) -> f64 {
  match option_type {
    OptionType::Call => (s - k).max(0.0),
    OptionType::Put => (k - s).max(0.0),
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  fn reference_pricer(option_type: OptionType, option_style: OptionStyle) -> BinomialTreePricer {
    BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      Some(0.0),
      1.2,
      0.8,
      2,
      Some(2.0),
      None,
      None,
      option_type,
      option_style,
    )
  }

  #[test]
  fn american_put_reference_scenario() {
    let result = reference_pricer(OptionType::Put, OptionStyle::American).price_tree();

    assert_eq!(result.value, 5.0896);
    assert_eq!(result.stock_prices.layer(0), vec![50.0]);
    assert_eq!(result.stock_prices.layer(1), vec![60.0, 40.0]);
    assert_eq!(result.stock_prices.layer(2), vec![72.0, 48.0, 32.0]);
    assert_eq!(result.option_values.layer(0), vec![5.0896]);
    assert_eq!(result.option_values.layer(1), vec![1.4148, 12.0]);
    assert_eq!(result.option_values.layer(2), vec![0.0, 4.0, 20.0]);
  }

  #[test]
  fn european_put_reference_scenario() {
    let result = reference_pricer(OptionType::Put, OptionStyle::European).price_tree();
    assert_eq!(result.value, 4.1927);
  }

  #[test]
  fn root_of_price_lattice_is_spot() {
    let pricer = BinomialTreePricer::new(
      123.4567,
      52.0,
      0.05,
      None,
      1.2,
      0.8,
      4,
      Some(1.0),
      None,
      None,
      OptionType::Call,
      OptionStyle::European,
    );
    let result = pricer.price_tree();
    assert_eq!(result.stock_prices.get(0, 0), 123.4567);
  }

  #[test]
  fn terminal_layer_matches_payoff() {
    let result = reference_pricer(OptionType::Put, OptionStyle::American).price_tree();
    let n = result.stock_prices.steps();
    for j in 0..=n {
      let expected = (52.0 - result.stock_prices.get(n, j)).max(0.0);
      assert_abs_diff_eq!(result.option_values.get(n, j), expected, epsilon = 1e-12);
    }
  }

  #[test]
  fn american_dominates_european_at_every_node() {
    for option_type in [OptionType::Call, OptionType::Put] {
      let make = |style| {
        BinomialTreePricer::new(
          100.0,
          95.0,
          0.03,
          Some(0.08),
          1.15,
          0.85,
          6,
          Some(1.5),
          None,
          None,
          option_type,
          style,
        )
        .price_tree()
      };
      let american = make(OptionStyle::American);
      let european = make(OptionStyle::European);
      for i in 0..=6 {
        for j in 0..=i {
          assert!(
            american.option_values.get(i, j) >= european.option_values.get(i, j),
            "({i}, {j}): American {} < European {}",
            american.option_values.get(i, j),
            european.option_values.get(i, j)
          );
        }
      }
    }
  }

  #[test]
  fn american_call_matches_european_without_dividend() {
    let american = reference_pricer(OptionType::Call, OptionStyle::American).price_tree();
    let european = reference_pricer(OptionType::Call, OptionStyle::European).price_tree();
    assert_eq!(american.value, 7.1411);
    assert_eq!(american.value, european.value);
  }

  #[test]
  fn single_step_collapses_to_one_continuation_pair() {
    let pricer = BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      Some(0.0),
      1.2,
      0.8,
      1,
      Some(2.0),
      None,
      None,
      OptionType::Put,
      OptionStyle::American,
    );
    let result = pricer.price_tree();

    let dt: f64 = 2.0;
    let p = ((0.05 * dt).exp() - 0.8) / 0.4;
    let continuation = (-0.05 * dt).exp() * (p * 0.0 + (1.0 - p) * 12.0);
    let expected = continuation.max(52.0 - 50.0).max(0.0);
    assert_abs_diff_eq!(result.value, expected, epsilon = 1e-4);
    assert_eq!(result.value, 2.5741);
  }

  #[test]
  fn repeated_calls_are_identical() {
    let pricer = reference_pricer(OptionType::Put, OptionStyle::American);
    let first = pricer.price_tree();
    let second = pricer.price_tree();
    assert_eq!(first, second);
  }

  #[test]
  fn value_stays_non_negative_for_out_of_range_probability() {
    // r large enough to push p well above one; no error, floored lattice.
    let pricer = BinomialTreePricer::new(
      100.0,
      100.0,
      0.5,
      None,
      1.01,
      0.99,
      3,
      Some(1.0),
      None,
      None,
      OptionType::Put,
      OptionStyle::European,
    );
    let result = pricer.price_tree();
    assert!(result.value.is_finite());
    assert!(result.value >= 0.0);
  }

  #[test]
  fn nonsensical_spot_prices_through() {
    let pricer = BinomialTreePricer::new(
      -50.0,
      52.0,
      0.05,
      None,
      1.2,
      0.8,
      2,
      Some(1.0),
      None,
      None,
      OptionType::Call,
      OptionStyle::American,
    );
    let result = pricer.price_tree();
    assert!(result.value >= 0.0);
  }

  #[test]
  fn call_put_pair_matches_individual_prices() {
    let pricer = reference_pricer(OptionType::Put, OptionStyle::American);
    let (call, put) = pricer.calculate_call_put();
    assert_eq!(call, reference_pricer(OptionType::Call, OptionStyle::American).calculate_price());
    assert_eq!(put, pricer.calculate_price());
  }

  #[test]
  fn maturity_from_dates_matches_tau() {
    let from_tau = BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      Some(0.0),
      1.2,
      0.8,
      2,
      Some(1.0),
      None,
      None,
      OptionType::Put,
      OptionStyle::American,
    );
    let from_dates = BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      Some(0.0),
      1.2,
      0.8,
      2,
      None,
      chrono::NaiveDate::from_ymd_opt(2025, 1, 15),
      chrono::NaiveDate::from_ymd_opt(2026, 1, 15),
      OptionType::Put,
      OptionStyle::American,
    );
    assert_eq!(from_dates.calculate_tau_in_years(), 1.0);
    assert_eq!(from_dates.calculate_price(), from_tau.calculate_price());
  }

  #[test]
  #[should_panic(expected = "up factor must exceed down factor")]
  fn equal_up_and_down_factors_are_rejected() {
    BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      None,
      1.0,
      1.0,
      2,
      Some(1.0),
      None,
      None,
      OptionType::Put,
      OptionStyle::European,
    );
  }

  #[test]
  #[should_panic(expected = "steps must be >= 1")]
  fn zero_steps_are_rejected() {
    BinomialTreePricer::new(
      50.0,
      52.0,
      0.05,
      None,
      1.2,
      0.8,
      0,
      Some(1.0),
      None,
      None,
      OptionType::Put,
      OptionStyle::European,
    );
  }
}

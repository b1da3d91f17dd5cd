//! # Lattice
//!
//! $$
//! \mathcal{L}=\{(i,j) : 0\le j\le i\le n\}
//! $$
//!
use ndarray::Array2;

/// Round `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
  let scale = 10f64.powi(decimals as i32);
  (value * scale).round() / scale
}

/// Triangular per-node table on a recombining binomial tree.
///
/// Layer `step` holds `step + 1` nodes, `0 <= node <= step <= n`. Storage is
/// a dense `(n + 1) x (n + 1)` grid; cells with `node > step` are structural
/// padding, stay zero and are rejected by the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
  grid: Array2<f64>,
  steps: usize,
}

impl Lattice {
  /// Zero-filled lattice with `steps + 1` layers.
  pub fn new(steps: usize) -> Self {
    Self {
      grid: Array2::zeros((steps + 1, steps + 1)),
      steps,
    }
  }

  /// Number of time steps `n`.
  pub fn steps(&self) -> usize {
    self.steps
  }

  /// Total number of valid nodes, `(n + 1)(n + 2) / 2`.
  pub fn node_count(&self) -> usize {
    (self.steps + 1) * (self.steps + 2) / 2
  }

  /// Value at `(step, node)`.
  pub fn get(&self, step: usize, node: usize) -> f64 {
    assert!(
      step <= self.steps && node <= step,
      "invalid lattice index ({step}, {node}) for {} steps",
      self.steps
    );
    self.grid[[step, node]]
  }

  /// Set the value at `(step, node)`.
  pub fn set(&mut self, step: usize, node: usize, value: f64) {
    assert!(
      step <= self.steps && node <= step,
      "invalid lattice index ({step}, {node}) for {} steps",
      self.steps
    );
    self.grid[[step, node]] = value;
  }

  /// Valid nodes of layer `step`, root-up-path first.
  pub fn layer(&self, step: usize) -> Vec<f64> {
    assert!(step <= self.steps, "layer {step} out of range");
    self.grid.row(step).iter().take(step + 1).copied().collect()
  }

  /// Copy with every cell rounded to `decimals` decimal places.
  pub fn rounded(&self, decimals: u32) -> Self {
    Self {
      grid: self.grid.mapv(|v| round_to(v, decimals)),
      steps: self.steps,
    }
  }
}

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::action::Action;
use crate::features::Feature;

// one slot per action, in `Action::ALL` order
type ActionWeights = [f64; 5];

/// A sparse linear model over (feature, action) pairs. Missing pairs weigh 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseWeightVector {
  weights: HashMap<Feature, ActionWeights>,
}

impl SparseWeightVector {
  pub fn new() -> Self {
    Self::default()
  }

  /// The indicator vector of `features` conjoined with `action`
  pub fn code_phi(features: &[Feature], action: Action) -> Self {
    let mut phi = Self::new();
    for feature in features {
      phi.weights.entry(feature.clone()).or_default()[action.index()] += 1.0;
    }
    phi
  }

  pub fn get(&self, feature: &Feature, action: Action) -> f64 {
    self
      .weights
      .get(feature)
      .map_or(0.0, |w| w[action.index()])
  }

  /// Score of `features` under `action`'s weights, as if taking the dot product with
  /// `code_phi(features, action)`
  pub fn dot(&self, features: &[Feature], action: Action) -> f64 {
    features.iter().map(|f| self.get(f, action)).sum()
  }

  /// `self += scale * other`
  pub fn add_scaled(&mut self, other: &SparseWeightVector, scale: f64) {
    for (feature, theirs) in other.weights.iter() {
      let mine = self.weights.entry(feature.clone()).or_default();
      for (m, t) in mine.iter_mut().zip(theirs.iter()) {
        *m += scale * t;
      }
    }
  }

  /// Number of features with at least one weight slot
  pub fn len(&self) -> usize {
    self.weights.len()
  }

  pub fn is_empty(&self) -> bool {
    self.weights.is_empty()
  }
}

impl AddAssign<SparseWeightVector> for SparseWeightVector {
  fn add_assign(&mut self, rhs: SparseWeightVector) {
    self.add_scaled(&rhs, 1.0);
  }
}

impl Add for SparseWeightVector {
  type Output = SparseWeightVector;

  fn add(mut self, rhs: SparseWeightVector) -> SparseWeightVector {
    self.add_scaled(&rhs, 1.0);
    self
  }
}

impl Sub for SparseWeightVector {
  type Output = SparseWeightVector;

  fn sub(mut self, rhs: SparseWeightVector) -> SparseWeightVector {
    self.add_scaled(&rhs, -1.0);
    self
  }
}

impl Mul<SparseWeightVector> for f64 {
  type Output = SparseWeightVector;

  fn mul(self, mut rhs: SparseWeightVector) -> SparseWeightVector {
    for w in rhs.weights.values_mut() {
      for x in w.iter_mut() {
        *x *= self;
      }
    }
    rhs
  }
}

//! Structured perceptron training, either on static oracle derivations or online
//! against the dynamic oracle

use std::fmt;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::configuration::Configuration;
use crate::decoder::{predict_local, score_action};
use crate::deptree::{DepTree, Token};
use crate::features::{extract_config, Feature};
use crate::oracle::{static_oracle_derivation, zero_cost_actions};
use crate::weights::SparseWeightVector;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
  /// Perceptron learning rate
  pub step_size: f64,
  /// Upper bound on passes over the treebank. Training stops earlier after an epoch without mistakes.
  pub max_epochs: usize,
  /// Seeds the random choice of the dynamic trainer. `None` seeds from entropy.
  pub seed: Option<u64>,
}

impl Default for TrainConfig {
  fn default() -> Self {
    Self {
      step_size: 1.0,
      max_epochs: 100,
      seed: None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
  pub epoch: usize,
  /// Number of mispredicted actions
  pub loss: usize,
  /// Number of predictions made
  pub total: usize,
}

impl EpochReport {
  pub fn local_accuracy(&self) -> f64 {
    if self.total == 0 {
      1.0
    } else {
      (self.total - self.loss) as f64 / self.total as f64
    }
  }
}

impl fmt::Display for EpochReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "epoch {}: loss = {}, local accuracy = {:.4}",
      self.epoch,
      self.loss,
      self.local_accuracy()
    )
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
  pub epochs: Vec<EpochReport>,
}

impl TrainingReport {
  /// True if the last epoch made no mistakes
  pub fn converged(&self) -> bool {
    self.epochs.last().is_some_and(|e| e.loss == 0)
  }

  fn record(&mut self, report: EpochReport) -> bool {
    info!(
      epoch = report.epoch,
      loss = report.loss,
      local_accuracy = report.local_accuracy(),
      "finished epoch"
    );
    self.epochs.push(report);
    if report.loss == 0 {
      debug!(epoch = report.epoch, "no mistakes, stopping early");
      true
    } else {
      false
    }
  }
}

/// `model += step * (phi(x, reference) - phi(x, predicted))`
pub fn perceptron_update(
  model: &mut SparseWeightVector,
  features: &[Feature],
  reference: Action,
  predicted: Action,
  step_size: f64,
) {
  let delta_ref = SparseWeightVector::code_phi(features, reference);
  let delta_pred = SparseWeightVector::code_phi(features, predicted);
  *model += step_size * (delta_ref - delta_pred);
}

/// Trains against the static oracle derivations of every tree in `treebank`
pub fn train_static(
  model: &mut SparseWeightVector,
  treebank: &[DepTree],
  config: &TrainConfig,
) -> TrainingReport {
  let dataset: Vec<(Configuration, Action, &[Token])> = treebank
    .iter()
    .flat_map(|tree| {
      static_oracle_derivation(tree)
        .into_iter()
        .map(move |(c, a)| (c, a, tree.tokens.as_slice()))
    })
    .collect();
  debug!(trees = treebank.len(), examples = dataset.len(), "built static dataset");

  let mut report = TrainingReport::default();
  for epoch in 0..config.max_epochs {
    let mut loss = 0;
    for (ref_config, ref_action, tokens) in dataset.iter() {
      let pred_action = match predict_local(model, ref_config, tokens, &[]) {
        Ok((_, a)) => a,
        Err(e) => {
          warn!(%ref_config, "skipping example: {}", e);
          continue;
        }
      };

      if pred_action != *ref_action {
        loss += 1;
        let features = extract_config(ref_config, tokens);
        perceptron_update(model, &features, *ref_action, pred_action, config.step_size);
      }
    }

    let epoch = EpochReport {
      epoch,
      loss,
      total: dataset.len(),
    };
    if report.record(epoch) {
      break;
    }
  }

  report
}

/// Picks the next action of the dynamic trainer: the prediction if it is optimal,
/// otherwise any optimal action. Never explores.
pub fn choose<R: Rng + ?Sized>(predicted: Action, optimal: &[Action], rng: &mut R) -> Action {
  if optimal.contains(&predicted) {
    predicted
  } else {
    optimal[rng.gen_range(0..optimal.len())]
  }
}

/// Runs the dynamic trainer over one tree, returning (loss, total)
fn train_dynamic_tree<R: Rng + ?Sized>(
  model: &mut SparseWeightVector,
  tree: &DepTree,
  step_size: f64,
  rng: &mut R,
) -> (usize, usize) {
  let reference = tree.edge_set();
  let tokens = tree.tokens.as_slice();
  let (mut loss, mut total) = (0, 0);

  let mut config = Configuration::initial(tree.len());
  loop {
    let pred_action = match predict_local(model, &config, tokens, &[]) {
      Ok((_, a)) => a,
      Err(e) => {
        warn!(%config, "abandoning sentence: {}", e);
        break;
      }
    };

    let optimal = zero_cost_actions(&config, &reference);
    if optimal.is_empty() {
      // only non-projective references can get here
      warn!(%config, "abandoning sentence: no zero-cost action");
      break;
    }

    total += 1;
    if !optimal.contains(&pred_action) {
      loss += 1;
      match predict_local(model, &config, tokens, &optimal) {
        Ok((_, best_optimal)) => {
          let features = extract_config(&config, tokens);
          perceptron_update(model, &features, best_optimal, pred_action, step_size);
        }
        Err(e) => warn!(%config, "skipping update: {}", e),
      }
    }

    let action = choose(pred_action, &optimal, rng);
    config = config.apply(action, |c, a| score_action(model, c, tokens, a));
    if action == Action::Terminate {
      break;
    }
  }

  (loss, total)
}

/// Trains online against the dynamic oracle, always staying on an optimal path.
/// `rng` breaks ties between optimal actions after a mistake.
pub fn train_dynamic<R: Rng + ?Sized>(
  model: &mut SparseWeightVector,
  treebank: &[DepTree],
  config: &TrainConfig,
  rng: &mut R,
) -> TrainingReport {
  let mut report = TrainingReport::default();
  for epoch in 0..config.max_epochs {
    let (mut loss, mut total) = (0, 0);
    for tree in treebank {
      let (l, t) = train_dynamic_tree(model, tree, config.step_size, rng);
      loss += l;
      total += t;
    }

    if report.record(EpochReport { epoch, loss, total }) {
      break;
    }
  }

  report
}

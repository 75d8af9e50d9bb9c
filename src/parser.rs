use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::decoder;
use crate::deptree::{DepTree, Token};
use crate::error::ParserError;
use crate::trainer::{self, TrainConfig, TrainingReport};
use crate::weights::SparseWeightVector;

/// A greedy arc-eager parser and the weights it decodes with
#[derive(Debug, Clone, Default)]
pub struct Parser {
  pub model: SparseWeightVector,
}

impl Parser {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_model(model: SparseWeightVector) -> Self {
    Self { model }
  }

  /// Parses a root-prefixed sentence. Tokens the greedy pass leaves unattached hang off the root.
  pub fn parse(&self, tokens: &[Token]) -> Result<DepTree, ParserError> {
    decoder::parse(&self.model, tokens)
  }

  pub fn train_static(&mut self, treebank: &[DepTree], config: &TrainConfig) -> TrainingReport {
    trainer::train_static(&mut self.model, treebank, config)
  }

  /// Dynamic oracle training, with randomness seeded from `config.seed`
  pub fn train_dynamic(&mut self, treebank: &[DepTree], config: &TrainConfig) -> TrainingReport {
    let mut rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    trainer::train_dynamic(&mut self.model, treebank, config, &mut rng)
  }

  /// Mean unlabeled attachment score of the parser's output against `references`
  pub fn evaluate(&self, references: &[DepTree]) -> Result<f64, ParserError> {
    if references.is_empty() {
      return Ok(0.0);
    }

    let mut sum = 0.0;
    for reference in references {
      let predicted = self.parse(&reference.tokens)?;
      sum += reference.accuracy(&predicted)?;
    }
    Ok(sum / references.len() as f64)
  }
}

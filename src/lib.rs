#[macro_use]
extern crate lazy_static;

pub mod action;
pub mod configuration;
pub mod decoder;
pub mod deptree;
pub mod error;
pub mod features;
pub mod oracle;
pub mod parser;
pub mod trainer;
pub mod transition;
pub mod treebank;
pub mod utils;
pub mod weights;

#[cfg(test)]
mod fixtures;

pub use crate::action::Action;
pub use crate::configuration::Configuration;
pub use crate::deptree::{DepTree, Edge, Token};
pub use crate::error::ParserError;
pub use crate::parser::Parser;
pub use crate::trainer::{TrainConfig, TrainingReport};
pub use crate::treebank::{read_treebank, read_treebank_file};
pub use crate::utils::Err;
pub use crate::weights::SparseWeightVector;

#[test]
fn test_le_chat_dort_end_to_end() {
  let treebank: Vec<DepTree> = vec![
    "1 le D 2\n2 chat N 3\n3 dort V 0\n4 . PONCT 3\n"
      .parse()
      .unwrap(),
  ];

  let mut parser = Parser::new();
  let config = TrainConfig {
    seed: Some(1),
    ..TrainConfig::default()
  };
  assert!(parser.train_dynamic(&treebank, &config).converged());

  let sentence = DepTree::from_words([("le", "D"), ("chat", "N"), ("dort", "V"), (".", "PONCT")]);
  let parsed = parser.parse(&sentence.tokens).unwrap();
  assert_eq!(treebank[0].accuracy(&parsed).unwrap(), 1.0);
}

//! Sample sentences shared by the unit tests

use crate::deptree::DepTree;
use crate::treebank::read_treebank;

pub const SAMPLE_TREEBANK: &str = include_str!("../data/sample.tb");

pub fn sample_treebank() -> Vec<DepTree> {
  read_treebank(SAMPLE_TREEBANK.as_bytes()).unwrap()
}

/// le chat dort .
pub fn le_chat_dort() -> DepTree {
  sample_treebank().remove(0)
}

/// le tapis est rouge et le chat mange la souris .
pub fn le_tapis_est_rouge() -> DepTree {
  sample_treebank().remove(1)
}

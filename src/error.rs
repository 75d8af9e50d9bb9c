use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
  /// A treebank line that isn't `index word tag governor`
  #[error("malformed treebank line {line}: {content:?}")]
  MalformedInput { line: usize, content: String },

  /// The decoder ran out of candidate actions. Unreachable for well-formed
  /// configurations: SHIFT is legal while the buffer has tokens, TERMINATE once it's empty.
  #[error("no legal action from configuration")]
  NoLegalAction,

  #[error("cannot compare trees with {left} and {right} edges")]
  UnequalEdgeCounts { left: usize, right: usize },

  #[error("treebank io: {0}")]
  Io(#[from] std::io::Error),
}

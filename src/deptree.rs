use std::collections::BTreeSet;
use std::fmt;

use crate::error::ParserError;
use crate::utils::centered_trigrams;

pub const ROOT_STR: &str = "$ROOT$";
/// Padding used for the trigram context of the first and last tokens
pub const BOL_STR: &str = "@@@";
pub const EOL_STR: &str = "$$$";

/// Word and tag trigrams centered on a token, computed once when the sentence is loaded.
/// Nothing in the transition system reads these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenContext {
  pub words: [String; 3],
  pub tags: [String; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
  pub word: String,
  pub tag: String,
  pub context: Option<TokenContext>,
}

impl Token {
  pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
    Self {
      word: word.into(),
      tag: tag.into(),
      context: None,
    }
  }

  pub fn root() -> Self {
    Self::new(ROOT_STR, ROOT_STR)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.word, self.tag)
  }
}

/// A governor -> dependent link between two token indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
  pub governor: usize,
  pub dependent: usize,
}

impl Edge {
  pub fn new(governor: usize, dependent: usize) -> Self {
    Self { governor, dependent }
  }
}

impl fmt::Display for Edge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.governor, self.dependent)
  }
}

pub type EdgeSet = BTreeSet<Edge>;

/// A sentence and its dependency edges. Token 0 is always the synthetic root.
#[derive(Debug, Clone, PartialEq)]
pub struct DepTree {
  pub tokens: Vec<Token>,
  pub edges: Vec<Edge>,
}

impl Default for DepTree {
  fn default() -> Self {
    Self {
      tokens: vec![Token::root()],
      edges: Vec::new(),
    }
  }
}

impl DepTree {
  pub fn new(tokens: Vec<Token>, edges: Vec<Edge>) -> Self {
    Self { tokens, edges }
  }

  /// Builds a root-prefixed sentence from (word, tag) pairs, with no edges
  pub fn from_words<'a>(words: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    let mut tree = Self::default();
    tree
      .tokens
      .extend(words.into_iter().map(|(w, t)| Token::new(w, t)));
    tree.with_context()
  }

  /// Fills in the trigram context of every token, root included
  pub fn with_context(mut self) -> Self {
    let words = self.tokens.iter().map(|t| t.word.as_str()).collect::<Vec<_>>();
    let tags = self.tokens.iter().map(|t| t.tag.as_str()).collect::<Vec<_>>();
    let word_trigrams = centered_trigrams(&words, BOL_STR, EOL_STR);
    let tag_trigrams = centered_trigrams(&tags, BOL_STR, EOL_STR);

    let contexts = word_trigrams
      .into_iter()
      .zip(tag_trigrams)
      .map(|(w, t)| TokenContext {
        words: w.map(str::to_string),
        tags: t.map(str::to_string),
      })
      .collect::<Vec<_>>();

    for (token, context) in self.tokens.iter_mut().zip(contexts) {
      token.context = Some(context);
    }
    self
  }

  /// Number of tokens, root included
  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  /// True when the tree holds nothing but the root
  pub fn is_empty(&self) -> bool {
    self.len() <= 1
  }

  pub fn edge_set(&self) -> EdgeSet {
    self.edges.iter().copied().collect()
  }

  pub fn governor_of(&self, dependent: usize) -> Option<usize> {
    self
      .edges
      .iter()
      .find(|e| e.dependent == dependent)
      .map(|e| e.governor)
  }

  /// Unlabeled attachment score of `other` against this tree.
  /// Both trees must have the same number of edges.
  pub fn accuracy(&self, other: &DepTree) -> Result<f64, ParserError> {
    if self.edges.len() != other.edges.len() {
      return Err(ParserError::UnequalEdgeCounts {
        left: self.edges.len(),
        right: other.edges.len(),
      });
    }

    let mine = self.edge_set();
    if mine.is_empty() {
      return Ok(1.0);
    }
    let theirs = other.edge_set();
    Ok(mine.intersection(&theirs).count() as f64 / mine.len() as f64)
  }
}

impl std::ops::Index<usize> for DepTree {
  type Output = Token;

  fn index(&self, idx: usize) -> &Token {
    &self.tokens[idx]
  }
}

impl fmt::Display for DepTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, token) in self.tokens.iter().enumerate().skip(1) {
      if idx > 1 {
        writeln!(f)?;
      }
      write!(f, "{}\t{}\t{}\t", idx, token.word, token.tag)?;
      match self.governor_of(idx) {
        Some(gov) => write!(f, "{}", gov)?,
        None => write!(f, "_")?,
      }
    }
    Ok(())
  }
}

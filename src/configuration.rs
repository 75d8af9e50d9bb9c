use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::action::Action;
use crate::deptree::{Edge, EdgeSet};

/// Index of the synthetic root token
pub const ROOT: usize = 0;

/// An arc-eager parser state. Configurations are values: every transition builds a new one.
///
/// Tokens only ever leave the buffer from the front, so the buffer is kept as the
/// range of indices that haven't been read yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
  pub stack: Vec<usize>,
  pub buffer: Range<usize>,
  pub arcs: EdgeSet,
  /// Sum of the model scores of every transition taken to reach this configuration
  pub score: f64,
}

impl Configuration {
  /// The starting configuration for a sentence of `n` tokens, root included
  pub fn initial(n: usize) -> Self {
    Self {
      stack: vec![ROOT],
      buffer: 1..n.max(1),
      arcs: EdgeSet::new(),
      score: 0.0,
    }
  }

  /// `i`, the top of the stack
  pub fn stack_top(&self) -> Option<usize> {
    self.stack.last().copied()
  }

  /// `j`, the next unread token
  pub fn buffer_head(&self) -> Option<usize> {
    if self.buffer.is_empty() {
      None
    } else {
      Some(self.buffer.start)
    }
  }

  pub fn buffer_is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Buffer indices, head first
  pub fn buffer_iter(&self) -> Range<usize> {
    self.buffer.clone()
  }

  pub fn has_governor(&self, idx: usize) -> bool {
    self.arcs.iter().any(|e| e.dependent == idx)
  }

  pub fn has_arc(&self, governor: usize, dependent: usize) -> bool {
    self.arcs.contains(&Edge::new(governor, dependent))
  }

  /// Whether `action`'s structural precondition holds here.
  /// Shared by the decoder and the dynamic oracle.
  pub fn is_legal(&self, action: Action) -> bool {
    match action {
      Action::Shift => !self.buffer_is_empty(),
      Action::Reduce => self.stack_top().is_some_and(|i| self.has_governor(i)),
      Action::LeftArc => match (self.stack_top(), self.buffer_head()) {
        (Some(i), Some(_)) => i != ROOT && !self.has_governor(i),
        _ => false,
      },
      Action::RightArc => match (self.stack_top(), self.buffer_head()) {
        (Some(_), Some(j)) => !self.has_governor(j),
        _ => false,
      },
      Action::Terminate => self.buffer_is_empty(),
    }
  }

  /// Legal actions, in `Action::ALL` order
  pub fn legal_actions(&self) -> Vec<Action> {
    Action::ALL
      .into_iter()
      .filter(|a| self.is_legal(*a))
      .collect()
  }
}

impl Eq for Configuration {}

impl Hash for Configuration {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.stack.hash(state);
    self.buffer.hash(state);
    self.arcs.hash(state);
    self.score.to_bits().hash(state);
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;
    for (idx, s) in self.stack.iter().enumerate() {
      if idx > 0 {
        write!(f, " ")?;
      }
      write!(f, "{}", s)?;
    }
    write!(f, "] [")?;
    for (idx, b) in self.buffer_iter().enumerate() {
      if idx > 0 {
        write!(f, " ")?;
      }
      write!(f, "{}", b)?;
    }
    write!(f, "] {{")?;
    for (idx, e) in self.arcs.iter().enumerate() {
      if idx > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", e)?;
    }
    write!(f, "}} {:.3}", self.score)
  }
}

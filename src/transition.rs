use crate::action::Action;
use crate::configuration::{Configuration, ROOT};
use crate::deptree::Edge;

impl Configuration {
  /// Performs `action`, adding `score(self, action)` to the running score.
  /// The score is always computed on the configuration *before* the transition.
  ///
  /// Panics if `action` isn't legal here.
  pub fn apply<F>(&self, action: Action, score: F) -> Configuration
  where
    F: FnOnce(&Configuration, Action) -> f64,
  {
    assert!(self.is_legal(action), "illegal {} from {}", action, self);

    let increment = score(self, action);
    let mut next = match action {
      Action::Shift => self.shift(),
      Action::LeftArc => self.left_arc(),
      Action::RightArc => self.right_arc(),
      Action::Reduce => self.reduce(),
      Action::Terminate => self.clone(),
    };
    next.score += increment;
    next
  }

  /// Performs `action` without touching the score
  pub fn apply_unscored(&self, action: Action) -> Configuration {
    self.apply(action, |_, _| 0.0)
  }

  fn shift(&self) -> Configuration {
    let mut next = self.clone();
    next.stack.push(next.buffer.start);
    next.buffer.start += 1;
    next
  }

  fn left_arc(&self) -> Configuration {
    let mut next = self.clone();
    let i = next.stack.pop().unwrap_or(ROOT);
    next.arcs.insert(Edge::new(next.buffer.start, i));
    next
  }

  fn right_arc(&self) -> Configuration {
    let mut next = self.clone();
    let i = *next.stack.last().unwrap_or(&ROOT);
    let j = next.buffer.start;
    next.arcs.insert(Edge::new(i, j));
    next.stack.push(j);
    next.buffer.start += 1;
    next
  }

  fn reduce(&self) -> Configuration {
    let mut next = self.clone();
    next.stack.pop();
    next
  }
}

use std::fmt;
use std::str::FromStr;

/// Arc-eager parser actions. Arcs are positional: they always link the stack top
/// and the buffer head, so actions carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
  LeftArc,
  RightArc,
  Shift,
  Reduce,
  Terminate,
}

impl Action {
  pub const ALL: [Action; 5] = [
    Action::LeftArc,
    Action::RightArc,
    Action::Shift,
    Action::Reduce,
    Action::Terminate,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Self::LeftArc => "LA",
      Self::RightArc => "RA",
      Self::Shift => "S",
      Self::Reduce => "R",
      Self::Terminate => "T",
    }
  }

  /// Position in `Action::ALL`
  pub fn index(&self) -> usize {
    *self as usize
  }

  pub fn is_arc(&self) -> bool {
    matches!(self, Self::LeftArc | Self::RightArc)
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

impl FromStr for Action {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|a| a.label() == s)
      .ok_or_else(|| format!("unknown action {:?}", s))
  }
}

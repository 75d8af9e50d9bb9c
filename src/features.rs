use std::fmt;

use crate::configuration::Configuration;
use crate::deptree::Token;

/// Filler for frontier positions that don't exist (short stack or buffer)
pub const UNDEF_STR: &str = "_UNDEF_";

/// Which n-gram a feature was read from. `offset` is the position of its
/// first slot in the `s0 s1 b0 b1` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Template {
  WordBigram { offset: u8 },
  TagBigram { offset: u8 },
  WordTrigram { offset: u8 },
  TagTrigram { offset: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Feature {
  pub template: Template,
  pub values: Vec<String>,
}

impl fmt::Display for Feature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}({})", self.template, self.values.join(","))
  }
}

fn ngrams(window: &[&str; 4], n: usize, template: fn(u8) -> Template) -> Vec<Feature> {
  window
    .windows(n)
    .enumerate()
    .map(|(offset, gram)| Feature {
      template: template(offset as u8),
      values: gram.iter().map(|s| s.to_string()).collect(),
    })
    .collect()
}

/// Codes the parser frontier (top two stack items, first two buffer items) as word and tag
/// bigrams and trigrams. The order is stable: word bigrams, tag bigrams, word trigrams,
/// tag trigrams.
pub fn extract(stack: &[usize], buffer: impl IntoIterator<Item = usize>, tokens: &[Token]) -> Vec<Feature> {
  let mut buffer = buffer.into_iter();
  let slots = [
    stack.last().copied(),
    stack.len().checked_sub(2).map(|idx| stack[idx]),
    buffer.next(),
    buffer.next(),
  ];

  let words = slots.map(|s| s.map_or(UNDEF_STR, |idx| tokens[idx].word.as_str()));
  let tags = slots.map(|s| s.map_or(UNDEF_STR, |idx| tokens[idx].tag.as_str()));

  let mut features = ngrams(&words, 2, |offset| Template::WordBigram { offset });
  features.extend(ngrams(&tags, 2, |offset| Template::TagBigram { offset }));
  features.extend(ngrams(&words, 3, |offset| Template::WordTrigram { offset }));
  features.extend(ngrams(&tags, 3, |offset| Template::TagTrigram { offset }));
  features
}

/// Features of a configuration's frontier
pub fn extract_config(config: &Configuration, tokens: &[Token]) -> Vec<Feature> {
  extract(&config.stack, config.buffer_iter(), tokens)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::action::Action;
  use crate::fixtures;

  fn values(f: &Feature) -> Vec<&str> {
    f.values.iter().map(String::as_str).collect()
  }

  #[test]
  fn test_initial_frontier() {
    let tree = fixtures::le_chat_dort();
    let features = extract_config(&Configuration::initial(tree.len()), &tree.tokens);

    assert_eq!(features.len(), 10);
    assert_eq!(features[0].template, Template::WordBigram { offset: 0 });
    assert_eq!(values(&features[0]), vec!["$ROOT$", UNDEF_STR]);
    assert_eq!(values(&features[2]), vec!["le", "chat"]);
    assert_eq!(features[3].template, Template::TagBigram { offset: 0 });
    assert_eq!(values(&features[5]), vec!["D", "N"]);
    assert_eq!(values(&features[6]), vec!["$ROOT$", UNDEF_STR, "le"]);
    assert_eq!(features[9].template, Template::TagTrigram { offset: 1 });
    assert_eq!(values(&features[9]), vec![UNDEF_STR, "D", "N"]);
  }

  #[test]
  fn test_stack_slots_read_outward() {
    let tree = fixtures::le_chat_dort();
    let c = Configuration::initial(tree.len())
      .apply_unscored(Action::Shift)
      .apply_unscored(Action::Shift);
    let features = extract_config(&c, &tree.tokens);

    // s0 = chat, s1 = le, b0 = dort, b1 = .
    assert_eq!(values(&features[0]), vec!["chat", "le"]);
    assert_eq!(values(&features[1]), vec!["le", "dort"]);
    assert_eq!(values(&features[2]), vec!["dort", "."]);
  }

  #[test]
  fn test_words_and_tags_dont_collide() {
    let tree = crate::deptree::DepTree::from_words([("N", "N"), ("N", "N")]);
    let features = extract_config(&Configuration::initial(tree.len()), &tree.tokens);
    let unique = features.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(unique.len(), features.len());
  }
}

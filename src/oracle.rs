use crate::action::Action;
use crate::configuration::{Configuration, ROOT};
use crate::deptree::{DepTree, Edge, EdgeSet};

fn is_ref(reference: &EdgeSet, governor: usize, dependent: usize) -> bool {
  reference.contains(&Edge::new(governor, dependent))
}

/// The canonical next action towards `reference` from `config`.
///
/// Arcs are built as soon as both ends meet on the frontier, and a token is only
/// reduced once it is governed and all of its reference dependents are attached.
pub fn static_oracle(config: &Configuration, reference: &EdgeSet) -> Action {
  if let (Some(i), Some(j)) = (config.stack_top(), config.buffer_head()) {
    if i != ROOT && is_ref(reference, j, i) {
      return Action::LeftArc;
    }
    if is_ref(reference, i, j) {
      return Action::RightArc;
    }
  }

  if let Some(i) = config.stack_top() {
    let dependents_attached = reference
      .iter()
      .filter(|e| e.governor == i)
      .all(|e| config.arcs.contains(e));
    if config.has_governor(i) && dependents_attached {
      return Action::Reduce;
    }
  }

  if !config.buffer_is_empty() {
    Action::Shift
  } else {
    Action::Terminate
  }
}

/// Whether taking `action` from `config` still leaves every reference arc reachable.
/// Illegal actions are never zero-cost.
pub fn is_zero_cost(config: &Configuration, action: Action, reference: &EdgeSet) -> bool {
  if !config.is_legal(action) {
    return false;
  }

  let stack = &config.stack;
  let mut buffer = config.buffer_iter();

  match action {
    Action::LeftArc => {
      let (i, j) = match (config.stack_top(), config.buffer_head()) {
        (Some(i), Some(j)) => (i, j),
        _ => return false,
      };
      // i can no longer take a governor from the rest of the buffer, nor any dependent
      !buffer.clone().filter(|&k| k != j).any(|k| is_ref(reference, k, i))
        && !buffer.any(|k| is_ref(reference, i, k))
    }
    Action::RightArc => {
      let j = match config.buffer_head() {
        Some(j) => j,
        None => return false,
      };
      let below_top = &stack[..stack.len() - 1];
      !buffer.any(|k| is_ref(reference, k, j))
        && !below_top.iter().any(|&k| is_ref(reference, k, j))
        && !stack.iter().any(|&k| is_ref(reference, j, k))
    }
    Action::Reduce => match config.stack_top() {
      Some(i) => !buffer.any(|k| is_ref(reference, i, k)),
      None => false,
    },
    Action::Shift => match config.buffer_head() {
      Some(j) => !stack
        .iter()
        .any(|&k| is_ref(reference, j, k) || is_ref(reference, k, j)),
      None => false,
    },
    Action::Terminate => true,
  }
}

/// Every zero-cost action from `config`, in `Action::ALL` order
pub fn zero_cost_actions(config: &Configuration, reference: &EdgeSet) -> Vec<Action> {
  Action::ALL
    .into_iter()
    .filter(|a| is_zero_cost(config, *a, reference))
    .collect()
}

/// The static oracle's derivation of `tree` as (configuration, action) pairs.
///
/// Once the buffer is empty no arc can be added anymore, so the derivation ends
/// there with a single TERMINATE instead of the remaining REDUCEs.
pub fn static_oracle_derivation(tree: &DepTree) -> Vec<(Configuration, Action)> {
  let reference = tree.edge_set();
  let mut config = Configuration::initial(tree.len());
  let mut derivation = Vec::new();

  while !config.buffer_is_empty() {
    let action = static_oracle(&config, &reference);
    let next = config.apply_unscored(action);
    derivation.push((config, action));
    config = next;
  }
  derivation.push((config, Action::Terminate));

  derivation
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::deptree::DepTree;
  use crate::fixtures;

  /// Follows the bare static oracle all the way to TERMINATE
  fn follow_static_oracle(tree: &DepTree) -> Vec<(Configuration, Action)> {
    let reference = tree.edge_set();
    let mut config = Configuration::initial(tree.len());
    let mut steps = Vec::new();
    loop {
      let action = static_oracle(&config, &reference);
      let next = config.apply_unscored(action);
      steps.push((config, action));
      if action == Action::Terminate {
        return steps;
      }
      config = next;
    }
  }

  #[test]
  fn test_le_chat_dort_derivation() {
    let tree = fixtures::le_chat_dort();
    let derivation = static_oracle_derivation(&tree);

    let actions = derivation.iter().map(|(_, a)| *a).collect::<Vec<_>>();
    assert_eq!(
      actions,
      vec![
        Action::Shift,
        Action::LeftArc,
        Action::Shift,
        Action::LeftArc,
        Action::RightArc,
        Action::RightArc,
        Action::Terminate,
      ]
    );

    let (last, _) = derivation.last().unwrap();
    assert_eq!(last.arcs, tree.edge_set());
  }

  #[test]
  fn test_static_oracle_reconstructs_reference() {
    for tree in fixtures::sample_treebank() {
      let steps = follow_static_oracle(&tree);
      let (last, action) = steps.last().unwrap();
      assert_eq!(*action, Action::Terminate);
      assert_eq!(last.arcs, tree.edge_set());
      // nothing is left for the root repair to do
      assert_eq!(last.stack, vec![ROOT]);
    }
  }

  #[test]
  fn test_trailing_reduces_are_dropped_from_derivation() {
    let tree = fixtures::le_chat_dort();
    let full = follow_static_oracle(&tree);
    let derivation = static_oracle_derivation(&tree);

    assert_eq!(full.len(), 9);
    assert_eq!(full[6].1, Action::Reduce);
    assert_eq!(full[7].1, Action::Reduce);
    assert_eq!(derivation[..6], full[..6]);
  }

  #[test]
  fn test_dynamic_oracle_agrees_with_static() {
    for tree in fixtures::sample_treebank() {
      let reference = tree.edge_set();
      for (config, action) in follow_static_oracle(&tree) {
        assert!(
          is_zero_cost(&config, action, &reference),
          "{} should be zero-cost at {}",
          action,
          config
        );
      }
    }
  }

  #[test]
  fn test_zero_cost_actions_at_start() {
    let tree = fixtures::le_chat_dort();
    let reference = tree.edge_set();
    let start = Configuration::initial(tree.len());

    // attaching "le" to the root would lose le <- chat
    assert_eq!(zero_cost_actions(&start, &reference), vec![Action::Shift]);
    assert!(!is_zero_cost(&start, Action::LeftArc, &reference));
    assert!(!is_zero_cost(&start, Action::Reduce, &reference));
    assert!(!is_zero_cost(&start, Action::Terminate, &reference));
  }

  #[test]
  fn test_zero_cost_after_mistake() {
    let tree = fixtures::le_chat_dort();
    let reference = tree.edge_set();
    // S S: "le" is stuck under "chat" on the stack, le <- chat is now lost
    let c = Configuration::initial(tree.len())
      .apply_unscored(Action::Shift)
      .apply_unscored(Action::Shift);

    // chat -> dort is still reachable by a left arc, and dort must not be shifted over chat
    assert!(is_zero_cost(&c, Action::LeftArc, &reference));
    assert!(!is_zero_cost(&c, Action::Shift, &reference));
    assert!(!is_zero_cost(&c, Action::RightArc, &reference));
    assert!(!zero_cost_actions(&c, &reference).is_empty());
  }

  #[test]
  fn test_terminate_when_buffer_empty() {
    let tree = fixtures::le_chat_dort();
    let reference = tree.edge_set();
    let derivation = static_oracle_derivation(&tree);
    let (last, _) = derivation.last().unwrap();

    assert!(is_zero_cost(last, Action::Terminate, &reference));
    assert!(!is_zero_cost(last, Action::Shift, &reference));
  }

  #[test]
  fn test_root_only_sentence() {
    let tree = DepTree::default();
    let derivation = static_oracle_derivation(&tree);
    assert_eq!(derivation.len(), 1);
    assert_eq!(derivation[0].1, Action::Terminate);
  }
}

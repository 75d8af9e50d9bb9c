use tracing::trace;

use crate::action::Action;
use crate::configuration::{Configuration, ROOT};
use crate::deptree::{DepTree, Edge, EdgeSet, Token};
use crate::error::ParserError;
use crate::features::extract_config;
use crate::weights::SparseWeightVector;

/// Order in which candidates are generated. Among equally scored candidates
/// the earliest one wins.
pub const GENERATION_ORDER: [Action; 5] = [
  Action::Shift,
  Action::Reduce,
  Action::LeftArc,
  Action::RightArc,
  Action::Terminate,
];

/// Model score of taking `action` from `config`
pub fn score_action(
  model: &SparseWeightVector,
  config: &Configuration,
  tokens: &[Token],
  action: Action,
) -> f64 {
  model.dot(&extract_config(config, tokens), action)
}

/// Greedily picks the best scoring legal action from `config`, restricted to `allowed`
/// (every action if `allowed` is empty). Returns the successor configuration with the action.
pub fn predict_local(
  model: &SparseWeightVector,
  config: &Configuration,
  tokens: &[Token],
  allowed: &[Action],
) -> Result<(Configuration, Action), ParserError> {
  // every candidate is scored on the same pre-transition frontier
  let features = extract_config(config, tokens);

  let mut best: Option<(Configuration, Action)> = None;
  for action in GENERATION_ORDER {
    if !allowed.is_empty() && !allowed.contains(&action) {
      continue;
    }
    if !config.is_legal(action) {
      continue;
    }

    let candidate = config.apply(action, |_, a| model.dot(&features, a));
    if best.as_ref().is_none_or(|(b, _)| candidate.score > b.score) {
      best = Some((candidate, action));
    }
  }

  best.ok_or(ParserError::NoLegalAction)
}

/// Attaches every unattached stack token to the root
pub fn attach_orphans(stack: &[usize], arcs: &EdgeSet) -> EdgeSet {
  let mut repaired = arcs.clone();
  for &s in stack {
    if s != ROOT && !arcs.iter().any(|e| e.dependent == s) {
      repaired.insert(Edge::new(ROOT, s));
    }
  }
  repaired
}

/// Greedy parse of a root-prefixed sentence
pub fn parse(model: &SparseWeightVector, tokens: &[Token]) -> Result<DepTree, ParserError> {
  let mut config = Configuration::initial(tokens.len());
  loop {
    let (next, action) = predict_local(model, &config, tokens, &[])?;
    trace!(%config, %action, "decoder step");
    config = next;
    if action == Action::Terminate {
      break;
    }
  }

  let mut edges = attach_orphans(&config.stack, &config.arcs)
    .into_iter()
    .collect::<Vec<_>>();
  edges.sort_by_key(|e| e.dependent);

  Ok(DepTree::new(tokens.to_vec(), edges))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures;

  #[test]
  fn test_untrained_model_prefers_shift() {
    let tree = fixtures::le_chat_dort();
    let model = SparseWeightVector::new();
    let start = Configuration::initial(tree.len());

    // RIGHTARC and SHIFT tie at 0, SHIFT comes first
    let (next, action) = predict_local(&model, &start, &tree.tokens, &[]).unwrap();
    assert_eq!(action, Action::Shift);
    assert_eq!(next.stack, vec![0, 1]);

    let (_, action) = predict_local(&model, &start, &tree.tokens, &[Action::RightArc]).unwrap();
    assert_eq!(action, Action::RightArc);
  }

  #[test]
  fn test_highest_score_wins() {
    let tree = fixtures::le_chat_dort();
    let start = Configuration::initial(tree.len());
    let features = extract_config(&start, &tree.tokens);

    let mut model = SparseWeightVector::new();
    model += 0.25 * SparseWeightVector::code_phi(&features, Action::RightArc);

    let (next, action) = predict_local(&model, &start, &tree.tokens, &[]).unwrap();
    assert_eq!(action, Action::RightArc);
    assert_eq!(next.score, 2.5);
    assert_eq!(score_action(&model, &start, &tree.tokens, Action::RightArc), 2.5);
  }

  #[test]
  fn test_no_legal_action() {
    let tree = fixtures::le_chat_dort();
    let start = Configuration::initial(tree.len());
    let model = SparseWeightVector::new();

    // nothing can terminate while the buffer is full
    assert!(matches!(
      predict_local(&model, &start, &tree.tokens, &[Action::Terminate]),
      Err(ParserError::NoLegalAction)
    ));
  }

  #[test]
  fn test_untrained_parse_is_rooted() {
    let tree = fixtures::le_tapis_est_rouge();
    let parsed = parse(&SparseWeightVector::new(), &tree.tokens).unwrap();

    // all shifts, then everything hangs off the root
    assert_eq!(parsed.edges.len(), tree.edges.len());
    assert!(parsed.edges.iter().all(|e| e.governor == ROOT));
    assert_eq!(parsed.tokens, tree.tokens);
  }

  #[test]
  fn test_repair_is_idempotent() {
    let arcs = [Edge::new(2, 1)].into_iter().collect::<EdgeSet>();
    let stack = [0, 2, 3];

    let once = attach_orphans(&stack, &arcs);
    assert_eq!(
      once,
      [Edge::new(2, 1), Edge::new(0, 2), Edge::new(0, 3)]
        .into_iter()
        .collect::<EdgeSet>()
    );
    assert_eq!(attach_orphans(&stack, &once), once);
  }

  #[test]
  fn test_parse_is_deterministic() {
    let tree = fixtures::le_tapis_est_rouge();
    let mut model = SparseWeightVector::new();
    for (config, action) in crate::oracle::static_oracle_derivation(&tree).iter().step_by(3) {
      let features = extract_config(config, &tree.tokens);
      model += SparseWeightVector::code_phi(&features, *action);
    }

    let first = parse(&model, &tree.tokens).unwrap();
    let second = parse(&model, &tree.tokens).unwrap();
    assert_eq!(first, second);
  }
}

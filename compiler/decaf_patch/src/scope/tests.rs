use decaf_ir::NodeId;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn tree_with(program_names: &[&str], inner_names: &[&str]) -> (ScopeTree, ScopeId, ScopeId) {
    let mut tree = ScopeTree::new();
    let program = tree.push_scope(None, Some(NodeId::new(10)));
    let inner = tree.push_scope(Some(program), Some(NodeId::new(5)));
    for name in program_names {
        tree.bind(program, name);
    }
    for name in inner_names {
        tree.reference(inner, name);
    }
    (tree, program, inner)
}

#[test]
fn test_claims_are_suffixed_in_order() {
    let (tree, program, _) = tree_with(&["ref1"], &[]);
    let mut tracker = ScopeTracker::new(&tree);
    assert_eq!(tracker.claim_free_binding(program, "ref"), "ref");
    assert_eq!(tracker.claim_free_binding(program, "ref"), "ref2");
    assert_eq!(tracker.claim_free_binding(program, "ref"), "ref3");
    assert!(tracker.has_binding(program, "ref2"));
}

#[test]
fn test_names_used_in_inner_scopes_are_not_captured() {
    let (tree, program, inner) = tree_with(&[], &["middle"]);
    let mut tracker = ScopeTracker::new(&tree);
    assert_eq!(tracker.claim_free_binding(program, "middle"), "middle1");
    assert!(tracker.has_binding(inner, "middle1"));
}

#[test]
fn test_inner_claims_avoid_outer_bindings() {
    let (tree, _, inner) = tree_with(&["base"], &[]);
    let mut tracker = ScopeTracker::new(&tree);
    assert_eq!(tracker.claim_free_binding(inner, "base"), "base1");
}

#[test]
fn test_inner_claims_block_the_same_name_outside() {
    let (tree, program, inner) = tree_with(&[], &[]);
    let mut tracker = ScopeTracker::new(&tree);
    assert_eq!(tracker.claim_free_binding(inner, "ref"), "ref");
    assert_eq!(tracker.claim_free_binding(program, "ref"), "ref1");
}

proptest! {
    #[test]
    fn prop_claims_never_collide(
        existing in proptest::collection::vec(0u32..6, 0..6),
        claims in 1usize..8,
    ) {
        let mut tree = ScopeTree::new();
        let program = tree.push_scope(None, None);
        let existing: Vec<String> = existing
            .into_iter()
            .map(|n| if n == 0 { "ref".to_owned() } else { format!("ref{n}") })
            .collect();
        for name in &existing {
            tree.bind(program, name);
        }
        let mut tracker = ScopeTracker::new(&tree);
        let mut seen: Vec<String> = Vec::new();
        for _ in 0..claims {
            let name = tracker.claim_free_binding(program, "ref");
            prop_assert!(!existing.contains(&name));
            prop_assert!(!seen.contains(&name));
            seen.push(name);
        }
        // Claims come out in suffix order.
        let order: Vec<u32> = seen
            .iter()
            .map(|n| n.trim_start_matches("ref").parse().unwrap_or(0))
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}

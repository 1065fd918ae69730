use super::*;

#[test]
fn test_binding_lookup_walks_ancestors() {
    let mut tree = ScopeTree::new();
    let program = tree.push_scope(None, Some(NodeId::new(9)));
    let function = tree.push_scope(Some(program), Some(NodeId::new(5)));
    tree.bind(program, "a");
    tree.bind(function, "b");

    assert!(tree.has_binding(function, "a"));
    assert!(tree.has_binding(function, "b"));
    assert!(!tree.has_binding(program, "b"));
    assert_eq!(tree.owned_scope(NodeId::new(5)), Some(function));
    assert_eq!(tree.scope(program).children, vec![function]);
}

#[test]
fn test_ancestors_are_innermost_first() {
    let mut tree = ScopeTree::new();
    let outer = tree.push_scope(None, None);
    let middle = tree.push_scope(Some(outer), None);
    let inner = tree.push_scope(Some(middle), None);
    let chain: Vec<_> = tree.ancestors(inner).collect();
    assert_eq!(chain, vec![inner, middle, outer]);
}

#[test]
fn test_declarations_are_recorded_per_node() {
    let mut tree = ScopeTree::new();
    tree.mark_declaration(NodeId::new(3));
    assert!(tree.is_declaration(NodeId::new(3)));
    assert!(!tree.is_declaration(NodeId::new(4)));
}

#[test]
fn test_first_scope_is_root() {
    let mut tree = ScopeTree::new();
    let program = tree.push_scope(None, None);
    assert_eq!(program, ScopeId::ROOT);
}

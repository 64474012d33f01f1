//! Tests for the arena-backed binary tree

use rstest::rstest;

use knuth::{
    BinaryTree, BinaryTreeArena, BinaryTreeNode, DepthFirst, DomainError, Order, Traversal,
    Visitor,
};

/// Builds the nine-node reference tree through index handles.
fn build_arena_tree(strategy: Traversal) -> BinaryTreeArena<char> {
    let mut tree = BinaryTreeArena::new().with_strategy(strategy);
    let a = tree.set_root('A');
    let b = tree.insert_left(a, 'B').unwrap();
    let c = tree.insert_right(a, 'C').unwrap();
    tree.insert_left(b, 'D').unwrap();
    let e = tree.insert_left(c, 'E').unwrap();
    let f = tree.insert_right(c, 'F').unwrap();
    tree.insert_right(e, 'G').unwrap();
    tree.insert_left(f, 'H').unwrap();
    tree.insert_right(f, 'J').unwrap();
    tree
}

fn collect(tree: &BinaryTreeArena<char>, order: Order) -> String {
    let mut out = String::new();
    tree.traverse(order, |node| out.push(node.value));
    out
}

#[rstest]
#[case(Traversal::Recursive, Order::Preorder, "ABDCEGFHJ")]
#[case(Traversal::Recursive, Order::Inorder, "DBAEGCHFJ")]
#[case(Traversal::Recursive, Order::Postorder, "DBGEHJFCA")]
#[case(Traversal::Iterative, Order::Preorder, "ABDCEGFHJ")]
#[case(Traversal::Iterative, Order::Inorder, "DBAEGCHFJ")]
#[case(Traversal::Iterative, Order::Postorder, "DBGEHJFCA")]
fn given_arena_tree_when_traversing_then_matches_reference_order(
    #[case] strategy: Traversal,
    #[case] order: Order,
    #[case] expected: &str,
) {
    let tree = build_arena_tree(strategy);
    assert_eq!(collect(&tree, order), expected);
}

#[test]
fn given_arena_tree_when_iterating_then_handles_resolve_to_yielded_nodes() {
    let tree = build_arena_tree(Traversal::Iterative);

    for (idx, node) in tree.iter_postorder() {
        assert_eq!(tree.get(idx).map(|n| n.value), Some(node.value));
    }
    assert_eq!(tree.iter_inorder().count(), tree.len());
}

#[test]
fn given_boxed_tree_when_converting_then_arena_preserves_shape() {
    let boxed = BinaryTree::new(Some(BinaryTreeNode::with_children(
        1,
        Some(BinaryTreeNode::new(2).with_right(BinaryTreeNode::new(4))),
        Some(BinaryTreeNode::new(3)),
    )))
    .with_strategy(Traversal::Iterative);

    let mut expected = Vec::new();
    boxed.postorder(|node| expected.push(node.value));

    let arena = BinaryTreeArena::from(boxed);
    let mut actual = Vec::new();
    arena.postorder(|node| actual.push(node.value));

    assert_eq!(actual, expected);
    assert_eq!(arena.len(), 4);
    assert_eq!(arena.depth(), 3);
    assert_eq!(arena.strategy(), Traversal::Iterative);
}

#[test]
fn given_empty_boxed_tree_when_converting_then_arena_is_empty() {
    let arena = BinaryTreeArena::from(BinaryTree::<u8>::new(None));
    assert!(arena.is_empty());
    assert_eq!(collect_u8(&arena), Vec::<u8>::new());
}

fn collect_u8(tree: &BinaryTreeArena<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    tree.preorder(|node| out.push(node.value));
    out
}

#[test]
fn given_subtree_when_removed_then_parent_slot_cleared_and_nodes_freed() {
    let mut tree = BinaryTreeArena::new();
    let a = tree.set_root('A');
    let b = tree.insert_left(a, 'B').unwrap();
    tree.insert_left(b, 'D').unwrap();
    tree.insert_right(a, 'C').unwrap();

    let removed = tree.remove_subtree(b).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get(a).and_then(|n| n.left()), None);
    assert_eq!(collect(&tree, Order::Inorder), "AC");
    // the freed slot can be reused
    assert!(tree.insert_left(a, 'X').is_ok());
}

#[test]
fn given_stale_handle_when_removing_then_invalid_handle() {
    let mut tree = BinaryTreeArena::new();
    let a = tree.set_root(1);
    let b = tree.insert_left(a, 2).unwrap();
    tree.remove_subtree(b).unwrap();

    let err = tree.remove_subtree(b).unwrap_err();
    assert!(matches!(err, DomainError::InvalidHandle(_)));
}

#[test]
fn given_non_callable_visitor_when_traversing_arena_then_invalid_argument() {
    let tree = build_arena_tree(Traversal::Recursive);
    let result = tree.try_traverse(Order::Preorder, Visitor::value(42));
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[test]
fn given_new_root_when_set_root_then_previous_tree_discarded() {
    let mut tree = build_arena_tree(Traversal::Recursive);
    let old_root = tree.root().unwrap();

    let root = tree.set_root('Z');

    assert_eq!(tree.len(), 1);
    assert!(tree.get(old_root).is_none());
    assert_eq!(tree.get(root).map(|n| n.value), Some('Z'));
}

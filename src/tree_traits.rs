//! Rendering of binary trees as `termtree` diagrams.

use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{BinaryTree, BinaryTreeArena, BinaryTreeNode};

/// Placeholder shown for a missing child when its sibling exists.
pub const EMPTY_CHILD: &str = "∅";

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

fn render_node<T: Display>(node: &BinaryTreeNode<T>) -> Tree<String> {
    let mut tree = Tree::new(node.value.to_string());
    if node.is_leaf() {
        return tree;
    }
    for child in [node.left.as_deref(), node.right.as_deref()] {
        match child {
            Some(child) => tree.push(render_node(child)),
            None => tree.push(Tree::new(EMPTY_CHILD.to_string())),
        };
    }
    tree
}

impl<T: Display> TreeRender for BinaryTree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => render_node(root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

impl<T: Display> TreeRender for BinaryTreeArena<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T: Display>(arena: &BinaryTreeArena<T>, node_idx: Index) -> Tree<String> {
            let Some(node) = arena.get(node_idx) else {
                return Tree::new(EMPTY_CHILD.to_string());
            };
            let mut tree = Tree::new(node.value.to_string());
            if node.is_leaf() {
                return tree;
            }
            for child in [node.left(), node.right()] {
                match child {
                    Some(child_idx) => tree.push(build_tree(arena, child_idx)),
                    None => tree.push(Tree::new(EMPTY_CHILD.to_string())),
                };
            }
            tree
        }

        match self.root() {
            Some(root_idx) => build_tree(self, root_idx),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

//! Classical data structures: a plain binary tree (boxed and arena-backed),
//! a singly linked list and a fixed-capacity stack.
//!
//! Every structure reports boundary violations as [`DomainError`] values and
//! leaves its state untouched when an operation fails.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    ArenaNode, BinaryTree, BinaryTreeArena, BinaryTreeNode, DepthFirst, DomainError, DomainResult,
    Link, Order, SinglyLinkedList, SinglyLinkedListNode, Stack, Subtree, Traversal, Visitor,
};
pub use tree_traits::TreeRender;

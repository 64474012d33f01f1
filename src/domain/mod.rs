//! Domain layer: the data structures and their boundary errors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod binary_tree;
pub mod error;
pub mod linked_list;
pub mod stack;
pub mod traversal;

pub use arena::{ArenaNode, BinaryTreeArena};
pub use binary_tree::{BinaryTree, BinaryTreeNode, Subtree};
pub use error::{DomainError, DomainResult, Side};
pub use linked_list::{Link, SinglyLinkedList, SinglyLinkedListNode};
pub use stack::{Stack, DEFAULT_STACK_CAPACITY};
pub use traversal::{DepthFirst, Order, Traversal, Visitor};

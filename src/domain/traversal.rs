//! Depth-first traversal shared by the binary tree representations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Depth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, left subtree, right subtree
    Preorder,
    /// Left subtree, node, right subtree
    Inorder,
    /// Left subtree, right subtree, node
    Postorder,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Preorder, Order::Inorder, Order::Postorder];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Preorder => write!(f, "preorder"),
            Order::Inorder => write!(f, "inorder"),
            Order::Postorder => write!(f, "postorder"),
        }
    }
}

/// How a traversal walks the tree. Both produce the same visiting sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Call-stack recursion, depth bounded by tree height
    #[default]
    Recursive,
    /// Explicit stack of pending nodes
    Iterative,
}

impl FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(Traversal::Recursive),
            "iterative" => Ok(Traversal::Iterative),
            other => Err(format!("unknown traversal strategy: {}", other)),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traversal::Recursive => write!(f, "recursive"),
            Traversal::Iterative => write!(f, "iterative"),
        }
    }
}

/// A visitor as handed over by a dynamically typed caller.
///
/// Typed callers pass closures straight to [`DepthFirst::preorder`] and
/// friends. `Visitor` exists for the boundary where the argument may turn out
/// not to be callable at all.
pub enum Visitor<'a, N> {
    Callable(Box<dyn FnMut(&N) + 'a>),
    NotCallable(String),
}

impl<'a, N> Visitor<'a, N> {
    pub fn callable(visit: impl FnMut(&N) + 'a) -> Self {
        Visitor::Callable(Box::new(visit))
    }

    /// Wraps an arbitrary non-callable value, keeping its debug rendering for
    /// the error message.
    pub fn value(value: impl fmt::Debug) -> Self {
        Visitor::NotCallable(format!("{:?}", value))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Visitor::Callable(_))
    }
}

impl<N> fmt::Debug for Visitor<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visitor::Callable(_) => write!(f, "Visitor::Callable(..)"),
            Visitor::NotCallable(desc) => write!(f, "Visitor::NotCallable({})", desc),
        }
    }
}

/// Depth-first traversal with a caller-supplied per-node callback.
///
/// Traversals are pure reads: the tree is borrowed immutably throughout.
pub trait DepthFirst {
    /// What the visitor receives for every node.
    type Node;

    fn preorder<F>(&self, visit: F)
    where
        F: FnMut(&Self::Node);

    fn inorder<F>(&self, visit: F)
    where
        F: FnMut(&Self::Node);

    fn postorder<F>(&self, visit: F)
    where
        F: FnMut(&Self::Node);

    fn traverse<F>(&self, order: Order, visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match order {
            Order::Preorder => self.preorder(visit),
            Order::Inorder => self.inorder(visit),
            Order::Postorder => self.postorder(visit),
        }
    }

    /// Traverses with a dynamically supplied visitor.
    ///
    /// The visitor is checked before the first node is touched, so a
    /// non-callable argument causes no visits at all. Returns the number of
    /// visited nodes.
    #[instrument(level = "trace", skip_all, fields(order = %order))]
    fn try_traverse(&self, order: Order, visitor: Visitor<'_, Self::Node>) -> DomainResult<usize> {
        let mut visit = match visitor {
            Visitor::Callable(visit) => visit,
            Visitor::NotCallable(desc) => {
                debug!("rejected non-callable visitor: {}", desc);
                return Err(DomainError::InvalidArgument(desc));
            }
        };

        let mut visited = 0;
        self.traverse(order, |node| {
            visited += 1;
            visit(node);
        });
        Ok(visited)
    }
}

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::instrument;

use crate::domain::traversal::{DepthFirst, Traversal};

/// Node of a plain binary tree. Owns both of its children exclusively.
///
/// `Debug` output nests one level per tree level; dropping, cloning and
/// comparing nodes do not recurse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTreeNode<T> {
    /// Value stored in the node
    pub value: T,
    /// Left child of the node
    pub left: Subtree<T>,
    /// Right child of the node
    pub right: Subtree<T>,
}

impl<T> BinaryTreeNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: Subtree::default(),
            right: Subtree::default(),
        }
    }

    /// Builds a node from its value and both (optional) subtrees.
    pub fn with_children(
        value: T,
        left: Option<BinaryTreeNode<T>>,
        right: Option<BinaryTreeNode<T>>,
    ) -> Self {
        Self {
            value,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn with_left(mut self, left: BinaryTreeNode<T>) -> Self {
        self.left = left.into();
        self
    }

    pub fn with_right(mut self, right: BinaryTreeNode<T>) -> Self {
        self.right = right.into();
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn children(&self) -> impl Iterator<Item = &BinaryTreeNode<T>> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }
}

/// Owned child slot of a node, `None` when the child is missing.
///
/// Dropping, cloning and comparing a subtree use an explicit stack, so a
/// degenerate (list-shaped) tree does not recurse once per level.
pub struct Subtree<T>(Option<Box<BinaryTreeNode<T>>>);

impl<T> Deref for Subtree<T> {
    type Target = Option<Box<BinaryTreeNode<T>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Subtree<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> Default for Subtree<T> {
    fn default() -> Self {
        Subtree(None)
    }
}

impl<T> From<Option<BinaryTreeNode<T>>> for Subtree<T> {
    fn from(node: Option<BinaryTreeNode<T>>) -> Self {
        Subtree(node.map(Box::new))
    }
}

impl<T> From<BinaryTreeNode<T>> for Subtree<T> {
    fn from(node: BinaryTreeNode<T>) -> Self {
        Subtree(Some(Box::new(node)))
    }
}

impl<T> Drop for Subtree<T> {
    // Detach children before each box is freed.
    fn drop(&mut self) {
        let mut pending: Vec<Box<BinaryTreeNode<T>>> = self.0.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.0.take());
            pending.extend(node.right.0.take());
        }
    }
}

impl<T: Clone> Clone for Subtree<T> {
    // Rebuilds bottom-up in postorder: a finished subtree is pushed onto
    // `built`, and its parent pops its right then left subtree back off.
    fn clone(&self) -> Self {
        let mut built: Vec<Subtree<T>> = Vec::new();
        let mut pending = vec![(self.0.as_deref(), false)];
        while let Some((node, expanded)) = pending.pop() {
            let Some(node) = node else {
                built.push(Subtree(None));
                continue;
            };
            if expanded {
                let right = built.pop().unwrap_or_default();
                let left = built.pop().unwrap_or_default();
                built.push(
                    BinaryTreeNode {
                        value: node.value.clone(),
                        left,
                        right,
                    }
                    .into(),
                );
            } else {
                pending.push((Some(node), true));
                pending.push((node.right.0.as_deref(), false));
                pending.push((node.left.0.as_deref(), false));
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl<T: PartialEq> PartialEq for Subtree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.0.as_deref(), other.0.as_deref())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.value != b.value {
                        return false;
                    }
                    pending.push((a.left.0.as_deref(), b.left.0.as_deref()));
                    pending.push((a.right.0.as_deref(), b.right.0.as_deref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for Subtree<T> {}

impl<T: fmt::Debug> fmt::Debug for Subtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Binary tree owning an optional root node.
///
/// Not a search tree: values carry no ordering invariant. The shape is built
/// up by linking nodes, either before handing the root over or through
/// [`BinaryTree::root_mut`].
#[derive(Clone)]
pub struct BinaryTree<T> {
    /// Root node, None for empty trees
    root: Subtree<T>,
    /// Strategy used by the `DepthFirst` callbacks
    strategy: Traversal,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTree")
            .field("root", &self.root)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl<T> BinaryTree<T> {
    pub fn new(root: Option<BinaryTreeNode<T>>) -> Self {
        Self {
            root: root.into(),
            strategy: Traversal::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Traversal) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Traversal {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Traversal) {
        self.strategy = strategy;
    }

    pub fn root(&self) -> Option<&BinaryTreeNode<T>> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut BinaryTreeNode<T>> {
        self.root.as_deref_mut()
    }

    /// Replaces the root, returning the previous one.
    pub fn set_root(&mut self, root: Option<BinaryTreeNode<T>>) -> Option<BinaryTreeNode<T>> {
        let previous = self.root.take();
        self.root = root.into();
        previous.map(|node| *node)
    }

    pub(crate) fn take_root(&mut self) -> Option<Box<BinaryTreeNode<T>>> {
        self.root.take()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node_count(&self) -> usize {
        self.iter_preorder().count()
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&BinaryTreeNode<T>, usize)> = Vec::new();
        if let Some(root) = self.root() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Values of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<&T> {
        self.iter_preorder()
            .filter(|node| node.is_leaf())
            .map(|node| &node.value)
            .collect()
    }

    pub fn iter_preorder(&self) -> PreorderIter<'_, T> {
        PreorderIter::new(self.root())
    }

    pub fn iter_inorder(&self) -> InorderIter<'_, T> {
        InorderIter::new(self.root())
    }

    pub fn iter_postorder(&self) -> PostorderIter<'_, T> {
        PostorderIter::new(self.root())
    }
}

fn preorder_helper<T, F>(node: Option<&BinaryTreeNode<T>>, visit: &mut F)
where
    F: FnMut(&BinaryTreeNode<T>),
{
    let Some(node) = node else {
        return;
    };
    visit(node);
    preorder_helper(node.left.as_deref(), visit);
    preorder_helper(node.right.as_deref(), visit);
}

fn inorder_helper<T, F>(node: Option<&BinaryTreeNode<T>>, visit: &mut F)
where
    F: FnMut(&BinaryTreeNode<T>),
{
    let Some(node) = node else {
        return;
    };
    inorder_helper(node.left.as_deref(), visit);
    visit(node);
    inorder_helper(node.right.as_deref(), visit);
}

fn postorder_helper<T, F>(node: Option<&BinaryTreeNode<T>>, visit: &mut F)
where
    F: FnMut(&BinaryTreeNode<T>),
{
    let Some(node) = node else {
        return;
    };
    postorder_helper(node.left.as_deref(), visit);
    postorder_helper(node.right.as_deref(), visit);
    visit(node);
}

impl<T> DepthFirst for BinaryTree<T> {
    type Node = BinaryTreeNode<T>;

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => preorder_helper(self.root(), &mut visit),
            Traversal::Iterative => self.iter_preorder().for_each(visit),
        }
    }

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => inorder_helper(self.root(), &mut visit),
            Traversal::Iterative => self.iter_inorder().for_each(visit),
        }
    }

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn postorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => postorder_helper(self.root(), &mut visit),
            Traversal::Iterative => self.iter_postorder().for_each(visit),
        }
    }
}

pub struct PreorderIter<'a, T> {
    stack: Vec<&'a BinaryTreeNode<T>>,
}

impl<'a, T> PreorderIter<'a, T> {
    fn new(root: Option<&'a BinaryTreeNode<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreorderIter<'a, T> {
    type Item = &'a BinaryTreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so that the left subtree is popped next
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(node)
    }
}

pub struct InorderIter<'a, T> {
    stack: Vec<&'a BinaryTreeNode<T>>,
    current: Option<&'a BinaryTreeNode<T>>,
}

impl<'a, T> InorderIter<'a, T> {
    fn new(root: Option<&'a BinaryTreeNode<T>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a, T> Iterator for InorderIter<'a, T> {
    type Item = &'a BinaryTreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some(node)
    }
}

pub struct PostorderIter<'a, T> {
    stack: Vec<(&'a BinaryTreeNode<T>, bool)>,
}

impl<'a, T> PostorderIter<'a, T> {
    fn new(root: Option<&'a BinaryTreeNode<T>>) -> Self {
        Self {
            stack: root.into_iter().map(|node| (node, false)).collect(),
        }
    }
}

impl<'a, T> Iterator for PostorderIter<'a, T> {
    type Item = &'a BinaryTreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

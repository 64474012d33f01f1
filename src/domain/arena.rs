use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::binary_tree::{BinaryTree, BinaryTreeNode};
use crate::domain::error::{DomainError, DomainResult, Side};
use crate::domain::traversal::{DepthFirst, Traversal};

/// Tree node stored in the arena. Children are referenced by handle.
#[derive(Debug, Clone)]
pub struct ArenaNode<T> {
    /// Value stored in the node
    pub value: T,
    /// Index of the left child in the arena
    left: Option<Index>,
    /// Index of the right child in the arena
    right: Option<Index>,
}

impl<T> ArenaNode<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn left(&self) -> Option<Index> {
        self.left
    }

    pub fn right(&self) -> Option<Index> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Arena-backed binary tree.
///
/// Uses a generational arena for memory-safe node handles and O(1) lookups.
/// Each node is owned by the arena; the parent/child links are plain indices,
/// and every node except the root is linked from exactly one parent slot.
pub struct BinaryTreeArena<T> {
    /// Arena storage for all tree nodes
    arena: Arena<ArenaNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    strategy: Traversal,
}

impl<T> Default for BinaryTreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryTreeArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTreeArena")
            .field("len", &self.arena.len())
            .field("root", &self.root)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl<T> BinaryTreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
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

    /// Installs a new root, discarding any previous tree.
    #[instrument(level = "trace", skip_all)]
    pub fn set_root(&mut self, value: T) -> Index {
        self.arena.clear();
        let root_idx = self.arena.insert(ArenaNode::new(value));
        self.root = Some(root_idx);
        root_idx
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_left(&mut self, parent: Index, value: T) -> DomainResult<Index> {
        self.insert_child(parent, Side::Left, value)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_right(&mut self, parent: Index, value: T) -> DomainResult<Index> {
        self.insert_child(parent, Side::Right, value)
    }

    fn insert_child(&mut self, parent: Index, side: Side, value: T) -> DomainResult<Index> {
        let parent_node = self
            .arena
            .get(parent)
            .ok_or_else(|| DomainError::InvalidHandle(format!("{:?}", parent)))?;
        if parent_node.child(side).is_some() {
            debug!("{} slot of {:?} already occupied", side, parent);
            return Err(DomainError::ChildOccupied {
                parent: format!("{:?}", parent),
                side,
            });
        }

        let child_idx = self.arena.insert(ArenaNode::new(value));
        if let Some(parent_node) = self.arena.get_mut(parent) {
            *parent_node.child_mut(side) = Some(child_idx);
        }
        Ok(child_idx)
    }

    pub fn get(&self, idx: Index) -> Option<&ArenaNode<T>> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut ArenaNode<T>> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes `idx` and everything below it, returning the number of freed nodes.
    ///
    /// The slot that linked to `idx` is cleared, so stale handles into the
    /// removed subtree are rejected afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> DomainResult<usize> {
        if !self.arena.contains(idx) {
            return Err(DomainError::InvalidHandle(format!("{:?}", idx)));
        }

        if self.root == Some(idx) {
            self.root = None;
        } else if let Some(parent) = self.parent_of(idx) {
            if let Some(parent_node) = self.arena.get_mut(parent) {
                if parent_node.left == Some(idx) {
                    parent_node.left = None;
                } else {
                    parent_node.right = None;
                }
            }
        }

        let mut removed = 0;
        let mut pending = vec![idx];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.arena.remove(current) {
                pending.extend(node.left);
                pending.extend(node.right);
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn parent_of(&self, idx: Index) -> Option<Index> {
        self.arena
            .iter()
            .find(|(_, node)| node.left == Some(idx) || node.right == Some(idx))
            .map(|(parent, _)| parent)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|idx| (idx, 1)).collect();

        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = self.get(idx) else {
                continue;
            };
            max_depth = max_depth.max(depth);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        max_depth
    }

    pub fn iter_preorder(&self) -> ArenaPreorderIter<'_, T> {
        ArenaPreorderIter::new(self)
    }

    pub fn iter_inorder(&self) -> ArenaInorderIter<'_, T> {
        ArenaInorderIter::new(self)
    }

    pub fn iter_postorder(&self) -> ArenaPostorderIter<'_, T> {
        ArenaPostorderIter::new(self)
    }

    fn visit_preorder<F: FnMut(&ArenaNode<T>)>(&self, node_idx: Option<Index>, visit: &mut F) {
        if let Some(node) = node_idx.and_then(|idx| self.get(idx)) {
            visit(node);
            self.visit_preorder(node.left, visit);
            self.visit_preorder(node.right, visit);
        }
    }

    fn visit_inorder<F: FnMut(&ArenaNode<T>)>(&self, node_idx: Option<Index>, visit: &mut F) {
        if let Some(node) = node_idx.and_then(|idx| self.get(idx)) {
            self.visit_inorder(node.left, visit);
            visit(node);
            self.visit_inorder(node.right, visit);
        }
    }

    fn visit_postorder<F: FnMut(&ArenaNode<T>)>(&self, node_idx: Option<Index>, visit: &mut F) {
        if let Some(node) = node_idx.and_then(|idx| self.get(idx)) {
            self.visit_postorder(node.left, visit);
            self.visit_postorder(node.right, visit);
            visit(node);
        }
    }
}

impl<T> DepthFirst for BinaryTreeArena<T> {
    type Node = ArenaNode<T>;

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => self.visit_preorder(self.root, &mut visit),
            Traversal::Iterative => self.iter_preorder().for_each(|(_, node)| visit(node)),
        }
    }

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => self.visit_inorder(self.root, &mut visit),
            Traversal::Iterative => self.iter_inorder().for_each(|(_, node)| visit(node)),
        }
    }

    #[instrument(level = "trace", skip_all, fields(strategy = %self.strategy))]
    fn postorder<F>(&self, mut visit: F)
    where
        F: FnMut(&Self::Node),
    {
        match self.strategy {
            Traversal::Recursive => self.visit_postorder(self.root, &mut visit),
            Traversal::Iterative => self.iter_postorder().for_each(|(_, node)| visit(node)),
        }
    }
}

impl<T> From<BinaryTree<T>> for BinaryTreeArena<T> {
    /// Moves every node of a boxed tree into the arena, keeping its shape and
    /// traversal strategy.
    fn from(mut tree: BinaryTree<T>) -> Self {
        let mut arena_tree = BinaryTreeArena::new().with_strategy(tree.strategy());
        let Some(root) = tree.take_root() else {
            return arena_tree;
        };

        let BinaryTreeNode {
            value,
            mut left,
            mut right,
        } = *root;
        let root_idx = arena_tree.set_root(value);
        let mut pending: Vec<(Index, Side, Box<BinaryTreeNode<T>>)> = Vec::new();
        pending.extend(left.take().map(|node| (root_idx, Side::Left, node)));
        pending.extend(right.take().map(|node| (root_idx, Side::Right, node)));

        while let Some((parent, side, node)) = pending.pop() {
            let BinaryTreeNode {
                value,
                mut left,
                mut right,
            } = *node;
            let idx = arena_tree.arena.insert(ArenaNode::new(value));
            if let Some(parent_node) = arena_tree.arena.get_mut(parent) {
                *parent_node.child_mut(side) = Some(idx);
            }
            pending.extend(left.take().map(|node| (idx, Side::Left, node)));
            pending.extend(right.take().map(|node| (idx, Side::Right, node)));
        }

        arena_tree
    }
}

pub struct ArenaPreorderIter<'a, T> {
    tree: &'a BinaryTreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> ArenaPreorderIter<'a, T> {
    fn new(tree: &'a BinaryTreeArena<T>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for ArenaPreorderIter<'a, T> {
    type Item = (Index, &'a ArenaNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Push right first for left-to-right traversal
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct ArenaInorderIter<'a, T> {
    tree: &'a BinaryTreeArena<T>,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a, T> ArenaInorderIter<'a, T> {
    fn new(tree: &'a BinaryTreeArena<T>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a, T> Iterator for ArenaInorderIter<'a, T> {
    type Item = (Index, &'a ArenaNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.current {
            self.stack.push(current_idx);
            self.current = self.tree.get(current_idx).and_then(|node| node.left);
        }
        let current_idx = self.stack.pop()?;
        let node = self.tree.get(current_idx)?;
        self.current = node.right;
        Some((current_idx, node))
    }
}

pub struct ArenaPostorderIter<'a, T> {
    tree: &'a BinaryTreeArena<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> ArenaPostorderIter<'a, T> {
    fn new(tree: &'a BinaryTreeArena<T>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().map(|idx| (idx, false)).collect(),
        }
    }
}

impl<'a, T> Iterator for ArenaPostorderIter<'a, T> {
    type Item = (Index, &'a ArenaNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                self.stack.extend(node.right.map(|idx| (idx, false)));
                self.stack.extend(node.left.map(|idx| (idx, false)));
            }
        }
        None
    }
}

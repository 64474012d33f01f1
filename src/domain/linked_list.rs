use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Node of a singly linked list, owning its successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglyLinkedListNode<T> {
    /// Value stored in the node
    pub value: T,
    /// Next node in the list
    pub next: Link<T>,
}

impl<T> SinglyLinkedListNode<T> {
    pub fn new(value: T, next: Option<SinglyLinkedListNode<T>>) -> Self {
        Self {
            value,
            next: next.into(),
        }
    }
}

/// Owning link to the rest of a chain, `None` at the tail.
///
/// Dropping, cloning and comparing a link walk the chain in a loop, so a
/// chain of any length never costs more than one call frame per operation.
pub struct Link<T>(Option<Box<SinglyLinkedListNode<T>>>);

impl<T> Link<T> {
    fn nodes(&self) -> impl Iterator<Item = &SinglyLinkedListNode<T>> {
        std::iter::successors(self.0.as_deref(), |node| node.next.0.as_deref())
    }
}

impl<T> Deref for Link<T> {
    type Target = Option<Box<SinglyLinkedListNode<T>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Link<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Link(None)
    }
}

impl<T> From<Option<SinglyLinkedListNode<T>>> for Link<T> {
    fn from(node: Option<SinglyLinkedListNode<T>>) -> Self {
        Link(node.map(Box::new))
    }
}

impl<T> From<SinglyLinkedListNode<T>> for Link<T> {
    fn from(node: SinglyLinkedListNode<T>) -> Self {
        Link(Some(Box::new(node)))
    }
}

impl<T> Drop for Link<T> {
    fn drop(&mut self) {
        let mut link = self.0.take();
        while let Some(mut node) = link {
            link = node.next.0.take();
        }
    }
}

impl<T: Clone> Clone for Link<T> {
    fn clone(&self) -> Self {
        let values: Vec<&T> = self.nodes().map(|node| &node.value).collect();
        values.into_iter().rev().fold(Link(None), |next, value| {
            SinglyLinkedListNode {
                value: value.clone(),
                next,
            }
            .into()
        })
    }
}

impl<T: PartialEq> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes()
            .map(|node| &node.value)
            .eq(other.nodes().map(|node| &node.value))
    }
}

impl<T: Eq> Eq for Link<T> {}

impl<T: fmt::Debug> fmt::Debug for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(|node| &node.value))
            .finish()
    }
}

/// Linked list whose nodes have a single link to the next node.
///
/// Insertion and removal happen at the head, so the list behaves as a LIFO.
/// `size` is maintained by every mutation and always equals the number of
/// nodes reachable from `head`.
pub struct SinglyLinkedList<T> {
    head: Link<T>,
    size: usize,
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> SinglyLinkedList<T> {
    /// Creates a list from an optional head node; the whole chain hanging off
    /// `head` becomes part of the list.
    pub fn new(head: Option<SinglyLinkedListNode<T>>) -> Self {
        let mut list = Self {
            head: head.into(),
            size: 0,
        };
        list.size = list.iter().count();
        list
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn head(&self) -> Option<&SinglyLinkedListNode<T>> {
        self.head.as_deref()
    }

    /// Inserts `value` as the new head.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn insert(&mut self, value: T) {
        let next = std::mem::take(&mut self.head);
        self.head = SinglyLinkedListNode { value, next }.into();
        self.size += 1;
    }

    /// Removes the head and returns its value.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn pop(&mut self) -> DomainResult<T> {
        let Some(node) = self.head.take() else {
            debug!("cannot pop an empty list");
            return Err(DomainError::Underflow { structure: "list" });
        };
        let SinglyLinkedListNode { value, next } = *node;
        self.head = next;
        self.size -= 1;
        Ok(value)
    }

    pub fn peek(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a SinglyLinkedListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counts_whole_chain() {
        let chain = SinglyLinkedListNode::new(
            3,
            Some(SinglyLinkedListNode::new(2, Some(SinglyLinkedListNode::new(1, None)))),
        );
        let list = SinglyLinkedList::new(Some(chain));
        assert_eq!(list.size(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut list = SinglyLinkedList::new(None);
        list.insert("a");
        assert_eq!(list.peek(), Some(&"a"));
        assert_eq!(list.size(), 1);
    }

    #[test]
    fn test_clear_empties_list() {
        let mut list = SinglyLinkedList::new(None);
        for i in 0..5 {
            list.insert(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.size(), 0);
    }

    #[test]
    fn test_long_list_drops_without_overflow() {
        let mut list = SinglyLinkedList::new(None);
        for i in 0..500_000 {
            list.insert(i);
        }
        assert_eq!(list.size(), 500_000);
        drop(list);
    }

    fn long_chain(len: usize) -> SinglyLinkedListNode<usize> {
        let mut head = SinglyLinkedListNode::new(0, None);
        for i in 1..len {
            head = SinglyLinkedListNode::new(i, Some(head));
        }
        head
    }

    #[test]
    fn test_detached_chain_drops_without_overflow() {
        let head = long_chain(500_000);
        assert_eq!(head.value, 499_999);
        drop(head);
    }

    #[test]
    fn test_long_chain_clone_and_compare_without_overflow() {
        let head = long_chain(500_000);
        let copy = head.clone();
        assert_eq!(copy, head);

        let mut other = long_chain(500_000);
        other.value = 0;
        assert_ne!(other, head);
    }

    #[test]
    fn test_chains_of_different_length_differ() {
        let short = SinglyLinkedListNode::new(1, Some(SinglyLinkedListNode::new(2, None)));
        let long = SinglyLinkedListNode::new(
            1,
            Some(SinglyLinkedListNode::new(2, Some(SinglyLinkedListNode::new(3, None)))),
        );
        assert_ne!(short, long);
    }
}

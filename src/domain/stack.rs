//! Fixed-capacity stack over a pre-allocated buffer.
//!
//! ## Layout
//!
//! ```text
//! ┌──────┬──────┬──────┬──────┬──────┐
//! │  v0  │  v1  │  v2  │ None │ None │   capacity = 5
//! └──────┴──────┴──────┴──────┴──────┘
//!                        ↑ size = 3
//! ```
//!
//! - Insert: store at `size`, increment `size`
//! - Delete: decrement `size`, take the value at `size`
//! - The buffer never grows; a full stack rejects inserts.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Default stack capacity (number of slots)
pub const DEFAULT_STACK_CAPACITY: usize = 16;

/// LIFO with a capacity declared at construction.
pub struct Stack<T> {
    /// Backing buffer, exactly `capacity` slots
    data: Box<[Option<T>]>,
    /// Logical size, also the index of the next free slot
    size: usize,
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("capacity", &self.capacity())
            .field("size", &self.size)
            .field("data", &&self.data[..self.size])
            .finish()
    }
}

fn allocate<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> Stack<T> {
    /// Create an empty stack with room for exactly `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: allocate(capacity),
            size: 0,
        }
    }

    /// Create an empty stack with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_STACK_CAPACITY)
    }

    /// Discards all contents and the old buffer, starting over empty with
    /// `capacity` slots.
    #[instrument(level = "debug", skip(self), fields(old_capacity = self.capacity()))]
    pub fn reset(&mut self, capacity: usize) {
        self.data = allocate(capacity);
        self.size = 0;
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Insert a value at the top of the stack.
    ///
    /// A full stack yields `Overflow` and is left untouched; `value` is dropped.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn insert(&mut self, value: T) -> DomainResult<()> {
        if self.is_full() {
            debug!("stack overflow at capacity {}", self.capacity());
            return Err(DomainError::Overflow {
                capacity: self.capacity(),
            });
        }
        self.data[self.size] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// Same as [`Stack::insert`].
    #[inline]
    pub fn push(&mut self, value: T) -> DomainResult<()> {
        self.insert(value)
    }

    /// Delete the value at the top of the stack and return it.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn delete(&mut self) -> DomainResult<T> {
        if self.is_empty() {
            debug!("stack underflow");
            return Err(DomainError::Underflow { structure: "stack" });
        }
        let value = self.data[self.size - 1]
            .take()
            .ok_or(DomainError::Underflow { structure: "stack" })?;
        self.size -= 1;
        Ok(value)
    }

    /// Same as [`Stack::delete`].
    #[inline]
    pub fn pop(&mut self) -> DomainResult<T> {
        self.delete()
    }

    pub fn peek(&self) -> Option<&T> {
        self.size
            .checked_sub(1)
            .and_then(|top| self.data[top].as_ref())
    }

    /// Values from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data[..self.size].iter().flatten()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

//! Fixed-capacity stack: LIFO order and bounds errors

use rstest::{fixture, rstest};

use knuth::domain::DEFAULT_STACK_CAPACITY;
use knuth::util::testing;
use knuth::{DomainError, Stack};

#[fixture]
fn setup() {
    testing::init_test_setup();
}

// ============================================================
// LIFO
// ============================================================

#[rstest]
fn given_n_pushes_when_popping_then_reverse_order(#[from(setup)] _setup: ()) {
    let n = 10;
    let mut stack = Stack::new(n);

    for i in 0..n {
        stack.push(i).unwrap();
        assert_eq!(stack.len(), i + 1);
    }
    assert!(stack.is_full());

    let popped: Vec<usize> = (0..n).map(|_| stack.pop().unwrap()).collect();

    assert_eq!(popped, (0..n).rev().collect::<Vec<_>>());
    assert!(stack.is_empty());
}

#[rstest]
fn given_insert_delete_aliases_when_used_then_same_as_push_pop(#[from(setup)] _setup: ()) {
    let mut by_alias = Stack::new(3);
    let mut by_name = Stack::new(3);

    for value in ["x", "y", "z"] {
        by_alias.insert(value).unwrap();
        by_name.push(value).unwrap();
    }
    assert_eq!(by_alias.insert("w"), by_name.push("w"));

    for _ in 0..4 {
        assert_eq!(by_alias.delete(), by_name.pop());
    }
}

#[rstest]
fn given_interleaved_ops_when_peeking_then_sees_top(#[from(setup)] _setup: ()) {
    let mut stack = Stack::new(2);
    assert_eq!(stack.peek(), None);

    stack.push('a').unwrap();
    stack.push('b').unwrap();
    assert_eq!(stack.peek(), Some(&'b'));

    stack.pop().unwrap();
    assert_eq!(stack.peek(), Some(&'a'));
    assert_eq!(stack.iter().collect::<Vec<_>>(), vec![&'a']);
}

// ============================================================
// Bounds
// ============================================================

#[rstest]
fn given_zero_capacity_when_pushing_then_overflow(#[from(setup)] _setup: ()) {
    let mut stack = Stack::new(0);

    assert!(stack.is_empty());
    assert!(stack.is_full());

    let err = stack.push(1).unwrap_err();
    assert_eq!(err, DomainError::Overflow { capacity: 0 });
    assert_eq!(stack.len(), 0);
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(DEFAULT_STACK_CAPACITY)]
fn given_full_stack_when_pushing_then_overflow_and_unchanged(
    #[from(setup)] _setup: (),
    #[case] capacity: usize,
) {
    let mut stack = Stack::new(capacity);
    for i in 0..capacity {
        stack.push(i).unwrap();
    }

    let err = stack.push(usize::MAX).unwrap_err();

    assert_eq!(err, DomainError::Overflow { capacity });
    assert!(err.is_bounds_error());
    assert_eq!(stack.len(), capacity);
    assert_eq!(stack.peek(), capacity.checked_sub(1).as_ref());
}

#[rstest]
fn given_empty_stack_when_popping_then_underflow_and_unchanged(#[from(setup)] _setup: ()) {
    let mut stack: Stack<u8> = Stack::new(3);
    stack.push(1).unwrap();
    stack.pop().unwrap();

    let err = stack.pop().unwrap_err();

    assert_eq!(err, DomainError::Underflow { structure: "stack" });
    assert!(err.is_bounds_error());
    assert_eq!(stack.len(), 0);
    assert_eq!(stack.capacity(), 3);
}

#[rstest]
fn given_used_stack_when_reset_then_empty_with_new_capacity(#[from(setup)] _setup: ()) {
    let mut stack = Stack::new(2);
    stack.push(1).unwrap();
    stack.push(2).unwrap();

    stack.reset(5);

    assert!(stack.is_empty());
    assert_eq!(stack.capacity(), 5);
    for i in 0..5 {
        stack.push(i).unwrap();
    }
    assert!(stack.push(5).is_err());
}

#[rstest]
fn given_default_stack_when_created_then_default_capacity(#[from(setup)] _setup: ()) {
    let stack: Stack<i32> = Stack::default();
    assert_eq!(stack.capacity(), DEFAULT_STACK_CAPACITY);
    assert!(stack.is_empty());
}

//! Stack Tests - LIFO behaviour and bulk operations

use kindset::{CollectionError, Element, Stack, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn stack_of(values: &[i32]) -> Stack {
    let mut stack = Stack::new();
    stack.push(values.iter().copied()).unwrap();
    stack
}

#[test]
fn test_top_follows_pops() {
    let mut stack = stack_of(&[1, 2, 3]);
    assert_eq!(stack.top(), Ok(&Element::I32(3)));
    stack.pop().unwrap();
    assert_eq!(stack.top(), Ok(&Element::I32(2)));
}

#[test]
fn test_pop_empty() {
    let mut stack = Stack::new();
    let empty = CollectionError::EmptyCollection { collection: "stack" };
    assert_eq!(stack.pop(), Err(empty.clone()));
    assert_eq!(stack.top(), Err(empty.clone()));
    assert_eq!(stack.top_and_pop(), Err(empty));
}

#[test]
fn test_push_preserves_argument_order() {
    let mut stack = stack_of(&[1]);
    stack.push([2, 3]).unwrap();
    assert_eq!(
        stack.as_slice(),
        &[Element::I32(1), Element::I32(2), Element::I32(3)]
    );
}

#[rstest]
#[case(0, &[1, 2, 3, 4])]
#[case(1, &[1, 2, 3])]
#[case(4, &[])]
fn test_pop_n(#[case] count: usize, #[case] remaining: &[i32]) {
    let mut stack = stack_of(&[1, 2, 3, 4]);
    stack.pop_n(count).unwrap();
    assert_eq!(stack.as_slice(), stack_of(remaining).as_slice());
}

#[test]
fn test_top_n_and_pop_n() {
    let mut stack = stack_of(&[1, 2, 3, 4]);

    let top = stack.top_n(2).unwrap().to_vec();
    let popped = stack.top_n_and_pop_n(2).unwrap();

    assert_eq!(top, popped);
    assert_eq!(popped, vec![Element::I32(3), Element::I32(4)]);
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_bulk_count_too_large_does_not_mutate() {
    let mut stack = stack_of(&[1, 2]);
    let expected = CollectionError::InvalidCount {
        collection: "stack",
        requested: 3,
        available: 2,
    };

    assert_eq!(stack.top_n(3).unwrap_err(), expected);
    assert_eq!(stack.pop_n(3).unwrap_err(), expected);
    assert_eq!(stack.top_n_and_pop_n(3).unwrap_err(), expected);
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_search_distance_from_top() {
    let stack = stack_of(&[5, 6, 7, 6]);
    assert_eq!(stack.search(6), Some(1));
    assert_eq!(stack.search(7), Some(2));
    assert_eq!(stack.search(5), Some(4));
    assert_eq!(stack.search(8), None);
}

#[test]
fn test_search_other_kinds_not_found() {
    let stack = stack_of(&[1]);
    assert_eq!(stack.search(1i64), None);
    assert_eq!(stack.search(Value::from(vec![Value::I32(1)])), None);
}

#[test]
fn test_iteration_bottom_to_top() {
    let stack = stack_of(&[1, 2, 3]);
    let seen: Vec<String> = (&stack).into_iter().map(|e| e.to_string()).collect();
    assert_eq!(seen, vec!["1", "2", "3"]);
    assert_eq!(stack.to_vec(), stack.iter().cloned().collect::<Vec<_>>());
}

#[test]
fn test_display_does_not_panic() {
    let stack = stack_of(&[1, 2]);
    stack.display();
}

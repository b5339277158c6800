use kigu_array::{Array, HeapAllocator};

#[test]
fn test_array_initialization() {
    let allocator = HeapAllocator;
    let array = Array::<u32>::new_in(8, &allocator);

    assert_eq!(array.len(), 0);
    assert!(array.is_empty());
    assert_eq!(array.space(), 8);
    assert!(array.last().is_none());
}

#[test]
fn test_push_operation() {
    let allocator = HeapAllocator;
    let mut array = Array::<u32>::new_in(0, &allocator);

    *array.push() = 10;
    array.push_value(20);

    assert_eq!(array.len(), 2);
    assert_eq!(array[0], 10);
    assert_eq!(array[1], 20);
    assert_eq!(array.last(), Some(&20));
}

#[test]
fn test_push_returns_new_last() {
    let allocator = HeapAllocator;
    let mut array = Array::<u32>::new_in(1, &allocator);

    let last = array.push_value(7);
    *last += 1;

    assert_eq!(array.as_slice(), &[8]);
}

#[test]
fn test_pushed_slot_is_zeroed() {
    let allocator = HeapAllocator;
    let mut array = Array::<u64>::new_in(2, &allocator);

    array.push_value(u64::MAX);
    array.pop();

    assert_eq!(*array.push(), 0);
}

#[test]
fn test_pop_operation() {
    let allocator = HeapAllocator;
    let mut array = Array::<u32>::from_slice_in(&[1, 2, 3], &allocator);

    assert_eq!(array.pop(), 3);
    assert_eq!(array.pop(), 2);
    assert_eq!(array.len(), 1);
    assert_eq!(array.pop(), 1);
    assert!(array.is_empty());
    assert!(array.try_pop().is_err());
}

#[test]
fn test_pop_keeps_space() {
    let allocator = HeapAllocator;
    let mut array = Array::<u32>::from_slice_in(&[1, 2, 3], &allocator);

    array.pop();
    array.pop();

    assert_eq!(array.space(), 3);
}

#[test]
fn test_lifo_order() {
    let allocator = HeapAllocator;
    let mut array = Array::<u8>::new_in(0, &allocator);

    for c in *b"abc" {
        array.push_value(c);
    }

    let mut popped = Vec::new();
    while let Ok(c) = array.try_pop() {
        popped.push(c);
    }
    assert_eq!(popped, b"cba");
}

#[test]
fn test_clear_operation() {
    let allocator = HeapAllocator;
    let mut array = Array::<u32>::from_slice_in(&[5, 6, 7], &allocator);

    array.clear();

    assert_eq!(array.len(), 0);
    assert!(array.is_empty());
    assert_eq!(array.space(), 3);

    // Cleared slots come back zeroed
    assert_eq!(*array.push(), 0);
}

#[test]
fn test_interleaved_push_pop() {
    let allocator = HeapAllocator;
    let mut array = Array::<i64>::new_in(1, &allocator);

    array.push_value(1);
    array.push_value(2);
    assert_eq!(array.pop(), 2);
    array.push_value(3);
    array.push_value(4);
    assert_eq!(array.pop(), 4);

    assert_eq!(array.as_slice(), &[1, 3]);
}

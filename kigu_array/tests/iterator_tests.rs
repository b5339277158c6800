use core::alloc::Layout;
use kigu_array::{Array, HeapAllocator, RawArray};

#[test]
fn test_iterator_empty_array() {
    let allocator = HeapAllocator;
    let raw = RawArray::new_in(Layout::new::<u16>(), 4, &allocator);

    let mut iter = raw.iter();
    assert_eq!(iter.next(), None);
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn test_iterator_populated_array() {
    let allocator = HeapAllocator;
    let mut raw = RawArray::new_in(Layout::new::<[u8; 2]>(), 0, &allocator);

    raw.push_bytes(b"he");
    raw.push_bytes(b"ll");
    raw.push_bytes(b"o!");

    let mut iter = raw.iter();
    assert_eq!(iter.size_hint(), (3, Some(3)));

    assert_eq!(iter.next(), Some(&b"he"[..]));
    assert_eq!(iter.size_hint(), (2, Some(2)));

    assert_eq!(iter.next(), Some(&b"ll"[..]));
    assert_eq!(iter.next(), Some(&b"o!"[..]));
    assert_eq!(iter.size_hint(), (0, Some(0)));

    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_reverse() {
    let allocator = HeapAllocator;
    let mut raw = RawArray::new_in(Layout::new::<u8>(), 4, &allocator);
    raw.extend_from_bytes(b"abc");

    let reversed: Vec<_> = raw.iter().rev().collect();
    assert_eq!(reversed, vec![&b"c"[..], &b"b"[..], &b"a"[..]]);
}

#[test]
fn test_iterator_meets_in_middle() {
    let allocator = HeapAllocator;
    let mut raw = RawArray::new_in(Layout::new::<u8>(), 4, &allocator);
    raw.extend_from_bytes(b"abcd");

    let mut iter = raw.iter();
    assert_eq!(iter.next(), Some(&b"a"[..]));
    assert_eq!(iter.next_back(), Some(&b"d"[..]));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.next_back(), Some(&b"c"[..]));
    assert_eq!(iter.next(), Some(&b"b"[..]));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_iterator_for_loop() {
    let allocator = HeapAllocator;
    let mut raw = RawArray::new_in(Layout::new::<u32>(), 2, &allocator);
    raw.push_bytes(&1u32.to_ne_bytes());
    raw.push_bytes(&2u32.to_ne_bytes());

    let mut total = 0;
    for slot in &raw {
        total += u32::from_ne_bytes(slot.try_into().unwrap());
    }
    assert_eq!(total, 3);
}

#[test]
fn test_typed_iteration() {
    let allocator = HeapAllocator;
    let array = Array::<i32>::from_slice_in(&[3, -1, 4], &allocator);

    let doubled: Vec<i32> = array.iter().map(|v| v * 2).collect();
    assert_eq!(doubled, vec![6, -2, 8]);

    let sum: i32 = (&array).into_iter().sum();
    assert_eq!(sum, 6);
}

#[test]
fn test_extend_from_iterator() {
    let allocator = HeapAllocator;
    let mut array = Array::<u16>::new_in(0, &allocator);

    array.extend(1..=5);

    assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5]);
    assert_eq!(array.space(), 8);
}

#[test]
fn test_typed_array_shares_raw_slots() {
    let allocator = HeapAllocator;
    let array = Array::<u16>::from_slice_in(&[0x0102, 0x0304], &allocator);

    let raw = array.as_raw();
    assert_eq!(raw.element_size(), 2);
    assert_eq!(raw.iter().count(), 2);
    assert_eq!(raw.get(1), Some(&0x0304u16.to_ne_bytes()[..]));
}

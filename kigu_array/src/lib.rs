#![no_std]

//! `kigu_array`: allocator-aware dynamic arrays with a header-prefixed layout.
//!
//! Every array is a single block obtained from a caller-supplied
//! [`Allocator`]. The block starts with a small header holding the element
//! count, the capacity and a reference to the allocator, immediately
//! followed by the elements:
//!
//! Block layout: [header: count, space, allocator][slot 0][slot 1]...
//!
//! The handle points at slot 0 and finds the header at a fixed negative
//! offset, so no second allocation or indirection is needed.
//!
//! Two layers are provided:
//! - [`RawArray`] is type-erased. Slots are byte slices of a runtime
//!   element size; all movement is plain memory copying.
//! - [`Array<T>`] is a typed view for `bytemuck::Pod` elements on top of
//!   the raw layer.
//!
//! # Growth
//!
//! An array grows only when a push or insert finds it full
//! (`len() == space()`), and then by `max(len(), GROWTH_MIN_SLOTS)` slots,
//! so a non-empty array doubles. Growing reallocates the whole block, which
//! may move it; the borrow checker ensures no element reference survives a
//! mutating call.
//!
//! # Zeroing
//!
//! Allocators hand out zeroed memory. `pop`, `clear`, `insert` and the
//! remove operations zero the slots they vacate or open, so every slot past
//! `len()` reads as zero.
//!
//! # Errors
//!
//! Operations that can fail come in pairs. The plain form panics on a
//! broken precondition (popping an empty array, an index past the end, an
//! allocation failure); the `try_*` form returns an [`ArrayError`].
//!
//! ```
//! # use kigu_array::{Array, HeapAllocator};
//! let allocator = HeapAllocator;
//! let mut array = Array::<u32>::new_in(4, &allocator);
//!
//! array.push_value(1);
//! array.push_value(2);
//! array.push_value(3);
//! array.push_value(4);
//! assert_eq!(array.space(), 4);
//!
//! // Full: inserting grows the block to twice the count
//! array.insert_value(2, 5);
//! assert_eq!(array.as_slice(), &[1, 2, 5, 3, 4]);
//! assert_eq!(array.space(), 8);
//!
//! assert_eq!(array.remove_ordered(2), 5);
//! assert_eq!(array.remove_unordered(0), 1);
//! assert_eq!(array.as_slice(), &[4, 2, 3]);
//!
//! assert!(array.try_remove_ordered(7).is_err());
//! ```
//!
//! # Type-erased use
//!
//! ```
//! # use core::alloc::Layout;
//! # use kigu_array::{HeapAllocator, RawArray};
//! let allocator = HeapAllocator;
//! let mut raw = RawArray::new_in(Layout::new::<[u8; 3]>(), 2, &allocator);
//!
//! raw.push_bytes(b"abc");
//! raw.push().copy_from_slice(b"xyz");
//!
//! let slots: Vec<&[u8]> = raw.iter().collect();
//! assert_eq!(slots, [&b"abc"[..], &b"xyz"[..]]);
//!
//! raw.pop();
//! assert_eq!(raw.as_bytes(), b"abc");
//! ```

extern crate alloc;

mod allocator;
mod array;
mod error;
mod iter;
mod raw;

// Re-export public types and traits
pub use allocator::{Allocator, CountingAllocator, HeapAllocator};
pub use array::Array;
pub use error::ArrayError;
pub use iter::RawArraySlots;
pub use raw::{RawArray, GROWTH_MIN_SLOTS};

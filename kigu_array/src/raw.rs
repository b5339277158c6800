use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ops::Range;
use core::ptr::{self, NonNull};
use core::slice;

use crate::allocator::Allocator;
use crate::error::ArrayError;
use crate::iter::RawArraySlots;

/// Minimum number of slots added when a full array grows.
///
/// A full array grows by `max(count, GROWTH_MIN_SLOTS)` slots, which
/// doubles the capacity of any non-empty array.
pub const GROWTH_MIN_SLOTS: usize = 1;

/// Bookkeeping stored in the same block as the elements, right before
/// element 0.
#[repr(C)]
struct ArrayHeader<'a, A: Allocator> {
    count: usize,
    space: usize,
    allocator: &'a A,
}

#[cold]
#[track_caller]
pub(crate) fn fail(error: ArrayError) -> ! {
    panic!("{error}")
}

/// A type-erased dynamic array whose header precedes its first element.
///
/// Block layout: `[ArrayHeader][slot 0][slot 1]...[slot space-1]`
///
/// The handle only stores a pointer to slot 0 and the slot layout; the
/// count, capacity and allocator are read from the header at a fixed
/// negative offset. Any call that grows the array may move the block, which
/// is why every mutating method takes `&mut self` and no slot borrow can
/// survive it.
///
/// Slots past `len()` are always zero: the allocator hands out zeroed
/// memory, and `pop`, `clear` and the remove operations zero what they
/// vacate.
pub struct RawArray<'a, A: Allocator> {
    data: NonNull<u8>,
    element: Layout,
    _allocator: PhantomData<&'a A>,
}

impl<'a, A: Allocator> RawArray<'a, A> {
    fn block_align(element: Layout) -> usize {
        element.align().max(align_of::<ArrayHeader<'a, A>>())
    }

    fn header_offset(element: Layout) -> usize {
        size_of::<ArrayHeader<'a, A>>().next_multiple_of(Self::block_align(element))
    }

    fn block_layout(element: Layout, space: usize) -> Result<Layout, ArrayError> {
        let overflow = ArrayError::CapacityOverflow {
            space,
            element_size: element.size(),
        };
        let size = space
            .checked_mul(element.size())
            .and_then(|payload| payload.checked_add(Self::header_offset(element)))
            .ok_or_else(|| overflow.clone())?;
        Layout::from_size_align(size, Self::block_align(element)).map_err(|_| overflow)
    }

    /// Allocates a header plus `space` slots of `element` from `allocator`.
    ///
    /// The slot size is padded to the slot alignment.
    ///
    /// # Errors
    ///
    /// - `ArrayError::InvalidConfiguration` if the slot size is zero
    /// - `ArrayError::CapacityOverflow` if the block size overflows
    /// - `ArrayError::AllocationFailed` if the allocator returns nothing
    #[allow(unsafe_code)]
    pub fn try_new_in(element: Layout, space: usize, allocator: &'a A) -> Result<Self, ArrayError> {
        if element.size() == 0 {
            return Err(ArrayError::InvalidConfiguration {
                parameter: "element_size",
                value: 0,
            });
        }
        let element = element.pad_to_align();
        let layout = Self::block_layout(element, space)?;
        let block = allocator
            .reserve(layout)
            .ok_or(ArrayError::AllocationFailed {
                bytes: layout.size(),
            })?;

        // Safe: `block` is a fresh allocation of `layout.size()` bytes aligned for the
        // header, and the header offset keeps slot 0 inside it
        let data = unsafe {
            allocator.commit(block, layout.size());
            block.cast::<ArrayHeader<'a, A>>().as_ptr().write(ArrayHeader {
                count: 0,
                space,
                allocator,
            });
            NonNull::new_unchecked(block.as_ptr().add(Self::header_offset(element)))
        };

        Ok(Self {
            data,
            element,
            _allocator: PhantomData,
        })
    }

    /// Allocates a header plus `space` slots of `element` from `allocator`.
    ///
    /// # Panics
    ///
    /// Panics if the slot size is zero or the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn new_in(element: Layout, space: usize, allocator: &'a A) -> Self {
        Self::try_new_in(element, space, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Allocates `count` slots and marks all of them occupied.
    ///
    /// The slots are zero because the allocator hands out zeroed memory.
    ///
    /// # Errors
    ///
    /// Same as [`RawArray::try_new_in`].
    pub fn try_with_count_in(
        element: Layout,
        count: usize,
        allocator: &'a A,
    ) -> Result<Self, ArrayError> {
        let mut array = Self::try_new_in(element, count, allocator)?;
        array.header_mut().count = count;
        Ok(array)
    }

    /// Allocates `count` zeroed, occupied slots.
    ///
    /// # Panics
    ///
    /// Panics if the slot size is zero or the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn with_count_in(element: Layout, count: usize, allocator: &'a A) -> Self {
        Self::try_with_count_in(element, count, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Releases the block through the allocator it came from.
    pub fn deinit(self) {
        drop(self);
    }

    #[allow(unsafe_code)]
    fn header_ptr(&self) -> *mut ArrayHeader<'a, A> {
        // Safe: the header lives `header_offset` bytes before slot 0 in the same block
        unsafe {
            self.data
                .as_ptr()
                .sub(Self::header_offset(self.element))
                .cast::<ArrayHeader<'a, A>>()
        }
    }

    #[allow(unsafe_code)]
    fn header(&self) -> &ArrayHeader<'a, A> {
        // Safe: the header was written on construction and the block outlives `self`
        unsafe { &*self.header_ptr() }
    }

    #[allow(unsafe_code)]
    fn header_mut(&mut self) -> &mut ArrayHeader<'a, A> {
        // Safe: as above, and `&mut self` guarantees exclusive access
        unsafe { &mut *self.header_ptr() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.header().count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn space(&self) -> usize {
        self.header().space
    }

    #[must_use]
    pub fn element_size(&self) -> usize {
        self.element.size()
    }

    /// Distance in bytes from the start of the block to slot 0.
    #[must_use]
    pub fn header_offset_bytes(&self) -> usize {
        Self::header_offset(self.element)
    }

    #[must_use]
    pub fn allocator(&self) -> &'a A {
        self.header().allocator
    }

    /// Pointer to slot 0. Invalidated by any call that grows or shrinks
    /// the block.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    #[allow(unsafe_code)]
    fn slot_ptr(&self, index: usize) -> *mut u8 {
        // Safe: callers only pass indices `<= space`
        unsafe { self.data.as_ptr().add(index * self.element.size()) }
    }

    #[allow(unsafe_code)]
    fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        // Safe: `index < space` is established by every caller
        unsafe { slice::from_raw_parts_mut(self.slot_ptr(index), self.element.size()) }
    }

    /// All occupied slots as one byte slice.
    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_bytes(&self) -> &[u8] {
        // Safe: the first `count` slots are initialized and in bounds
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len() * self.element.size()) }
    }

    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len() * self.element.size();
        // Safe: as above, with exclusive access
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), len) }
    }

    /// Gets the bytes of the slot at `index`.
    ///
    /// Returns `None` if the index is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let range = self.slot_range(index)?;
        self.as_bytes().get(range)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let range = self.slot_range(index)?;
        self.as_bytes_mut().get_mut(range)
    }

    // Byte range of slot `index`, `None` if it does not fit in `usize`
    fn slot_range(&self, index: usize) -> Option<Range<usize>> {
        let size = self.element.size();
        let start = index.checked_mul(size)?;
        Some(start..start.checked_add(size)?)
    }

    #[must_use]
    pub fn last(&self) -> Option<&[u8]> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Returns an iterator over the occupied slots.
    #[must_use]
    pub fn iter(&self) -> RawArraySlots<'_> {
        RawArraySlots::new(self.as_bytes(), self.element.size())
    }

    #[allow(unsafe_code)]
    fn try_resize_block(&mut self, new_space: usize) -> Result<(), ArrayError> {
        let old = Self::block_layout(self.element, self.space())?;
        let new = Self::block_layout(self.element, new_space)?;
        let allocator = self.allocator();
        let offset = Self::header_offset(self.element);

        // Safe: the block and its current layout come from `allocator`; on success the
        // header moved with the block and slot 0 is again `offset` bytes in
        self.data = unsafe {
            let block = NonNull::new_unchecked(self.data.as_ptr().sub(offset));
            let moved = allocator
                .resize(block, old, new.size())
                .ok_or(ArrayError::AllocationFailed { bytes: new.size() })?;
            NonNull::new_unchecked(moved.as_ptr().add(offset))
        };
        self.header_mut().space = new_space;
        Ok(())
    }

    /// Adds `additional` slots of capacity without changing the count.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::CapacityOverflow` or `ArrayError::AllocationFailed`;
    /// the array is unchanged on error.
    pub fn try_grow(&mut self, additional: usize) -> Result<(), ArrayError> {
        if additional == 0 {
            return Ok(());
        }
        let space = self.space();
        let new_space = space
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow {
                space,
                element_size: self.element.size(),
            })?;
        self.try_resize_block(new_space)
    }

    /// Adds `additional` slots of capacity without changing the count.
    ///
    /// # Panics
    ///
    /// Panics if the reallocation fails.
    #[track_caller]
    pub fn grow(&mut self, additional: usize) {
        self.try_grow(additional).unwrap_or_else(|e| fail(e));
    }

    /// Reallocates the block to exactly `space` slots.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidConfiguration` if `space` is below the
    /// current count, otherwise the errors of [`RawArray::try_grow`].
    pub fn try_resize_space(&mut self, space: usize) -> Result<(), ArrayError> {
        if space < self.len() {
            return Err(ArrayError::InvalidConfiguration {
                parameter: "space",
                value: space,
            });
        }
        if space == self.space() {
            return Ok(());
        }
        self.try_resize_block(space)
    }

    /// Reallocates the block to exactly `space` slots.
    ///
    /// # Panics
    ///
    /// Panics if `space` is below the count or the reallocation fails.
    #[track_caller]
    pub fn resize_space(&mut self, space: usize) {
        self.try_resize_space(space).unwrap_or_else(|e| fail(e));
    }

    /// Makes room for `additional` more slots, growing by at least
    /// `max(count, GROWTH_MIN_SLOTS)` when the array is too small.
    fn try_reserve_slots(&mut self, additional: usize) -> Result<(), ArrayError> {
        let count = self.len();
        let space = self.space();
        let needed = count
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow {
                space: usize::MAX,
                element_size: self.element.size(),
            })?;
        if needed > space {
            let growth = (needed - space).max(count.max(GROWTH_MIN_SLOTS));
            self.try_grow(growth)?;
        }
        Ok(())
    }

    fn check_slot_bytes(&self, bytes: &[u8]) -> Result<usize, ArrayError> {
        let size = self.element.size();
        if bytes.len() % size != 0 {
            return Err(ArrayError::InvalidConfiguration {
                parameter: "bytes.len()",
                value: bytes.len(),
            });
        }
        Ok(bytes.len() / size)
    }

    /// Reserves the next slot at the end, growing if the array is full,
    /// and returns it. The slot is zero.
    ///
    /// # Errors
    ///
    /// Returns the growth errors of [`RawArray::try_grow`].
    pub fn try_push(&mut self) -> Result<&mut [u8], ArrayError> {
        self.try_reserve_slots(1)?;
        let index = self.len();
        self.header_mut().count += 1;
        Ok(self.slot_mut(index))
    }

    /// Reserves and returns the next slot at the end.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn push(&mut self) -> &mut [u8] {
        match self.try_push() {
            Ok(slot) => slot,
            Err(e) => fail(e),
        }
    }

    /// Appends whole slots copied from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidConfiguration` if `bytes` is not a whole
    /// number of slots, otherwise the growth errors.
    #[allow(unsafe_code)]
    pub fn try_extend_from_bytes(&mut self, bytes: &[u8]) -> Result<(), ArrayError> {
        let slots = self.check_slot_bytes(bytes)?;
        self.try_reserve_slots(slots)?;
        let count = self.len();
        // Safe: capacity for `slots` more slots was reserved, and `bytes` cannot alias
        // the block while `self` is mutably borrowed
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.slot_ptr(count), bytes.len());
        }
        self.header_mut().count += slots;
        Ok(())
    }

    /// Appends whole slots copied from `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not a whole number of slots or growing fails.
    #[track_caller]
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        self.try_extend_from_bytes(bytes).unwrap_or_else(|e| fail(e));
    }

    /// Appends one slot copied from `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly one slot or growing fails.
    #[track_caller]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if bytes.len() != self.element.size() {
            fail(ArrayError::InvalidConfiguration {
                parameter: "bytes.len()",
                value: bytes.len(),
            });
        }
        self.extend_from_bytes(bytes);
    }

    /// Zeroes the last slot and releases it from the count.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::EmptyArray` if there is nothing to pop.
    #[allow(unsafe_code)]
    pub fn try_pop(&mut self) -> Result<(), ArrayError> {
        let Some(last) = self.len().checked_sub(1) else {
            return Err(ArrayError::EmptyArray);
        };
        // Safe: `last < count <= space`
        unsafe {
            self.slot_ptr(last).write_bytes(0, self.element.size());
        }
        self.header_mut().count = last;
        Ok(())
    }

    /// Zeroes the last slot and releases it from the count.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[track_caller]
    pub fn pop(&mut self) {
        self.try_pop().unwrap_or_else(|e| fail(e));
    }

    /// Reserves a slot at `index`, shifting the slots at and after it one
    /// to the right, and returns the zeroed slot.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index > len()`, otherwise
    /// the growth errors.
    #[allow(unsafe_code)]
    pub fn try_insert(&mut self, index: usize) -> Result<&mut [u8], ArrayError> {
        let count = self.len();
        if index > count {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                length: count,
            });
        }
        self.try_reserve_slots(1)?;
        let size = self.element.size();
        // Safe: one spare slot was reserved; `ptr::copy` handles the overlap
        unsafe {
            ptr::copy(
                self.slot_ptr(index),
                self.slot_ptr(index + 1),
                (count - index) * size,
            );
            self.slot_ptr(index).write_bytes(0, size);
        }
        self.header_mut().count += 1;
        Ok(self.slot_mut(index))
    }

    /// Reserves a zeroed slot at `index`, shifting later slots right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or growing fails.
    #[track_caller]
    pub fn insert(&mut self, index: usize) -> &mut [u8] {
        match self.try_insert(index) {
            Ok(slot) => slot,
            Err(e) => fail(e),
        }
    }

    /// Inserts whole slots copied from `bytes` at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index > len()`,
    /// `ArrayError::InvalidConfiguration` for a partial slot, otherwise the
    /// growth errors.
    #[allow(unsafe_code)]
    pub fn try_insert_bytes(&mut self, index: usize, bytes: &[u8]) -> Result<(), ArrayError> {
        let count = self.len();
        if index > count {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                length: count,
            });
        }
        let slots = self.check_slot_bytes(bytes)?;
        self.try_reserve_slots(slots)?;
        let size = self.element.size();
        // Safe: `slots` spare slots were reserved; the tail move may overlap itself
        // but never `bytes`
        unsafe {
            ptr::copy(
                self.slot_ptr(index),
                self.slot_ptr(index + slots),
                (count - index) * size,
            );
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.slot_ptr(index), bytes.len());
        }
        self.header_mut().count += slots;
        Ok(())
    }

    /// Inserts whole slots copied from `bytes` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`, `bytes` holds a partial slot, or growing fails.
    #[track_caller]
    pub fn insert_bytes(&mut self, index: usize, bytes: &[u8]) {
        self.try_insert_bytes(index, bytes)
            .unwrap_or_else(|e| fail(e));
    }

    /// Removes the slot at `index`, shifting later slots left to keep
    /// their order.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_remove_ordered(&mut self, index: usize) -> Result<(), ArrayError> {
        self.try_remove_slots(index, index + 1)
    }

    /// Removes the slot at `index`, keeping the order of the rest.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove_ordered(&mut self, index: usize) {
        self.try_remove_ordered(index).unwrap_or_else(|e| fail(e));
    }

    /// Removes the slot at `index` by moving the last slot into it.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index >= len()`.
    #[allow(unsafe_code)]
    pub fn try_remove_unordered(&mut self, index: usize) -> Result<(), ArrayError> {
        let count = self.len();
        if index >= count {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                length: count,
            });
        }
        let last = count - 1;
        if index != last {
            // Safe: both slots are occupied and distinct
            unsafe {
                ptr::copy_nonoverlapping(
                    self.slot_ptr(last),
                    self.slot_ptr(index),
                    self.element.size(),
                );
            }
        }
        self.try_pop()
    }

    /// Removes the slot at `index` by moving the last slot into it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove_unordered(&mut self, index: usize) {
        self.try_remove_unordered(index)
            .unwrap_or_else(|e| fail(e));
    }

    /// Removes the slots in `start..end`, shifting later slots left and
    /// zeroing the vacated tail.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` unless `start <= end <= len()`.
    #[allow(unsafe_code)]
    pub fn try_remove_slots(&mut self, start: usize, end: usize) -> Result<(), ArrayError> {
        let count = self.len();
        if end > count {
            return Err(ArrayError::IndexOutOfBounds {
                index: end - 1,
                length: count,
            });
        }
        if start > end {
            return Err(ArrayError::IndexOutOfBounds {
                index: start,
                length: end,
            });
        }
        let removed = end - start;
        let size = self.element.size();
        // Safe: all slots touched are below `count`
        unsafe {
            ptr::copy(self.slot_ptr(end), self.slot_ptr(start), (count - end) * size);
            self.slot_ptr(count - removed).write_bytes(0, removed * size);
        }
        self.header_mut().count = count - removed;
        Ok(())
    }

    /// Zeroes every occupied slot and resets the count; capacity is kept.
    #[allow(unsafe_code)]
    pub fn clear(&mut self) {
        let len = self.len() * self.element.size();
        // Safe: the occupied slots are in bounds
        unsafe {
            self.data.as_ptr().write_bytes(0, len);
        }
        self.header_mut().count = 0;
    }
}

impl<A: Allocator> Drop for RawArray<'_, A> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let Ok(layout) = Self::block_layout(self.element, self.space()) else {
            return;
        };
        let allocator = self.allocator();
        // Safe: the block came from this allocator with exactly this layout
        unsafe {
            let block = NonNull::new_unchecked(
                self.data
                    .as_ptr()
                    .sub(Self::header_offset(self.element)),
            );
            allocator.release(block, layout);
        }
    }
}

impl<A: Allocator> fmt::Debug for RawArray<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawArray")
            .field("count", &self.len())
            .field("space", &self.space())
            .field("element_size", &self.element.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{CountingAllocator, HeapAllocator};

    fn u32_layout() -> Layout {
        Layout::new::<u32>()
    }

    #[test]
    fn test_header_is_adjacent_to_first_slot() {
        let allocator = HeapAllocator;
        let array = RawArray::new_in(u32_layout(), 4, &allocator);

        assert_eq!(array.header_offset_bytes(), 3 * size_of::<usize>());
        assert_eq!(array.as_ptr() as usize % align_of::<u32>(), 0);
    }

    #[test]
    fn test_overaligned_slots() {
        #[repr(align(32))]
        struct Wide([u8; 32]);

        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(Layout::new::<Wide>(), 1, &allocator);
        array.push();
        array.push();

        assert_eq!(array.header_offset_bytes(), 32);
        assert_eq!(array.as_ptr() as usize % 32, 0);
        assert_eq!(array.as_bytes().len(), 64);
    }

    #[test]
    fn test_zero_sized_slots_rejected() {
        let allocator = HeapAllocator;
        let result = RawArray::try_new_in(Layout::new::<()>(), 4, &allocator);
        assert_eq!(
            result.unwrap_err(),
            ArrayError::InvalidConfiguration {
                parameter: "element_size",
                value: 0
            }
        );
    }

    #[test]
    fn test_push_bytes_and_get() {
        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(u32_layout(), 0, &allocator);

        array.push_bytes(&7u32.to_le_bytes());
        array.push_bytes(&9u32.to_le_bytes());

        assert_eq!(array.len(), 2);
        assert_eq!(array.get(1), Some(&9u32.to_le_bytes()[..]));
        assert_eq!(array.get(2), None);
        assert_eq!(array.last(), Some(&9u32.to_le_bytes()[..]));
    }

    #[test]
    fn test_growth_doubles_when_full() {
        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(u32_layout(), 0, &allocator);

        let mut spaces = [0usize; 5];
        for space in &mut spaces {
            array.push();
            *space = array.space();
        }

        assert_eq!(spaces, [1, 2, 4, 4, 8]);
    }

    #[test]
    fn test_pop_zeroes_slot() {
        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(u32_layout(), 2, &allocator);
        array.push().copy_from_slice(&[1, 2, 3, 4]);
        array.pop();

        assert!(array.is_empty());
        let slot = array.push();
        assert!(slot.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_remove_slots_zeroes_tail() {
        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(Layout::new::<u8>(), 8, &allocator);
        array.extend_from_bytes(b"abcdef");

        array.try_remove_slots(1, 3).unwrap();

        assert_eq!(array.as_bytes(), b"adef");
        array.extend_from_bytes(b"\0\0");
        assert_eq!(array.as_bytes(), b"adef\0\0");
        assert_eq!(array.space(), 8);
    }

    #[test]
    fn test_drop_releases_block() {
        let allocator = CountingAllocator::new(HeapAllocator);
        {
            let mut array = RawArray::new_in(u32_layout(), 1, &allocator);
            array.push();
            array.push();
            assert_eq!(allocator.resize_count(), 1);
            assert_eq!(allocator.commit_count(), 1);
        }
        assert_eq!(allocator.live_blocks(), 0);
        assert_eq!(allocator.live_bytes(), 0);
    }

    #[test]
    fn test_failed_growth_leaves_array_intact() {
        let header = 3 * size_of::<usize>();
        let allocator = CountingAllocator::with_limit(HeapAllocator, header + 8);
        let mut array = RawArray::new_in(u32_layout(), 2, &allocator);
        array.push_bytes(&1u32.to_le_bytes());
        array.push_bytes(&2u32.to_le_bytes());

        let err = array.try_push().unwrap_err();

        assert_eq!(
            err,
            ArrayError::AllocationFailed {
                bytes: header + 16
            }
        );
        assert_eq!(array.len(), 2);
        assert_eq!(array.space(), 2);
        assert_eq!(array.get(1), Some(&2u32.to_le_bytes()[..]));
    }

    #[test]
    fn test_get_huge_index_is_none() {
        let allocator = HeapAllocator;
        let mut array = RawArray::new_in(u32_layout(), 1, &allocator);
        array.push_bytes(&7u32.to_le_bytes());

        assert_eq!(array.get(usize::MAX), None);
        assert_eq!(array.get(1 << (usize::BITS - 2)), None);
        assert!(array.get_mut(usize::MAX).is_none());
        assert!(array.get_mut(1 << (usize::BITS - 2)).is_none());
        assert_eq!(array.get(0), Some(&7u32.to_le_bytes()[..]));
    }
}

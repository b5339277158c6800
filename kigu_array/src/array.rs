use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut, Range};
use core::slice;

use bytemuck::Pod;

use crate::allocator::{Allocator, HeapAllocator};
use crate::error::ArrayError;
use crate::raw::{fail, RawArray};

/// A typed dynamic array of plain-old-data elements.
///
/// `Array` is a thin typed view over [`RawArray`]: the header-prefixed
/// block, growth policy and zeroing rules are the raw layer's. Elements are
/// moved with plain memory copies, which is why they must be `Pod`.
pub struct Array<'a, T: Pod, A: Allocator = HeapAllocator> {
    raw: RawArray<'a, A>,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod, A: Allocator> Array<'a, T, A> {
    /// Creates an empty array with room for `space` elements.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidConfiguration` for zero-sized `T`,
    /// otherwise the allocation errors of [`RawArray::try_new_in`].
    pub fn try_new_in(space: usize, allocator: &'a A) -> Result<Self, ArrayError> {
        Ok(Self {
            raw: RawArray::try_new_in(Layout::new::<T>(), space, allocator)?,
            _marker: PhantomData,
        })
    }

    /// Creates an empty array with room for `space` elements.
    ///
    /// # Panics
    ///
    /// Panics for zero-sized `T` or if the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn new_in(space: usize, allocator: &'a A) -> Self {
        Self::try_new_in(space, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Creates an array of `count` zeroed elements.
    ///
    /// # Errors
    ///
    /// Same as [`Array::try_new_in`].
    pub fn try_with_count_in(count: usize, allocator: &'a A) -> Result<Self, ArrayError> {
        Ok(Self {
            raw: RawArray::try_with_count_in(Layout::new::<T>(), count, allocator)?,
            _marker: PhantomData,
        })
    }

    /// Creates an array of `count` zeroed elements.
    ///
    /// # Panics
    ///
    /// Panics for zero-sized `T` or if the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn with_count_in(count: usize, allocator: &'a A) -> Self {
        Self::try_with_count_in(count, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Creates an array holding a copy of `values`, with no spare capacity.
    ///
    /// # Errors
    ///
    /// Same as [`Array::try_new_in`].
    pub fn try_from_slice_in(values: &[T], allocator: &'a A) -> Result<Self, ArrayError> {
        let mut array = Self::try_new_in(values.len(), allocator)?;
        array.try_extend_from_slice(values)?;
        Ok(array)
    }

    /// Creates an array holding a copy of `values`.
    ///
    /// # Panics
    ///
    /// Panics for zero-sized `T` or if the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn from_slice_in(values: &[T], allocator: &'a A) -> Self {
        Self::try_from_slice_in(values, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Releases the storage through the allocator it came from.
    pub fn deinit(self) {
        drop(self);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn space(&self) -> usize {
        self.raw.space()
    }

    #[must_use]
    pub fn allocator(&self) -> &'a A {
        self.raw.allocator()
    }

    /// The type-erased array underneath.
    #[must_use]
    pub fn as_raw(&self) -> &RawArray<'a, A> {
        &self.raw
    }

    /// Pointer to element 0. Invalidated by any call that reallocates.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr().cast()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(self.raw.as_bytes())
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(self.raw.as_bytes_mut())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Reserves the next slot, growing if full, and returns it zeroed.
    ///
    /// # Errors
    ///
    /// Returns the growth errors of [`RawArray::try_grow`].
    pub fn try_push(&mut self) -> Result<&mut T, ArrayError> {
        self.raw.try_push().map(bytemuck::from_bytes_mut)
    }

    /// Reserves the next slot, growing if full, and returns it zeroed.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn push(&mut self) -> &mut T {
        bytemuck::from_bytes_mut(self.raw.push())
    }

    /// Appends `value` and returns a reference to the new last element.
    ///
    /// # Errors
    ///
    /// Returns the growth errors; the array is unchanged on error.
    pub fn try_push_value(&mut self, value: T) -> Result<&mut T, ArrayError> {
        let slot = self.try_push()?;
        *slot = value;
        Ok(slot)
    }

    /// Appends `value` and returns a reference to the new last element.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn push_value(&mut self, value: T) -> &mut T {
        let slot = self.push();
        *slot = value;
        slot
    }

    /// Removes the last element, zeroing its slot, and returns it.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::EmptyArray` if the array is empty.
    pub fn try_pop(&mut self) -> Result<T, ArrayError> {
        let value = *self.last().ok_or(ArrayError::EmptyArray)?;
        self.raw.try_pop()?;
        Ok(value)
    }

    /// Removes the last element, zeroing its slot, and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        self.try_pop().unwrap_or_else(|e| fail(e))
    }

    /// Opens a zeroed slot at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index > len()`, otherwise
    /// the growth errors.
    pub fn try_insert(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        self.raw.try_insert(index).map(bytemuck::from_bytes_mut)
    }

    /// Opens a zeroed slot at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or growing fails.
    #[track_caller]
    pub fn insert(&mut self, index: usize) -> &mut T {
        bytemuck::from_bytes_mut(self.raw.insert(index))
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Same as [`Array::try_insert`].
    pub fn try_insert_value(&mut self, index: usize, value: T) -> Result<&mut T, ArrayError> {
        let slot = self.try_insert(index)?;
        *slot = value;
        Ok(slot)
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or growing fails.
    #[track_caller]
    pub fn insert_value(&mut self, index: usize, value: T) -> &mut T {
        let slot = self.insert(index);
        *slot = value;
        slot
    }

    fn value_at(&self, index: usize) -> Result<T, ArrayError> {
        self.get(index).copied().ok_or(ArrayError::IndexOutOfBounds {
            index,
            length: self.len(),
        })
    }

    /// Removes and returns the element at `index`, keeping the order of
    /// the rest.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_remove_ordered(&mut self, index: usize) -> Result<T, ArrayError> {
        let value = self.value_at(index)?;
        self.raw.try_remove_ordered(index)?;
        Ok(value)
    }

    /// Removes and returns the element at `index`, keeping the order of
    /// the rest.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove_ordered(&mut self, index: usize) -> T {
        self.try_remove_ordered(index).unwrap_or_else(|e| fail(e))
    }

    /// Removes and returns the element at `index` by moving the last
    /// element into its slot. O(1).
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_remove_unordered(&mut self, index: usize) -> Result<T, ArrayError> {
        let value = self.value_at(index)?;
        self.raw.try_remove_unordered(index)?;
        Ok(value)
    }

    /// Removes and returns the element at `index` by moving the last
    /// element into its slot. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove_unordered(&mut self, index: usize) -> T {
        self.try_remove_unordered(index)
            .unwrap_or_else(|e| fail(e))
    }

    /// Zeroes all elements and sets the length to zero; capacity is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Adds room for `additional` elements without changing the length.
    ///
    /// # Errors
    ///
    /// Returns the growth errors of [`RawArray::try_grow`].
    pub fn try_grow(&mut self, additional: usize) -> Result<(), ArrayError> {
        self.raw.try_grow(additional)
    }

    /// Adds room for `additional` elements without changing the length.
    ///
    /// # Panics
    ///
    /// Panics if the reallocation fails.
    #[track_caller]
    pub fn grow(&mut self, additional: usize) {
        self.raw.grow(additional);
    }

    /// Reallocates to exactly `space` elements.
    ///
    /// # Errors
    ///
    /// See [`RawArray::try_resize_space`].
    pub fn try_resize_space(&mut self, space: usize) -> Result<(), ArrayError> {
        self.raw.try_resize_space(space)
    }

    /// Reallocates to exactly `space` elements.
    ///
    /// # Panics
    ///
    /// Panics if `space < len()` or the reallocation fails.
    #[track_caller]
    pub fn resize_space(&mut self, space: usize) {
        self.raw.resize_space(space);
    }

    /// Appends a copy of `values`.
    ///
    /// # Errors
    ///
    /// Returns the growth errors; the array is unchanged on error.
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), ArrayError> {
        self.raw.try_extend_from_bytes(bytemuck::cast_slice(values))
    }

    /// Appends a copy of `values`.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.raw.extend_from_bytes(bytemuck::cast_slice(values));
    }

    /// Inserts a copy of `values` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` if `index > len()`, otherwise
    /// the growth errors.
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), ArrayError> {
        self.raw.try_insert_bytes(index, bytemuck::cast_slice(values))
    }

    /// Inserts a copy of `values` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or growing fails.
    #[track_caller]
    pub fn insert_slice(&mut self, index: usize, values: &[T]) {
        self.raw.insert_bytes(index, bytemuck::cast_slice(values));
    }

    /// Removes the elements in `range`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfBounds` unless the range lies within
    /// the array.
    pub fn try_remove_range(&mut self, range: Range<usize>) -> Result<(), ArrayError> {
        self.raw.try_remove_slots(range.start, range.end)
    }

    /// Removes the elements in `range`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics unless the range lies within the array.
    #[track_caller]
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.try_remove_range(range).unwrap_or_else(|e| fail(e));
    }
}

impl<T: Pod, A: Allocator> Index<usize> for Array<'_, T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Pod, A: Allocator> IndexMut<usize> for Array<'_, T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'s, T: Pod, A: Allocator> IntoIterator for &'s Array<'_, T, A> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Pod, A: Allocator> Extend<T> for Array<'_, T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_value(value);
        }
    }
}

impl<T: Pod + fmt::Debug, A: Allocator> fmt::Debug for Array<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

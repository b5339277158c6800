//! Allocator capability consumed by every container in this crate.
//!
//! Containers never own their allocator; they borrow it for their whole
//! lifetime, so the allocator always outlives what it produced.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

/// Source of the memory blocks backing arrays and strings.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and zero-filled.
/// `resize` must preserve the first `min(old, new)` bytes and zero any
/// bytes past the old size.
pub unsafe trait Allocator {
    /// Reserves a zeroed block for `layout`. Returns `None` on failure or
    /// for a zero-sized layout.
    fn reserve(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block previously returned by `reserve` or `resize`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator and `layout` must be the layout
    /// it currently has.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

    /// Resizes a block, moving it if necessary. On failure the old block
    /// is left untouched and `None` is returned.
    ///
    /// # Safety
    ///
    /// Same contract as [`Allocator::release`]. After success the old
    /// pointer must not be used.
    unsafe fn resize(&self, ptr: NonNull<u8>, layout: Layout, new_size: usize)
        -> Option<NonNull<u8>>;

    /// Commits reserved memory for use. Allocators without a
    /// reserve/commit split keep the default no-op.
    ///
    /// # Safety
    ///
    /// `ptr..ptr + size` must lie within a block from this allocator.
    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) {
        let _ = (ptr, size);
    }
}

#[allow(unsafe_code)]
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn reserve(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).reserve(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).release(ptr, layout) }
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        unsafe { (**self).resize(ptr, layout, new_size) }
    }

    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) {
        unsafe { (**self).commit(ptr, size) }
    }
}

/// Allocator backed by the global Rust allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

#[allow(unsafe_code)]
unsafe impl Allocator for HeapAllocator {
    fn reserve(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // Safe: the layout has a non-zero size
        NonNull::new(unsafe { alloc::alloc::alloc_zeroed(layout) })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if new_size == 0 || Layout::from_size_align(new_size, layout.align()).is_err() {
            return None;
        }
        let moved = NonNull::new(unsafe { alloc::alloc::realloc(ptr.as_ptr(), layout, new_size) })?;
        if new_size > layout.size() {
            // realloc leaves the grown tail uninitialized
            unsafe {
                moved
                    .as_ptr()
                    .add(layout.size())
                    .write_bytes(0, new_size - layout.size());
            }
        }
        Some(moved)
    }
}

/// Wraps another allocator and records every call made through it.
///
/// Used to observe reallocation and to check that containers release
/// everything they reserve. An optional byte limit makes requests fail once
/// the live total would exceed it.
#[derive(Debug, Default)]
pub struct CountingAllocator<A: Allocator = HeapAllocator> {
    inner: A,
    limit: Option<usize>,
    reserves: Cell<usize>,
    releases: Cell<usize>,
    resizes: Cell<usize>,
    commits: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl<A: Allocator> CountingAllocator<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            limit: None,
            reserves: Cell::new(0),
            releases: Cell::new(0),
            resizes: Cell::new(0),
            commits: Cell::new(0),
            live_bytes: Cell::new(0),
        }
    }

    /// Creates a counting allocator that refuses to hold more than
    /// `max_live_bytes` at once.
    pub fn with_limit(inner: A, max_live_bytes: usize) -> Self {
        Self {
            limit: Some(max_live_bytes),
            ..Self::new(inner)
        }
    }

    #[must_use]
    pub fn reserve_count(&self) -> usize {
        self.reserves.get()
    }

    #[must_use]
    pub fn release_count(&self) -> usize {
        self.releases.get()
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resizes.get()
    }

    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.get()
    }

    /// Bytes currently held by blocks that were not released.
    #[must_use]
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    /// Number of blocks reserved and not yet released.
    #[must_use]
    pub fn live_blocks(&self) -> usize {
        self.reserves.get() - self.releases.get()
    }

    fn within_limit(&self, live_bytes: usize) -> bool {
        self.limit.map_or(true, |limit| live_bytes <= limit)
    }
}

#[allow(unsafe_code)]
unsafe impl<A: Allocator> Allocator for CountingAllocator<A> {
    fn reserve(&self, layout: Layout) -> Option<NonNull<u8>> {
        let live = self.live_bytes.get() + layout.size();
        if !self.within_limit(live) {
            return None;
        }
        let ptr = self.inner.reserve(layout)?;
        self.reserves.set(self.reserves.get() + 1);
        self.live_bytes.set(live);
        Some(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.release(ptr, layout) };
        self.releases.set(self.releases.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let live = self.live_bytes.get() - layout.size() + new_size;
        if !self.within_limit(live) {
            return None;
        }
        let moved = unsafe { self.inner.resize(ptr, layout, new_size) }?;
        self.resizes.set(self.resizes.get() + 1);
        self.live_bytes.set(live);
        Some(moved)
    }

    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) {
        self.commits.set(self.commits.get() + 1);
        unsafe { self.inner.commit(ptr, size) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_reserve_is_zeroed() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let ptr = HeapAllocator.reserve(layout).unwrap();
        #[allow(unsafe_code)]
        let bytes = unsafe { core::slice::from_raw_parts(ptr.as_ptr(), 64) };
        assert!(bytes.iter().all(|&b| b == 0));
        #[allow(unsafe_code)]
        unsafe {
            HeapAllocator.release(ptr, layout);
        }
    }

    #[test]
    fn test_heap_resize_zeroes_tail() {
        let layout = Layout::from_size_align(4, 4).unwrap();
        let ptr = HeapAllocator.reserve(layout).unwrap();
        #[allow(unsafe_code)]
        unsafe {
            ptr.as_ptr().write_bytes(0xAB, 4);
            let moved = HeapAllocator.resize(ptr, layout, 32).unwrap();
            let bytes = core::slice::from_raw_parts(moved.as_ptr(), 32);
            assert_eq!(&bytes[..4], &[0xAB; 4]);
            assert!(bytes[4..].iter().all(|&b| b == 0));
            HeapAllocator.release(moved, Layout::from_size_align(32, 4).unwrap());
        }
    }

    #[test]
    fn test_zero_size_reserve_fails() {
        let layout = Layout::from_size_align(0, 1).unwrap();
        assert!(HeapAllocator.reserve(layout).is_none());
    }

    #[test]
    fn test_counting_limit() {
        let counting = CountingAllocator::with_limit(HeapAllocator, 16);
        let small = Layout::from_size_align(8, 8).unwrap();
        let big = Layout::from_size_align(32, 8).unwrap();

        assert!(counting.reserve(big).is_none());
        let ptr = counting.reserve(small).unwrap();
        assert_eq!(counting.live_bytes(), 8);
        assert_eq!(counting.live_blocks(), 1);

        #[allow(unsafe_code)]
        unsafe {
            assert!(counting.resize(ptr, small, 64).is_none());
            counting.release(ptr, small);
        }
        assert_eq!(counting.live_bytes(), 0);
        assert_eq!(counting.live_blocks(), 0);
        assert_eq!(counting.resize_count(), 0);
    }
}

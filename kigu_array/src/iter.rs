use crate::allocator::Allocator;
use crate::raw::RawArray;

/// Iterator over the occupied slots of a `RawArray`, one byte slice per slot
///
/// This iterator implements `Clone`.
#[derive(Clone)]
pub struct RawArraySlots<'a> {
    bytes: &'a [u8],
    element_size: usize,
    front: usize,
    back: usize,
}

impl<'a> RawArraySlots<'a> {
    pub(crate) fn new(bytes: &'a [u8], element_size: usize) -> Self {
        Self {
            bytes,
            element_size,
            front: 0,
            back: bytes.len() / element_size,
        }
    }

    fn slot(&self, index: usize) -> Option<&'a [u8]> {
        let start = index * self.element_size;
        self.bytes.get(start..start + self.element_size)
    }
}

impl<'a> Iterator for RawArraySlots<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let result = self.slot(self.front);
            self.front += 1;
            result
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for RawArraySlots<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            self.slot(self.back)
        } else {
            None
        }
    }
}

impl ExactSizeIterator for RawArraySlots<'_> {}

impl<'a, A: Allocator> IntoIterator for &'a RawArray<'_, A> {
    type Item = &'a [u8];
    type IntoIter = RawArraySlots<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

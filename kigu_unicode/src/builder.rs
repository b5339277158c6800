//! Growable UTF-8 buffer.

use core::fmt;

use kigu_array::{Allocator, Array, ArrayError, HeapAllocator};

use crate::codec::{decode_utf8, encode_utf8, utf8_continuation_byte};
use crate::error::{fail, UnicodeError};
use crate::owned::{OwnedStr, Str8Buf};
use crate::str8::Str8;

/// Capacity of a builder is always rounded up to a multiple of this many
/// bytes, except right after [`Str8Builder::fit`].
pub const BUILDER_BYTE_ALIGNMENT: usize = 8;

fn round_up(bytes: usize) -> Result<usize, UnicodeError> {
    bytes
        .checked_next_multiple_of(BUILDER_BYTE_ALIGNMENT)
        .ok_or(UnicodeError::Array(ArrayError::CapacityOverflow {
            space: bytes,
            element_size: 1,
        }))
}

/// An expanding UTF-8 byte buffer.
///
/// The capacity always exceeds the length by at least one byte, and every
/// byte past the length is zero, so the content is NUL-terminated at all
/// times.
///
/// ```
/// # use kigu_array::HeapAllocator;
/// # use kigu_unicode::{Str8, Str8Builder};
/// let allocator = HeapAllocator;
/// let mut builder = Str8Builder::new_in(Str8::lit("Hello"), &allocator);
/// assert_eq!(builder.space(), 8);
///
/// builder.append(Str8::lit(", world"));
/// builder.insert_byteoffset(5, Str8::lit(" there"));
/// assert_eq!(builder.peek(), "Hello there, world");
///
/// let text = builder.finish();
/// assert_eq!(text.as_units_with_nul(), b"Hello there, world\0");
/// ```
pub struct Str8Builder<'a, A: Allocator = HeapAllocator> {
    bytes: Array<'a, u8, A>,
}

impl<'a, A: Allocator> Str8Builder<'a, A> {
    /// Creates a builder holding a copy of `initial`.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if the allocation fails.
    pub fn try_new_in(initial: Str8<'_>, allocator: &'a A) -> Result<Self, UnicodeError> {
        let space = round_up(initial.len().saturating_add(1))?;
        let mut bytes = Array::try_new_in(space, allocator)?;
        bytes.try_extend_from_slice(initial.as_bytes())?;
        Ok(Self { bytes })
    }

    /// Creates a builder holding a copy of `initial`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    #[must_use]
    #[track_caller]
    pub fn new_in(initial: Str8<'_>, allocator: &'a A) -> Self {
        Self::try_new_in(initial, allocator).unwrap_or_else(|e| fail(e))
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Allocated bytes, terminator included.
    #[must_use]
    pub fn space(&self) -> usize {
        self.bytes.space()
    }

    #[must_use]
    pub fn allocator(&self) -> &'a A {
        self.bytes.allocator()
    }

    /// The content built so far.
    #[must_use]
    pub fn peek(&self) -> Str8<'_> {
        Str8::new(self.bytes.as_slice())
    }

    /// Makes sure `required` bytes fit, rounding the new capacity up.
    fn try_reserve_total(&mut self, required: usize) -> Result<(), UnicodeError> {
        if required > self.space() {
            self.bytes.try_resize_space(round_up(required)?)?;
        }
        Ok(())
    }

    /// Shrinks the allocation to the length plus the terminator.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if the reallocation fails.
    pub fn try_fit(&mut self) -> Result<(), UnicodeError> {
        self.bytes.try_resize_space(self.len() + 1)?;
        Ok(())
    }

    /// Shrinks the allocation to the length plus the terminator.
    ///
    /// # Panics
    ///
    /// Panics if the reallocation fails.
    #[track_caller]
    pub fn fit(&mut self) {
        self.try_fit().unwrap_or_else(|e| fail(e));
    }

    /// Adds at least `bytes` of capacity, rounded up to
    /// [`BUILDER_BYTE_ALIGNMENT`]. Does nothing for zero.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if the reallocation fails.
    pub fn try_grow(&mut self, bytes: usize) -> Result<(), UnicodeError> {
        if bytes == 0 {
            return Ok(());
        }
        let space = self
            .space()
            .checked_add(bytes)
            .ok_or(ArrayError::CapacityOverflow {
                space: self.space(),
                element_size: 1,
            })?;
        self.bytes.try_resize_space(round_up(space)?)?;
        Ok(())
    }

    /// Adds at least `bytes` of capacity.
    ///
    /// # Panics
    ///
    /// Panics if the reallocation fails.
    #[track_caller]
    pub fn grow(&mut self, bytes: usize) {
        self.try_grow(bytes).unwrap_or_else(|e| fail(e));
    }

    /// Appends `text` to the end.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if growing fails; the content is
    /// unchanged on error.
    pub fn try_append(&mut self, text: Str8<'_>) -> Result<(), UnicodeError> {
        let required = self
            .len()
            .checked_add(text.len())
            .and_then(|len| len.checked_add(1))
            .ok_or(ArrayError::CapacityOverflow {
                space: self.space(),
                element_size: 1,
            })?;
        self.try_reserve_total(required)?;
        self.bytes.try_extend_from_slice(text.as_bytes())?;
        Ok(())
    }

    /// Appends `text` to the end.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn append(&mut self, text: Str8<'_>) {
        self.try_append(text).unwrap_or_else(|e| fail(e));
    }

    /// Appends the UTF-8 encoding of `codepoint`.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::InvalidCodepoint` above U+10FFFF, or
    /// `UnicodeError::Array` if growing fails.
    pub fn try_append_codepoint(&mut self, codepoint: impl Into<u32>) -> Result<(), UnicodeError> {
        let mut encoded = [0u8; 4];
        let advance = encode_utf8(&mut encoded, codepoint.into())?;
        self.try_append(Str8::new(encoded.get(..advance).unwrap_or_default()))
    }

    /// Appends the UTF-8 encoding of `codepoint`.
    ///
    /// # Panics
    ///
    /// Panics if `codepoint` is above U+10FFFF or growing fails.
    #[track_caller]
    pub fn append_codepoint(&mut self, codepoint: impl Into<u32>) {
        self.try_append_codepoint(codepoint).unwrap_or_else(|e| fail(e));
    }

    /// Zeroes the content and empties the builder, keeping its capacity.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Inserts `text` at `byte_offset`.
    ///
    /// Does nothing if `text` is empty or `byte_offset` is past the end. The
    /// offset is not checked against codepoint boundaries.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if growing fails.
    pub fn try_insert_byteoffset(
        &mut self,
        byte_offset: usize,
        text: Str8<'_>,
    ) -> Result<(), UnicodeError> {
        if text.is_empty() || byte_offset > self.len() {
            return Ok(());
        }
        let required = self.len() + text.len() + 1;
        if required > self.space() {
            self.try_grow(required - self.space())?;
        }
        self.bytes.try_insert_slice(byte_offset, text.as_bytes())?;
        Ok(())
    }

    /// Inserts `text` at `byte_offset`.
    ///
    /// # Panics
    ///
    /// Panics if growing fails.
    #[track_caller]
    pub fn insert_byteoffset(&mut self, byte_offset: usize, text: Str8<'_>) {
        self.try_insert_byteoffset(byte_offset, text)
            .unwrap_or_else(|e| fail(e));
    }

    /// Removes the codepoint starting at `byte_offset` and returns how many
    /// bytes it took.
    ///
    /// Returns 0 and leaves the content alone if `byte_offset` is past the
    /// end or lands on a continuation byte.
    pub fn remove_codepoint_at_byteoffset(&mut self, byte_offset: usize) -> usize {
        let Some(rest) = self.bytes.as_slice().get(byte_offset..) else {
            return 0;
        };
        match rest.first() {
            Some(&lead) if !utf8_continuation_byte(lead) => {
                let advance = decode_utf8(rest).advance;
                self.bytes.remove_range(byte_offset..byte_offset + advance);
                advance
            }
            _ => 0,
        }
    }

    /// Replaces every occurrence of `find` with `replace` and returns the
    /// number of replacements.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::InvalidCodepoint` if `replace` is above
    /// U+10FFFF, or `UnicodeError::Array` if growing fails. The space for
    /// every replacement is reserved before the first one is made, so on
    /// error the content is unchanged.
    pub fn try_replace_codepoint(
        &mut self,
        find: impl Into<u32>,
        replace: impl Into<u32>,
    ) -> Result<usize, UnicodeError> {
        let find = find.into();
        let mut encoded = [0u8; 4];
        let width = encode_utf8(&mut encoded, replace.into())?;
        let replacement = encoded.get(..width).unwrap_or_default();

        let grown = self
            .peek()
            .codepoints()
            .filter(|decoded| decoded.codepoint == find)
            .map(|decoded| width.saturating_sub(decoded.advance))
            .sum::<usize>();
        let required = self
            .len()
            .checked_add(grown)
            .and_then(|len| len.checked_add(1))
            .ok_or(ArrayError::CapacityOverflow {
                space: self.space(),
                element_size: 1,
            })?;
        self.try_reserve_total(required)?;

        let mut replaced = 0;
        let mut offset = 0;
        while offset < self.len() {
            let rest = self.bytes.as_slice().get(offset..).unwrap_or_default();
            let decoded = decode_utf8(rest);
            if decoded.codepoint != find {
                offset += decoded.advance;
                continue;
            }
            if decoded.advance == width {
                if let Some(slot) = self.bytes.as_mut_slice().get_mut(offset..offset + width) {
                    slot.copy_from_slice(replacement);
                }
            } else {
                // Fits in the space reserved above
                self.bytes.remove_range(offset..offset + decoded.advance);
                self.bytes.try_insert_slice(offset, replacement)?;
            }
            offset += width;
            replaced += 1;
        }
        Ok(replaced)
    }

    /// Replaces every occurrence of `find` with `replace`.
    ///
    /// # Panics
    ///
    /// Panics if `replace` is above U+10FFFF or growing fails.
    #[track_caller]
    pub fn replace_codepoint(&mut self, find: impl Into<u32>, replace: impl Into<u32>) -> usize {
        self.try_replace_codepoint(find, replace)
            .unwrap_or_else(|e| fail(e))
    }

    /// Fits the buffer and turns it into an owned string.
    ///
    /// # Errors
    ///
    /// Returns `UnicodeError::Array` if the reallocation fails.
    pub fn try_finish(mut self) -> Result<Str8Buf<'a, A>, UnicodeError> {
        self.try_fit()?;
        // The spare byte left by fit becomes the terminator
        self.bytes.try_push_value(0)?;
        Ok(OwnedStr::from_terminated(self.bytes))
    }

    /// Fits the buffer and turns it into an owned string.
    ///
    /// # Panics
    ///
    /// Panics if the reallocation fails.
    #[must_use]
    #[track_caller]
    pub fn finish(self) -> Str8Buf<'a, A> {
        self.try_finish().unwrap_or_else(|e| fail(e))
    }

    /// Releases the buffer through its allocator.
    pub fn deinit(self) {
        self.bytes.deinit();
    }
}

impl<A: Allocator> fmt::Write for Str8Builder<'_, A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_append(Str8::lit(s)).map_err(|_| fmt::Error)
    }
}

impl<A: Allocator> fmt::Display for Str8Builder<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.peek(), f)
    }
}

impl<A: Allocator> fmt::Debug for Str8Builder<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Str8Builder")
            .field("text", &self.peek())
            .field("space", &self.space())
            .finish()
    }
}

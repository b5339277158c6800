//! Allocator-backed strings.
//!
//! Every owned string stores its units followed by one zero unit, so the
//! buffer can be handed to C-style consumers as is. The terminator is never
//! part of the length.

use core::fmt;
use core::ops::Deref;

use kigu_array::{Allocator, Array, HeapAllocator};

use crate::codec::{CodeUnit, WChar};
use crate::error::{fail, UnicodeError};
use crate::iter::Codepoints;
use crate::str8::{write_codepoints, Str8};
use crate::view::{Str16, Str32};

/// A NUL-terminated string of `U` code units owned through an allocator.
pub struct OwnedStr<'a, U: CodeUnit, A: Allocator = HeapAllocator> {
    // Content followed by exactly one zero unit
    units: Array<'a, U, A>,
}

/// Owned UTF-8.
pub type Str8Buf<'a, A = HeapAllocator> = OwnedStr<'a, u8, A>;
/// Owned UTF-16.
pub type Str16Buf<'a, A = HeapAllocator> = OwnedStr<'a, u16, A>;
/// Owned UTF-32.
pub type Str32Buf<'a, A = HeapAllocator> = OwnedStr<'a, u32, A>;
/// Owned wide characters.
pub type WCharBuf<'a, A = HeapAllocator> = OwnedStr<'a, WChar, A>;

impl<'a, U: CodeUnit, A: Allocator> OwnedStr<'a, U, A> {
    /// Takes over `units`, whose last element must be the terminator.
    pub(crate) fn from_terminated(units: Array<'a, U, A>) -> Self {
        debug_assert!(units.last() == Some(&U::zeroed()));
        Self { units }
    }

    /// Copies the units of `parts` one after another into a block of exactly
    /// the needed size plus the terminator.
    pub(crate) fn try_from_parts(parts: &[&[U]], allocator: &'a A) -> Result<Self, UnicodeError> {
        let len = parts
            .iter()
            .try_fold(0usize, |total, part| total.checked_add(part.len()))
            .and_then(|total| total.checked_add(1))
            .ok_or(kigu_array::ArrayError::CapacityOverflow {
                space: usize::MAX,
                element_size: core::mem::size_of::<U>(),
            })?;
        let mut units = Array::<U, A>::try_new_in(len, allocator)?;
        for part in parts {
            units.try_extend_from_slice(part)?;
        }
        units.try_push_value(U::zeroed())?;
        Ok(Self::from_terminated(units))
    }

    /// Length in code units, not counting the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_units(&self) -> &[U] {
        self.units.as_slice().split_last().map_or(&[][..], |(_, content)| content)
    }

    /// The units including the trailing zero unit.
    #[must_use]
    pub fn as_units_with_nul(&self) -> &[U] {
        self.units.as_slice()
    }

    /// Allocated capacity in code units.
    #[must_use]
    pub fn space(&self) -> usize {
        self.units.space()
    }

    #[must_use]
    pub fn allocator(&self) -> &'a A {
        self.units.allocator()
    }

    #[must_use]
    pub fn codepoints(&self) -> Codepoints<'_, U> {
        Codepoints::new(self.as_units())
    }

    /// Number of codepoints.
    #[must_use]
    pub fn length(&self) -> usize {
        self.codepoints().count()
    }

    /// Releases the string through its allocator.
    pub fn deinit(self) {
        self.units.deinit();
    }
}

impl<A: Allocator> OwnedStr<'_, u8, A> {
    #[must_use]
    pub fn as_str8(&self) -> Str8<'_> {
        Str8::new(self.as_units())
    }
}

impl<A: Allocator> OwnedStr<'_, u16, A> {
    #[must_use]
    pub fn as_str16(&self) -> Str16<'_> {
        Str16::new(self.as_units())
    }
}

impl<A: Allocator> OwnedStr<'_, u32, A> {
    #[must_use]
    pub fn as_str32(&self) -> Str32<'_> {
        Str32::new(self.as_units())
    }
}

impl<U: CodeUnit, A: Allocator> Deref for OwnedStr<'_, U, A> {
    type Target = [U];

    fn deref(&self) -> &[U] {
        self.as_units()
    }
}

impl<U: CodeUnit, A: Allocator> fmt::Display for OwnedStr<'_, U, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codepoints(f, self.codepoints())
    }
}

impl<U: CodeUnit, A: Allocator> fmt::Debug for OwnedStr<'_, U, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Copies `text` into new memory from `allocator`.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_copy<'a, A: Allocator>(text: Str8<'_>, allocator: &'a A) -> Result<Str8Buf<'a, A>, UnicodeError> {
    OwnedStr::try_from_parts(&[text.as_bytes()], allocator)
}

/// Copies `text` into new memory from `allocator`.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn copy<'a, A: Allocator>(text: Str8<'_>, allocator: &'a A) -> Str8Buf<'a, A> {
    try_copy(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Allocates `a` followed by `b`.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_concat<'a, A: Allocator>(
    a: Str8<'_>,
    b: Str8<'_>,
    allocator: &'a A,
) -> Result<Str8Buf<'a, A>, UnicodeError> {
    OwnedStr::try_from_parts(&[a.as_bytes(), b.as_bytes()], allocator)
}

/// Allocates `a` followed by `b`.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn concat<'a, A: Allocator>(a: Str8<'_>, b: Str8<'_>, allocator: &'a A) -> Str8Buf<'a, A> {
    try_concat(a, b, allocator).unwrap_or_else(|e| fail(e))
}

/// Allocates `a`, `b` and `c` in order.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_concat3<'a, A: Allocator>(
    a: Str8<'_>,
    b: Str8<'_>,
    c: Str8<'_>,
    allocator: &'a A,
) -> Result<Str8Buf<'a, A>, UnicodeError> {
    OwnedStr::try_from_parts(&[a.as_bytes(), b.as_bytes(), c.as_bytes()], allocator)
}

/// Allocates `a`, `b` and `c` in order.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn concat3<'a, A: Allocator>(
    a: Str8<'_>,
    b: Str8<'_>,
    c: Str8<'_>,
    allocator: &'a A,
) -> Str8Buf<'a, A> {
    try_concat3(a, b, c, allocator).unwrap_or_else(|e| fail(e))
}

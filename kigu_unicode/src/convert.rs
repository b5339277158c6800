//! Whole-string conversions between encodings.
//!
//! Each conversion reserves the worst-case output size up front, transcodes
//! one codepoint at a time, appends the terminator and then shrinks the
//! block to the exact size. Malformed source sequences and unencodable
//! values are written as U+FFFD.

use kigu_array::{Allocator, Array};

use crate::codec::{CodeUnit, WChar, REPLACEMENT_CODEPOINT, WIDE_CHAR_IS_UTF16};
use crate::error::{fail, UnicodeError};
use crate::owned::{OwnedStr, Str16Buf, Str32Buf, Str8Buf, WCharBuf};
use crate::str8::Str8;
use crate::view::{wchar_until_nul, Str16, Str32};

// Output units reserved per source unit. A UTF-16 unit yields at most three
// UTF-8 bytes on its own; a surrogate pair yields four from two units.
const UTF8_PER_UTF16: usize = 3;
const UTF8_PER_UTF32: usize = 4;
const UTF16_PER_UTF8: usize = 2;
const UTF32_PER_UTF8: usize = 1;

fn try_transcode<'a, S: CodeUnit, D: CodeUnit, A: Allocator>(
    source: &[S],
    per_unit: usize,
    allocator: &'a A,
) -> Result<OwnedStr<'a, D, A>, UnicodeError> {
    let space = source
        .len()
        .checked_mul(per_unit)
        .and_then(|units| units.checked_add(1))
        .ok_or(kigu_array::ArrayError::CapacityOverflow {
            space: usize::MAX,
            element_size: core::mem::size_of::<D>(),
        })?;
    let mut units = Array::<D, A>::try_new_in(space, allocator)?;

    let mut rest = source;
    let mut scratch = [D::zeroed(); 4];
    while !rest.is_empty() {
        let decoded = S::decode(rest);
        rest = rest.get(decoded.advance..).unwrap_or_default();
        let written = D::encode(&mut scratch, decoded.codepoint)
            .or_else(|_| D::encode(&mut scratch, REPLACEMENT_CODEPOINT))?;
        units.try_extend_from_slice(scratch.get(..written).unwrap_or_default())?;
    }

    units.try_push_value(D::zeroed())?;
    units.try_resize_space(units.len())?;
    Ok(OwnedStr::from_terminated(units))
}

/// Converts UTF-16 to UTF-8.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_str8_from_str16<'a, A: Allocator>(
    text: Str16<'_>,
    allocator: &'a A,
) -> Result<Str8Buf<'a, A>, UnicodeError> {
    try_transcode(text.as_units(), UTF8_PER_UTF16, allocator)
}

/// Converts UTF-16 to UTF-8.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn str8_from_str16<'a, A: Allocator>(text: Str16<'_>, allocator: &'a A) -> Str8Buf<'a, A> {
    try_str8_from_str16(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Converts UTF-32 to UTF-8.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_str8_from_str32<'a, A: Allocator>(
    text: Str32<'_>,
    allocator: &'a A,
) -> Result<Str8Buf<'a, A>, UnicodeError> {
    try_transcode(text.as_units(), UTF8_PER_UTF32, allocator)
}

/// Converts UTF-32 to UTF-8.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn str8_from_str32<'a, A: Allocator>(text: Str32<'_>, allocator: &'a A) -> Str8Buf<'a, A> {
    try_str8_from_str32(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Converts a NUL-terminated wide string to UTF-8. Conversion stops at the
/// first NUL, or at the end of `text` if it has none.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_str8_from_wchar<'a, A: Allocator>(
    text: &[WChar],
    allocator: &'a A,
) -> Result<Str8Buf<'a, A>, UnicodeError> {
    let per_unit = if WIDE_CHAR_IS_UTF16 {
        UTF8_PER_UTF16
    } else {
        UTF8_PER_UTF32
    };
    try_transcode(wchar_until_nul(text), per_unit, allocator)
}

/// Converts a NUL-terminated wide string to UTF-8.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn str8_from_wchar<'a, A: Allocator>(text: &[WChar], allocator: &'a A) -> Str8Buf<'a, A> {
    try_str8_from_wchar(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Converts UTF-8 to UTF-16.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_str16_from_str8<'a, A: Allocator>(
    text: Str8<'_>,
    allocator: &'a A,
) -> Result<Str16Buf<'a, A>, UnicodeError> {
    try_transcode(text.as_bytes(), UTF16_PER_UTF8, allocator)
}

/// Converts UTF-8 to UTF-16.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn str16_from_str8<'a, A: Allocator>(text: Str8<'_>, allocator: &'a A) -> Str16Buf<'a, A> {
    try_str16_from_str8(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Converts UTF-8 to UTF-32.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_str32_from_str8<'a, A: Allocator>(
    text: Str8<'_>,
    allocator: &'a A,
) -> Result<Str32Buf<'a, A>, UnicodeError> {
    try_transcode(text.as_bytes(), UTF32_PER_UTF8, allocator)
}

/// Converts UTF-8 to UTF-32.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn str32_from_str8<'a, A: Allocator>(text: Str8<'_>, allocator: &'a A) -> Str32Buf<'a, A> {
    try_str32_from_str8(text, allocator).unwrap_or_else(|e| fail(e))
}

/// Converts UTF-8 to wide characters.
///
/// # Errors
///
/// Returns `UnicodeError::Array` if the allocation fails.
pub fn try_wchar_from_str8<'a, A: Allocator>(
    text: Str8<'_>,
    allocator: &'a A,
) -> Result<WCharBuf<'a, A>, UnicodeError> {
    let per_unit = if WIDE_CHAR_IS_UTF16 {
        UTF16_PER_UTF8
    } else {
        UTF32_PER_UTF8
    };
    try_transcode(text.as_bytes(), per_unit, allocator)
}

/// Converts UTF-8 to wide characters.
///
/// # Panics
///
/// Panics if the allocation fails.
#[must_use]
#[track_caller]
pub fn wchar_from_str8<'a, A: Allocator>(text: Str8<'_>, allocator: &'a A) -> WCharBuf<'a, A> {
    try_wchar_from_str8(text, allocator).unwrap_or_else(|e| fail(e))
}

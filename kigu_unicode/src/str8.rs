//! Borrowed UTF-8 views and their codepoint-wise operations.
//!
//! A [`Str8`] never owns or mutates its bytes. Advancing moves the view
//! forward in place; eating returns a prefix and skipping returns a suffix
//! of the same memory.
//!
//! Eat and skip with a stopping condition partition the view: for any
//! condition, `eat_*` followed by the matching `skip_*` reconstructs the
//! original bytes. When the condition never holds, `eat_*` returns the whole
//! view and `skip_*` returns an empty view at its end.

use core::ffi::CStr;
use core::fmt;

use crate::class::{is_alnum, is_digit, is_whitespace};
use crate::codec::{decode_utf8, utf8_continuation_byte, DecodedCodepoint};
use crate::hash;
use crate::iter::Codepoints;

/// A borrowed run of UTF-8 bytes.
///
/// The bytes need not be well formed; malformed bytes are walked one at a
/// time as invalid codepoints.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Str8<'a> {
    bytes: &'a [u8],
}

impl<'a> Str8<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Views a Rust string literal or slice.
    #[must_use]
    pub const fn lit(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
        }
    }

    /// Views the bytes of a C string up to, not including, its NUL.
    #[must_use]
    pub fn from_cstr(text: &'a CStr) -> Self {
        Self {
            bytes: text.to_bytes(),
        }
    }

    #[must_use]
    pub const fn as_bytes(self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if the view is non-empty and does not start with NUL.
    #[must_use]
    pub fn valid(self) -> bool {
        self.bytes.first().is_some_and(|&byte| byte != 0)
    }

    #[must_use]
    pub fn codepoints(self) -> Codepoints<'a, u8> {
        Codepoints::new(self.bytes)
    }

    fn prefix(self, bytes: usize) -> Self {
        Self::new(self.bytes.get(..bytes).unwrap_or(self.bytes))
    }

    fn suffix(self, offset: usize) -> Self {
        Self::new(self.bytes.get(offset..).unwrap_or_default())
    }

    /// Byte offset of the first codepoint satisfying `stop`, or the length
    /// of the view when none does.
    fn offset_of(self, mut stop: impl FnMut(u32) -> bool) -> usize {
        let mut codepoints = self.codepoints();
        loop {
            let offset = codepoints.offset();
            match codepoints.next() {
                Some(decoded) if !stop(decoded.codepoint) => {}
                _ => return offset,
            }
        }
    }

    /// Byte offset of the last codepoint satisfying `stop`.
    fn last_offset_of(self, mut stop: impl FnMut(u32) -> bool) -> Option<usize> {
        let mut codepoints = self.codepoints();
        let mut found = None;
        loop {
            let offset = codepoints.offset();
            match codepoints.next() {
                Some(decoded) => {
                    if stop(decoded.codepoint) {
                        found = Some(offset);
                    }
                }
                None => return found,
            }
        }
    }

    // @advancing

    /// Drops `bytes` bytes from the front.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` exceeds the length of the view.
    #[track_caller]
    pub fn increment(&mut self, bytes: usize) {
        match self.bytes.get(bytes..) {
            Some(rest) => self.bytes = rest,
            None => panic!(
                "Cannot increment by {bytes} bytes: view has only {} bytes",
                self.bytes.len()
            ),
        }
    }

    /// Decodes the first codepoint and drops it from the view.
    ///
    /// Returns [`DecodedCodepoint::END`] on an empty view.
    pub fn advance(&mut self) -> DecodedCodepoint {
        let decoded = decode_utf8(self.bytes);
        *self = self.suffix(decoded.advance);
        decoded
    }

    /// Advances up to `n` codepoints and returns the last one decoded.
    pub fn nadvance(&mut self, n: usize) -> DecodedCodepoint {
        let mut decoded = DecodedCodepoint::END;
        for _ in 0..n {
            if self.is_empty() {
                break;
            }
            decoded = self.advance();
        }
        decoded
    }

    /// Advances until the first codepoint is `codepoint`, leaving it in the
    /// view.
    pub fn advance_until(&mut self, codepoint: impl Into<u32>) {
        *self = self.skip_until(codepoint);
    }

    /// Advances past a run of `codepoint`.
    pub fn advance_while(&mut self, codepoint: impl Into<u32>) {
        *self = self.skip_while(codepoint);
    }

    // @indexing

    /// Returns the `n`th codepoint counting from zero, or the last codepoint
    /// if the view is shorter.
    #[must_use]
    pub fn index(self, n: usize) -> DecodedCodepoint {
        let mut view = self;
        view.nadvance(n.saturating_add(1))
    }

    /// Number of codepoints. Every malformed byte counts as one.
    #[must_use]
    pub fn length(self) -> usize {
        self.codepoints().count()
    }

    // @comparison

    /// Compares codepoint by codepoint.
    ///
    /// Returns the difference of the first mismatching codepoints, where an
    /// exhausted view reads as codepoint zero, or 0 if both views hold the
    /// same codepoints.
    #[must_use]
    pub fn compare(self, other: Str8<'_>) -> i64 {
        self.ncompare(other, usize::MAX)
    }

    /// Compares at most `n` codepoints.
    #[must_use]
    pub fn ncompare(self, other: Str8<'_>, n: usize) -> i64 {
        if core::ptr::eq(self.bytes, other.bytes) {
            return 0;
        }
        let (mut a, mut b) = (self, other);
        for _ in 0..n {
            if a.is_empty() && b.is_empty() {
                break;
            }
            let diff = i64::from(a.advance().codepoint) - i64::from(b.advance().codepoint);
            if diff != 0 {
                return diff;
            }
        }
        0
    }

    #[must_use]
    pub fn equal(self, other: Str8<'_>) -> bool {
        self.len() == other.len() && self.compare(other) == 0
    }

    /// Byte-wise equality. Matches [`Str8::equal`] for well-formed input.
    #[must_use]
    pub fn equal_lazy(self, other: Str8<'_>) -> bool {
        self.bytes == other.bytes
    }

    /// Returns true if the first `n` codepoints are equal.
    #[must_use]
    pub fn nequal(self, other: Str8<'_>, n: usize) -> bool {
        self.ncompare(other, n) == 0
    }

    // @searching

    #[must_use]
    pub fn begins_with(self, prefix: Str8<'_>) -> bool {
        self.len() >= prefix.len() && self.ncompare(prefix, prefix.length()) == 0
    }

    #[must_use]
    pub fn ends_with(self, ending: Str8<'_>) -> bool {
        self.len() >= ending.len() && self.suffix(self.len() - ending.len()).compare(ending) == 0
    }

    /// Codepoint-wise substring test. Every view contains the empty view.
    #[must_use]
    pub fn contains(self, needle: Str8<'_>) -> bool {
        let needle_length = needle.length();
        let mut rest = self;
        loop {
            if needle.len() > rest.len() {
                return false;
            }
            if rest.nequal(needle, needle_length) {
                return true;
            }
            rest.advance();
        }
    }

    /// Byte offset of the first occurrence of `codepoint`.
    #[must_use]
    pub fn find_first(self, codepoint: impl Into<u32>) -> Option<usize> {
        let codepoint = codepoint.into();
        let offset = self.offset_of(|c| c == codepoint);
        (offset < self.len()).then_some(offset)
    }

    /// Byte offset of the last occurrence of `codepoint`.
    ///
    /// Walks backward from the end, stepping over continuation bytes to the
    /// lead byte of each codepoint.
    #[must_use]
    pub fn find_last(self, codepoint: impl Into<u32>) -> Option<usize> {
        let codepoint = codepoint.into();
        let mut end = self.len();
        while end > 0 {
            let mut start = end - 1;
            while start > 0 && self.bytes.get(start).is_some_and(|&b| utf8_continuation_byte(b)) {
                start -= 1;
            }
            let candidate = self.bytes.get(start..end).unwrap_or_default();
            if decode_utf8(candidate).codepoint == codepoint {
                return Some(start);
            }
            end = start;
        }
        None
    }

    // @slicing

    /// The first codepoint.
    #[must_use]
    pub fn eat_one(self) -> Self {
        self.eat_count(1)
    }

    /// The first `n` codepoints, or the whole view if it is shorter.
    #[must_use]
    pub fn eat_count(self, n: usize) -> Self {
        self.prefix(self.len() - self.skip_count(n).len())
    }

    /// Everything before the first `codepoint`.
    #[must_use]
    pub fn eat_until(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        self.prefix(self.offset_of(|c| c == codepoint))
    }

    /// Everything before the last `codepoint`.
    #[must_use]
    pub fn eat_until_last(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        match self.last_offset_of(|c| c == codepoint) {
            Some(offset) => self.prefix(offset),
            None => self,
        }
    }

    /// Everything before the first codepoint found in `set`.
    #[must_use]
    pub fn eat_until_one_of<C: Copy + Into<u32>>(self, set: &[C]) -> Self {
        self.prefix(self.offset_of(|c| set.iter().any(|&s| Into::<u32>::into(s) == c)))
    }

    /// Everything before the first occurrence of `needle`.
    #[must_use]
    pub fn eat_until_str(self, needle: Str8<'_>) -> Self {
        self.prefix(self.len() - self.skip_until_str(needle).len())
    }

    /// The leading run of `codepoint`.
    #[must_use]
    pub fn eat_while(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        self.prefix(self.offset_of(|c| c != codepoint))
    }

    /// The leading run of whitespace, see [`is_whitespace`].
    #[must_use]
    pub fn eat_whitespace(self) -> Self {
        self.prefix(self.offset_of(|c| !is_whitespace(c)))
    }

    /// The leading run of ASCII letters and digits, and of underscores when
    /// `include_underscore` is set.
    #[must_use]
    pub fn eat_word(self, include_underscore: bool) -> Self {
        self.prefix(self.offset_of(|c| !is_word(c, include_underscore)))
    }

    /// The leading run of ASCII digits.
    #[must_use]
    pub fn eat_int(self) -> Self {
        self.prefix(self.offset_of(|c| !is_digit(c)))
    }

    /// Everything after the first codepoint.
    #[must_use]
    pub fn skip_one(self) -> Self {
        self.skip_count(1)
    }

    /// Everything after the first `n` codepoints.
    #[must_use]
    pub fn skip_count(self, n: usize) -> Self {
        let mut rest = self;
        rest.nadvance(n);
        rest
    }

    /// From the first `codepoint` on.
    #[must_use]
    pub fn skip_until(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        self.suffix(self.offset_of(|c| c == codepoint))
    }

    /// From the last `codepoint` on.
    #[must_use]
    pub fn skip_until_last(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        match self.last_offset_of(|c| c == codepoint) {
            Some(offset) => self.suffix(offset),
            None => self.suffix(self.len()),
        }
    }

    /// From the first codepoint found in `set` on.
    #[must_use]
    pub fn skip_until_one_of<C: Copy + Into<u32>>(self, set: &[C]) -> Self {
        self.suffix(self.offset_of(|c| set.iter().any(|&s| Into::<u32>::into(s) == c)))
    }

    /// From the first occurrence of `needle` on.
    #[must_use]
    pub fn skip_until_str(self, needle: Str8<'_>) -> Self {
        let mut rest = self;
        while !rest.is_empty() && !rest.begins_with(needle) {
            rest.advance();
        }
        rest
    }

    /// Everything after the leading run of `codepoint`.
    #[must_use]
    pub fn skip_while(self, codepoint: impl Into<u32>) -> Self {
        let codepoint = codepoint.into();
        self.suffix(self.offset_of(|c| c != codepoint))
    }

    #[must_use]
    pub fn skip_whitespace(self) -> Self {
        self.suffix(self.offset_of(|c| !is_whitespace(c)))
    }

    #[must_use]
    pub fn skip_word(self, include_underscore: bool) -> Self {
        self.suffix(self.offset_of(|c| !is_word(c, include_underscore)))
    }

    #[must_use]
    pub fn skip_int(self) -> Self {
        self.suffix(self.offset_of(|c| !is_digit(c)))
    }

    // @hashing

    /// 32-bit FNV-1a of the bytes.
    #[must_use]
    pub const fn hash32(self) -> u32 {
        hash::hash32(self.bytes)
    }

    /// 64-bit FNV-1a of the bytes.
    #[must_use]
    pub const fn hash64(self) -> u64 {
        hash::hash64(self.bytes)
    }
}

fn is_word(codepoint: u32, include_underscore: bool) -> bool {
    is_alnum(codepoint) || (include_underscore && codepoint == u32::from(b'_'))
}

impl<'a> From<&'a str> for Str8<'a> {
    fn from(text: &'a str) -> Self {
        Self::lit(text)
    }
}

impl<'a> From<&'a [u8]> for Str8<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl PartialEq<str> for Str8<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Str8<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Display for Str8<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codepoints(f, self.codepoints())
    }
}

impl fmt::Debug for Str8<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Writes decoded codepoints, malformed ones as U+FFFD.
pub(crate) fn write_codepoints<U: crate::codec::CodeUnit>(
    f: &mut fmt::Formatter<'_>,
    codepoints: Codepoints<'_, U>,
) -> fmt::Result {
    use fmt::Write;
    for decoded in codepoints {
        f.write_char(char::from_u32(decoded.codepoint).unwrap_or(char::REPLACEMENT_CHARACTER))?;
    }
    Ok(())
}

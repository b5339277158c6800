use core::fmt;

use crate::codec::WChar;
use crate::iter::Codepoints;
use crate::str8::write_codepoints;

/// A borrowed run of UTF-16 units.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Str16<'a> {
    units: &'a [u16],
}

impl<'a> Str16<'a> {
    #[must_use]
    pub const fn new(units: &'a [u16]) -> Self {
        Self { units }
    }

    #[must_use]
    pub const fn as_units(self) -> &'a [u16] {
        self.units
    }

    /// Length in 16-bit units.
    #[must_use]
    pub const fn len(self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn codepoints(self) -> Codepoints<'a, u16> {
        Codepoints::new(self.units)
    }

    /// Number of codepoints; a surrogate pair counts once.
    #[must_use]
    pub fn length(self) -> usize {
        self.codepoints().count()
    }
}

/// A borrowed run of UTF-32 units, one codepoint each.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Str32<'a> {
    units: &'a [u32],
}

impl<'a> Str32<'a> {
    #[must_use]
    pub const fn new(units: &'a [u32]) -> Self {
        Self { units }
    }

    #[must_use]
    pub const fn as_units(self) -> &'a [u32] {
        self.units
    }

    /// Length in codepoints.
    #[must_use]
    pub const fn len(self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn codepoints(self) -> Codepoints<'a, u32> {
        Codepoints::new(self.units)
    }
}

/// Units of a NUL-terminated wide string, up to but not including the
/// first NUL. Returns all of `units` if none is present.
#[must_use]
pub fn wchar_until_nul(units: &[WChar]) -> &[WChar] {
    let end = units.iter().position(|&unit| unit == 0).unwrap_or(units.len());
    units.get(..end).unwrap_or(units)
}

impl fmt::Display for Str16<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codepoints(f, self.codepoints())
    }
}

impl fmt::Debug for Str16<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u\"{self}\"")
    }
}

impl fmt::Display for Str32<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codepoints(f, self.codepoints())
    }
}

impl fmt::Debug for Str32<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U\"{self}\"")
    }
}

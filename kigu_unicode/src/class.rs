//! Codepoint classes used by the word, integer and whitespace slicers.

/// Returns true for every codepoint with the Unicode `White_Space` property.
#[must_use]
pub const fn is_whitespace(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x09..=0x0D
            | 0x20
            | 0x85
            | 0xA0
            | 0x1680
            | 0x2000..=0x200A
            | 0x2028
            | 0x2029
            | 0x202F
            | 0x205F
            | 0x3000
    )
}

/// ASCII letters and digits only.
#[must_use]
pub const fn is_alnum(codepoint: u32) -> bool {
    matches!(codepoint, 0x30..=0x39 | 0x41..=0x5A | 0x61..=0x7A)
}

/// ASCII digits only.
#[must_use]
pub const fn is_digit(codepoint: u32) -> bool {
    matches!(codepoint, 0x30..=0x39)
}

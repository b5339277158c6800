//! Single-codepoint decoding and encoding.
//!
//! Decoders never fail outright: a malformed unit decodes to
//! [`INVALID_CODEPOINT`] with an advance of one, so a caller walking a buffer
//! always makes forward progress. Decoding an empty buffer yields
//! [`DecodedCodepoint::END`].

use bytemuck::Pod;

use crate::error::UnicodeError;

/// Highest Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Codepoint reported for a unit that does not start a well-formed sequence.
pub const INVALID_CODEPOINT: u32 = u32::MAX;

/// U+FFFD, written by the bulk conversions in place of malformed input.
pub const REPLACEMENT_CODEPOINT: u32 = 0xFFFD;

/// Wide character unit, 16-bit UTF-16 with the `wchar16` feature and
/// 32-bit codepoints otherwise.
#[cfg(feature = "wchar16")]
pub type WChar = u16;

/// Wide character unit, 16-bit UTF-16 with the `wchar16` feature and
/// 32-bit codepoints otherwise.
#[cfg(not(feature = "wchar16"))]
pub type WChar = u32;

/// True when [`WChar`] holds UTF-16 units.
pub const WIDE_CHAR_IS_UTF16: bool = cfg!(feature = "wchar16");

// Class of a UTF-8 byte, indexed by `byte >> 3`:
// 0 continuation, 1 ASCII, 2..=4 lead of a sequence of that length, 5 never valid
const UTF8_CLASS: [u8; 32] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 3, 3, 4, 5,
];

/// One codepoint and the number of code units it occupied in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecodedCodepoint {
    pub codepoint: u32,
    pub advance: usize,
}

impl DecodedCodepoint {
    /// Result of decoding an empty buffer.
    pub const END: Self = Self {
        codepoint: 0,
        advance: 0,
    };

    const INVALID_UNIT: Self = Self {
        codepoint: INVALID_CODEPOINT,
        advance: 1,
    };

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.codepoint != INVALID_CODEPOINT
    }
}

/// Returns true if `byte` has the `10xxxxxx` form of a UTF-8 continuation.
#[must_use]
pub const fn utf8_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the codepoint at the start of `bytes`.
///
/// The length of `bytes` bounds how many continuation bytes may be read. A
/// lead byte whose sequence does not fit, or whose continuation bytes are
/// malformed, decodes as `{INVALID_CODEPOINT, 1}`.
#[must_use]
#[allow(clippy::indexing_slicing)] // `lead >> 3` is below 32
pub fn decode_utf8(bytes: &[u8]) -> DecodedCodepoint {
    let Some(&lead) = bytes.first() else {
        return DecodedCodepoint::END;
    };
    let advance = match UTF8_CLASS[usize::from(lead >> 3)] {
        1 => {
            return DecodedCodepoint {
                codepoint: u32::from(lead),
                advance: 1,
            }
        }
        class @ 2..=4 => usize::from(class),
        _ => return DecodedCodepoint::INVALID_UNIT,
    };
    let Some(tail) = bytes.get(1..advance) else {
        return DecodedCodepoint::INVALID_UNIT;
    };
    if !tail.iter().all(|&byte| utf8_continuation_byte(byte)) {
        return DecodedCodepoint::INVALID_UNIT;
    }

    let payload = u32::from(lead) & (0x7F >> advance);
    let codepoint = tail
        .iter()
        .fold(payload, |acc, &byte| (acc << 6) | u32::from(byte & 0x3F));
    DecodedCodepoint { codepoint, advance }
}

/// Decodes the codepoint at the start of `units`.
///
/// A high surrogate followed by a low surrogate combines into one codepoint
/// with an advance of two. Any other unit, lone surrogates included, is
/// returned as is with an advance of one.
#[must_use]
pub fn decode_utf16(units: &[u16]) -> DecodedCodepoint {
    match *units {
        [] => DecodedCodepoint::END,
        [high @ 0xD800..=0xDBFF, low @ 0xDC00..=0xDFFF, ..] => DecodedCodepoint {
            codepoint: (((u32::from(high) - 0xD800) << 10) | (u32::from(low) - 0xDC00)) + 0x10000,
            advance: 2,
        },
        [unit, ..] => DecodedCodepoint {
            codepoint: u32::from(unit),
            advance: 1,
        },
    }
}

/// Decodes the first UTF-32 unit of `units`. Values above
/// [`MAX_CODEPOINT`] decode as invalid.
#[must_use]
pub fn decode_utf32(units: &[u32]) -> DecodedCodepoint {
    match units.first() {
        None => DecodedCodepoint::END,
        Some(&unit) if unit > MAX_CODEPOINT => DecodedCodepoint::INVALID_UNIT,
        Some(&unit) => DecodedCodepoint {
            codepoint: unit,
            advance: 1,
        },
    }
}

/// Decodes the codepoint at the start of a wide character buffer.
#[must_use]
pub fn decode_wchar(units: &[WChar]) -> DecodedCodepoint {
    WChar::decode(units)
}

/// Number of bytes `codepoint` takes in UTF-8, `None` above U+10FFFF.
#[must_use]
pub const fn utf8_len(codepoint: u32) -> Option<usize> {
    match codepoint {
        0..=0x7F => Some(1),
        0x80..=0x7FF => Some(2),
        0x800..=0xFFFF => Some(3),
        0x10000..=MAX_CODEPOINT => Some(4),
        _ => None,
    }
}

/// Number of 16-bit units `codepoint` takes in UTF-16, `None` above U+10FFFF.
#[must_use]
pub const fn utf16_len(codepoint: u32) -> Option<usize> {
    match codepoint {
        0..=0xFFFF => Some(1),
        0x10000..=MAX_CODEPOINT => Some(2),
        _ => None,
    }
}

/// Number of wide characters `codepoint` takes, `None` above U+10FFFF.
#[must_use]
pub fn wchar_len(codepoint: u32) -> Option<usize> {
    WChar::encoded_len(codepoint)
}

fn output<T>(out: &mut [T], required: usize) -> Result<&mut [T], UnicodeError> {
    let provided = out.len();
    out.get_mut(..required)
        .ok_or(UnicodeError::BufferTooSmall { required, provided })
}

/// Writes the UTF-8 encoding of `codepoint` to the start of `out` and
/// returns the number of bytes written.
///
/// # Errors
///
/// Returns `UnicodeError::InvalidCodepoint` above U+10FFFF and
/// `UnicodeError::BufferTooSmall` if `out` is shorter than the encoding.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_utf8(out: &mut [u8], codepoint: u32) -> Result<usize, UnicodeError> {
    let advance = utf8_len(codepoint).ok_or(UnicodeError::InvalidCodepoint { codepoint })?;
    let out = output(out, advance)?;

    let continuation = |shift: u32| 0x80 | ((codepoint >> shift) & 0x3F) as u8;
    let encoded: [u8; 4] = match advance {
        1 => [codepoint as u8, 0, 0, 0],
        2 => [0xC0 | (codepoint >> 6) as u8, continuation(0), 0, 0],
        3 => [
            0xE0 | (codepoint >> 12) as u8,
            continuation(6),
            continuation(0),
            0,
        ],
        _ => [
            0xF0 | (codepoint >> 18) as u8,
            continuation(12),
            continuation(6),
            continuation(0),
        ],
    };
    out.copy_from_slice(encoded.get(..advance).unwrap_or_default());
    Ok(advance)
}

/// Writes the UTF-16 encoding of `codepoint` to the start of `out` and
/// returns the number of units written. Codepoints above U+FFFF become a
/// surrogate pair.
///
/// # Errors
///
/// Returns `UnicodeError::InvalidCodepoint` above U+10FFFF and
/// `UnicodeError::BufferTooSmall` if `out` is shorter than the encoding.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_utf16(out: &mut [u16], codepoint: u32) -> Result<usize, UnicodeError> {
    let advance = utf16_len(codepoint).ok_or(UnicodeError::InvalidCodepoint { codepoint })?;
    match output(out, advance)? {
        [unit] => *unit = codepoint as u16,
        [high, low] => {
            let offset = codepoint - 0x10000;
            *high = 0xD800 + (offset >> 10) as u16;
            *low = 0xDC00 + (offset & 0x3FF) as u16;
        }
        _ => {}
    }
    Ok(advance)
}

/// Writes `codepoint` as a single UTF-32 unit.
///
/// # Errors
///
/// Returns `UnicodeError::InvalidCodepoint` above U+10FFFF and
/// `UnicodeError::BufferTooSmall` if `out` is empty.
pub fn encode_utf32(out: &mut [u32], codepoint: u32) -> Result<usize, UnicodeError> {
    if codepoint > MAX_CODEPOINT {
        return Err(UnicodeError::InvalidCodepoint { codepoint });
    }
    output(out, 1)?.copy_from_slice(&[codepoint]);
    Ok(1)
}

/// Writes `codepoint` as wide characters.
///
/// # Errors
///
/// Same as [`encode_utf16`] or [`encode_utf32`], depending on [`WChar`].
pub fn encode_wchar(out: &mut [WChar], codepoint: u32) -> Result<usize, UnicodeError> {
    WChar::encode(out, codepoint)
}

/// A fixed-width code unit of one of the supported encodings.
///
/// `u8` is UTF-8, `u16` is UTF-16 and `u32` is UTF-32.
pub trait CodeUnit: Pod + Eq {
    /// Most units a single codepoint can occupy.
    const MAX_ADVANCE: usize;

    fn decode(units: &[Self]) -> DecodedCodepoint;

    /// # Errors
    ///
    /// See the encoding's `encode_*` function.
    fn encode(out: &mut [Self], codepoint: u32) -> Result<usize, UnicodeError>;

    fn encoded_len(codepoint: u32) -> Option<usize>;
}

impl CodeUnit for u8 {
    const MAX_ADVANCE: usize = 4;

    fn decode(units: &[Self]) -> DecodedCodepoint {
        decode_utf8(units)
    }

    fn encode(out: &mut [Self], codepoint: u32) -> Result<usize, UnicodeError> {
        encode_utf8(out, codepoint)
    }

    fn encoded_len(codepoint: u32) -> Option<usize> {
        utf8_len(codepoint)
    }
}

impl CodeUnit for u16 {
    const MAX_ADVANCE: usize = 2;

    fn decode(units: &[Self]) -> DecodedCodepoint {
        decode_utf16(units)
    }

    fn encode(out: &mut [Self], codepoint: u32) -> Result<usize, UnicodeError> {
        encode_utf16(out, codepoint)
    }

    fn encoded_len(codepoint: u32) -> Option<usize> {
        utf16_len(codepoint)
    }
}

impl CodeUnit for u32 {
    const MAX_ADVANCE: usize = 1;

    fn decode(units: &[Self]) -> DecodedCodepoint {
        decode_utf32(units)
    }

    fn encode(out: &mut [Self], codepoint: u32) -> Result<usize, UnicodeError> {
        encode_utf32(out, codepoint)
    }

    fn encoded_len(codepoint: u32) -> Option<usize> {
        (codepoint <= MAX_CODEPOINT).then_some(1)
    }
}

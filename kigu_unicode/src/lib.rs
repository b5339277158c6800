#![no_std]

//! `kigu_unicode`: codepoint-level text handling on top of `kigu_array`.
//!
//! The crate has four layers:
//! - a codec decoding and encoding single codepoints in UTF-8, UTF-16,
//!   UTF-32 and the platform wide character, see [`decode_utf8`] and
//!   [`encode_utf8`];
//! - [`Str8`], a borrowed UTF-8 view with codepoint-wise comparison,
//!   searching and slicing;
//! - owned, NUL-terminated strings ([`Str8Buf`], [`Str16Buf`], ...) and
//!   whole-string conversions between encodings;
//! - [`Str8Builder`], a growable UTF-8 buffer.
//!
//! Nothing here requires well-formed input. Malformed units decode as
//! [`INVALID_CODEPOINT`] with an advance of one, so every walk makes
//! progress, and conversions write U+FFFD in their place.
//!
//! # Slicing
//!
//! Slicing never copies. `eat_*` returns a prefix of the view and `skip_*`
//! the rest:
//!
//! ```
//! # use kigu_unicode::Str8;
//! let line = Str8::lit("  width = 640 px");
//!
//! let rest = line.skip_whitespace();
//! let key = rest.eat_word(true);
//! let rest = rest.skip_word(true).skip_whitespace().skip_one().skip_whitespace();
//! let value = rest.eat_int();
//!
//! assert_eq!(key, "width");
//! assert_eq!(value, "640");
//! assert_eq!(rest.skip_int().skip_whitespace(), "px");
//! ```
//!
//! Offsets are bytes, lengths and indices are codepoints:
//!
//! ```
//! # use kigu_unicode::Str8;
//! let text = Str8::lit("Ж/Ж");
//! assert_eq!(text.len(), 5);
//! assert_eq!(text.length(), 3);
//! assert_eq!(text.find_first('Ж'), Some(0));
//! assert_eq!(text.find_last('Ж'), Some(3));
//! assert_eq!(text.index(1).codepoint, u32::from('/'));
//! ```
//!
//! # Owned strings
//!
//! Owned strings come from an [`Allocator`](kigu_array::Allocator) and
//! always carry one trailing zero unit that is not part of their length.
//!
//! ```
//! # use kigu_array::HeapAllocator;
//! # use kigu_unicode::{concat, str16_from_str8, str8_from_str16, Str8};
//! let allocator = HeapAllocator;
//!
//! let joined = concat(Str8::lit("🍌"), Str8::lit("s"), &allocator);
//! assert_eq!(joined.len(), 5);
//! assert_eq!(joined.as_units_with_nul().last(), Some(&0));
//!
//! let wide = str16_from_str8(joined.as_str8(), &allocator);
//! assert_eq!(wide.as_units(), &[0xD83C, 0xDF4C, 0x73]);
//!
//! let back = str8_from_str16(wide.as_str16(), &allocator);
//! assert_eq!(back.as_str8(), "🍌s");
//! ```
//!
//! # Errors
//!
//! Fallible operations come in pairs: the plain form panics, the `try_*`
//! form returns a [`UnicodeError`].
//!
//! ```
//! # use kigu_unicode::{encode_utf8, UnicodeError};
//! let mut out = [0u8; 2];
//! assert_eq!(encode_utf8(&mut out, 0x416), Ok(2));
//! assert_eq!(
//!     encode_utf8(&mut out, 0x1F34C),
//!     Err(UnicodeError::BufferTooSmall { required: 4, provided: 2 })
//! );
//! ```

mod builder;
mod class;
mod codec;
mod convert;
mod error;
mod hash;
mod iter;
mod owned;
mod str8;
mod view;

// Re-export public types and traits
pub use builder::{Str8Builder, BUILDER_BYTE_ALIGNMENT};
pub use class::{is_alnum, is_digit, is_whitespace};
pub use codec::{
    decode_utf16, decode_utf32, decode_utf8, decode_wchar, encode_utf16, encode_utf32,
    encode_utf8, encode_wchar, utf16_len, utf8_continuation_byte, utf8_len, wchar_len, CodeUnit,
    DecodedCodepoint, WChar, INVALID_CODEPOINT, MAX_CODEPOINT, REPLACEMENT_CODEPOINT,
    WIDE_CHAR_IS_UTF16,
};
pub use convert::{
    str16_from_str8, str32_from_str8, str8_from_str16, str8_from_str32, str8_from_wchar,
    try_str16_from_str8, try_str32_from_str8, try_str8_from_str16, try_str8_from_str32,
    try_str8_from_wchar, try_wchar_from_str8, wchar_from_str8,
};
pub use error::UnicodeError;
pub use hash::{
    hash32, hash32_seeded, hash64, hash64_seeded, FNV32_OFFSET_BASIS, FNV32_PRIME,
    FNV64_OFFSET_BASIS, FNV64_PRIME,
};
pub use iter::Codepoints;
pub use owned::{
    concat, concat3, copy, try_concat, try_concat3, try_copy, OwnedStr, Str16Buf, Str32Buf,
    Str8Buf, WCharBuf,
};
pub use str8::Str8;
pub use view::{wchar_until_nul, Str16, Str32};

use kigu_array::{CountingAllocator, HeapAllocator};
use kigu_unicode::{
    concat, concat3, copy, str16_from_str8, str32_from_str8, str8_from_str16, str8_from_str32,
    str8_from_wchar, try_copy, wchar_from_str8, Str16, Str32, Str8, UnicodeError, WChar,
    WIDE_CHAR_IS_UTF16,
};

const TEXT: &str = "a b c d Д Е Ж З И Й К Л У Ф Х ≤ ≥ ♪ ♫ ╞ ╟ ╠ ╡ ╢ ╣      🍌";

#[test]
fn test_utf16_matches_std() {
    let allocator = HeapAllocator;
    let expected: Vec<u16> = TEXT.encode_utf16().collect();

    let converted = str16_from_str8(Str8::lit(TEXT), &allocator);

    assert_eq!(converted.len(), 57);
    assert_eq!(converted.as_units(), expected.as_slice());
    assert_eq!(converted.length(), 56);
    assert_eq!(converted.as_units_with_nul().last(), Some(&0));
    assert_eq!(converted.as_str16().length(), 56);
}

#[test]
fn test_utf16_round_trip() {
    let allocator = HeapAllocator;
    let units: Vec<u16> = TEXT.encode_utf16().collect();

    let converted = str8_from_str16(Str16::new(&units), &allocator);

    assert_eq!(converted.as_str8(), TEXT);
    assert_eq!(converted.space(), 91);
}

#[test]
fn test_utf32_round_trip() {
    let allocator = HeapAllocator;
    let expected: Vec<u32> = TEXT.chars().map(u32::from).collect();

    let wide = str32_from_str8(Str8::lit(TEXT), &allocator);
    assert_eq!(wide.as_units(), expected.as_slice());
    assert_eq!(wide.space(), 57);

    let narrow = str8_from_str32(wide.as_str32(), &allocator);
    assert_eq!(narrow.as_str8(), TEXT);
}

#[test]
fn test_wchar_round_trip() {
    let allocator = HeapAllocator;

    let wide = wchar_from_str8(Str8::lit(TEXT), &allocator);
    let expected_len = if WIDE_CHAR_IS_UTF16 { 57 } else { 56 };
    assert_eq!(wide.len(), expected_len);

    // Reads up to the terminator
    let narrow = str8_from_wchar(wide.as_units_with_nul(), &allocator);
    assert_eq!(narrow.as_str8(), TEXT);
}

#[test]
fn test_wchar_stops_at_nul() {
    let allocator = HeapAllocator;
    let units: [WChar; 5] = [0x41, 0x42, 0, 0x43, 0];

    let narrow = str8_from_wchar(&units, &allocator);

    assert_eq!(narrow.as_str8(), "AB");
}

#[test]
fn test_lone_surrogate_is_encoded_as_is() {
    let allocator = HeapAllocator;
    let units = [0x61, 0xD800, 0x62];

    let narrow = str8_from_str16(Str16::new(&units), &allocator);

    assert_eq!(narrow.as_units(), &[0x61, 0xED, 0xA0, 0x80, 0x62]);
}

#[test]
fn test_invalid_input_is_replaced() {
    let allocator = HeapAllocator;

    let units = [0x48, 0xFFFF_FFFF, 0x49];
    let narrow = str8_from_str32(Str32::new(&units), &allocator);
    assert_eq!(narrow.as_str8(), "H\u{FFFD}I");

    let bytes = [0xE2, 0x89, b'x'];
    let wide = str16_from_str8(Str8::new(&bytes), &allocator);
    assert_eq!(wide.as_units(), &[0xFFFD, 0xFFFD, 0x78]);
}

#[test]
fn test_conversions_release_everything() {
    let allocator = CountingAllocator::new(HeapAllocator);
    {
        let wide = str16_from_str8(Str8::lit(TEXT), &allocator);
        let narrow = str8_from_str16(wide.as_str16(), &allocator);
        assert_eq!(allocator.live_blocks(), 2);
        // One reserve and one shrink per conversion
        assert_eq!(allocator.resize_count(), 2);
        assert_eq!(narrow.as_str8(), TEXT);
    }
    assert_eq!(allocator.live_blocks(), 0);
    assert_eq!(allocator.live_bytes(), 0);
}

#[test]
fn test_copy_does_not_share_memory() {
    let allocator = HeapAllocator;
    let source = Str8::lit(TEXT);

    let copied = copy(source, &allocator);

    assert_eq!(copied.as_str8(), source);
    assert_ne!(copied.as_ptr(), source.as_bytes().as_ptr());
    assert_eq!(copied.space(), 91);
}

#[test]
fn test_concat() {
    let allocator = HeapAllocator;

    let two = concat(Str8::lit("Жу"), Str8::lit("к"), &allocator);
    assert_eq!(two.as_str8(), "Жук");
    assert_eq!(two.length(), 3);

    let three = concat3(Str8::lit("a"), Str8::default(), Str8::lit("🍌"), &allocator);
    assert_eq!(three.as_str8(), "a🍌");
    assert_eq!(three.as_units_with_nul(), "a🍌\0".as_bytes());
}

#[test]
fn test_copy_reports_allocation_failure() {
    let allocator = CountingAllocator::with_limit(HeapAllocator, 16);

    let result = try_copy(Str8::lit(TEXT), &allocator);

    assert!(matches!(result, Err(UnicodeError::Array(_))));
}

#[test]
fn test_owned_display() {
    let allocator = HeapAllocator;
    let units = [0x416u16, 0x443, 0x43A];
    let wide = str8_from_str16(Str16::new(&units), &allocator);

    assert_eq!(wide.to_string(), "Жук");
    assert_eq!(format!("{wide:?}"), "\"Жук\"");
    assert_eq!(format!("{:?}", Str16::new(&units)), "u\"Жук\"");
}

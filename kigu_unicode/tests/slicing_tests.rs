use kigu_unicode::{hash32, hash64, Str8, INVALID_CODEPOINT};

// 90 bytes, 56 codepoints: ASCII, Cyrillic, symbols, box drawing, six spaces
// and one four-byte codepoint at the end.
const TEXT: &str = "a b c d Д Е Ж З И Й К Л У Ф Х ≤ ≥ ♪ ♫ ╞ ╟ ╠ ╡ ╢ ╣      🍌";

fn text() -> Str8<'static> {
    Str8::lit(TEXT)
}

#[test]
fn test_lengths() {
    assert_eq!(text().len(), 90);
    assert_eq!(text().length(), 56);
    assert_eq!(Str8::default().length(), 0);
}

#[test]
fn test_index() {
    assert_eq!(text().index(0).codepoint, u32::from('a'));
    assert_eq!(text().index(18).codepoint, 0x419);
    assert_eq!(text().index(18).advance, 2);
    assert_eq!(text().index(55).codepoint, 0x1F34C);
    // Past the end yields the last codepoint
    assert_eq!(text().index(1000).codepoint, 0x1F34C);
}

#[test]
fn test_advance_walks_codepoints() {
    let mut view = text();
    view.nadvance(8);
    assert_eq!(view.advance().codepoint, u32::from('Д'));
    assert_eq!(view.len(), 90 - 10);

    view.advance_until('🍌');
    assert_eq!(view, "🍌");
    assert_eq!(view.advance().advance, 4);
    assert!(view.is_empty());
}

#[test]
fn test_advance_while() {
    let mut view = Str8::lit("---x");
    view.advance_while('-');
    assert_eq!(view, "x");
}

#[test]
#[should_panic(expected = "Cannot increment by 5 bytes: view has only 3 bytes")]
fn test_increment_past_end_panics() {
    let mut view = Str8::lit("abc");
    view.increment(5);
}

#[test]
fn test_eat_count() {
    assert_eq!(text().eat_count(5), "a b c");
    assert_eq!(text().eat_count(16), "a b c d Д Е Ж З ");
    assert_eq!(text().eat_count(1000), TEXT);
    assert_eq!(text().eat_one(), "a");
    assert_eq!(text().skip_count(54), " 🍌");
}

#[test]
fn test_eat_and_skip_until() {
    assert_eq!(text().eat_until('≤'), "a b c d Д Е Ж З И Й К Л У Ф Х ");
    assert_eq!(text().eat_until('≤').len(), 41);
    assert_eq!(text().skip_until('♪'), "♪ ♫ ╞ ╟ ╠ ╡ ╢ ╣      🍌");
    assert_eq!(text().eat_until_one_of(&['♪', '≤']).len(), 41);
    assert_eq!(text().skip_until_one_of(&['╞', '♪']).len(), 90 - 49);
}

#[test]
fn test_eat_until_missing_codepoint_takes_everything() {
    assert_eq!(text().eat_until('z'), TEXT);
    assert!(text().skip_until('z').is_empty());
    assert_eq!(text().eat_until_last('z'), TEXT);
    assert!(text().skip_until_last('z').is_empty());
}

#[test]
fn test_eat_and_skip_until_last() {
    assert_eq!(text().eat_until_last(' ').len(), 85);
    assert_eq!(text().skip_until_last(' '), " 🍌");
}

#[test]
fn test_eat_until_str() {
    assert_eq!(text().eat_until_str(Str8::lit("  ")).len(), 80);
    assert_eq!(text().skip_until_str(Str8::lit("╞ ╟")).len(), 90 - 57);
    assert_eq!(text().eat_until_str(Str8::lit("nope")), TEXT);
}

#[test]
fn test_eat_while() {
    let view = Str8::lit("aaab");
    assert_eq!(view.eat_while('a'), "aaa");
    assert_eq!(view.skip_while('a'), "b");
    assert_eq!(view.eat_while('b'), "");
}

#[test]
fn test_whitespace_word_and_int() {
    let view = Str8::lit("\u{3000}\t snake_case42 rest");
    assert_eq!(view.eat_whitespace().length(), 3);

    let word = view.skip_whitespace();
    assert_eq!(word.eat_word(true), "snake_case42");
    assert_eq!(word.eat_word(false), "snake");
    assert_eq!(word.skip_word(false), "_case42 rest");

    let number = Str8::lit("2048px");
    assert_eq!(number.eat_int(), "2048");
    assert_eq!(number.skip_int(), "px");
}

#[test]
fn test_compare() {
    assert_eq!(Str8::lit("abc").compare(Str8::lit("abc")), 0);
    assert_eq!(Str8::lit("abc").compare(Str8::lit("ab")), 99);
    assert_eq!(Str8::lit("ab").compare(Str8::lit("abc")), -99);
    assert_eq!(Str8::lit("Д").compare(Str8::lit("Е")), -1);
    assert_eq!(Str8::lit("abX").ncompare(Str8::lit("abY"), 2), 0);
    assert_eq!(Str8::default().compare(Str8::default()), 0);
}

#[test]
fn test_equal() {
    let owned = String::from(TEXT);
    let copy = Str8::lit(&owned);

    assert!(text().equal(copy));
    assert!(text().equal_lazy(copy));
    assert!(!text().equal(copy.eat_count(55)));
    assert!(text().nequal(Str8::lit("a b c d Д Е ?"), 12));
    assert!(!text().nequal(Str8::lit("a b c d Д Е ?"), 13));
}

#[test]
fn test_begins_ends_contains() {
    assert!(text().begins_with(Str8::lit("a b c d Д")));
    assert!(!text().begins_with(Str8::lit("b")));
    assert!(!Str8::lit("a").begins_with(Str8::lit("ab")));

    assert!(text().ends_with(Str8::lit("╣      🍌")));
    assert!(!text().ends_with(Str8::lit("╢")));

    assert!(text().contains(Str8::lit("♪ ♫")));
    assert!(text().contains(Str8::default()));
    assert!(!text().contains(Str8::lit("♫ ♪")));
}

#[test]
fn test_find() {
    assert_eq!(text().find_first('Ж'), Some(14));
    assert_eq!(text().find_first('♪'), Some(49));
    assert_eq!(text().find_first('z'), None);

    assert_eq!(text().find_last(' '), Some(85));
    assert_eq!(text().find_last('🍌'), Some(86));
    assert_eq!(text().find_last('a'), Some(0));
    assert_eq!(text().find_last('z'), None);
}

#[test]
fn test_find_last_over_malformed_tail() {
    let view = Str8::new(&[b'a', 0xFF, b'b']);
    assert_eq!(view.find_last('a'), Some(0));
    assert_eq!(view.find_last(INVALID_CODEPOINT), Some(1));
    assert_eq!(view.find_last('b'), Some(2));
}

#[test]
fn test_valid() {
    assert!(text().valid());
    assert!(!Str8::default().valid());
    assert!(!Str8::new(b"\0abc").valid());
}

#[test]
fn test_hash_matches_free_functions() {
    assert_eq!(text().hash32(), hash32(TEXT.as_bytes()));
    assert_eq!(text().hash32(), 0x4603_2d4c);
    assert_eq!(text().hash64(), 0x32e6_d20f_ad02_292c);
    assert_eq!(hash64(&[]), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn test_display_replaces_malformed_bytes() {
    let view = Str8::new(&[b'o', 0xFF, b'k']);
    assert_eq!(view.to_string(), "o\u{FFFD}k");
    assert_eq!(format!("{:?}", Str8::lit("hi")), "\"hi\"");
}

#[test]
fn test_from_cstr() {
    let view = Str8::from_cstr(c"Жук");
    assert_eq!(view.len(), 6);
    assert_eq!(view.length(), 3);
}

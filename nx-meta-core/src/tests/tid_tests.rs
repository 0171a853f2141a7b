use super::*;

const BASE: &str = "0100ABCD00010000";

#[test]
fn test_validate_base() {
    assert!(validate(BASE, true));
    assert!(validate("0100abcd00010000", true));
    assert!(!validate("0100ABCD00010800", true));
    assert!(!validate("0100ABCD00010001", true));
    assert!(!validate("0100ABCD0001000", true));
    assert!(!validate("0100ABCD000100000", true));
    assert!(!validate("0100ABCG00010000", true));
    assert!(!validate("", true));
}

#[test]
fn test_validate_derived() {
    assert!(validate("0100ABCD00010800", false));
    assert!(validate("0100ABCD00011001", false));
    assert!(validate(BASE, false));
    assert!(!validate("0100ABCD0001100", false));
    assert!(!validate("0100ABCD0001100Z", false));
    // Multibyte characters never count as hex digits
    assert!(!validate("0100ABCD000100\u{e9}", false));
}

#[test]
fn test_format_uppercases_only() {
    assert_eq!(format("0100abcd00010000"), "0100ABCD00010000");
    assert_eq!(format("abc"), "ABC");
    assert_eq!(format(""), "");
}

#[test]
fn test_sanitize_hex_input() {
    assert_eq!(sanitize_hex_input("01-00 ab:cd", 16), "0100ABCD");
    assert_eq!(sanitize_hex_input("xyz", 16), "");
    assert_eq!(sanitize_hex_input("0100ABCD000100001234", 16), "0100ABCD00010000");
    assert_eq!(sanitize_hex_input("ff\u{1F600}ee", 3), "FFE");
}

#[test]
fn test_sanitize_then_format_is_idempotent() {
    let inputs = ["0x0100abcd00010000", "  01 00 ", "ghij", "0100ABCD00010000ffff", ""];
    for input in inputs {
        let once = format(&sanitize_hex_input(input, 16));
        let twice = format(&sanitize_hex_input(&once, 16));
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_next_hex_digit() {
    assert_eq!(next_hex_digit('0'), Some('1'));
    assert_eq!(next_hex_digit('7'), Some('8'));
    assert_eq!(next_hex_digit('9'), Some('A'));
    assert_eq!(next_hex_digit('a'), Some('B'));
    assert_eq!(next_hex_digit('F'), Some('0'));
    assert_eq!(next_hex_digit('G'), None);
}

#[test]
fn test_derive_update_id() {
    assert_eq!(derive_update_id(BASE).unwrap(), "0100ABCD00010800");
    assert_eq!(derive_update_id("0100abcd00010000").unwrap(), "0100ABCD00010800");
    assert_eq!(
        derive_update_id("0100ABCD00010800"),
        Err(TidError::InvalidBase("0100ABCD00010800".into()))
    );
    assert!(derive_update_id("").is_err());
}

#[test]
fn test_derive_dlc_prefix_and_type_char() {
    assert_eq!(
        derive_dlc_prefix_and_type_char(BASE).unwrap(),
        ("0100ABCD0001".to_string(), '1')
    );
    assert_eq!(
        derive_dlc_prefix_and_type_char("01007EF00011E000").unwrap(),
        ("01007EF00011".to_string(), 'F')
    );
    // Type digit wraps around
    assert_eq!(
        derive_dlc_prefix_and_type_char("01007EF00011F000").unwrap(),
        ("01007EF00011".to_string(), '0')
    );
    assert!(derive_dlc_prefix_and_type_char("nope").is_err());
}

#[test]
fn test_compose_dlc_id() {
    assert_eq!(compose_dlc_id(BASE, "001").unwrap(), "0100ABCD00011001");
    assert_eq!(compose_dlc_id(BASE, "1").unwrap(), "0100ABCD00011001");
    assert_eq!(compose_dlc_id(BASE, "a2").unwrap(), "0100ABCD000110A2");
    assert_eq!(compose_dlc_id(BASE, "12345").unwrap(), "0100ABCD00011345");
    assert_eq!(compose_dlc_id(BASE, "--").unwrap(), "0100ABCD00011000");
    assert!(compose_dlc_id("0100ABCD00011001", "001").is_err());
}

#[test]
fn test_dlc_suffix() {
    assert_eq!(dlc_suffix("0100ABCD00011001"), Some(1));
    assert_eq!(dlc_suffix("0100ABCD00011FFF"), Some(0xFFF));
    assert_eq!(dlc_suffix("zz"), None);
    assert_eq!(dlc_suffix("0100ABCD00011XYZ"), None);
}

#[test]
fn test_next_free_dlc_suffix() {
    let ids = ["0100ABCD00011001", "0100ABCD00011003"];
    assert_eq!(next_free_dlc_suffix(&ids).unwrap(), "002");

    let none: [&str; 0] = [];
    assert_eq!(next_free_dlc_suffix(&none).unwrap(), "001");

    let gapless = ["0100ABCD00011001", "0100ABCD00011002", "0100ABCD00011003"];
    assert_eq!(next_free_dlc_suffix(&gapless).unwrap(), "004");

    // A suffix of 000 does not occupy the first slot
    let zero = ["0100ABCD00011000"];
    assert_eq!(next_free_dlc_suffix(&zero).unwrap(), "001");

    let junk = ["", "x", "0100ABCD00011001"];
    assert_eq!(next_free_dlc_suffix(&junk).unwrap(), "002");
}

#[test]
fn test_next_free_dlc_suffix_hex_rollover() {
    let ids: Vec<String> = (1..=9u16).map(|n| format!("0100ABCD00011{:03X}", n)).collect();
    assert_eq!(next_free_dlc_suffix(&ids).unwrap(), "00A");
}

#[test]
fn test_next_free_dlc_suffix_exhausted() {
    let ids: Vec<String> = (1..=0xFFFu16)
        .map(|n| format!("0100ABCD00011{:03X}", n))
        .collect();
    assert_eq!(
        next_free_dlc_suffix(&ids),
        Err(TidError::SuffixSpaceExhausted)
    );
}

#[test]
fn test_is_valid_dlc_id() {
    assert!(is_valid_dlc_id(BASE, "0100ABCD00011001"));
    assert!(is_valid_dlc_id(BASE, "0100abcd00011fff"));
    // Wrong type digit
    assert!(!is_valid_dlc_id(BASE, "0100ABCD00012001"));
    // Wrong prefix
    assert!(!is_valid_dlc_id(BASE, "0100ABCE00011001"));
    // Bad shape
    assert!(!is_valid_dlc_id(BASE, "0100ABCD0001100"));
    // Bad base
    assert!(!is_valid_dlc_id("0100ABCD00010800", "0100ABCD00011001"));
}

#[test]
fn test_is_valid_update_id() {
    assert!(is_valid_update_id(BASE, "0100ABCD00010800"));
    assert!(!is_valid_update_id(BASE, "0100ABCD00010801"));
    assert!(!is_valid_update_id(BASE, "0100ABCE00010800"));
}

#[test]
fn test_base_tid_parse_and_display() {
    let base: BaseTid = "0100abcd00010000".parse().unwrap();
    assert_eq!(base.to_string(), BASE);
    assert_eq!(base.as_str(), BASE);
    assert_eq!(base.prefix(), "0100ABCD0001");
    assert_eq!(base.dlc_type_char(), '1');
    assert_eq!(base.update_id(), "0100ABCD00010800");
    assert_eq!(base.dlc_id("7"), "0100ABCD00011007");

    let err = "0100ABCD00011001".parse::<BaseTid>().unwrap_err();
    assert!(err.to_string().contains("ending with 000"));
}

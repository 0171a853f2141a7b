use super::*;

#[test]
fn test_parse_version() {
    assert_eq!(parse_version("0"), Some(0));
    assert_eq!(parse_version(" 42 "), Some(42));
    assert_eq!(parse_version("+7"), Some(7));
    assert_eq!(parse_version("12abc"), Some(12));
    assert_eq!(parse_version("3.9"), Some(3));
    assert_eq!(parse_version("-5"), None);
    assert_eq!(parse_version("abc"), None);
    assert_eq!(parse_version(""), None);
    assert_eq!(parse_version("99999999999999999999999"), None);
}

#[test]
fn test_normalize_forced() {
    assert_eq!(normalize("0", true), "0");
    assert_eq!(normalize("1", true), "65536");
    assert_eq!(normalize("65536", true), "65536");
    assert_eq!(normalize("65537", true), "131072");
    assert_eq!(normalize("131072", true), "131072");
    assert_eq!(normalize("-5", true), "0");
    assert_eq!(normalize("", true), "0");
}

#[test]
fn test_normalize_unforced() {
    assert_eq!(normalize("abc", false), "0");
    assert_eq!(normalize("1", false), "1");
    assert_eq!(normalize("007", false), "7");
    assert_eq!(normalize("65537", false), "65537");
    assert_eq!(normalize("-1", false), "0");
}

#[test]
fn test_normalize_overflow_falls_back_to_zero() {
    assert_eq!(normalize(&u64::MAX.to_string(), true), "0");
    assert_eq!(normalize(&u64::MAX.to_string(), false), u64::MAX.to_string());
}

#[test]
fn test_next_version() {
    assert_eq!(next_version("65536"), "131072");
    assert_eq!(next_version("100"), "65636");
    assert_eq!(next_version("0"), "65536");
    assert_eq!(next_version(""), "65536");
    assert_eq!(next_version("garbage"), "65536");
}

#[test]
fn test_next_version_strictly_increases() {
    let mut current = "1".to_string();
    for _ in 0..5 {
        let next = next_version(&current);
        assert!(next.parse::<u64>().unwrap() > current.parse::<u64>().unwrap());
        current = next;
    }
    assert_eq!(current, "327681");
}

#[test]
fn test_is_valid() {
    assert!(is_valid("0", false));
    assert!(is_valid("123", false));
    assert!(is_valid("0", true));
    assert!(is_valid("196608", true));
    assert!(!is_valid("1", true));
    assert!(!is_valid("-1", false));
    assert!(!is_valid("12abc", false));
    assert!(!is_valid("", false));
    assert!(!is_valid("1.5", false));
}

#[test]
fn test_normalized_forced_versions_are_valid() {
    for raw in ["0", "1", "65535", "65536", "65537", "999999", "x"] {
        let normalized = normalize(raw, true);
        assert!(is_valid(&normalized, true), "{} -> {}", raw, normalized);
    }
}

use super::*;

fn int(token: &str) -> Option<(String, bool)> {
    Some((token.to_string(), false))
}

fn double(token: &str) -> Option<(String, bool)> {
    Some((token.to_string(), true))
}

#[test]
fn test_integer_literals() {
    assert_eq!(normalize_number("42"), int("42"));
    assert_eq!(normalize_number("0"), int("0"));
    assert_eq!(normalize_number("10L"), int("10"));
    assert_eq!(normalize_number("1_000_000"), int("1000000"));
    assert_eq!(normalize_number("0xFFl"), int("0xFF"));
}

#[test]
fn test_octal_and_binary_become_decimal() {
    assert_eq!(normalize_number("017"), int("15"));
    assert_eq!(normalize_number("0b1010"), int("10"));
    assert_eq!(normalize_number("0B11L"), int("3"));
}

#[test]
fn test_double_literals() {
    assert_eq!(normalize_number("1.5"), double("1.5"));
    assert_eq!(normalize_number("3."), double("3.0"));
    assert_eq!(normalize_number(".5"), double("0.5"));
    assert_eq!(normalize_number("2f"), double("2.0"));
    assert_eq!(normalize_number("1.25D"), double("1.25"));
    assert_eq!(normalize_number("1e10"), double("1e10"));
    assert_eq!(normalize_number("1.E-3"), double("1.0e-3"));
}

#[test]
fn test_malformed_literals_are_rejected() {
    assert_eq!(normalize_number(""), None);
    assert_eq!(normalize_number("0x"), None);
    assert_eq!(normalize_number("12ab"), None);
    assert_eq!(normalize_number("09"), None);
}

use super::*;

#[test]
fn test_reserved_words() {
    assert!(is_reserved_word("in"));
    assert!(is_reserved_word("var"));
    assert!(!is_reserved_word("get"));
    assert!(!is_reserved_word("value"));
}

#[test]
fn test_valid_identifier() {
    assert!(is_valid_identifier("con1"));
    assert!(is_valid_identifier("_impl"));
    assert!(is_valid_identifier("$x"));
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("1abc"));
    assert!(!is_valid_identifier("a-b"));
    assert!(!is_valid_identifier("switch"));
}

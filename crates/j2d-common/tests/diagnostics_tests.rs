use super::*;

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
    assert_eq!(format_message("no args", &[]), "no args");
}

#[test]
fn test_warning_uses_registered_template() {
    let diag = Diagnostic::warning(
        diagnostic_codes::FIELD_INITIALIZER_NOT_EXTRACTED,
        &["count"],
        Some(SourceLocation::new(3, 5)),
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert!(diag.message_text.contains("'count'"));
    assert_eq!(diag.location.as_ref().map(|l| l.line), Some(3));
}

#[test]
fn test_message_category_comes_from_table() {
    let diag = Diagnostic::warning(diagnostic_codes::SETTER_CALL_NOT_IN_STATEMENT, &["setX"], None);
    assert_eq!(diag.category, DiagnosticCategory::Message);
}

#[test]
fn test_location_display() {
    let loc = SourceLocation::new(10, 2).in_file("a/B.java");
    assert_eq!(loc.to_string(), "a/B.java:10:2");
    assert_eq!(SourceLocation::new(1, 1).to_string(), "1:1");
}

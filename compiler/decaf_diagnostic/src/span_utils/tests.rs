use super::*;

#[test]
fn test_line_lookup() {
    let table = LineOffsetTable::build("ab\ncd\n\nef");
    assert_eq!(table.line_count(), 4);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(2), 1); // the newline itself
    assert_eq!(table.line_from_offset(3), 2);
    assert_eq!(table.line_from_offset(6), 3);
    assert_eq!(table.line_from_offset(7), 4);
}

#[test]
fn test_columns_count_chars() {
    let source = "é = 1\nx";
    let table = LineOffsetTable::build(source);
    // `=` sits after a two-byte character.
    assert_eq!(table.offset_to_line_col(source, 3), (1, 3));
    assert_eq!(table.offset_to_line_col(source, 7), (2, 1));
}

#[test]
fn test_line_text() {
    let source = "first\r\nsecond\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), "first");
    assert_eq!(table.line_text(source, 2), "second");
    assert_eq!(table.line_text(source, 3), "");
    assert_eq!(table.line_text(source, 9), "");
}

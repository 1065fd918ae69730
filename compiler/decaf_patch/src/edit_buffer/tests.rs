#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_untouched_buffer_renders_source() {
    let buffer = EditBuffer::new("a = 1");
    assert_eq!(buffer.render().unwrap(), "a = 1");
}

#[test]
fn test_inserts_at_one_offset_compose_in_call_order() {
    let mut buffer = EditBuffer::new("ab");
    buffer.insert(1, "x").unwrap();
    buffer.insert(1, "y").unwrap();
    assert_eq!(buffer.render().unwrap(), "axyb");
}

#[test]
fn test_prepend_right_wraps_earlier_right_inserts() {
    let mut buffer = EditBuffer::new("b()");
    buffer.prepend_right(0, "(m = ").unwrap();
    buffer.append_left(3, ")").unwrap();
    buffer.prepend_right(0, "return ").unwrap();
    assert_eq!(buffer.render().unwrap(), "return (m = b())");
}

#[test]
fn test_left_inserts_render_before_right_inserts() {
    let mut buffer = EditBuffer::new("a b");
    buffer.prepend_right(2, "[").unwrap();
    buffer.append_left(2, "]").unwrap();
    assert_eq!(buffer.render().unwrap(), "a ][b");
}

#[test]
fn test_slice_sees_edits_inside_and_at_the_edges() {
    let mut buffer = EditBuffer::new("x = yes");
    buffer.overwrite(4, 7, "true").unwrap();
    buffer.prepend_right(0, "let ").unwrap();
    buffer.append_left(7, ";").unwrap();
    assert_eq!(buffer.slice(0, 7).unwrap(), "let x = true;");
    assert_eq!(buffer.slice(4, 7).unwrap(), "true;");
    assert_eq!(buffer.slice(0, 1).unwrap(), "let x");
}

#[test]
fn test_empty_slice_renders_both_sides() {
    let mut buffer = EditBuffer::new("ab");
    buffer.prepend_right(1, "R").unwrap();
    buffer.append_left(1, "L").unwrap();
    assert_eq!(buffer.slice(1, 1).unwrap(), "LR");
}

#[test]
fn test_overlapping_overwrites_fail() {
    let mut buffer = EditBuffer::new("abcdef");
    buffer.overwrite(1, 4, "X").unwrap();
    let err = buffer.overwrite(3, 5, "Y").unwrap_err();
    assert!(matches!(err, EditError::Overlap { existing, .. } if existing == Span::new(1, 4)));
    assert!(buffer.overwrite(0, 2, "Z").is_err());
    buffer.overwrite(4, 5, "Y").unwrap();
    assert_eq!(buffer.render().unwrap(), "aXYf");
}

#[test]
fn test_remove_swallows_contained_edits() {
    let mut buffer = EditBuffer::new("a if b");
    buffer.overwrite(2, 4, "unless").unwrap();
    buffer.append_left(3, "?").unwrap_err();
    buffer.remove(0, 5).unwrap();
    assert_eq!(buffer.render().unwrap(), "b");
}

#[test]
fn test_remove_fails_on_partial_overlap() {
    let mut buffer = EditBuffer::new("abcdef");
    buffer.overwrite(2, 5, "X").unwrap();
    assert!(buffer.remove(0, 3).is_err());
    assert!(buffer.remove(4, 6).is_err());
}

#[test]
fn test_remove_clears_exactly_the_sliced_inserts() {
    let mut buffer = EditBuffer::new("a b c");
    buffer.append_left(2, "<").unwrap();
    buffer.prepend_right(2, "[").unwrap();
    buffer.append_left(3, "]").unwrap();
    buffer.prepend_right(3, ">").unwrap();
    let moved = buffer.slice(2, 3).unwrap();
    assert_eq!(moved, "[b]");
    buffer.remove(2, 3).unwrap();
    buffer.append_left(5, &moved).unwrap();
    assert_eq!(buffer.render().unwrap(), "a <> c[b]");
}

#[test]
fn test_insert_at_edit_boundaries_is_allowed() {
    let mut buffer = EditBuffer::new("@x");
    buffer.overwrite(0, 1, "this.").unwrap();
    buffer.prepend_right(0, "return ").unwrap();
    buffer.append_left(1, "").unwrap();
    assert_eq!(buffer.render().unwrap(), "return this.x");
}

#[test]
fn test_slice_splitting_an_edit_fails() {
    let mut buffer = EditBuffer::new("abcdef");
    buffer.overwrite(1, 4, "X").unwrap();
    assert!(matches!(
        buffer.slice(2, 6),
        Err(EditError::SliceSplitsEdit { .. })
    ));
    assert!(buffer.slice(0, 2).is_err());
    assert_eq!(buffer.slice(1, 4).unwrap(), "X");
}

#[test]
fn test_bounds_are_checked() {
    let mut buffer = EditBuffer::new("ab");
    assert!(matches!(
        buffer.insert(3, "x"),
        Err(EditError::OutOfBounds { .. })
    ));
    assert!(matches!(
        buffer.remove(2, 1),
        Err(EditError::Inverted { .. })
    ));
    assert!(matches!(
        buffer.overwrite(1, 1, "x"),
        Err(EditError::EmptyOverwrite { .. })
    ));
    buffer.insert(2, "!").unwrap();
    assert_eq!(buffer.render().unwrap(), "ab!");
}

#[test]
fn test_insert_at_end_and_start_of_empty_source() {
    let mut buffer = EditBuffer::new("");
    buffer.insert(0, "a").unwrap();
    buffer.prepend_right(0, "b").unwrap();
    assert_eq!(buffer.render().unwrap(), "ab");
}

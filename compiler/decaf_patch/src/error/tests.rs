use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_codes_by_variant() {
    let unsupported = PatchError::Unsupported {
        span: Span::new(0, 4),
        node: "While",
        message: "loops cannot be used as values".to_owned(),
    };
    assert_eq!(unsupported.code(), ErrorCode::E9001);
    assert_eq!(
        unsupported.to_string(),
        "cannot rewrite While: loops cannot be used as values"
    );

    let edit = PatchError::Edit {
        span: Span::new(0, 9),
        node: "Conditional",
        source: EditError::EmptyOverwrite { offset: 3 },
    };
    assert_eq!(edit.code(), ErrorCode::E9002);
    assert_eq!(edit.span(), Span::new(0, 9));

    let hoist = PatchError::UnhandledHoist {
        span: Span::new(1, 2),
        what: "this-assignment".to_owned(),
    };
    assert_eq!(hoist.code(), ErrorCode::E9005);
}

#[test]
fn test_edit_diagnostic_points_at_both_ranges() {
    let err = PatchError::Edit {
        span: Span::new(0, 9),
        node: "Conditional",
        source: EditError::InsertInsideEdit {
            offset: 4,
            existing: Span::new(2, 6),
        },
    };
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E9002);
    assert_eq!(diag.primary_span(), Some(Span::new(0, 9)));
    assert_eq!(diag.labels.len(), 2);
}

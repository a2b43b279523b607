use assistant_core::{OperationKind, SelectionRequest, ValidationError, MIN_SELECTION_CHARS};

#[test]
fn short_selections_are_rejected_after_trimming() {
    for content in ["", "   ", "too short", "  123456789  ", "\n\t abc \n"] {
        let err = SelectionRequest::new(content, OperationKind::Summarize).unwrap_err();
        assert!(
            matches!(err, ValidationError::SelectionTooShort { actual } if actual < MIN_SELECTION_CHARS),
            "{content:?} should be too short"
        );
    }
}

#[test]
fn content_is_kept_untrimmed() {
    let request = SelectionRequest::new("  exactly10!  ", OperationKind::Explain).unwrap();

    assert_eq!(request.content(), "  exactly10!  ");
    assert_eq!(request.operation(), OperationKind::Explain);
}

#[test]
fn length_counts_characters_not_bytes() {
    // Nine characters, well over ten bytes.
    let err = SelectionRequest::new("ééééééééé", OperationKind::Suggest).unwrap_err();
    assert_eq!(err, ValidationError::SelectionTooShort { actual: 9 });

    assert!(SelectionRequest::new("éééééééééé", OperationKind::Suggest).is_ok());
}

#[test]
fn operations_parse_case_insensitively() {
    assert_eq!("summarize".parse::<OperationKind>().unwrap(), OperationKind::Summarize);
    assert_eq!(" KeyPoints ".parse::<OperationKind>().unwrap(), OperationKind::Keypoints);
    assert_eq!(
        "translate".parse::<OperationKind>().unwrap_err(),
        ValidationError::UnknownOperation("translate".to_string())
    );
}

#[test]
fn operations_serialize_to_wire_names() {
    for op in OperationKind::ALL {
        assert_eq!(serde_json::to_string(&op).unwrap(), format!("\"{}\"", op.as_str()));
    }
}

use nx_meta_document::{
    DocumentError, GameDocument, IdRule, ValidationMode, Violation, ensure_valid, validate,
};

const BASE: &str = "0100ABCD00010000";

fn generated(dlc_count: usize) -> GameDocument {
    let mut doc = GameDocument::new(&BASE.parse().unwrap())
        .with_update_added()
        .unwrap();
    for _ in 0..dlc_count {
        doc = doc.with_dlc_added().unwrap();
    }
    doc
}

/// Replace the character at `pos` with a different hex digit.
fn mutate(id: &str, pos: usize) -> String {
    let mut chars: Vec<char> = id.chars().collect();
    chars[pos] = if chars[pos] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

#[test]
fn generated_documents_have_no_violations() {
    for count in [0, 1, 5, 20] {
        let doc = generated(count);
        assert!(validate(&doc, ValidationMode::Strict).is_empty());
        assert!(validate(&doc, ValidationMode::Legacy).is_empty());
    }
}

#[test]
fn one_prefix_change_gives_one_violation() {
    for pos in 0..12 {
        let mut doc = generated(3);
        doc.dlcs[1].id = mutate(&doc.dlcs[1].id, pos);
        let violations = validate(&doc, ValidationMode::Strict);
        assert_eq!(violations.len(), 1, "DLC prefix position {}", pos);
        assert!(matches!(
            violations[0],
            Violation::InvalidDlcId { rule: IdRule::Prefix, .. }
        ));

        let mut doc = generated(3);
        doc.updates[0].id = mutate(&doc.updates[0].id, pos);
        let violations = validate(&doc, ValidationMode::Strict);
        assert_eq!(violations.len(), 1, "update prefix position {}", pos);
        assert!(matches!(
            violations[0],
            Violation::InvalidUpdateId { rule: IdRule::Prefix, .. }
        ));
    }
}

#[test]
fn legacy_mode_accepts_foreign_ids() {
    let mut doc = generated(2);
    doc.dlcs[0].id = "0100FFFF00012001".into();
    doc.updates[0].id = "0100ABCD00010000".into();

    assert_eq!(validate(&doc, ValidationMode::Strict).len(), 2);
    assert!(ensure_valid(&doc, ValidationMode::Legacy).is_ok());
}

#[test]
fn base_is_reported_first() {
    let mut doc = generated(1);
    doc.base.id = "0100ABCD0001".into();
    doc.dlcs[0].id = "xyz".into();

    let err = ensure_valid(&doc, ValidationMode::Strict).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidBaseId(_)));
    assert_eq!(
        err.to_string(),
        "Invalid base ID '0100ABCD0001': must be 16 hexadecimal characters ending with 000"
    );
}

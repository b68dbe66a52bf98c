use std::sync::Arc;

use lexis_doc::{Doc, DocError, ExtensionRegistry, SpanRange, TokenExtensionSpec};
use lexis_strings::StringStore;
use lexis_types::{ErrorKind, ViewKind};
use lexis_vocab::Vocab;
use serde_json::json;

#[test]
fn documents_share_one_vocabulary() {
    let vocab = Arc::new(Vocab::new());
    let first = Doc::new(Arc::clone(&vocab), &["I", "love", "coffee"], &[true, true, false]).unwrap();
    let second = Doc::new(Arc::clone(&vocab), &["coffee", "!"], &[false, false]).unwrap();

    let coffee = vocab.strings().lookup("coffee").unwrap();
    assert_eq!(first.token(2).unwrap().orth(), coffee);
    assert_eq!(second.token(0).unwrap().orth(), coffee);
    assert!(Arc::ptr_eq(
        first.token(2).unwrap().lexeme(),
        second.token(0).unwrap().lexeme()
    ));

    let fresh = Vocab::new();
    assert_eq!(fresh.strings().lookup("coffee"), None);
    assert_eq!(fresh.strings().id_of("coffee"), coffee);
    let err = fresh.resolve(coffee).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn entities_from_labeled_spans() {
    let vocab = Arc::new(Vocab::new());
    let mut doc = Doc::new(
        vocab,
        &["I", "like", "David", "Bowie"],
        &[true, true, true, false],
    )
    .unwrap();
    let person = doc.span_labeled(2, 4, "PERSON").unwrap().range();
    doc.set_ents([person]).unwrap();

    let ents: Vec<(String, String)> = doc
        .ents()
        .iter()
        .map(|e| (e.text().to_string(), e.label().unwrap().to_string()))
        .collect();
    assert_eq!(ents, vec![("David Bowie".to_string(), "PERSON".to_string())]);
    assert_eq!(doc.token(3).unwrap().ent_type().as_deref(), Some("PERSON"));
    assert_eq!(doc.token(1).unwrap().ent_type(), None);

    let err = doc
        .set_ents([SpanRange::labeled(0, 3, "X"), SpanRange::labeled(2, 4, "Y")])
        .unwrap_err();
    assert!(matches!(err, DocError::OverlappingEntities { .. }));
    assert_eq!(doc.ents().len(), 1);
}

#[test]
fn registry_is_shared_by_documents() {
    let vocab = Arc::new(Vocab::new());
    let registry = Arc::new(ExtensionRegistry::new());
    registry
        .register_token(
            "is_country",
            TokenExtensionSpec::new().getter(|t| Ok(json!(t.text() == "Spain"))),
            false,
        )
        .unwrap();

    let doc = Doc::with_extensions(
        vocab,
        Arc::clone(&registry),
        &["I", "live", "in", "Spain", "."],
        &[true, true, true, false, false],
    )
    .unwrap();
    let flags: Vec<bool> = doc
        .iter()
        .map(|t| t.ext().get("is_country").unwrap().as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![false, false, false, true, false]);

    registry.unregister(ViewKind::Token, "is_country");
    let err = doc.token(3).unwrap().ext().get("is_country").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Attribute);
}

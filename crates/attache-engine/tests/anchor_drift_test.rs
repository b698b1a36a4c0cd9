//! Placeholders must stay pinned to their content while the document moves
//! underneath them, and failure cleanup must remove exactly the span the
//! placeholder occupies.

mod common;

use attache_engine::upload::reconcile::{apply_failure, apply_success, insert_placeholder};
use attache_engine::{Cmd, Document, Embed, ReconcileError, UploadRegistry};
use common::png_file;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn place(doc: &mut Document, registry: &mut UploadRegistry, at: usize) -> attache_engine::TaskId {
    insert_placeholder(
        doc,
        registry,
        png_file(),
        at,
        "data:image/png;base64,AQID".to_string(),
    )
}

#[rstest]
#[case::start_of_line("hello\nworld\n", 6)]
#[case::mid_line("hello\nworld\n", 8)]
#[case::end_of_line("hello\nworld\n", 11)]
#[case::end_of_document("hello\nworld\n", 12)]
#[case::unterminated_end("hello", 5)]
#[case::empty_document("", 0)]
fn failure_restores_the_exact_prior_text(#[case] text: &str, #[case] at: usize) {
    let mut doc = Document::from_text(text);
    let mut registry = UploadRegistry::new();

    let id = place(&mut doc, &mut registry, at);
    apply_failure(&mut doc, &mut registry, id).unwrap();

    assert_eq!(doc.text(), text);
    assert!(doc.embeds().is_empty());
    assert!(registry.is_empty());
}

#[test]
fn placeholder_drifts_with_edits_before_it() {
    let mut doc = Document::from_text("hello\n");
    let mut registry = UploadRegistry::new();
    let id = place(&mut doc, &mut registry, 5);
    assert_eq!(doc.text(), "hello\u{FFFC}\n");

    // The user keeps typing at the start of the line while the upload runs
    doc.apply(Cmd::InsertText {
        at: 0,
        text: ">> ".to_string(),
    });
    assert_eq!(doc.text(), ">> hello\u{FFFC}\n");

    apply_success(&mut doc, &mut registry, id, "https://x/img.png").unwrap();

    assert_eq!(doc.text(), ">> hello\u{FFFC}\n");
    assert_eq!(
        doc.embeds(),
        vec![(
            8,
            Embed::Image {
                src: "https://x/img.png".to_string()
            }
        )]
    );
}

#[test]
fn failure_after_drift_only_removes_the_placeholder() {
    let mut doc = Document::from_text("draft\n");
    let mut registry = UploadRegistry::new();
    let id = place(&mut doc, &mut registry, 0);

    doc.apply(Cmd::InsertText {
        at: 7,
        text: "more text\n".to_string(),
    });
    doc.apply(Cmd::DeleteRange { range: 1..3 });
    assert_eq!(doc.text(), "\u{FFFC}aft\nmore text\n");

    apply_failure(&mut doc, &mut registry, id).unwrap();

    assert_eq!(doc.text(), "aft\nmore text\n");
    assert!(doc.embeds().is_empty());
}

#[test]
fn deleting_the_placeholder_yourself_cancels_reconciliation() {
    let mut doc = Document::from_text("hello\n");
    let mut registry = UploadRegistry::new();
    let id = place(&mut doc, &mut registry, 2);

    doc.apply(Cmd::DeleteRange { range: 2..3 });
    let before = doc.clone();

    assert_eq!(
        apply_success(&mut doc, &mut registry, id, "https://x/img.png"),
        Err(ReconcileError::AnchorLost)
    );
    assert_eq!(doc, before);
}

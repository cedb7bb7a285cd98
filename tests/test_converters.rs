//! Integration tests for format emitters.
//!
//! Every emitter runs over the same reconstructed documents; the tests check
//! the granularity each one reads (page text, paragraphs, rows, fragments).

use pdf_reflow::converters::{create_emitter, emit, OutputKind, OutputPayload};
use pdf_reflow::pipeline::{PlainTextConfig, ReflowConfig, RichTextConfig};
use pdf_reflow::{Error, JsonPageSource, RawFragment, RawPage, ReconstructedDocument, ReflowPipeline};

/// Two-page letter dump: a heading, a two-line paragraph, a table row, and a
/// second page with a single line.
const LETTER_DUMP: &str = r#"{
    "pages": [
        {"width": 612, "height": 792, "items": [
            {"str": "Invoice", "transform": [18, 0, 0, 18, 72, 720], "width": 60, "height": 18, "hasEOL": true},
            {"str": "Thank you for", "transform": [10, 0, 0, 10, 72, 690], "width": 60, "height": 10},
            {"str": "your order.", "transform": [10, 0, 0, 10, 135, 690], "width": 50, "height": 10, "hasEOL": true},
            {"str": "Delivery is", "transform": [10, 0, 0, 10, 72, 678], "width": 50, "height": 10},
            {"str": "free.", "transform": [10, 0, 0, 10, 125, 678], "width": 20, "height": 10, "hasEOL": true},
            {"str": "", "transform": [1, 0, 0, 1, 145, 678], "width": 0, "height": 0, "hasEOL": true},
            {"str": "Widget", "transform": [10, 0, 0, 10, 72, 640], "width": 30, "height": 10},
            {"str": "3", "transform": [10, 0, 0, 10, 300, 640], "width": 5, "height": 10},
            {"str": "$9.99", "transform": [10, 0, 0, 10, 400, 640], "width": 25, "height": 10}
        ]},
        {"width": 612, "height": 792, "items": [
            {"str": "Page two", "transform": [10, 0, 0, 10, 72, 720], "width": 40, "height": 10}
        ]}
    ]
}"#;

fn letter() -> ReconstructedDocument {
    let source = JsonPageSource::from_str(LETTER_DUMP).unwrap();
    ReflowPipeline::new().reconstruct(&source).unwrap()
}

#[test]
fn test_letter_model_shape() {
    let doc = letter();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].line_count(), 4);
    assert_eq!(doc.pages[0].fragment_count(), 8);
    assert_eq!(doc.pages[0].paragraphs().len(), 3);
    assert_eq!(doc.pages[1].line_count(), 1);
}

#[test]
fn test_plain_text_letter() {
    let text = emit(&letter(), OutputKind::PlainText).unwrap();
    let expected = "Invoice\n\nThank you for your order.\nDelivery is free.\n\nWidget\t3\t$9.99\
                    \n\n----------\n\nPage two";
    assert_eq!(text, OutputPayload::PlainText(expected.to_string()));
}

#[test]
fn test_plain_text_custom_separator() {
    let config = ReflowConfig::default().with_plain_text(PlainTextConfig {
        page_separator: "<<page>>".to_string(),
    });
    let payload = ReflowPipeline::with_config(config)
        .emit(&letter(), OutputKind::PlainText)
        .unwrap();
    assert!(payload.as_text().unwrap().contains("\n\n<<page>>\n\nPage two"));
}

#[test]
fn test_rich_text_letter() {
    let payload = emit(&letter(), OutputKind::RichText).unwrap();
    let html = payload.as_text().unwrap();

    assert!(html.contains("<p>Invoice</p>"));
    assert!(html.contains("<p>Thank you for your order.<br>Delivery is free.</p>"));
    assert!(html.contains("<p>Widget&nbsp;&nbsp;&nbsp;&nbsp;3&nbsp;&nbsp;&nbsp;&nbsp;$9.99</p>"));
    assert!(html.contains("<p>Page two</p>"));
    assert_eq!(html.matches("page-break-before:always").count(), 1);
}

#[test]
fn test_rich_text_title_from_config() {
    let config = ReflowConfig::default().with_rich_text(RichTextConfig {
        title: "Invoice 42".to_string(),
        ..Default::default()
    });
    let payload = ReflowPipeline::with_config(config)
        .emit(&letter(), OutputKind::RichText)
        .unwrap();
    assert!(payload.as_text().unwrap().contains("<title>Invoice 42</title>"));
}

#[test]
fn test_every_kind_emits_matching_payload() {
    let doc = letter();
    let config = ReflowConfig::default();
    for kind in OutputKind::ALL {
        match create_emitter(kind, &config) {
            Ok(emitter) => {
                let payload = emitter.emit(&doc).unwrap();
                assert_eq!(payload.kind(), kind, "{}", emitter.name());
                assert_eq!(payload.as_text().is_none(), kind.is_binary());
            },
            Err(Error::UnsupportedTarget(_)) => assert!(kind.is_binary()),
            Err(e) => panic!("unexpected error for {}: {}", kind, e),
        }
    }
}

#[test]
fn test_emitters_share_one_document_across_threads() {
    let doc = letter();
    let doc = &doc;
    std::thread::scope(|scope| {
        let handles: Vec<_> = [OutputKind::PlainText, OutputKind::RichText]
            .into_iter()
            .map(|kind| scope.spawn(move || emit(doc, kind).unwrap()))
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap().as_bytes().is_empty());
        }
    });
}

#[test]
fn test_convert_unknown_target_string() {
    let err = "odt".parse::<OutputKind>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedTarget(_)));
}

#[test]
fn test_convert_hello_world_end_to_end() {
    let pages = vec![RawPage::new(
        100.0,
        20.0,
        vec![
            RawFragment::new("Hello", 0.0, 10.0, 40.0, 10.0),
            RawFragment::new("World", 45.0, 10.0, 40.0, 10.0),
        ],
    )];
    let payload = ReflowPipeline::new().convert(&pages, OutputKind::PlainText).unwrap();
    assert_eq!(payload, OutputPayload::PlainText("Hello\tWorld".to_string()));
}

#[test]
fn test_empty_document_plain_text() {
    let pages: Vec<RawPage> = Vec::new();
    let payload = ReflowPipeline::new().convert(&pages, OutputKind::PlainText).unwrap();
    assert_eq!(payload, OutputPayload::PlainText(String::new()));
}

mod harness;

use faultmap::locale::WithDefault;
use faultmap::{ErrorEntry, GenerationError, ResponseGenerator, TranslationError};
use harness::catalog::Catalog;
use harness::faults::OrderFault;
use harness::mapping::MappingBuilder;

fn catalog() -> Catalog {
    Catalog::new()
        .with("pl", "order not found", "nie znaleziono zamówienia")
        .with("pl", "something went wrong", "coś poszło nie tak")
        .with("de", "order not found", "Bestellung nicht gefunden")
}

fn orders() -> ResponseGenerator<OrderFault> {
    let mapping = MappingBuilder::new()
        .with_coded_cause("ORDER_NOT_FOUND", 404, "NOT_FOUND", "order not found")
        .with_fallback(500, "INTERNAL", "something went wrong")
        .build();

    ResponseGenerator::from_mapping(&mapping).unwrap()
}

#[test]
fn messages_follow_requested_locale() {
    harness::init_tracing();
    let generator = orders().translated_by(catalog());

    let polish = generator.respond_to_in(&OrderFault::NotFound(1), "pl").unwrap();
    let german = generator.respond_to_in(&OrderFault::NotFound(1), "de").unwrap();
    let fallback = generator.respond_to_in(&OrderFault::StorageFull, "pl").unwrap();

    assert_eq!(polish.status.as_u16(), 404);
    assert_eq!(polish.entries(), [ErrorEntry::new("NOT_FOUND", "nie znaleziono zamówienia")]);
    assert_eq!(german.entries(), [ErrorEntry::new("NOT_FOUND", "Bestellung nicht gefunden")]);
    assert_eq!(fallback.status.as_u16(), 500);
    assert_eq!(fallback.entries(), [ErrorEntry::new("INTERNAL", "coś poszło nie tak")]);
}

#[test]
fn respond_to_keeps_source_messages() {
    let generator = orders().translated_by(catalog());

    let response = generator.respond_to(&OrderFault::NotFound(1)).unwrap();

    assert_eq!(response.entries(), [ErrorEntry::new("NOT_FOUND", "order not found")]);
}

#[test]
fn unsupported_locale_is_an_error() {
    let generator = orders().translated_by(catalog());

    let err = generator.respond_to_in(&OrderFault::NotFound(1), "fr").unwrap_err();

    assert_eq!(err.to_string(), "locale 'fr' is not supported");
    assert!(matches!(
        err,
        GenerationError::Translation(TranslationError::LocaleNotSupported { .. })
    ));
}

#[test]
fn unsupported_locale_falls_back_to_default_text() {
    let generator = orders().translated_by(WithDefault::with_text("an error occurred", catalog()));

    let french = generator.respond_to_in(&OrderFault::NotFound(1), "fr").unwrap();
    let polish = generator.respond_to_in(&OrderFault::NotFound(1), "pl").unwrap();

    assert_eq!(french.entries(), [ErrorEntry::new("NOT_FOUND", "an error occurred")]);
    assert_eq!(polish.entries(), [ErrorEntry::new("NOT_FOUND", "nie znaleziono zamówienia")]);
}

#[test]
fn missing_translation_is_not_masked_by_default_text() {
    let generator = orders().translated_by(WithDefault::new(catalog()));

    let err = generator.respond_to_in(&OrderFault::StorageFull, "de").unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"translation of message (something went wrong) into locale 'de' failed: no catalog entry"
    );
}

use analytics::envelope::{merge_context, message_id, EnvelopeBuilder};
use analytics::{
    ClientConfig, EventKind, FractionStyle, LibraryInfo, Message, LIBRARY_NAME, LIBRARY_VERSION,
};
use serde_json::{json, Value};

fn message(value: Value) -> Message {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {}", other),
    }
}

fn assert_canonical_v4(id: &str) {
    assert_eq!(id.len(), 36, "UUID string length: {}", id);
    for (i, ch) in id.chars().enumerate() {
        match i {
            8 | 13 | 18 | 23 => assert_eq!(ch, '-', "Hyphen expected at {} in {}", i, id),
            _ => assert!(
                ch.is_ascii_digit() || ('a'..='f').contains(&ch),
                "Lowercase hex expected at {} in {}",
                i,
                id
            ),
        }
    }
    assert_eq!(&id[14..15], "4", "Version nibble in {}", id);
    assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"), "Variant nibble in {}", id);
}

#[test]
fn test_message_id_layout() {
    for _ in 0..64 {
        assert_canonical_v4(&message_id());
    }
    assert_ne!(message_id(), message_id());
}

#[test]
fn test_build_fills_required_fields() {
    let builder = EnvelopeBuilder::default();
    let envelope = builder.build(EventKind::Screen, Message::new());

    assert_eq!(envelope.kind(), Some(EventKind::Screen));
    assert_canonical_v4(envelope.message_id().expect("messageId present"));
    assert!(envelope.timestamp().is_some(), "Absent timestamp defaults to now");
    assert_eq!(
        envelope.context().and_then(|c| c.get("library")),
        Some(&json!({ "name": LIBRARY_NAME, "version": LIBRARY_VERSION }))
    );
    assert_eq!(envelope.len(), 4, "Only the four injected keys on an empty message");
}

#[test]
fn test_build_passes_caller_fields_through() {
    let builder = EnvelopeBuilder::default();
    let envelope = builder.build(
        EventKind::Track,
        message(json!({
            "userId": "u-1",
            "event": "Item Purchased",
            "properties": { "revenue": 39.95, "items": [1, 2] },
            "timestamp": 1700000000
        })),
    );

    assert_eq!(envelope.get("userId"), Some(&json!("u-1")));
    assert_eq!(envelope.get("event"), Some(&json!("Item Purchased")));
    assert_eq!(
        envelope.get("properties"),
        Some(&json!({ "revenue": 39.95, "items": [1, 2] }))
    );
    assert_eq!(envelope.timestamp(), Some("2023-11-14T22:13:20+00:00"));
}

#[test]
fn test_null_context_treated_as_empty() {
    let builder = EnvelopeBuilder::default();
    let envelope = builder.build(EventKind::Group, message(json!({ "context": null })));
    let context = envelope.context().expect("context present");
    assert_eq!(context.len(), 1);
    assert!(context.contains_key("library"));
}

#[test]
fn test_merge_context_library_wins() {
    let library = LibraryInfo::current();
    let merged = merge_context(
        Some(json!({ "locale": "en-GB", "library": "mine" })),
        &library,
    );
    assert_eq!(merged.get("locale"), Some(&json!("en-GB")));
    assert_eq!(merged.get("library"), Some(&library.to_value()));
}

#[test]
fn test_merge_context_drops_non_object() {
    let merged = merge_context(Some(json!(["not", "a", "map"])), &LibraryInfo::current());
    assert_eq!(merged.len(), 1, "Only the library entry survives");
}

#[test]
fn test_envelope_serializes_as_flat_object() {
    let builder = EnvelopeBuilder::default();
    let envelope = builder.build(EventKind::Alias, message(json!({ "previousId": "anon-1" })));

    let serialized = serde_json::to_value(&envelope).expect("serializable");
    assert_eq!(serialized["type"], json!("alias"));
    assert_eq!(serialized["previousId"], json!("anon-1"));
    assert_eq!(Value::from(envelope), serialized);
}

#[test]
fn test_event_kind_names() {
    let names: Vec<&str> = EventKind::ALL.iter().map(EventKind::as_str).collect();
    assert_eq!(names, ["track", "identify", "group", "page", "screen", "alias"]);

    for kind in EventKind::ALL {
        assert_eq!(kind.to_string().parse::<EventKind>().ok(), Some(kind));
        assert_eq!(serde_json::to_value(kind).ok(), Some(json!(kind.as_str())));
    }
    assert!("pageview".parse::<EventKind>().is_err());
}

#[test]
fn test_envelope_map_views() {
    let builder = EnvelopeBuilder::default();
    let envelope = builder.build(EventKind::Page, message(json!({ "name": "Pricing" })));

    assert_eq!(envelope.as_map().get("name"), Some(&json!("Pricing")));
    assert_eq!(envelope.as_map().len(), envelope.len());

    let id = envelope.message_id().map(str::to_owned);
    let map = envelope.into_inner();
    assert_eq!(map.get("type"), Some(&json!("page")));
    assert_eq!(map.get("messageId").and_then(Value::as_str), id.as_deref());
}

#[test]
fn test_builder_settings_from_config() -> anyhow::Result<()> {
    let default = EnvelopeBuilder::default();
    assert_eq!(default.offset().local_minus_utc(), 0);
    assert_eq!(default.fraction_style(), FractionStyle::Literal);
    assert_eq!(default.library(), &LibraryInfo::current());

    let config = ClientConfig {
        utc_offset_seconds: -7200,
        fraction_style: FractionStyle::Legacy,
        ..ClientConfig::default()
    };
    let builder = EnvelopeBuilder::from_config(&config)?;
    assert_eq!(builder.offset().local_minus_utc(), -7200);
    assert_eq!(builder.fraction_style(), FractionStyle::Legacy);

    let envelope = builder.build(EventKind::Track, message(json!({ "timestamp": 1700000000 })));
    assert_eq!(envelope.timestamp(), Some("2023-11-14T20:13:20-02:00"));
    Ok(())
}

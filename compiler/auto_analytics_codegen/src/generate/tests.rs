#![allow(clippy::unwrap_used)]

use super::*;
use crate::discovery::VariantRegistry;
use crate::model::Location;
use pretty_assertions::assert_eq;

fn group(path: &str, variants: &[(&str, VariantShape, &[&str])]) -> ClosedEventGroup {
    let name = QualifiedName::parse(path);
    let mut registry = VariantRegistry::new();
    for (variant, shape, fields) in variants {
        registry.insert(EventVariant {
            name: name.child(*variant),
            shape: *shape,
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
        });
    }
    ClosedEventGroup {
        name,
        lifetimes: 0,
        location: Location::default(),
        registry,
        excluded: Vec::new(),
    }
}

fn arms(contents: &str) -> usize {
    contents.lines().filter(|l| l.trim_end().ends_with("=> {")).count()
}

#[test]
fn test_interactive_golden() {
    let group = group(
        "crate::events::Interactive",
        &[("ButtonClicked", VariantShape::Braced, &["label"])],
    );
    let artifact = generate(&group, &CodegenOptions::default());

    assert_eq!(artifact.file_name, "auto_analytics_interactive.rs");
    assert_eq!(artifact.group, group.name);
    assert_eq!(
        artifact.contents,
        r#"// @generated by auto-analytics from `crate::events::Interactive`. Do not edit.

/// Converts `crate::events::Interactive` to a name and payload and delegates it to `AutoAnalytics::track`.
///
/// This is a generated function. Do not edit.
#[allow(clippy::needless_late_init)]
pub fn track_interactive<T>(tracker: &T, event: &crate::events::Interactive)
where
    T: ::auto_analytics::AutoAnalytics + ?Sized,
{
    let name: &'static str;
    let payload: ::auto_analytics::Payload;
    match event {
        crate::events::Interactive::ButtonClicked { label } => {
            name = "BUTTON_CLICKED";
            payload = ::auto_analytics::Payload::from([
                ("label".to_owned(), ::auto_analytics::to_value(label)),
            ]);
        }
    }
    tracker.track(name, payload);
}
"#
    );
}

#[test]
fn test_lifecycle_empty_payloads() {
    let group = group(
        "crate::Lifecycle",
        &[
            ("ActivityCreated", VariantShape::Unit, &[]),
            ("ActivityDestroyed", VariantShape::Unit, &[]),
        ],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    assert_eq!(arms(&contents), 2);
    assert_eq!(contents.matches("payload = ::auto_analytics::Payload::new();").count(), 2);
    let created = contents.find("\"ACTIVITY_CREATED\"").unwrap();
    let destroyed = contents.find("\"ACTIVITY_DESTROYED\"").unwrap();
    assert!(created < destroyed);
    assert!(contents.contains("crate::Lifecycle::ActivityCreated => {"));
    assert!(!contents.contains("_ =>"));
    assert_eq!(contents.matches("tracker.track(name, payload);").count(), 1);
}

#[test]
fn test_keys_snake_cased_in_field_order() {
    let group = group(
        "crate::Search",
        &[("Submitted", VariantShape::Braced, &["queryText", "resultCount", "page"])],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    let keys: Vec<_> = contents
        .lines()
        .filter_map(|l| l.trim_start().strip_prefix("(\""))
        .map(|l| l.split('"').next().unwrap_or_default())
        .collect();
    assert_eq!(keys, ["query_text", "result_count", "page"]);
    assert!(contents.contains("crate::Search::Submitted { queryText, resultCount, page } => {"));
}

#[test]
fn test_reserved_bindings_renamed() {
    let group = group(
        "crate::Profile",
        &[("Renamed", VariantShape::Braced, &["name", "name_", "payload"])],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    assert!(contents
        .contains("crate::Profile::Renamed { name: name__, name_, payload: payload_ } => {"));
    assert!(contents.contains("(\"name\".to_owned(), ::auto_analytics::to_value(name__)),"));
    assert!(contents.contains("(\"payload\".to_owned(), ::auto_analytics::to_value(payload_)),"));
}

#[test]
fn test_raw_identifiers_escaped() {
    let group = group(
        "crate::async::Search",
        &[("Submitted", VariantShape::Braced, &["type"])],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    assert!(contents.contains("event: &crate::r#async::Search)"));
    assert!(contents.contains("Submitted { r#type } => {"));
    assert!(contents.contains("(\"type\".to_owned(), ::auto_analytics::to_value(r#type)),"));
}

#[test]
fn test_newtype_reads_through_event() {
    let group = group(
        "crate::Interactive",
        &[
            ("Scrolled", VariantShape::Newtype, &["offset", "type"]),
            ("Screen", VariantShape::Newtype, &[]),
        ],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    assert!(contents.contains("crate::Interactive::Scrolled(event) => {"));
    assert!(contents.contains("::auto_analytics::to_value(&event.offset)),"));
    assert!(contents.contains("::auto_analytics::to_value(&event.r#type)),"));
    assert!(contents.contains("crate::Interactive::Screen(_) => {"));
}

#[test]
fn test_tuple_and_empty_braced_patterns() {
    let group = group(
        "crate::Shapes",
        &[
            ("Empty", VariantShape::Tuple, &[]),
            ("Pair", VariantShape::Tuple, &["left", "right"]),
            ("Nothing", VariantShape::Braced, &[]),
        ],
    );
    let contents = generate(&group, &CodegenOptions::default()).contents;

    assert!(contents.contains("crate::Shapes::Empty(..) => {"));
    assert!(contents.contains("crate::Shapes::Pair(left, right) => {"));
    assert!(contents.contains("crate::Shapes::Nothing { .. } => {"));
}

#[test]
fn test_lifetimes_elided() {
    let mut group = group("crate::Borrowed", &[("Opened", VariantShape::Braced, &["title"])]);
    group.lifetimes = 2;
    let contents = generate(&group, &CodegenOptions::default()).contents;
    assert!(contents.contains("event: &crate::Borrowed<'_, '_>)"));
}

#[test]
fn test_runtime_path_option() {
    let group = group("crate::Lifecycle", &[("Created", VariantShape::Unit, &[])]);

    let reexported = CodegenOptions {
        runtime_crate: "crate::analytics".to_owned(),
    };
    let contents = generate(&group, &reexported).contents;
    assert!(contents.contains("T: crate::analytics::AutoAnalytics + ?Sized,"));
    assert!(contents.contains("payload = crate::analytics::Payload::new();"));

    let renamed = CodegenOptions {
        runtime_crate: "analytics_rt".to_owned(),
    };
    assert!(generate(&group, &renamed)
        .contents
        .contains("let payload: ::analytics_rt::Payload;"));
}

#[test]
fn test_generation_is_deterministic() {
    let group = group(
        "crate::Interactive",
        &[
            ("ButtonClicked", VariantShape::Braced, &["label"]),
            ("Refreshed", VariantShape::Unit, &[]),
        ],
    );
    let options = CodegenOptions::default();
    assert_eq!(generate(&group, &options), generate(&group, &options));
}

#[test]
fn test_excluded_variants_named_in_header() {
    let mut group = group("crate::Shapes", &[("Empty", VariantShape::Unit, &[])]);
    let contents = generate(&group, &CodegenOptions::default()).contents;
    assert!(!contents.contains("No fields could be read"));

    group.excluded = vec![
        QualifiedName::parse("crate::Shapes::Pair"),
        QualifiedName::parse("crate::Shapes::Foreign"),
    ];
    let contents = generate(&group, &CodegenOptions::default()).contents;
    let header: Vec<_> = contents.lines().take(3).collect();
    assert_eq!(
        header,
        [
            "// @generated by auto-analytics from `crate::Shapes`. Do not edit.",
            "// No fields could be read for `Pair`, `Foreign`, so this match has no arm for them.",
            "",
        ]
    );
    assert_eq!(arms(&contents), 1);
}

#[test]
fn test_names() {
    let name = QualifiedName::parse("crate::ui::ScreenEvents");
    assert_eq!(function_name(&name), "track_screen_events");
    assert_eq!(artifact_file_name(&name), "auto_analytics_screen_events.rs");
}

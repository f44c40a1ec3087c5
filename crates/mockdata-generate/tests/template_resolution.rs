use std::collections::BTreeSet;

use mockdata_generate::generators::ProviderRegistry;
use mockdata_generate::generators::custom::CustomKind;
use mockdata_generate::template::{DatasetKind, Directive, Template};
use mockdata_generate::{ColumnSpec, ConfigError, DatasetSchema};

fn schema(name: &str, columns: &[(&str, &str)]) -> DatasetSchema {
    DatasetSchema {
        name: name.to_string(),
        columns: columns
            .iter()
            .map(|(name, spec)| ColumnSpec {
                name: name.to_string(),
                spec: spec.to_string(),
            })
            .collect(),
    }
}

fn custom(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn named_dataset_resolves_each_kind_in_order() {
    let registry = ProviderRegistry::new();
    let schema = schema(
        "people",
        &[
            ("who", "name"),
            ("paid", "amount"),
            ("when", "ts"),
            ("where", "gps_loc"),
            ("odd", "no_such_generator"),
            ("price", "price"),
        ],
    );
    let custom = custom(&["amount", "ts", "gps_loc", "text", "price"]);

    let template = Template::resolve(&schema, &custom, &registry).expect("resolve");
    assert_eq!(template.kind(), DatasetKind::Named);
    assert_eq!(template.len(), schema.columns.len());
    assert_eq!(
        template.directives(),
        &[
            Directive::Provider("name".to_string()),
            Directive::Custom(CustomKind::Amount),
            Directive::Custom(CustomKind::Ts),
            Directive::Custom(CustomKind::GpsLoc),
            Directive::Fallback,
            Directive::Unsupported("price".to_string()),
        ]
    );
    assert_eq!(template.fallback_count(), 1);
}

#[test]
fn custom_membership_wins_over_provider() {
    let registry = ProviderRegistry::new();
    let schema = schema("notes", &[("body", "text")]);

    let with_custom = Template::resolve(&schema, &custom(&["text"]), &registry).expect("resolve");
    assert_eq!(
        with_custom.directives(),
        &[Directive::Custom(CustomKind::Text)]
    );

    let without_custom = Template::resolve(&schema, &custom(&[]), &registry).expect("resolve");
    assert_eq!(
        without_custom.directives(),
        &[Directive::Provider("text".to_string())]
    );
}

#[test]
fn provider_listed_as_custom_without_handler_is_unsupported() {
    let registry = ProviderRegistry::new();
    let schema = schema("people", &[("who", "name")]);
    let template = Template::resolve(&schema, &custom(&["name"]), &registry).expect("resolve");
    assert_eq!(
        template.directives(),
        &[Directive::Unsupported("name".to_string())]
    );
}

#[test]
fn dummy_specs_are_lengths() {
    let registry = ProviderRegistry::new();
    let invalid = schema("dummy", &[("a", "5"), ("b", "0"), ("c", "name")]);
    let result = Template::resolve(&invalid, &custom(&[]), &registry);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    let valid = schema("dummy", &[("a", "5"), ("b", "0")]);
    let template = Template::resolve(&valid, &custom(&[]), &registry).expect("resolve");
    assert!(template.is_dummy());
    assert_eq!(
        template.directives(),
        &[Directive::DummyLength(5), Directive::DummyLength(0)]
    );
}

#[test]
fn empty_schema_gives_empty_template() {
    let registry = ProviderRegistry::new();
    let template =
        Template::resolve(&schema("empty", &[]), &custom(&[]), &registry).expect("resolve");
    assert!(template.is_empty());
}

#[test]
fn fallback_text_follows_custom_text_length() {
    let registry = ProviderRegistry::new();
    let schema = schema("notes", &[("odd", "no_such_generator")]);

    let short = Template::resolve(&schema, &custom(&["text"]), &registry).expect("resolve");
    assert_eq!(short.directives(), &[Directive::Fallback]);
    assert_eq!(short.fallback_chars(), 30);

    let long = Template::resolve(&schema, &custom(&["amount"]), &registry).expect("resolve");
    assert_eq!(long.fallback_chars(), 200);
}

use pretty_assertions::assert_eq;

use super::fixture;
use crate::{
    registry::{
        Cardinality, ContentModelRegistry, EntityTypeCategory, FieldFlags, FieldStorageDescriptor, InMemoryRegistry,
    },
    DerivationConfig, DerivedSchema, RegistryError,
};

#[test]
fn bundles_keep_registry_order_and_labels() {
    let registry = fixture("site.toml");

    let bundles = registry.bundles("node").unwrap();
    let ids = bundles.keys().map(String::as_str).collect::<Vec<_>>();

    assert_eq!(ids, ["page", "article"]);
    assert_eq!(bundles["page"].label(), Some("Basic page"));
    assert_eq!(bundles["page"].entity_type_id(), "node");

    let entity_types = registry.entity_types().unwrap();
    let content = entity_types
        .iter()
        .map(|entity_type| (entity_type.id(), entity_type.is_content()))
        .collect::<Vec<_>>();

    assert_eq!(
        content,
        [("node_type", false), ("node", true), ("taxonomy_term", true)]
    );
}

#[test]
fn storages_are_shared_across_bundles() {
    let registry = fixture("site.toml");

    let page = registry.field_definitions("node", "page").unwrap();
    let article = registry.field_definitions("node", "article").unwrap();

    assert!(std::ptr::eq(page["body"].storage(), article["body"].storage()));
    assert_eq!(
        article["body"].storage().property_definitions().keys().collect::<Vec<_>>(),
        ["value", "summary", "format"]
    );
    assert_eq!(article["field_image"].storage().main_property_name(), Some("target_id"));
    assert!(article["field_image"].is_multiple());
}

#[test]
fn unknown_identifiers() {
    let registry = fixture("site.toml");

    assert_eq!(
        registry.bundles("user").unwrap_err(),
        RegistryError::UnknownEntityType(String::from("user"))
    );
    assert_eq!(
        registry.field_definitions("node", "blog").unwrap_err(),
        RegistryError::UnknownBundle {
            entity_type: String::from("node"),
            bundle: String::from("blog"),
        }
    );
}

#[test]
fn missing_storage_fails_the_pass() {
    let registry = InMemoryRegistry::from_toml_str(
        r#"
        [entity_types.node]
        category = "content"

        [entity_types.node.bundles.page.fields.title]
        required = true
        "#,
    )
    .unwrap();

    let error = crate::derive_schema(&registry).unwrap_err();

    assert_eq!(
        error,
        crate::DeriveError::Registry(RegistryError::MissingFieldStorage {
            entity_type: String::from("node"),
            field: String::from("title"),
        })
    );
}

#[test]
fn json_snapshot() {
    let registry = InMemoryRegistry::from_json_str(
        r#"{
            "entity_types": {
                "media": {
                    "category": "content",
                    "storages": {
                        "name": { "properties": { "value": "string" }, "main_property": "value" }
                    },
                    "bundles": {
                        "image": { "fields": { "name": { "required": true } } }
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let schema = crate::derive_schema(&registry).unwrap();
    assert_eq!(schema.mutation("media", "image").unwrap().name, "createMediaImage");
}

#[test]
fn unknown_snapshot_keys_are_rejected() {
    let error = InMemoryRegistry::from_toml_str(
        r#"
        [entity_types.node]
        category = "content"
        translatable = true
        "#,
    )
    .unwrap_err();

    assert!(error.to_string().contains("unknown field"));
}

#[test]
fn built_registry_matches_the_snapshot() {
    let mut registry = InMemoryRegistry::default();
    registry.insert_entity_type("article", EntityTypeCategory::Content);

    let title = FieldStorageDescriptor::new("title", Cardinality::Single)
        .with_property("value", "string")
        .with_main_property("value");
    let tags = FieldStorageDescriptor::new("tags", Cardinality::Multiple)
        .with_property("target_id", "integer")
        .with_main_property("target_id");
    let body = FieldStorageDescriptor::new("body", Cardinality::Single)
        .with_property("value", "string")
        .with_property("format", "string")
        .with_main_property("value");

    for storage in [title, tags, body] {
        registry.insert_storage("article", storage).unwrap();
    }

    registry.insert_bundle("article", "article").unwrap();

    let fields = [
        (
            "title",
            FieldFlags {
                required: true,
                ..FieldFlags::default()
            },
        ),
        ("tags", FieldFlags::default()),
        (
            "body",
            FieldFlags {
                computed: true,
                ..FieldFlags::default()
            },
        ),
    ];

    for (name, flags) in fields {
        registry.insert_field("article", "article", name, flags).unwrap();
    }

    let config = DerivationConfig::default();

    assert_eq!(
        DerivedSchema::derive(&registry, &config).unwrap(),
        DerivedSchema::derive(&fixture("article.toml"), &config).unwrap()
    );

    assert_eq!(
        registry
            .insert_field("article", "page", "title", FieldFlags::default())
            .unwrap_err(),
        RegistryError::UnknownBundle {
            entity_type: String::from("article"),
            bundle: String::from("page"),
        }
    );
}

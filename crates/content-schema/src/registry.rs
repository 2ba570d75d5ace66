//! The content-model registry the schema is derived from.
//!
//! The registry is owned by the host. Derivation only reads from it and
//! assumes it does not change for the duration of a pass.

mod in_memory;

use std::sync::Arc;

use indexmap::IndexMap;

pub use self::in_memory::{FieldFlags, InMemoryRegistry};
use crate::RegistryError;

/// Read access to entity types, their bundles and the fields of each bundle.
pub trait ContentModelRegistry {
    /// All entity types, in registry order.
    fn entity_types(&self) -> Result<Vec<EntityTypeDescriptor>, RegistryError>;

    fn bundles(&self, entity_type_id: &str) -> Result<IndexMap<String, BundleDescriptor>, RegistryError>;

    fn field_definitions(
        &self,
        entity_type_id: &str,
        bundle_id: &str,
    ) -> Result<IndexMap<String, FieldDescriptor>, RegistryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTypeCategory {
    /// Stored, bundled content with field data.
    Content,
    /// Structural or configuration entities.
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeDescriptor {
    id: String,
    category: EntityTypeCategory,
}

impl EntityTypeDescriptor {
    pub fn new(id: impl Into<String>, category: EntityTypeCategory) -> Self {
        Self {
            id: id.into(),
            category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_content(&self) -> bool {
        self.category == EntityTypeCategory::Content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDescriptor {
    entity_type_id: String,
    id: String,
    label: Option<String>,
}

impl BundleDescriptor {
    pub fn new(entity_type_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type_id: entity_type_id.into(),
            id: id.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn entity_type_id(&self) -> &str {
        &self.entity_type_id
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    Single,
    Multiple,
}

/// The value shape of a field, shared by every bundle of an entity type
/// that has a field with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStorageDescriptor {
    name: String,
    cardinality: Cardinality,
    properties: IndexMap<String, String>,
    main_property: Option<String>,
}

impl FieldStorageDescriptor {
    pub fn new(name: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            cardinality,
            properties: IndexMap::new(),
            main_property: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, property_type: impl Into<String>) -> Self {
        self.properties.insert(name.into(), property_type.into());
        self
    }

    #[must_use]
    pub fn with_main_property(mut self, name: impl Into<String>) -> Self {
        self.main_property = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Property name to property type, in declaration order.
    pub fn property_definitions(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn main_property_name(&self) -> Option<&str> {
        self.main_property.as_deref()
    }

    /// True if the only property of this storage is its main property.
    pub fn is_single_value(&self) -> bool {
        match (self.properties.first(), self.main_property_name()) {
            (Some((property, _)), Some(main_property)) => self.properties.len() == 1 && property == main_property,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    required: bool,
    computed: bool,
    read_only: bool,
    storage: Arc<FieldStorageDescriptor>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, storage: Arc<FieldStorageDescriptor>) -> Self {
        Self {
            name: name.into(),
            required: false,
            computed: false,
            read_only: false,
            storage,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_multiple(&self) -> bool {
        self.storage.cardinality() == Cardinality::Multiple
    }

    pub fn storage(&self) -> &FieldStorageDescriptor {
        &self.storage
    }
}

/// Every (content entity type, bundle) pair, in registry order.
pub(crate) fn content_bundles<R>(registry: &R) -> Result<Vec<(EntityTypeDescriptor, BundleDescriptor)>, RegistryError>
where
    R: ContentModelRegistry + ?Sized,
{
    let mut pairs = Vec::new();

    for entity_type in registry.entity_types()? {
        if !entity_type.is_content() {
            tracing::trace!(entity_type = entity_type.id(), "skipping non-content entity type");
            continue;
        }

        for (_, bundle) in registry.bundles(entity_type.id())? {
            pairs.push((entity_type.clone(), bundle));
        }
    }

    Ok(pairs)
}

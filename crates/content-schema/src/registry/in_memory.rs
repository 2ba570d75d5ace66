use std::sync::Arc;

use indexmap::IndexMap;

use super::{
    BundleDescriptor, Cardinality, ContentModelRegistry, EntityTypeCategory, EntityTypeDescriptor, FieldDescriptor,
    FieldStorageDescriptor,
};
use crate::{ConfigError, RegistryError};

/// A registry snapshot held in memory.
///
/// Storage definitions belong to the entity type and are looked up by field
/// name, so every bundle with a field of that name shares one storage.
///
/// ```toml
/// [entity_types.article]
/// category = "content"
///
/// [entity_types.article.storages.title]
/// properties = { value = "string" }
/// main_property = "value"
///
/// [entity_types.article.bundles.article.fields.title]
/// required = true
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistry {
    entity_types: IndexMap<String, EntityTypeEntry>,
}

#[derive(Debug, Clone)]
struct EntityTypeEntry {
    category: EntityTypeCategory,
    storages: IndexMap<String, Arc<FieldStorageDescriptor>>,
    bundles: IndexMap<String, BundleEntry>,
}

#[derive(Debug, Clone, Default)]
struct BundleEntry {
    label: Option<String>,
    fields: IndexMap<String, FieldFlags>,
}

/// The per-bundle flags of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldFlags {
    pub required: bool,
    pub computed: bool,
    pub read_only: bool,
}

impl InMemoryRegistry {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let snapshot: Snapshot = toml::from_str(input)?;
        Ok(snapshot.into())
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let snapshot: Snapshot = serde_json::from_str(input)?;
        Ok(snapshot.into())
    }

    pub fn insert_entity_type(&mut self, id: impl Into<String>, category: EntityTypeCategory) {
        self.entity_types.insert(
            id.into(),
            EntityTypeEntry {
                category,
                storages: IndexMap::new(),
                bundles: IndexMap::new(),
            },
        );
    }

    pub fn insert_storage(&mut self, entity_type_id: &str, storage: FieldStorageDescriptor) -> Result<(), RegistryError> {
        let entity_type = self.entity_type_mut(entity_type_id)?;

        entity_type
            .storages
            .insert(storage.name().to_string(), Arc::new(storage));

        Ok(())
    }

    pub fn insert_bundle(&mut self, entity_type_id: &str, bundle_id: impl Into<String>) -> Result<(), RegistryError> {
        let entity_type = self.entity_type_mut(entity_type_id)?;
        entity_type.bundles.insert(bundle_id.into(), BundleEntry::default());

        Ok(())
    }

    /// Adds a field to a bundle. The storage is resolved when fields are
    /// listed, not here.
    pub fn insert_field(
        &mut self,
        entity_type_id: &str,
        bundle_id: &str,
        field_name: impl Into<String>,
        flags: FieldFlags,
    ) -> Result<(), RegistryError> {
        let bundle = self
            .entity_type_mut(entity_type_id)?
            .bundles
            .get_mut(bundle_id)
            .ok_or_else(|| RegistryError::UnknownBundle {
                entity_type: entity_type_id.to_string(),
                bundle: bundle_id.to_string(),
            })?;

        bundle.fields.insert(field_name.into(), flags);

        Ok(())
    }

    fn entity_type(&self, entity_type_id: &str) -> Result<&EntityTypeEntry, RegistryError> {
        self.entity_types
            .get(entity_type_id)
            .ok_or_else(|| RegistryError::UnknownEntityType(entity_type_id.to_string()))
    }

    fn entity_type_mut(&mut self, entity_type_id: &str) -> Result<&mut EntityTypeEntry, RegistryError> {
        self.entity_types
            .get_mut(entity_type_id)
            .ok_or_else(|| RegistryError::UnknownEntityType(entity_type_id.to_string()))
    }
}

impl ContentModelRegistry for InMemoryRegistry {
    fn entity_types(&self) -> Result<Vec<EntityTypeDescriptor>, RegistryError> {
        Ok(self
            .entity_types
            .iter()
            .map(|(id, entry)| EntityTypeDescriptor::new(id.clone(), entry.category))
            .collect())
    }

    fn bundles(&self, entity_type_id: &str) -> Result<IndexMap<String, BundleDescriptor>, RegistryError> {
        let entity_type = self.entity_type(entity_type_id)?;

        Ok(entity_type
            .bundles
            .iter()
            .map(|(id, entry)| {
                let mut bundle = BundleDescriptor::new(entity_type_id, id.clone());

                if let Some(label) = &entry.label {
                    bundle = bundle.with_label(label.clone());
                }

                (id.clone(), bundle)
            })
            .collect())
    }

    fn field_definitions(
        &self,
        entity_type_id: &str,
        bundle_id: &str,
    ) -> Result<IndexMap<String, FieldDescriptor>, RegistryError> {
        let entity_type = self.entity_type(entity_type_id)?;

        let bundle = entity_type
            .bundles
            .get(bundle_id)
            .ok_or_else(|| RegistryError::UnknownBundle {
                entity_type: entity_type_id.to_string(),
                bundle: bundle_id.to_string(),
            })?;

        bundle
            .fields
            .iter()
            .map(|(name, flags)| {
                let storage = entity_type
                    .storages
                    .get(name)
                    .ok_or_else(|| RegistryError::MissingFieldStorage {
                        entity_type: entity_type_id.to_string(),
                        field: name.clone(),
                    })?;

                let field = FieldDescriptor::new(name.clone(), Arc::clone(storage))
                    .required(flags.required)
                    .computed(flags.computed)
                    .read_only(flags.read_only);

                Ok::<_, RegistryError>((name.clone(), field))
            })
            .collect()
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Snapshot {
    #[serde(default)]
    entity_types: IndexMap<String, EntityTypeSnapshot>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityTypeSnapshot {
    category: EntityTypeCategory,
    #[serde(default)]
    storages: IndexMap<String, StorageSnapshot>,
    #[serde(default)]
    bundles: IndexMap<String, BundleSnapshot>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageSnapshot {
    #[serde(default)]
    cardinality: Cardinality,
    #[serde(default)]
    properties: IndexMap<String, String>,
    main_property: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleSnapshot {
    label: Option<String>,
    #[serde(default)]
    fields: IndexMap<String, FieldFlags>,
}

impl From<Snapshot> for InMemoryRegistry {
    fn from(snapshot: Snapshot) -> Self {
        let entity_types = snapshot
            .entity_types
            .into_iter()
            .map(|(id, entity_type)| {
                let storages = entity_type
                    .storages
                    .into_iter()
                    .map(|(name, storage)| {
                        let mut descriptor = FieldStorageDescriptor::new(name.clone(), storage.cardinality);

                        for (property, property_type) in storage.properties {
                            descriptor = descriptor.with_property(property, property_type);
                        }

                        if let Some(main_property) = storage.main_property {
                            descriptor = descriptor.with_main_property(main_property);
                        }

                        (name, Arc::new(descriptor))
                    })
                    .collect();

                let bundles = entity_type
                    .bundles
                    .into_iter()
                    .map(|(id, bundle)| {
                        let entry = BundleEntry {
                            label: bundle.label,
                            fields: bundle.fields,
                        };

                        (id, entry)
                    })
                    .collect();

                let entry = EntityTypeEntry {
                    category: entity_type.category,
                    storages,
                    bundles,
                };

                (id, entry)
            })
            .collect();

        InMemoryRegistry { entity_types }
    }
}

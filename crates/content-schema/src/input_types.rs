use indexmap::{map::Entry, IndexMap};
use wrapping::TypeRef;

use crate::{
    eligibility::{eligibility, Eligibility},
    names::MetaNames,
    registry::{content_bundles, BundleDescriptor, ContentModelRegistry, EntityTypeDescriptor, FieldDescriptor},
    DerivationConfig, DeriveError, Derivatives, InputFieldDefinition, InputMode, InputTypeDefinition,
};

/// Derives a create and an update input object for every content bundle.
pub struct InputTypeDeriver<'a, R: ?Sized> {
    registry: &'a R,
    config: &'a DerivationConfig,
}

impl<'a, R> InputTypeDeriver<'a, R>
where
    R: ContentModelRegistry + ?Sized,
{
    pub fn new(registry: &'a R, config: &'a DerivationConfig) -> Self {
        Self { registry, config }
    }

    pub fn derive(&self) -> Result<Derivatives<InputTypeDefinition>, DeriveError> {
        let mut derivatives = Derivatives::default();
        // field input type name -> "{entity_type}:{field}"
        let mut field_input_types = IndexMap::new();

        for (entity_type, bundle) in content_bundles(self.registry)? {
            let fields = self.registry.field_definitions(entity_type.id(), bundle.id())?;

            tracing::debug!(
                entity_type = entity_type.id(),
                bundle = bundle.id(),
                fields = fields.len(),
                "deriving input types"
            );

            for mode in InputMode::ALL {
                let definition = self.input_type(&entity_type, &bundle, &fields, mode, &mut field_input_types)?;
                let id = InputTypeDefinition::derivative_id(entity_type.id(), bundle.id(), mode);

                derivatives.insert(id, definition)?;
            }
        }

        tracing::debug!(input_types = derivatives.len(), "input type derivation finished");

        Ok(derivatives)
    }

    fn input_type(
        &self,
        entity_type: &EntityTypeDescriptor,
        bundle: &BundleDescriptor,
        fields: &IndexMap<String, FieldDescriptor>,
        mode: InputMode,
        field_input_types: &mut IndexMap<String, String>,
    ) -> Result<InputTypeDefinition, DeriveError> {
        let name = MetaNames::input_type(entity_type.id(), bundle.id(), mode);
        let mut input_fields = IndexMap::new();

        for (field_id, field) in fields {
            if let Eligibility::Excluded(reason) = eligibility(field) {
                tracing::trace!(
                    entity_type = entity_type.id(),
                    bundle = bundle.id(),
                    field = field_id.as_str(),
                    reason = reason.as_str(),
                    "skipping field"
                );
                continue;
            }

            let base = self.field_base_type(entity_type.id(), field_id, field, field_input_types)?;
            let definition = InputFieldDefinition {
                field_name: field_id.clone(),
                ty: mode.field_type(&base, field.is_required()),
            };

            match input_fields.entry(MetaNames::field_key(field_id)) {
                Entry::Occupied(entry) => {
                    let existing: &InputFieldDefinition = entry.get();

                    return Err(DeriveError::FieldKeyCollision {
                        type_name: name,
                        key: entry.key().clone(),
                        first: existing.field_name.clone(),
                        second: field_id.clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(definition);
                }
            }
        }

        Ok(InputTypeDefinition {
            name,
            mode,
            fields: input_fields,
            entity_type: entity_type.id().to_string(),
            entity_bundle: bundle.id().to_string(),
            data_type: MetaNames::data_type(entity_type.id(), bundle.id()),
        })
    }

    /// The field type before the mode decides on nullability.
    ///
    /// A field input type belongs to one field storage, so its name may only
    /// be reused by the same field of the same entity type.
    fn field_base_type(
        &self,
        entity_type_id: &str,
        field_id: &str,
        field: &FieldDescriptor,
        field_input_types: &mut IndexMap<String, String>,
    ) -> Result<TypeRef, DeriveError> {
        // A field holding only its main property adds no structure of its own.
        let type_name = if field.storage().is_single_value() {
            self.config.collapsed_scalar.clone()
        } else {
            let name = MetaNames::field_input_type(entity_type_id, field_id);
            let owner = format!("{entity_type_id}:{field_id}");

            match field_input_types.entry(name.clone()) {
                Entry::Occupied(entry) if *entry.get() != owner => {
                    return Err(DeriveError::NamingCollision {
                        name,
                        first: entry.get().clone(),
                        second: owner,
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(owner);
                }
            }

            name
        };

        let ty = TypeRef::named(type_name);

        if field.is_multiple() {
            Ok(ty.wrap_list())
        } else {
            Ok(ty)
        }
    }
}

use wrapping::TypeRef;

use crate::{
    names::{MetaNames, INPUT_ARG_INPUT},
    registry::{content_bundles, ContentModelRegistry},
    DeriveError, Derivatives, MutationDefinition,
};

/// Derives a create mutation for every content bundle.
///
/// The argument type is computed from the same naming convention the input
/// deriver uses, so both can run independently.
pub struct MutationDeriver<'a, R: ?Sized> {
    registry: &'a R,
}

impl<'a, R> MutationDeriver<'a, R>
where
    R: ContentModelRegistry + ?Sized,
{
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub fn derive(&self) -> Result<Derivatives<MutationDefinition>, DeriveError> {
        let mut derivatives = Derivatives::default();

        for (entity_type, bundle) in content_bundles(self.registry)? {
            let input_type = MetaNames::create_input_type(entity_type.id(), bundle.id());
            let argument = TypeRef::named(input_type.clone()).wrap_non_null();

            tracing::debug!(
                entity_type = entity_type.id(),
                bundle = bundle.id(),
                "deriving create mutation"
            );

            let definition = MutationDefinition {
                name: MetaNames::create_mutation(entity_type.id(), bundle.id()),
                arguments: [(INPUT_ARG_INPUT.to_string(), argument)].into(),
                input_type,
                entity_type: entity_type.id().to_string(),
                entity_bundle: bundle.id().to_string(),
            };

            let id = MutationDefinition::derivative_id(entity_type.id(), bundle.id());
            derivatives.insert(id, definition)?;
        }

        tracing::debug!(mutations = derivatives.len(), "mutation derivation finished");

        Ok(derivatives)
    }
}

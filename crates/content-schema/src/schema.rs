use serde_json::{Map, Value};

use crate::{
    BaseDefinition, ContentModelRegistry, DefinitionKind, DerivationConfig, DeriveError, Derivatives, InputMode,
    InputTypeDefinition, InputTypeDeriver, MutationDefinition, MutationDeriver,
};

/// Receives the derived definitions once a pass has completed.
pub trait SchemaSink {
    type Error;

    /// The envelope every derived record of this kind is laid over.
    fn base_definition(&self, _kind: DefinitionKind) -> BaseDefinition {
        BaseDefinition::default()
    }

    fn register(&mut self, kind: DefinitionKind, id: &str, record: Map<String, Value>) -> Result<(), Self::Error>;
}

/// The complete result of one derivation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedSchema {
    pub input_types: Derivatives<InputTypeDefinition>,
    pub mutations: Derivatives<MutationDefinition>,
}

impl DerivedSchema {
    /// Runs both derivers over the registry. Any registry failure aborts the
    /// whole pass.
    pub fn derive<R>(registry: &R, config: &DerivationConfig) -> Result<Self, DeriveError>
    where
        R: ContentModelRegistry + ?Sized,
    {
        let input_types = InputTypeDeriver::new(registry, config).derive()?;
        let mutations = MutationDeriver::new(registry).derive()?;

        tracing::debug!(
            input_types = input_types.len(),
            mutations = mutations.len(),
            "derived content schema"
        );

        Ok(Self { input_types, mutations })
    }

    pub fn input_type(&self, entity_type: &str, bundle: &str, mode: InputMode) -> Option<&InputTypeDefinition> {
        self.input_types
            .get(&InputTypeDefinition::derivative_id(entity_type, bundle, mode))
    }

    pub fn mutation(&self, entity_type: &str, bundle: &str) -> Option<&MutationDefinition> {
        self.mutations
            .get(&MutationDefinition::derivative_id(entity_type, bundle))
    }

    /// Hands every definition to the sink, input types first.
    pub fn publish<S>(&self, sink: &mut S) -> Result<(), S::Error>
    where
        S: SchemaSink + ?Sized,
    {
        let base = sink.base_definition(DefinitionKind::InputType);

        for (id, definition) in self.input_types.iter() {
            sink.register(DefinitionKind::InputType, id, base.merge(definition.record()))?;
        }

        let base = sink.base_definition(DefinitionKind::Mutation);

        for (id, definition) in self.mutations.iter() {
            sink.register(DefinitionKind::Mutation, id, base.merge(definition.record()))?;
        }

        Ok(())
    }
}

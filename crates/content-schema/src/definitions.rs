use indexmap::{map::Entry, IndexMap};
use serde_json::{json, Map, Value};
use wrapping::TypeRef;

use crate::DeriveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    Create,
    Update,
}

impl InputMode {
    pub const ALL: [InputMode; 2] = [InputMode::Create, InputMode::Update];

    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Create => "create",
            InputMode::Update => "update",
        }
    }

    /// Nullability per mode: create keeps required fields non-null, update
    /// accepts any subset of fields.
    pub fn field_type(self, base: &TypeRef, required: bool) -> TypeRef {
        match self {
            InputMode::Create if required => base.clone().wrap_non_null(),
            InputMode::Create | InputMode::Update => base.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    InputType,
    Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFieldDefinition {
    pub field_name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTypeDefinition {
    pub name: String,
    pub mode: InputMode,
    pub fields: IndexMap<String, InputFieldDefinition>,
    pub entity_type: String,
    pub entity_bundle: String,
    pub data_type: String,
}

impl InputTypeDefinition {
    pub(crate) fn derivative_id(entity_type: &str, bundle: &str, mode: InputMode) -> String {
        format!("{entity_type}:{bundle}:{}", mode.as_str())
    }

    pub fn record(&self) -> Map<String, Value> {
        let fields = self
            .fields
            .iter()
            .map(|(key, field)| {
                let value = json!({
                    "field_name": field.field_name,
                    "type": field.ty,
                });

                (key.clone(), value)
            })
            .collect::<Map<_, _>>();

        let record = json!({
            "name": self.name,
            "mode": self.mode.as_str(),
            "fields": fields,
            "entity_type": self.entity_type,
            "entity_bundle": self.entity_bundle,
            "data_type": self.data_type,
        });

        into_object(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationDefinition {
    pub name: String,
    pub arguments: IndexMap<String, TypeRef>,
    /// The unwrapped name of the create input type.
    pub input_type: String,
    pub entity_type: String,
    pub entity_bundle: String,
}

impl MutationDefinition {
    pub(crate) fn derivative_id(entity_type: &str, bundle: &str) -> String {
        format!("{entity_type}:{bundle}")
    }

    pub fn record(&self) -> Map<String, Value> {
        let arguments = self
            .arguments
            .iter()
            .map(|(name, ty)| (name.clone(), json!(ty)))
            .collect::<Map<_, _>>();

        let record = json!({
            "name": self.name,
            "arguments": arguments,
            "input_type": self.input_type,
            "entity_type": self.entity_type,
            "entity_bundle": self.entity_bundle,
        });

        into_object(record)
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        _ => Map::new(),
    }
}

/// Definition metadata supplied by the sink and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(transparent)]
pub struct BaseDefinition(Map<String, Value>);

impl BaseDefinition {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Lays a derived record over the base. Keys set by the derivation win,
    /// every other base key is kept.
    pub fn merge(&self, derived: Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.0.clone();

        for (key, value) in derived {
            merged.insert(key, value);
        }

        merged
    }
}

pub(crate) trait SchemaName {
    fn schema_name(&self) -> &str;
}

impl SchemaName for InputTypeDefinition {
    fn schema_name(&self) -> &str {
        &self.name
    }
}

impl SchemaName for MutationDefinition {
    fn schema_name(&self) -> &str {
        &self.name
    }
}

/// Definitions produced by one pass, keyed by derivative id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivatives<T> {
    definitions: IndexMap<String, T>,
    // schema name -> derivative id
    names: IndexMap<String, String>,
}

impl<T> Default for Derivatives<T> {
    fn default() -> Self {
        Self {
            definitions: IndexMap::new(),
            names: IndexMap::new(),
        }
    }
}

impl<T> Derivatives<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.definitions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.definitions.iter().map(|(id, definition)| (id.as_str(), definition))
    }

    pub fn definitions(&self) -> impl Iterator<Item = &T> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<T: SchemaName> Derivatives<T> {
    /// Refuses to overwrite: both the derivative id and the schema name must
    /// be new.
    pub(crate) fn insert(&mut self, id: String, definition: T) -> Result<(), DeriveError> {
        if let Some(existing) = self.definitions.get(&id) {
            return Err(DeriveError::DuplicateDerivative {
                first: existing.schema_name().to_string(),
                second: definition.schema_name().to_string(),
                id,
            });
        }

        match self.names.entry(definition.schema_name().to_string()) {
            Entry::Occupied(entry) => {
                return Err(DeriveError::NamingCollision {
                    name: entry.key().clone(),
                    first: entry.get().clone(),
                    second: id,
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(id.clone());
            }
        }

        self.definitions.insert(id, definition);

        Ok(())
    }
}

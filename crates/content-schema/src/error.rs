/// Failures of the content-model registry while it is being enumerated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("The content-model registry is unavailable: {0}")]
    Unavailable(String),
    #[error("The entity type {0} does not exist in the registry")]
    UnknownEntityType(String),
    #[error("The bundle {bundle} does not exist on entity type {entity_type}")]
    UnknownBundle { entity_type: String, bundle: String },
    #[error("The field {field} on entity type {entity_type} has no storage definition")]
    MissingFieldStorage { entity_type: String, field: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("The name {name} is derived for both {first} and {second}")]
    NamingCollision { name: String, first: String, second: String },
    #[error("The derivative {id} is produced twice, as {first} and as {second}")]
    DuplicateDerivative { id: String, first: String, second: String },
    #[error("The fields {first} and {second} both map to the key {key} on {type_name}")]
    FieldKeyCollision {
        type_name: String,
        key: String,
        first: String,
        second: String,
    },
}

/// Errors reading a configuration file or a registry snapshot.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse the TOML document: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Could not parse the JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

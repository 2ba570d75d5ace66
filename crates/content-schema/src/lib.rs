//! Derives GraphQL create/update input types and create mutations from a
//! content-model registry of entity types, bundles and fields.
//!
//! A pass reads the registry once and returns a [`DerivedSchema`]. Nothing is
//! cached between passes; rebuilding the schema means deriving again.

mod config;
mod definitions;
mod eligibility;
mod error;
mod input_types;
mod mutations;
mod schema;
mod sdl;

pub mod names;
pub mod registry;


pub use config::DerivationConfig;
pub use definitions::{
    BaseDefinition, DefinitionKind, Derivatives, InputFieldDefinition, InputMode, InputTypeDefinition,
    MutationDefinition,
};
pub use eligibility::{eligibility, Eligibility, ExclusionReason};
pub use error::{ConfigError, DeriveError, RegistryError};
pub use input_types::InputTypeDeriver;
pub use mutations::MutationDeriver;
pub use registry::ContentModelRegistry;
pub use schema::{DerivedSchema, SchemaSink};
pub use sdl::render_sdl;
pub use wrapping::{TypeRef, Wrapping, WrappingType};

/// Derives the schema with the default configuration.
pub fn derive_schema<R>(registry: &R) -> Result<DerivedSchema, DeriveError>
where
    R: ContentModelRegistry + ?Sized,
{
    DerivedSchema::derive(registry, &DerivationConfig::default())
}

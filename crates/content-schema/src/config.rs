use crate::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings for a derivation pass.
pub struct DerivationConfig {
    /// The scalar a field collapses to when its storage holds nothing but
    /// the main property.
    ///
    /// Numeric and boolean single-property fields collapse to this scalar
    /// too. The real property type is not inferred.
    pub collapsed_scalar: String,
    /// Return type of the derived mutations when rendered as SDL.
    pub mutation_output_type: String,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            collapsed_scalar: String::from("String"),
            mutation_output_type: String::from("EntityCrudOutput"),
        }
    }
}

impl DerivationConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

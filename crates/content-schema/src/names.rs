use crate::InputMode;

pub const INPUT_ARG_INPUT: &str = "input";
pub const DATA_TYPE_PREFIX: &str = "entity";
pub const DATA_TYPE_SEPARATOR: &str = ":";

pub struct MetaNames;

/// CONVENTIONS:
///     - Every segment is split on non-alphanumeric characters.
///     - Each word gets its first character upper-cased, the rest is kept as is.
///     - Types and inputs are PascalCase, field keys and mutations camelCase.
///     - Inputs are suffixed by "input".
///     - A name never starts with a digit, an underscore is prepended instead.
impl MetaNames {
    /// Joins the segments into one PascalCase type name.
    pub fn compose(segments: &[&str]) -> String {
        escape_leading_digit(pascal_case(segments))
    }

    /// Same words as [`MetaNames::compose`], first letter lower-cased.
    pub fn compose_camel(segments: &[&str]) -> String {
        escape_leading_digit(lower_first(&pascal_case(segments)))
    }

    pub fn field_key(field_id: &str) -> String {
        Self::compose_camel(&[field_id])
    }

    pub fn input_type(entity_type_id: &str, bundle_id: &str, mode: InputMode) -> String {
        Self::compose(&[entity_type_id, bundle_id, mode.as_str(), "input"])
    }

    pub fn create_input_type(entity_type_id: &str, bundle_id: &str) -> String {
        Self::input_type(entity_type_id, bundle_id, InputMode::Create)
    }

    pub fn update_input_type(entity_type_id: &str, bundle_id: &str) -> String {
        Self::input_type(entity_type_id, bundle_id, InputMode::Update)
    }

    /// The dedicated input object of a multi-property field.
    pub fn field_input_type(entity_type_id: &str, field_id: &str) -> String {
        Self::compose(&[entity_type_id, field_id, "field", "input"])
    }

    pub fn create_mutation(entity_type_id: &str, bundle_id: &str) -> String {
        Self::compose_camel(&["create", entity_type_id, bundle_id])
    }

    /// Tag the sink uses to resolve submitted input back to its entity and bundle.
    pub fn data_type(entity_type_id: &str, bundle_id: &str) -> String {
        [DATA_TYPE_PREFIX, entity_type_id, bundle_id].join(DATA_TYPE_SEPARATOR)
    }
}

fn pascal_case(segments: &[&str]) -> String {
    segments
        .iter()
        .flat_map(|segment| segment.split(|c: char| !c.is_ascii_alphanumeric()))
        .map(upper_first)
        .collect()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

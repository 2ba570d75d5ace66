use std::fmt::{self, Write};

use crate::{DerivationConfig, DerivedSchema, InputTypeDefinition, MutationDefinition};

/// Renders the derived input objects and mutations as GraphQL SDL.
pub fn render_sdl(schema: &DerivedSchema, config: &DerivationConfig) -> String {
    let mut sdl = String::new();

    // Writing into a String cannot fail.
    let _ = write_sdl(&mut sdl, schema, config);

    sdl
}

fn write_sdl(sdl: &mut String, schema: &DerivedSchema, config: &DerivationConfig) -> fmt::Result {
    let mut blocks = Vec::new();

    for input_type in schema.input_types.definitions() {
        let mut block = String::new();
        write_input_type(&mut block, input_type)?;
        blocks.push(block);
    }

    if !schema.mutations.is_empty() {
        let mut block = String::new();
        writeln!(block, "extend type Mutation {{")?;

        for mutation in schema.mutations.definitions() {
            write_mutation(&mut block, mutation, &config.mutation_output_type)?;
        }

        writeln!(block, "}}")?;
        blocks.push(block);
    }

    sdl.push_str(&blocks.join("\n"));

    Ok(())
}

fn write_input_type(block: &mut String, input_type: &InputTypeDefinition) -> fmt::Result {
    if input_type.fields.is_empty() {
        return writeln!(block, "input {}", input_type.name);
    }

    writeln!(block, "input {} {{", input_type.name)?;

    for (key, field) in &input_type.fields {
        writeln!(block, "  {key}: {}", field.ty)?;
    }

    writeln!(block, "}}")
}

fn write_mutation(block: &mut String, mutation: &MutationDefinition, output_type: &str) -> fmt::Result {
    let arguments = mutation
        .arguments
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(block, "  {}({arguments}): {output_type}", mutation.name)
}

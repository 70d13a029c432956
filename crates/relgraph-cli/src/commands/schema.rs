use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{load_model, schema_builder};
use crate::config::AppConfig;
use crate::output::print_success;

pub fn sdl(model: &Path, config: &AppConfig) -> Result<()> {
    let schema = schema_builder(load_model(model)?, config).build()?;
    println!("{}", schema.sdl());
    Ok(())
}

pub fn fields(model: &Path, config: &AppConfig) -> Result<()> {
    let definitions = schema_builder(load_model(model)?, config).build_definitions()?;

    println!("{}", definitions.query.name.cyan());
    for field in definitions.query.fields() {
        println!("  {field}");
    }

    for object in definitions.types.iter() {
        println!("{}", object.name.cyan());
        for field in object.fields() {
            println!("  {}: {}", field.name.bold(), field.output);
        }
    }

    print_success(&format!(
        "{} item types, {} root fields",
        definitions.types.len(),
        definitions.query.len()
    ));
    Ok(())
}

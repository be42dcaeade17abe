#![deny(missing_docs)]

//! # Output Rendering

use serde::Serialize;

use crate::error::CliResult;

/// Serialization format for command output.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Renders `value` in `format`.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> CliResult<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        let value = json!({"id": 1});
        assert_eq!(render(&value, OutputFormat::Json).unwrap(), "{\n  \"id\": 1\n}");
        assert_eq!(render(&value, OutputFormat::Yaml).unwrap(), "id: 1\n");
    }
}

#![deny(missing_docs)]

//! # Input Parsing
//!
//! Turns `--input`, `--input-file` or `--query` into the property mapping a
//! resolver consumes.
//!
//! Query strings follow `application/x-www-form-urlencoded`: pairs split on
//! `&`, `+` stands for a space and values are percent-decoded. Every value
//! stays a string. A repeated key keeps its last value.

use std::fs;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::error::{CliError, CliResult};

/// Where the values to resolve come from. Exactly one source is required.
#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Inline JSON object.
    #[clap(long)]
    pub input: Option<String>,

    /// File holding a JSON object.
    #[clap(long)]
    pub input_file: Option<PathBuf>,

    /// URL query string (`a=1&b=x%20y`). Values arrive as strings.
    #[clap(long)]
    pub query: Option<String>,
}

impl InputArgs {
    /// Reads and parses the selected source.
    pub fn read(&self) -> CliResult<Map<String, Value>> {
        if let Some(query) = &self.query {
            return parse_query(query);
        }
        if let Some(inline) = &self.input {
            return parse_json_object(inline);
        }
        if let Some(path) = &self.input_file {
            let content = fs::read_to_string(path)?;
            return parse_json_object(&content);
        }
        Err(CliError::General(
            "One of --input, --input-file or --query is required".to_string(),
        ))
    }
}

/// Parses a JSON document that must be an object.
pub fn parse_json_object(content: &str) -> CliResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::General(format!(
            "Input must be a JSON object, got {}",
            other
        ))),
    }
}

/// Parses a URL query string into string-valued properties.
pub fn parse_query(query: &str) -> CliResult<Map<String, Value>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut map = Map::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key)?;
        if key.is_empty() {
            continue;
        }
        let value = decode_component(value)?;
        map.insert(key, Value::String(value));
    }

    Ok(map)
}

fn decode_component(raw: &str) -> CliResult<String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            CliError::General(format!(
                "Invalid UTF-8 in query component '{}': {}",
                raw, e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_query_decodes_values() {
        let map = parse_query("?name=Fido+the%20dog&limit=10&flag").unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"name": "Fido the dog", "limit": "10", "flag": ""})
        );
    }

    #[test]
    fn test_parse_query_last_value_wins() {
        let map = parse_query("a=1&&a=2").unwrap();
        assert_eq!(map.get("a"), Some(&json!("2")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_query_keeps_encoded_delimiters() {
        let map = parse_query("tags=a%7Cb%2Cc").unwrap();
        assert_eq!(map.get("tags"), Some(&json!("a|b,c")));
    }

    #[test]
    fn test_parse_query_rejects_invalid_utf8() {
        assert!(parse_query("name=%FF").is_err());
    }

    #[test]
    fn test_json_input_must_be_object() {
        assert!(parse_json_object(r#"{"id": 1}"#).is_ok());
        assert!(matches!(parse_json_object("[1, 2]"), Err(CliError::General(_))));
        assert!(matches!(parse_json_object("{"), Err(CliError::Json(_))));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 7}}"#).unwrap();
        let args = InputArgs {
            input: None,
            input_file: Some(file.path().to_path_buf()),
            query: None,
        };
        assert_eq!(args.read().unwrap().get("id"), Some(&json!(7)));
    }
}

#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for turning `$ref` pointers into the names they target.
//! No external documents are ever fetched.

use percent_encoding::percent_decode_str;

/// Returns the last JSON Pointer segment of a `$ref`, decoded.
///
/// `#/definitions/Widget` yields `Widget`. A bare name without `/` is
/// returned unchanged.
pub fn ref_target_name(ref_str: &str) -> String {
    let pointer = ref_str.rsplit('#').next().unwrap_or(ref_str);
    let segment = pointer.rsplit('/').next().unwrap_or(pointer);
    decode_pointer_segment(segment)
}

/// Extracts a component name from a `$ref` if it points to `#/{section}/{name}`.
///
/// Swagger 2.0 keeps reusable objects under top-level sections such as
/// `definitions` and `parameters`.
pub(crate) fn extract_section_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 2 || segments[0] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[1]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_target_name_local_definition() {
        assert_eq!(ref_target_name("#/definitions/Widget"), "Widget");
    }

    #[test]
    fn test_ref_target_name_external_document() {
        assert_eq!(ref_target_name("common.yaml#/definitions/Error"), "Error");
    }

    #[test]
    fn test_ref_target_name_bare() {
        assert_eq!(ref_target_name("Widget"), "Widget");
    }

    #[test]
    fn test_extract_section_name_success() {
        let name = extract_section_name("#/parameters/Limit", "parameters").unwrap();
        assert_eq!(name, "Limit");
    }

    #[test]
    fn test_extract_section_name_wrong_section() {
        assert!(extract_section_name("#/definitions/Limit", "parameters").is_none());
        assert!(extract_section_name("other.yaml#/parameters/Limit", "parameters").is_none());
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        let decoded = decode_pointer_segment(encoded);
        assert_eq!(decoded, "User Profile/details");
    }
}

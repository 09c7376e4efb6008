//! Field-level rules for entry metadata.
//!
//! Works on the raw JSON value rather than [`CatalogEntry`](crate::CatalogEntry)
//! so that every problem in a file is reported, including each unknown
//! field by name, instead of stopping at the first serde error.

use serde_json::{Map, Value};

use crate::patterns::{is_exact_semver, is_valid_identifier};
use crate::schema::KNOWN_FIELDS;

const IDENTIFIER_RULE: &str = "must start with a lowercase letter, contain only lowercase \
letters, digits, and dashes, not end with a dash, and be at least 2 characters";

/// Check parsed metadata against the entry rules.
///
/// `file` names the metadata file in messages. Returns one message per
/// problem, in field order; an empty vector means the metadata is valid.
/// Authored metadata may not declare `catalog_url`.
pub fn validate_metadata(value: &Value, file: &str) -> Vec<String> {
    check_metadata(value, file, false)
}

/// Same rules, for metadata that may be an installed copy carrying a
/// stamped `catalog_url`.
pub(crate) fn validate_loaded_metadata(value: &Value, file: &str) -> Vec<String> {
    check_metadata(value, file, true)
}

fn check_metadata(value: &Value, file: &str, installed: bool) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return vec![format!("{file}: expected a JSON object")];
    };

    let mut errors = Vec::new();

    for key in object.keys() {
        if key == "catalog_url" {
            if installed {
                optional_string(object, "catalog_url", file, &mut errors);
                continue;
            }
            errors.push(format!(
                "{file}: field 'catalog_url' is written at install time and must not be declared"
            ));
        } else if !KNOWN_FIELDS.contains(&key.as_str()) {
            errors.push(format!("{file}: unknown field '{key}'"));
        }
    }

    match required_string(object, "name", file, &mut errors) {
        Some(name) if !is_valid_identifier(name) => {
            errors.push(format!("{file}: invalid name '{name}': {IDENTIFIER_RULE}"));
        }
        _ => {}
    }

    if let Some(description) = required_string(object, "description", file, &mut errors)
        && description.trim().is_empty()
    {
        errors.push(format!("{file}: field 'description' must not be empty"));
    }

    check_tags(object, file, &mut errors);

    if let Some(maintainer) = optional_string(object, "maintainer", file, &mut errors)
        && maintainer.trim().is_empty()
    {
        errors.push(format!("{file}: field 'maintainer' must not be empty"));
    }

    if let Some(version) = optional_string(object, "min_cli_version", file, &mut errors)
        && !is_exact_semver(version)
    {
        errors.push(format!(
            "{file}: invalid min_cli_version '{version}': expected MAJOR.MINOR.PATCH"
        ));
    }

    errors
}

/// The declared `name`, if the metadata has a string one.
///
/// Used for cross-entry uniqueness even when other fields are broken.
pub fn declared_name(value: &Value) -> Option<&str> {
    value.get("name").and_then(Value::as_str)
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    file: &str,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match object.get(field) {
        None => {
            errors.push(format!("{file}: missing required field '{field}'"));
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.push(format!("{file}: field '{field}' must be a string"));
            None
        }
    }
}

/// Absent and `null` both mean "not set".
fn optional_string<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    file: &str,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.push(format!("{file}: field '{field}' must be a string"));
            None
        }
    }
}

fn check_tags(object: &Map<String, Value>, file: &str, errors: &mut Vec<String>) {
    let tags = match object.get("tags") {
        None | Some(Value::Null) => return,
        Some(Value::Array(tags)) => tags,
        Some(_) => {
            errors.push(format!("{file}: field 'tags' must be a list of strings"));
            return;
        }
    };

    for (index, tag) in tags.iter().enumerate() {
        match tag.as_str() {
            None => errors.push(format!("{file}: tags[{index}] must be a string")),
            Some(tag) if !is_valid_identifier(tag) => {
                errors.push(format!("{file}: invalid tag '{tag}': {IDENTIFIER_RULE}"));
            }
            Some(_) => {}
        }
    }
}

//! SKILL.md parsing
//!
//! Each skill descriptor is markdown with an optional YAML frontmatter block
//! delimited by `---` lines at the very start of the file.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use skillpull_types::Metadata;
use tracing::warn;

use crate::error::{ParseError, Result};

/// Maximum recommended name length
const MAX_NAME_LENGTH: usize = 64;
/// Maximum recommended description length
const MAX_DESCRIPTION_LENGTH: usize = 1024;

const FRONTMATTER_PATTERN: &str = r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?\z";
const NAME_PATTERN: &str = r"^[a-z0-9-]+$";

/// Parse a SKILL.md into its metadata and trimmed body
pub fn parse_skill_md(content: &str) -> Result<(Metadata, String)> {
    let (yaml, body) = split_frontmatter(content)?.unwrap_or(("", content));

    let data: Value = if yaml.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(yaml)?
    };

    let empty = Mapping::new();
    let fields = match &data {
        Value::Mapping(fields) => fields,
        Value::Null => &empty,
        _ => return Err(ParseError::NotAMapping),
    };

    let mut metadata = Metadata::new(
        required_string(fields, "name")?,
        required_string(fields, "description")?,
    );
    metadata.license = optional_string(fields, "license")?;
    metadata.compatibility = optional_string(fields, "compatibility")?;
    metadata.allowed_tools = allowed_tools(fields)?;
    metadata.metadata = extra_metadata(fields)?;

    check_recommendations(&metadata)?;

    Ok((metadata, body.trim().to_string()))
}

/// Split content into frontmatter YAML and body, if a frontmatter block exists
fn split_frontmatter(content: &str) -> Result<Option<(&str, &str)>> {
    let frontmatter_re = Regex::new(FRONTMATTER_PATTERN)?;

    Ok(frontmatter_re.captures(content).map(|captures| {
        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        (yaml, body)
    }))
}

fn present<'a>(fields: &'a Mapping, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn required_string(fields: &Mapping, key: &'static str) -> Result<String> {
    match present(fields, key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ParseError::MissingField(key)),
    }
}

fn optional_string(fields: &Mapping, key: &'static str) -> Result<Option<String>> {
    present(fields, key)
        .map(|value| {
            scalar_to_string(value).ok_or(ParseError::InvalidField {
                field: key,
                expected: "a string",
            })
        })
        .transpose()
}

/// `allowed-tools`, falling back to `allowedTools`
///
/// Every item is stringified: scalars by value, null as `"null"`, nested
/// values as compact JSON.
fn allowed_tools(fields: &Mapping) -> Result<Option<Vec<String>>> {
    let invalid = || ParseError::InvalidField {
        field: "allowed-tools",
        expected: "an array",
    };

    match present(fields, "allowed-tools").or_else(|| present(fields, "allowedTools")) {
        None => Ok(None),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => Ok("null".to_string()),
                other => scalar_to_string(other)
                    .map_or_else(|| serde_json::to_string(other), Ok)
                    .map_err(|_| invalid()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(invalid()),
    }
}

fn extra_metadata(fields: &Mapping) -> Result<Option<serde_json::Map<String, serde_json::Value>>> {
    let invalid = || ParseError::InvalidField {
        field: "metadata",
        expected: "an object",
    };

    match present(fields, "metadata") {
        None => Ok(None),
        Some(value @ Value::Mapping(_)) => match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => Ok(Some(map)),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Warn about metadata that parses but falls outside the Agent Skills conventions
fn check_recommendations(metadata: &Metadata) -> Result<()> {
    if metadata.name.len() > MAX_NAME_LENGTH {
        warn!(
            "Skill name '{}' exceeds {} characters (was {})",
            metadata.name,
            MAX_NAME_LENGTH,
            metadata.name.len()
        );
    }

    let name_re = Regex::new(NAME_PATTERN)?;
    if !name_re.is_match(&metadata.name) {
        warn!(
            "Skill name '{}' should contain only lowercase letters, numbers, and hyphens",
            metadata.name
        );
    }

    if metadata.description.len() > MAX_DESCRIPTION_LENGTH {
        warn!(
            "Skill '{}' description exceeds {} characters (was {})",
            metadata.name,
            MAX_DESCRIPTION_LENGTH,
            metadata.description.len()
        );
    }

    Ok(())
}

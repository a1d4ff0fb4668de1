use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ArtifactError;

/// A JSON object plus the layout details needed to write it back with a minimal diff
#[derive(Debug, Clone)]
pub(crate) struct JsonDocument {
    pub object: Map<String, Value>,
    pub trailing_newline: bool,
}

pub(crate) fn parse_document(path: &Path, text: &str) -> Result<JsonDocument, ArtifactError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ArtifactError::parse(path, e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(ArtifactError::parse(path, "expected a JSON object"));
    };

    Ok(JsonDocument {
        object,
        trailing_newline: text.ends_with('\n'),
    })
}

impl JsonDocument {
    /// Pretty-prints with two-space indentation, keys in their original order
    pub fn render(&self, path: &Path) -> Result<String, ArtifactError> {
        let mut rendered = serde_json::to_string_pretty(&self.object)
            .map_err(|e| ArtifactError::parse(path, e.to_string()))?;
        if self.trailing_newline {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

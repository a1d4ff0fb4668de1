//! Build-argument manifest (`build.json`)

use std::path::Path;

use serde_json::Value;

use crate::error::ArtifactError;
use crate::state::json::{JsonDocument, parse_document};

pub const ARGS_KEY: &str = "args";

#[derive(Debug, Clone)]
pub struct BuildArgs {
    document: JsonDocument,
    key: String,
}

impl BuildArgs {
    /// Parses the manifest and checks that `args.<key>` holds a string
    pub fn parse(path: &Path, text: &str, key: &str) -> Result<Self, ArtifactError> {
        let document = parse_document(path, text)?;

        let args = document
            .object
            .get(ARGS_KEY)
            .and_then(Value::as_object)
            .ok_or_else(|| ArtifactError::parse(path, format!("missing `{}` object", ARGS_KEY)))?;

        match args.get(key) {
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ArtifactError::parse(
                    path,
                    format!("`{}.{}` must be a string", ARGS_KEY, key),
                ));
            }
            None => {
                return Err(ArtifactError::parse(
                    path,
                    format!("missing `{}.{}`", ARGS_KEY, key),
                ));
            }
        }

        Ok(Self {
            document,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn pinned_version(&self) -> &str {
        self.document
            .object
            .get(ARGS_KEY)
            .and_then(|args| args.get(&self.key))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn set_pinned_version(&mut self, version: &str) {
        if let Some(Value::Object(args)) = self.document.object.get_mut(ARGS_KEY) {
            args.insert(self.key.clone(), Value::String(version.to_string()));
        }
    }

    pub fn render(&self, path: &Path) -> Result<String, ArtifactError> {
        self.document.render(path)
    }
}

//! Version manifest (`config.json`)
//!
//! Only the `version` field is interpreted. Every other key is kept verbatim and in its
//! original position when the manifest is rendered back.

use std::path::Path;

use serde_json::Value;

use crate::error::ArtifactError;
use crate::state::json::{JsonDocument, parse_document};
use crate::version::DottedVersion;

pub const VERSION_KEY: &str = "version";

#[derive(Debug, Clone)]
pub struct VersionManifest {
    document: JsonDocument,
    version: DottedVersion,
}

impl VersionManifest {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ArtifactError> {
        let document = parse_document(path, text)?;

        let raw = match document.object.get(VERSION_KEY) {
            Some(Value::String(raw)) => raw,
            Some(_) => {
                return Err(ArtifactError::parse(
                    path,
                    format!("`{}` must be a string", VERSION_KEY),
                ));
            }
            None => {
                return Err(ArtifactError::parse(
                    path,
                    format!("missing `{}` field", VERSION_KEY),
                ));
            }
        };
        let version = raw
            .parse::<DottedVersion>()
            .map_err(|e| ArtifactError::parse(path, e.to_string()))?;

        Ok(Self { document, version })
    }

    /// The version string exactly as recorded in the manifest
    pub fn raw_version(&self) -> &str {
        self.document
            .object
            .get(VERSION_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn version(&self) -> &DottedVersion {
        &self.version
    }

    pub fn set_version(&mut self, version: &DottedVersion) {
        self.document
            .object
            .insert(VERSION_KEY.to_string(), Value::String(version.to_string()));
        self.version = version.clone();
    }

    pub fn render(&self, path: &Path) -> Result<String, ArtifactError> {
        self.document.render(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
  "name": "Tailscale",
  "version": "1.60.0.0",
  "slug": "tailscale",
  "arch": [
    "amd64",
    "aarch64"
  ]
}"#;

    fn path() -> &'static Path {
        Path::new("tailscale/config.json")
    }

    #[test]
    fn parse_reads_version() {
        let manifest = VersionManifest::parse(path(), MANIFEST).unwrap();
        assert_eq!(manifest.raw_version(), "1.60.0.0");
        assert_eq!(manifest.version().to_string(), "1.60.0.0");
    }

    #[test]
    fn render_keeps_other_fields_in_order() {
        let mut manifest = VersionManifest::parse(path(), MANIFEST).unwrap();
        manifest.set_version(&"1.62.1.0".parse().unwrap());

        let rendered = manifest.render(path()).unwrap();
        assert_eq!(rendered, MANIFEST.replace("1.60.0.0", "1.62.1.0"));
    }

    #[test]
    fn parse_rejects_missing_version() {
        let err = VersionManifest::parse(path(), r#"{"name": "Tailscale"}"#).unwrap_err();
        assert!(err.to_string().contains("missing `version` field"));
    }

    #[test]
    fn parse_rejects_non_string_version() {
        let err = VersionManifest::parse(path(), r#"{"version": 1}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn parse_rejects_version_with_five_segments() {
        let err = VersionManifest::parse(path(), r#"{"version": "1.2.3.4.5"}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }
}

//! Container build recipe (`Dockerfile`)
//!
//! The pinned version lives on a single `ARG <NAME>=<value>` line. Rewriting replaces
//! that line only; every other byte, including CRLF line endings, is kept.

use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::ArtifactError;

/// Builds the pattern for the `ARG <name>=` declaration, anchored at line start.
///
/// CRLF mode keeps a trailing `\r` out of the match so line endings survive a rewrite.
pub fn arg_line_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?mR)^ARG {}=(.*)$", regex::escape(name)))
}

#[derive(Debug, Clone)]
pub struct BuildRecipe {
    text: String,
    name: String,
    pattern: Regex,
}

impl BuildRecipe {
    /// Wraps the recipe text, requiring exactly one `ARG <name>=` line
    pub fn parse(path: &Path, text: String, name: &str) -> Result<Self, ArtifactError> {
        let pattern =
            arg_line_pattern(name).map_err(|e| ArtifactError::parse(path, e.to_string()))?;

        match pattern.find_iter(&text).count() {
            1 => Ok(Self {
                text,
                name: name.to_string(),
                pattern,
            }),
            0 => Err(ArtifactError::parse(
                path,
                format!("no `ARG {}=` declaration", name),
            )),
            n => Err(ArtifactError::parse(
                path,
                format!("{} `ARG {}=` declarations, expected exactly one", n, name),
            )),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The declared value with surrounding quotes removed
    pub fn pinned_version(&self) -> &str {
        self.pattern
            .captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().trim_matches('"'))
            .unwrap_or_default()
    }

    /// Returns a copy whose declaration reads `ARG <name>="<version>"`
    pub fn with_version(&self, version: &str) -> BuildRecipe {
        let line = format!("ARG {}=\"{}\"", self.name, version);
        let text = self.pattern.replace(&self.text, NoExpand(&line)).into_owned();
        BuildRecipe {
            text,
            name: self.name.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

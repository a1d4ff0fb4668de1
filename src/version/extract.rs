//! Version extraction from an upstream release listing
//!
//! Release listings reference archives as `<product>_<version>_<arch>.<ext>`, e.g.
//! `tailscale_1.62.1_amd64.tgz`. A listing is expected to reference exactly one
//! version across all such archives.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::ResolutionError;
use crate::version::dotted::DottedVersion;

/// Matches archive filenames of a single product in a listing body
#[derive(Debug, Clone)]
pub struct ListingPattern {
    product: String,
    regex: Regex,
}

impl ListingPattern {
    pub fn new(product: &str, extension: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"\b{}_([0-9]+(?:\.[0-9]+)*)_\w+\.{}\b",
            regex::escape(product),
            regex::escape(extension)
        ))?;
        Ok(Self {
            product: product.to_string(),
            regex,
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Collects the distinct version strings referenced by the listing
    pub fn extract_versions(&self, body: &str) -> BTreeSet<String> {
        self.regex
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Reduces the listing to its single referenced version.
    ///
    /// Fails when the listing references no version or more than one distinct version.
    pub fn resolve(&self, body: &str) -> Result<DottedVersion, ResolutionError> {
        let versions = self.extract_versions(body);

        match versions.len() {
            0 => Err(ResolutionError::NoVersionFound {
                product: self.product.clone(),
            }),
            1 => {
                let version = versions.into_iter().next().unwrap_or_default();
                Ok(version.parse::<DottedVersion>()?)
            }
            _ => Err(ResolutionError::Ambiguous {
                versions: versions.into_iter().collect(),
            }),
        }
    }
}

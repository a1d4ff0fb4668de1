#![allow(dead_code)]

pub mod runner;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tailscale_updater::config::UpdaterConfig;
use tailscale_updater::state::ArtifactPaths;

pub const MANIFEST: &str = r#"{
  "name": "Tailscale",
  "version": "1.60.0.0",
  "slug": "tailscale",
  "description": "Zero config VPN for building secure networks",
  "arch": [
    "aarch64",
    "amd64",
    "armv7"
  ]
}
"#;

pub const BUILD: &str = r#"{
  "build_from": {
    "aarch64": "ghcr.io/home-assistant/aarch64-base:3.19",
    "amd64": "ghcr.io/home-assistant/amd64-base:3.19",
    "armv7": "ghcr.io/home-assistant/armv7-base:3.19"
  },
  "args": {
    "TAILSCALE_VERSION": "1.60.0"
  }
}
"#;

pub const RECIPE: &str = "ARG BUILD_FROM\r\nFROM $BUILD_FROM\r\n\r\nARG TAILSCALE_VERSION=\"1.60.0\"\r\nARG BUILD_ARCH\r\n\r\nRUN curl -fsSL \"https://pkgs.tailscale.com/stable/tailscale_${TAILSCALE_VERSION}_${BUILD_ARCH}.tgz\" | tar xz\r\n";

/// An add-on directory populated with the three pinned artifacts
pub struct AddonDir {
    pub dir: TempDir,
    pub paths: ArtifactPaths,
}

impl AddonDir {
    pub fn new(local_version: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let paths = config_for(dir.path(), "http://unused").artifact_paths();

        fs::write(&paths.manifest, MANIFEST.replace("1.60.0.0", local_version)).unwrap();
        fs::write(&paths.build_args, BUILD).unwrap();
        fs::write(&paths.recipe, RECIPE).unwrap();

        Self { dir, paths }
    }

    pub fn config(&self, upstream_url: &str) -> UpdaterConfig {
        config_for(self.dir.path(), upstream_url)
    }

    pub fn manifest(&self) -> String {
        fs::read_to_string(&self.paths.manifest).unwrap()
    }

    pub fn build_args(&self) -> String {
        fs::read_to_string(&self.paths.build_args).unwrap()
    }

    pub fn recipe(&self) -> String {
        fs::read_to_string(&self.paths.recipe).unwrap()
    }
}

fn config_for(dir: &Path, upstream_url: &str) -> UpdaterConfig {
    UpdaterConfig {
        addon_dir: dir.to_path_buf(),
        upstream_url: upstream_url.to_string(),
        ..UpdaterConfig::default()
    }
}

/// A release listing page shaped like pkgs.tailscale.com/stable
pub fn listing_page(versions: &[(&str, &str)]) -> String {
    let links: String = versions
        .iter()
        .map(|(version, arch)| {
            let file = format!("tailscale_{}_{}.tgz", version, arch);
            format!(
                "<a href=\"{file}\">{file}</a> (<a href=\"{file}.sha256\">sha256</a>)<br>\n"
            )
        })
        .collect();
    format!("<html><body><h2>Static Linux Binaries</h2>\n{}</body></html>", links)
}

//! `stencil.toml` loading
//!
//! ```toml
//! catalogs = ["classes/app.json", "classes/vendor.toml"]
//!
//! [class]
//! safe-mode = true
//! inspect = "com.acme.Widget"
//! ```
//!
//! Catalog paths are relative to the directory holding the config file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use stencil_introspect::InspectorConfig;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "stencil.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StencilConfig {
    /// Class catalogs to load on top of the built-in classes
    #[serde(default)]
    pub catalogs: Vec<PathBuf>,

    /// Class tool settings
    #[serde(default)]
    pub class: InspectorConfig,
}

impl StencilConfig {
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file, resolving catalog paths against its directory
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if let Some(dir) = path.parent() {
            for catalog in &mut config.catalogs {
                if catalog.is_relative() {
                    *catalog = dir.join(&*catalog);
                }
            }
        }
        Ok(config)
    }

    /// Load `explicit` if given, else `stencil.toml` from the working
    /// directory if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

//! RON configuration loader

use crate::config::ContentConfig;
use crate::error::{Error, Result};
use crate::schema::{AirdropTypeDef, EventDef};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use windfall_core::DefId;

/// Loader for RON configuration files
///
/// A main document provides timers, region, messages and (optionally)
/// catalogs. Extra catalog files may add airdrop types or events; a key
/// defined twice is an error.
pub struct Loader {
    config: ContentConfig,
}

impl Loader {
    /// Create a loader starting from an empty configuration
    pub fn new() -> Self {
        Self {
            config: ContentConfig::empty(),
        }
    }

    /// Create a loader starting from the built-in example catalogs
    pub fn with_defaults() -> Self {
        Self {
            config: ContentConfig::default(),
        }
    }

    /// Load a single RON file
    ///
    /// Files whose name contains `catalog` are merged as catalogs; anything
    /// else replaces the main document.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        debug!(file = %path.display(), "loading configuration file");

        if filename.contains("catalog") {
            self.load_catalog_str(&content)
        } else {
            self.load_str(&content)
        }
    }

    /// Replace the main document with one parsed from a RON string
    ///
    /// Catalog entries merged earlier are kept unless the document redefines them.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let parsed: ContentConfig = ron::from_str(content)?;
        let earlier_types = std::mem::take(&mut self.config.airdrop.types);
        let earlier_events = std::mem::take(&mut self.config.events);

        self.config = parsed;
        for (key, def) in earlier_types {
            self.config.airdrop.types.entry(key).or_insert(def);
        }
        for (key, def) in earlier_events {
            self.config.events.entry(key).or_insert(def);
        }
        Ok(())
    }

    /// Merge an extra catalog file
    pub fn load_catalog_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct CatalogFile {
            #[serde(default)]
            airdrop_types: IndexMap<DefId, AirdropTypeDef>,
            #[serde(default)]
            events: IndexMap<DefId, EventDef>,
        }

        let file: CatalogFile = ron::from_str(content)?;
        for (id, def) in file.airdrop_types {
            if self.config.airdrop.types.contains_key(&id) {
                return Err(Error::DuplicateDefinition(format!("airdrop type {}", id)));
            }
            self.config.airdrop.types.insert(id, def);
        }
        for (id, def) in file.events {
            if self.config.events.contains_key(&id) {
                return Err(Error::DuplicateDefinition(format!("event {}", id)));
            }
            self.config.events.insert(id, def);
        }
        Ok(())
    }

    /// Load all RON files from a directory
    ///
    /// Files are visited in name order so the resulting catalog order is stable.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries: Vec<_> = fs::read_dir(path)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading: fill default messages and validate
    pub fn finish(mut self) -> Result<ContentConfig> {
        let added = self.config.messages.fill_defaults();
        if added > 0 {
            debug!(added, "filled default message templates");
        }
        self.config.validate()?;
        info!(
            airdrop_types = self.config.airdrop.types.len(),
            events = self.config.events.len(),
            "configuration loaded"
        );
        Ok(self.config)
    }

    /// Get the configuration built so far (for inspection during loading)
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a complete configuration from a RON string
pub fn from_str(content: &str) -> Result<ContentConfig> {
    let mut loader = Loader::new();
    loader.load_str(content)?;
    loader.finish()
}

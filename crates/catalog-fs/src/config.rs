//! Format-agnostic configuration loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// Serialization format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy())
            .unwrap_or_default();
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Format-agnostic configuration store.
///
/// `.toml` and `.json` files are supported. Catalog files are JSON; layout
/// overrides may be either.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = Format::of(path)?;
        let content = io::read_text(path)?;

        let parsed = match format {
            Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        })
    }

    /// Serialize `value` to `path` atomically.
    ///
    /// Output is pretty-printed and newline-terminated, so saving the same
    /// value twice produces byte-identical files.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let format = Format::of(path)?;

        let rendered = match format {
            Format::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Format::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        };
        let mut content = rendered.map_err(|message| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        })?;

        if !content.ends_with('\n') {
            content.push('\n');
        }

        io::write_atomic(path, content.as_bytes())
    }
}

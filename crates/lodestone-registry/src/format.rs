//! Artifact format auto-detection
//!
//! Consumed by loaders and flush sinks, owned here only as the interface
//! contract: the registry itself never parses an artifact, it just
//! propagates [`RegistryError::UnknownFormat`] unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::RegistryError;

/// Error type for parsing an artifact format name
#[derive(Debug, Clone)]
pub struct ParseArtifactFormatError(String);

impl fmt::Display for ParseArtifactFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid artifact format: {}", self.0)
    }
}

impl std::error::Error for ParseArtifactFormatError {}

/// Supported artifact formats, detected from a file-name extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Yaml,
    Json,
    Toml,
    Properties,
    Csv,
    Xml,
    Hocon,
}

impl ArtifactFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFormat::Yaml => "yaml",
            ArtifactFormat::Json => "json",
            ArtifactFormat::Toml => "toml",
            ArtifactFormat::Properties => "properties",
            ArtifactFormat::Csv => "csv",
            ArtifactFormat::Xml => "xml",
            ArtifactFormat::Hocon => "hocon",
        }
    }

    /// Detect the format from a file-name extension, case-insensitively.
    ///
    /// `yml`/`yaml` map to YAML and `conf`/`hocon` to HOCON; anything else
    /// (including a missing extension) is an unknown format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        match extension.as_deref() {
            Some("yml") | Some("yaml") => Ok(ArtifactFormat::Yaml),
            Some("json") => Ok(ArtifactFormat::Json),
            Some("toml") => Ok(ArtifactFormat::Toml),
            Some("properties") => Ok(ArtifactFormat::Properties),
            Some("csv") => Ok(ArtifactFormat::Csv),
            Some("xml") => Ok(ArtifactFormat::Xml),
            Some("conf") | Some("hocon") => Ok(ArtifactFormat::Hocon),
            _ => Err(RegistryError::UnknownFormat(path.to_path_buf())),
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = ParseArtifactFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yml" | "yaml" => Ok(ArtifactFormat::Yaml),
            "json" => Ok(ArtifactFormat::Json),
            "toml" => Ok(ArtifactFormat::Toml),
            "properties" => Ok(ArtifactFormat::Properties),
            "csv" => Ok(ArtifactFormat::Csv),
            "xml" => Ok(ArtifactFormat::Xml),
            "conf" | "hocon" => Ok(ArtifactFormat::Hocon),
            _ => Err(ParseArtifactFormatError(s.to_string())),
        }
    }
}

//! Server configuration
//!
//! Values come from an optional TOML file and from the command line, with the
//! command line taking precedence:
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 3000
//! cache = "./cache"
//! uploads = "./uploads"
//! max-upload-bytes = 16777216
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::api::DEFAULT_BODY_LIMIT;

/// Errors raised while assembling a [`ServerConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("reading config from {path}")]
    Read {
        /// File that failed to read
        path: Utf8PathBuf,
        /// Underlying IO failure
        source: io::Error,
    },

    /// The config file is not valid
    #[error("parsing config from {path}")]
    Parse {
        /// File that failed to parse
        path: Utf8PathBuf,
        /// TOML decoding failure
        source: toml_edit::de::Error,
    },

    /// A required value was not supplied anywhere
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Partially specified settings, from a file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigLayer {
    /// Address to bind
    pub host: Option<String>,
    /// Port to bind
    pub port: Option<u16>,
    /// Cache directory, created at startup
    pub cache: Option<Utf8PathBuf>,
    /// Directory for uploaded photos
    pub uploads: Option<Utf8PathBuf>,
    /// Request body limit in bytes
    pub max_upload_bytes: Option<usize>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml_edit::de::Error> {
        toml_edit::de::from_str(text)
    }

    /// Read a layer from a TOML file
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Overlay `other` on top of this layer; values set in `other` win.
    pub fn merge(self, other: ConfigLayer) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            cache: other.cache.or(self.cache),
            uploads: other.uploads.or(self.uploads),
            max_upload_bytes: other.max_upload_bytes.or(self.max_upload_bytes),
        }
    }
}

/// Complete settings for running the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Cache directory. Created if absent, otherwise unused.
    pub cache: Utf8PathBuf,
    /// Directory for uploaded photos; a temporary directory when unset
    pub uploads: Option<Utf8PathBuf>,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl TryFrom<ConfigLayer> for ServerConfig {
    type Error = ConfigError;

    fn try_from(layer: ConfigLayer) -> Result<Self, Self::Error> {
        Ok(Self {
            host: layer.host.ok_or(ConfigError::Missing("host"))?,
            port: layer.port.ok_or(ConfigError::Missing("port"))?,
            cache: layer.cache.ok_or(ConfigError::Missing("cache"))?,
            uploads: layer.uploads,
            max_upload_bytes: layer.max_upload_bytes.unwrap_or(DEFAULT_BODY_LIMIT),
        })
    }
}

impl ServerConfig {
    /// Create the cache directory if it does not exist yet.
    ///
    /// Returns `true` when the directory was created.
    pub async fn ensure_cache_dir(&self) -> io::Result<bool> {
        if tokio::fs::try_exists(&self.cache).await? {
            return Ok(false);
        }

        tracing::info!(path = %self.cache, "Creating cache folder");
        tokio::fs::create_dir_all(&self.cache).await?;
        Ok(true)
    }
}

//! Paging configuration for IcyPage.
//!
//! Limits are read from a TOML document, either bare or under a `[paging]`
//! table, and validated once at load time so executors can trust them.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_OFFSET_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read paging config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse paging config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid paging config: {0}")]
    Invalid(String),
}

///
/// PagingConfig
///
/// Limits shared by the keyset and offset executors.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PagingConfig {
    /// Page size used when a request omits one.
    pub default_page_size: u32,

    /// Largest keyset page a client may request.
    pub max_page_size: u32,

    /// Largest offset page a client may request.
    pub max_offset_page_size: u32,

    /// Upper bound on the length of an incoming cursor token.
    pub max_cursor_token_len: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_offset_page_size: DEFAULT_MAX_OFFSET_PAGE_SIZE,
            max_cursor_token_len: DEFAULT_MAX_CURSOR_TOKEN_LEN,
        }
    }
}

// Accept both a bare document and one nested under `[paging]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Wrapped { paging: PagingConfig },
    Bare(PagingConfig),
}

impl PagingConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = toml::from_str(text)?;
        let config = match document {
            ConfigDocument::Wrapped { paging } => paging,
            ConfigDocument::Bare(config) => config,
        };
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Check the cross-field bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid("max_page_size must be positive".into()));
        }
        if self.max_offset_page_size == 0 {
            return Err(ConfigError::Invalid(
                "max_offset_page_size must be positive".into(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size must be in [1, {}], found {}",
                self.max_page_size, self.default_page_size
            )));
        }
        if self.max_cursor_token_len == 0 {
            return Err(ConfigError::Invalid(
                "max_cursor_token_len must be positive".into(),
            ));
        }

        Ok(())
    }
}

///
/// TESTS
///

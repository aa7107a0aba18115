use crate::error::{Result, ValidateError};
use crate::path;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The hierarchy delimiter assumed when none is configured.
pub const DEFAULT_DELIMITER: char = '/';

lazy_static! {
    // control characters cannot be sent in a quoted string, and the LIST wildcards would make
    // the prefix match folders it does not own
    static ref INVALID_PREFIX_CHAR: Regex = Regex::new(r"[\x00-\x1f\x7f*%]").unwrap();
}

/// Per-account virtualization setting.
///
/// The prefix is stored trimmed of surrounding whitespace and of trailing delimiters, so that
/// `"Work"`, `" Work "` and `"Work/"` all denote the same container folder. An empty prefix
/// disables virtualization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPrefixConfig", into = "RawPrefixConfig")]
pub struct PrefixConfig {
    prefix: String,
    delimiter: char,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPrefixConfig {
    #[serde(default)]
    prefix: String,
    #[serde(default = "default_delimiter")]
    delimiter: char,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl From<RawPrefixConfig> for PrefixConfig {
    fn from(raw: RawPrefixConfig) -> Self {
        PrefixConfig::new(raw.prefix, raw.delimiter)
    }
}

impl From<PrefixConfig> for RawPrefixConfig {
    fn from(config: PrefixConfig) -> Self {
        RawPrefixConfig {
            prefix: config.prefix,
            delimiter: config.delimiter,
        }
    }
}

impl Default for PrefixConfig {
    fn default() -> Self {
        PrefixConfig::disabled(DEFAULT_DELIMITER)
    }
}

impl PrefixConfig {
    /// Make a new configuration, normalizing `prefix`.
    pub fn new(prefix: impl AsRef<str>, delimiter: char) -> Self {
        PrefixConfig {
            prefix: normalize(prefix.as_ref(), delimiter),
            delimiter,
        }
    }

    /// A configuration that leaves every path untouched.
    pub fn disabled(delimiter: char) -> Self {
        PrefixConfig {
            prefix: String::new(),
            delimiter,
        }
    }

    /// Check that `prefix` can be used as a folder prefix.
    pub fn validate(prefix: &str) -> Result<()> {
        match INVALID_PREFIX_CHAR.find(prefix) {
            Some(m) => {
                let invalid = m.as_str().chars().next().unwrap_or_default();
                Err(ValidateError(invalid).into())
            }
            None => Ok(()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether virtualization is turned off.
    pub fn is_disabled(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Real path of the folder that holds every virtualized folder.
    pub fn container(&self) -> &str {
        &self.prefix
    }

    /// See [`path::to_real`].
    pub fn to_real(&self, virtual_path: &str) -> String {
        path::to_real(virtual_path, &self.prefix, self.delimiter)
    }

    /// See [`path::to_virtual`].
    pub fn to_virtual(&self, real_path: &str) -> String {
        path::to_virtual(real_path, &self.prefix, self.delimiter)
    }

    /// See [`path::is_inbox`].
    pub fn is_inbox(&self, path: &str) -> bool {
        path::is_inbox(path, self.delimiter)
    }
}

fn normalize(prefix: &str, delimiter: char) -> String {
    prefix
        .trim()
        .trim_end_matches(delimiter)
        .trim_end()
        .to_string()
}

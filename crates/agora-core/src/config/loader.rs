//! Configuration file loading and parsing

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["agora.yaml", "agora.yml"];

/// Environment override for the store base URL
const STORE_URL_ENV: &str = "AGORA_STORE_URL";

/// Loaded Agora configuration
#[derive(Debug, Clone)]
pub struct AgoraConfig {
    /// The parsed runtime configuration
    pub runtime: RuntimeConfig,

    /// Path to the configuration file, if one was read
    pub config_path: Option<PathBuf>,
}

impl AgoraConfig {
    /// Load configuration from the specified path or search for it
    ///
    /// An explicit path must exist. Without one, the well-known file names
    /// are searched in the working directory; if none is present the
    /// built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, content) = if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.display().to_string())
                } else {
                    Error::Io(e)
                }
            })?;
            (Some(p.to_owned()), content)
        } else {
            match Self::find_config() {
                Some((p, content)) => (Some(p), content),
                None => {
                    debug!("No configuration file found, using defaults");
                    return Ok(Self::finish(RuntimeConfig::default(), None));
                }
            }
        };

        let runtime: RuntimeConfig = serde_yaml_ng::from_str(&content)?;

        Ok(Self::finish(runtime, config_path))
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let runtime: RuntimeConfig = serde_yaml_ng::from_str(content)?;
        Ok(Self::finish(runtime, None))
    }

    fn find_config() -> Option<(PathBuf, String)> {
        for name in CONFIG_FILE_NAMES {
            let candidate = PathBuf::from(name);
            if let Ok(content) = fs::read_to_string(&candidate) {
                debug!("Loaded configuration from {}", candidate.display());
                return Some((candidate, content));
            }
        }
        None
    }

    fn finish(mut runtime: RuntimeConfig, config_path: Option<PathBuf>) -> Self {
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Store base URL overridden from {}", STORE_URL_ENV);
                runtime.store.base_url = url;
            }
        }

        Self {
            runtime,
            config_path,
        }
    }
}

impl Default for AgoraConfig {
    fn default() -> Self {
        Self::finish(RuntimeConfig::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = AgoraConfig::load(Some(Path::new("/does/not/exist/agora.yaml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  base-url: \"https://store.example.test\"").unwrap();

        let config = AgoraConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.runtime.store.base_url, "https://store.example.test");
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = AgoraConfig::from_yaml("store: [not, a, mapping").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }
}

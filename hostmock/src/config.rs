//! `hostmock.toml` loading.
//!
//! ```toml
//! [generate]
//! sdk = "types/index.d.ts"
//! out = "tests/support/portal_mock.rs"
//! namespace = "mod"
//! runtime_crate = "hostmock_runtime"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use hostmock_codegen_rust::DEFAULT_RUNTIME_CRATE;
use serde::Deserialize;

/// Config file picked up from the working directory.
pub const CONFIG_FILE: &str = "hostmock.toml";
pub const DEFAULT_OUT: &str = "./test-support/hostmock_generated.rs";
pub const DEFAULT_NAMESPACE: &str = "mod";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateSection,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// The `[generate]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    pub sdk: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub namespace: Option<String>,
    pub runtime_crate: Option<String>,
}

/// Effective settings for one `generate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub sdk: Option<PathBuf>,
    pub out: PathBuf,
    pub namespace: String,
    pub runtime_crate: String,
}

impl Config {
    /// Load a config file that must exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config '{}'", path.display()))?;
        let mut config = Self::parse_str(&content)
            .wrap_err_with(|| format!("invalid config '{}'", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `./hostmock.toml` if it exists, else use the built-in defaults.
    pub fn discover() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.is_file() {
            Self::open(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Config values over built-in defaults.
    pub fn settings(&self) -> GenerateSettings {
        let section = &self.generate;
        GenerateSettings {
            sdk: section.sdk.as_deref().map(|p| self.resolve(p)),
            out: section
                .out
                .as_deref()
                .map(|p| self.resolve(p))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
            namespace: section
                .namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            runtime_crate: section
                .runtime_crate
                .clone()
                .unwrap_or_else(|| DEFAULT_RUNTIME_CRATE.to_string()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() && !base.as_os_str().is_empty() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

//! @acp:module "Configuration"
//! @acp:summary "Generator configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "h5bp.config.json";

/// Template tree shipped with the crate
pub const BUNDLED_TEMPLATE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/template");

/// @acp:summary "Generator configuration"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Template directory to copy from (bundled template when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Project root to write into
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
}

fn default_destination() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: None,
            destination: default_destination(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` when it exists, otherwise defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Template directory: explicit override, then config, then bundled template
    pub fn template_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.template.clone())
            .unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE))
    }

    /// Destination root: explicit override, then config
    pub fn destination_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .unwrap_or_else(|| self.destination.clone())
    }
}

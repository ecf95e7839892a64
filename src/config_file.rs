//! Configuration file handling for saving and loading installation configs.
//!
//! A saved file captures the wizard's choices so the same installation can be
//! replayed headless with `theboys-setup install --config <file>`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::layout::DEFAULT_INSTALL_DIR;

/// Icon formats the `image` build in this crate can decode
const ICON_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Installation configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallationConfig {
    /// Binary to install; discovered next to the setup tool when absent
    pub source_executable: Option<PathBuf>,
    pub install_dir: PathBuf,
    pub create_symlink: bool,
    pub create_desktop_entry: bool,
    pub icon_source: Option<PathBuf>,
    /// Home override; the current user's home when absent
    pub home: Option<PathBuf>,
    pub launch_after_install: bool,
}

impl InstallationConfig {
    /// Create a new configuration with the wizard's defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.install_dir.as_os_str().is_empty() {
            anyhow::bail!("Install directory must be specified");
        }
        if !self.install_dir.is_absolute() {
            anyhow::bail!(
                "Install directory must be an absolute path, got {:?}",
                self.install_dir
            );
        }

        if let Some(source) = &self.source_executable {
            if source.as_os_str().is_empty() {
                anyhow::bail!("Source executable path cannot be empty");
            }
        }

        if let Some(home) = &self.home {
            if !home.is_absolute() {
                anyhow::bail!("Home directory must be an absolute path, got {:?}", home);
            }
        }

        // Icon format is decided by extension before the decoder ever sees it
        if let Some(icon) = &self.icon_source {
            let ext = icon
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            if !ICON_EXTENSIONS.contains(&ext.as_str()) {
                anyhow::bail!(
                    "Icon must be one of {}, got {:?}",
                    ICON_EXTENSIONS.join(", "),
                    icon
                );
            }
        }

        Ok(())
    }

    /// Build the run configuration, filling gaps from the given fallbacks
    pub fn into_configuration(
        self,
        fallback_source: Option<PathBuf>,
        fallback_home: PathBuf,
    ) -> Result<Configuration> {
        let source = self
            .source_executable
            .or(fallback_source)
            .context("No source executable given and none found next to the setup tool")?;

        Ok(
            Configuration::new(source, self.home.unwrap_or(fallback_home))
                .with_install_dir(self.install_dir)
                .with_symlink(self.create_symlink)
                .with_desktop_entry(self.create_desktop_entry)
                .with_icon(self.icon_source),
        )
    }
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            source_executable: None,
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            create_symlink: true,
            create_desktop_entry: true,
            icon_source: None,
            home: None,
            launch_after_install: false,
        }
    }
}

/// Convert from a run Configuration to InstallationConfig
impl From<&Configuration> for InstallationConfig {
    fn from(config: &Configuration) -> Self {
        Self {
            source_executable: Some(config.source_executable.clone()),
            install_dir: config.install_dir.clone(),
            create_symlink: config.create_symlink,
            create_desktop_entry: config.create_desktop_entry,
            icon_source: config.icon_source.clone(),
            home: Some(config.home.clone()),
            launch_after_install: false,
        }
    }
}

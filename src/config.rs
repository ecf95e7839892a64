//! Run configuration
//!
//! The immutable record handed to the install sequencer. The wizard and the
//! headless CLI both build one of these and pass it by value.

use crate::layout::{DEFAULT_INSTALL_DIR, InstallLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inputs of a single installation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Binary to install; must exist and be readable
    pub source_executable: PathBuf,
    /// Target directory, created if absent
    pub install_dir: PathBuf,
    /// Create `~/.local/bin/theboys-launcher`
    pub create_symlink: bool,
    /// Write the application menu entry
    pub create_desktop_entry: bool,
    /// Raster icon resized into the hicolor theme tree
    pub icon_source: Option<PathBuf>,
    /// Home directory all per-user paths are rooted at
    pub home: PathBuf,
}

impl Configuration {
    /// Configuration with the wizard's defaults for the given source and home
    pub fn new(source_executable: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            source_executable: source_executable.into(),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            create_symlink: true,
            create_desktop_entry: true,
            icon_source: None,
            home: home.into(),
        }
    }

    pub fn with_install_dir(mut self, install_dir: impl Into<PathBuf>) -> Self {
        self.install_dir = install_dir.into();
        self
    }

    pub fn with_symlink(mut self, enabled: bool) -> Self {
        self.create_symlink = enabled;
        self
    }

    pub fn with_desktop_entry(mut self, enabled: bool) -> Self {
        self.create_desktop_entry = enabled;
        self
    }

    pub fn with_icon(mut self, icon: Option<PathBuf>) -> Self {
        self.icon_source = icon;
        self
    }

    /// Per-user layout derived from `home`
    pub fn layout(&self) -> InstallLayout {
        InstallLayout::new(&self.home)
    }

    /// Final location of the installed binary
    pub fn installed_executable(&self) -> PathBuf {
        InstallLayout::installed_executable(&self.install_dir)
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }
}

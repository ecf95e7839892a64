//! Per-user filesystem layout
//!
//! Every path the installer writes outside of the chosen install directory is
//! derived from a single home directory, so tests can point the whole run at a
//! temporary directory.

use crate::error::{Result, SetupError};
use std::path::{Path, PathBuf};

/// Fixed name of the installed binary, desktop entry and symlink
pub const APP_NAME: &str = "theboys-launcher";

/// Human-readable application name
pub const APP_DISPLAY_NAME: &str = "TheBoys Launcher";

/// Install directory offered by default in the wizard
pub const DEFAULT_INSTALL_DIR: &str = "/opt/theboys-launcher";

/// Subdirectories created under the user data root
pub const DATA_SUBDIRS: &[&str] = &["instances", "config", "logs", "prism", "util"];

/// Pixel sizes of the hicolor icon theme directories
pub const ICON_SIZES: &[u32] = &[16, 22, 24, 32, 48, 64, 128, 256, 512];

/// Resolved per-user paths for one installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    home: PathBuf,
}

impl InstallLayout {
    /// Build a layout rooted at `home`
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Build a layout for the current user's home directory
    pub fn for_current_user() -> Result<Self> {
        dirs::home_dir()
            .map(Self::new)
            .ok_or_else(|| SetupError::config("Could not determine the home directory"))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.local/share/applications`
    pub fn applications_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join("applications")
    }

    /// `~/.local/share/applications/theboys-launcher.desktop`
    pub fn desktop_entry_path(&self) -> PathBuf {
        self.applications_dir().join(format!("{APP_NAME}.desktop"))
    }

    /// `~/.theboys-launcher`
    pub fn data_root(&self) -> PathBuf {
        self.home.join(format!(".{APP_NAME}"))
    }

    /// Every fixed subdirectory of the data root, in creation order
    pub fn data_subdirs(&self) -> Vec<PathBuf> {
        let root = self.data_root();
        DATA_SUBDIRS.iter().map(|name| root.join(name)).collect()
    }

    /// `~/.local/share/icons/hicolor`
    pub fn icon_theme_dir(&self) -> PathBuf {
        self.home
            .join(".local")
            .join("share")
            .join("icons")
            .join("hicolor")
    }

    /// `~/.local/share/icons/hicolor/<size>x<size>/apps`
    pub fn icon_dir(&self, size: u32) -> PathBuf {
        self.icon_theme_dir()
            .join(format!("{size}x{size}"))
            .join("apps")
    }

    /// Icon file for one size
    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.icon_dir(size).join(format!("{APP_NAME}.png"))
    }

    /// `~/.local/bin`
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join(".local").join("bin")
    }

    /// `~/.local/bin/theboys-launcher`
    pub fn symlink_path(&self) -> PathBuf {
        self.bin_dir().join(APP_NAME)
    }

    /// Where the executable lands inside an install directory
    pub fn installed_executable(install_dir: &Path) -> PathBuf {
        install_dir.join(APP_NAME)
    }
}

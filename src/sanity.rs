//! Pre-flight checks for the runtime environment
//!
//! These run before the wizard lets the user start an installation:
//! - Locate the executable to install (and an icon next to it)
//! - Verify the chosen install directory is writable
//! - Warn when running as root or when cache refresh utilities are missing

use crate::error::{Result, SetupError};
use crate::layout::APP_NAME;
use crate::refresh::RefreshTool;
use nix::unistd::{AccessFlags, access};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// File names probed, in order, when no source path is given
pub const SOURCE_CANDIDATES: &[&str] = &[
    "theboys-launcher-linux-amd64",
    "theboys-launcher-linux",
    "theboys-launcher",
];

/// Icon file names probed next to the source executable
pub const ICON_CANDIDATES: &[&str] = &["theboys-launcher.png", "icon.png"];

/// Result of environment verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityCheckResult {
    pub is_root: bool,
    pub missing_tools: Vec<RefreshTool>,
}

impl SanityCheckResult {
    /// Human-readable warnings; none of them block installation
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_root {
            warnings.push(format!(
                "Running as root. {} is meant to be installed per user; run as a normal user instead.",
                APP_NAME
            ));
        }
        for tool in &self.missing_tools {
            warnings.push(format!(
                "{} not found; the application menu may need a re-login to show the new entry.",
                tool
            ));
        }
        warnings
    }
}

/// Find the executable to install in `dir`
pub fn discover_source(dir: &Path) -> Option<PathBuf> {
    SOURCE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Find an icon asset next to the source executable.
///
/// Candidates that do not decode are logged and passed over, so a stray
/// broken file cannot fail the icon step of an otherwise good install.
pub fn discover_icon(source: &Path) -> Option<PathBuf> {
    let dir = source.parent()?;
    ICON_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .find(|path| match image::open(path) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Ignoring icon {}: {}", path.display(), e);
                false
            }
        })
}

/// Closest ancestor of `path` (including itself) that exists
fn nearest_existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors()
        .find(|p| !p.as_os_str().is_empty() && p.exists())
}

/// Verify that `install_dir` exists and is writable, or can be created.
///
/// # Errors
///
/// - `Validation` for an empty path
/// - `Permission` when the directory, or its nearest existing ancestor, is
///   not writable by the current user
pub fn check_install_dir(install_dir: &Path) -> Result<()> {
    if install_dir.as_os_str().is_empty() {
        return Err(SetupError::validation("Install directory must be specified"));
    }

    let resolved = if install_dir.is_relative() {
        // Relative paths resolve against the working directory
        std::env::current_dir()?.join(install_dir)
    } else {
        install_dir.to_path_buf()
    };

    let existing = nearest_existing_ancestor(&resolved)
        .ok_or_else(|| SetupError::Permission(install_dir.to_path_buf()))?;

    if existing.exists() && !existing.is_dir() {
        return Err(SetupError::validation(format!(
            "{} exists and is not a directory",
            existing.display()
        )));
    }

    access(existing, AccessFlags::W_OK | AccessFlags::X_OK)
        .map_err(|_| SetupError::Permission(install_dir.to_path_buf()))
}

/// Inspect the environment without failing
pub fn verify_environment() -> SanityCheckResult {
    let missing_tools = RefreshTool::iter()
        .filter(|tool| tool.locate().is_none())
        .collect::<Vec<_>>();
    for tool in &missing_tools {
        log::debug!("Optional tool not found: {}", tool);
    }

    SanityCheckResult {
        is_root: nix::unistd::geteuid().is_root(),
        missing_tools,
    }
}

/// Run the checks and log the outcome
pub fn run_preflight_checks() -> SanityCheckResult {
    log::debug!("Running pre-flight checks...");
    let result = verify_environment();
    for warning in result.warnings() {
        log::warn!("{}", warning);
    }
    log::info!(
        "Pre-flight checks done: root={}, missing tools={}",
        result.is_root,
        result.missing_tools.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discover_source_prefers_first_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("theboys-launcher"), "").unwrap();
        fs::write(tmp.path().join("theboys-launcher-linux-amd64"), "").unwrap();

        assert_eq!(
            discover_source(tmp.path()),
            Some(tmp.path().join("theboys-launcher-linux-amd64"))
        );
    }

    #[test]
    fn discover_source_none_when_absent() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(discover_source(tmp.path()), None);
    }

    fn write_png(path: &Path) {
        image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn discover_icon_looks_next_to_source() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("theboys-launcher");
        fs::write(&source, "").unwrap();
        write_png(&tmp.path().join("icon.png"));
        assert_eq!(discover_icon(&source), Some(tmp.path().join("icon.png")));
    }

    #[test]
    fn discover_icon_passes_over_undecodable_files() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("theboys-launcher");
        fs::write(&source, "").unwrap();
        fs::write(tmp.path().join("theboys-launcher.png"), b"not an image").unwrap();
        write_png(&tmp.path().join("icon.png"));
        assert_eq!(discover_icon(&source), Some(tmp.path().join("icon.png")));

        fs::write(tmp.path().join("icon.png"), b"truncated").unwrap();
        assert_eq!(discover_icon(&source), None);
    }

    #[test]
    fn check_install_dir_accepts_missing_child_of_writable_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(check_install_dir(&tmp.path().join("a").join("b")).is_ok());
        assert!(check_install_dir(tmp.path()).is_ok());
    }

    #[test]
    fn check_install_dir_rejects_empty() {
        assert!(matches!(
            check_install_dir(Path::new("")),
            Err(SetupError::Validation(_))
        ));
    }

    #[test]
    fn check_install_dir_rejects_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(check_install_dir(&file.join("sub")).is_err());
    }

    #[test]
    fn warnings_mention_root_and_tools() {
        let result = SanityCheckResult {
            is_root: true,
            missing_tools: vec![RefreshTool::IconCache],
        };
        let warnings = result.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("gtk-update-icon-cache"));
    }
}

//! Best-effort desktop integration cache refresh
//!
//! Failures here never abort an installation. Each tool reports what happened
//! so the sequencer can log it.

use crate::layout::InstallLayout;
use crate::process_guard::{CommandOutcome, run_with_timeout};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Upper bound for a single refresh utility
pub const REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cache refresh utilities invoked after files are in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum RefreshTool {
    #[strum(serialize = "update-desktop-database")]
    DesktopDatabase,
    #[strum(serialize = "gtk-update-icon-cache")]
    IconCache,
}

impl RefreshTool {
    /// Executable name looked up on PATH
    pub fn program(self) -> &'static str {
        match self {
            Self::DesktopDatabase => "update-desktop-database",
            Self::IconCache => "gtk-update-icon-cache",
        }
    }

    /// Full argument list for the given layout
    pub fn args(self, layout: &InstallLayout) -> Vec<String> {
        match self {
            Self::DesktopDatabase => vec![self.target_dir(layout).display().to_string()],
            Self::IconCache => vec![
                "-q".to_string(),
                "-t".to_string(),
                "-f".to_string(),
                self.target_dir(layout).display().to_string(),
            ],
        }
    }

    /// Directory the tool indexes
    pub fn target_dir(self, layout: &InstallLayout) -> PathBuf {
        match self {
            Self::DesktopDatabase => layout.applications_dir(),
            Self::IconCache => layout.icon_theme_dir(),
        }
    }

    /// Locate the utility on PATH
    pub fn locate(self) -> Option<PathBuf> {
        which::which(self.program()).ok()
    }
}

/// What happened when a refresh utility was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    Refreshed,
    /// Nothing to refresh: the directory the tool works on does not exist
    Skipped,
    NotInstalled,
    Failed(String),
}

/// Run every refresh tool, swallowing failures
pub fn refresh_caches(layout: &InstallLayout) -> Vec<(RefreshTool, RefreshStatus)> {
    RefreshTool::iter()
        .map(|tool| (tool, refresh_one(tool, layout)))
        .collect()
}

fn refresh_one(tool: RefreshTool, layout: &InstallLayout) -> RefreshStatus {
    let target = tool.target_dir(layout);
    if !target.is_dir() {
        log::debug!("{} has nothing to index at {}", tool, target.display());
        return RefreshStatus::Skipped;
    }

    let Some(program) = tool.locate() else {
        log::debug!("{} not found on PATH, skipping", tool);
        return RefreshStatus::NotInstalled;
    };

    let args = tool.args(layout);
    log::debug!("Running {} {:?}", program.display(), args);

    match run_with_timeout(Command::new(&program).args(&args), REFRESH_TIMEOUT) {
        Ok(CommandOutcome::Success) => RefreshStatus::Refreshed,
        Ok(CommandOutcome::Failed { code, stderr }) => {
            let reason = format!("exit code {}: {}", code.unwrap_or(-1), stderr);
            log::warn!("{} failed ({})", tool, reason);
            RefreshStatus::Failed(reason)
        }
        Ok(CommandOutcome::TimedOut) => {
            log::warn!("{} timed out after {:?}", tool, REFRESH_TIMEOUT);
            RefreshStatus::Failed(format!("timed out after {}s", REFRESH_TIMEOUT.as_secs()))
        }
        Err(e) => {
            log::warn!("{} could not be started: {}", tool, e);
            RefreshStatus::Failed(e.to_string())
        }
    }
}

//! Install State Machine
//!
//! Authoritative, Rust-side record of how far a run has progressed. The
//! sequencer advances the context after each step and emits the stage's
//! checkpoint, which makes reported progress monotonic by construction.
//!
//! # Stage Flow
//!
//! ```text
//! NotStarted
//!     ↓
//! PreparingDirectory      (10%)
//!     ↓
//! CopyingExecutable       (30%)
//!     ↓
//! WritingDesktopEntry     (50%)
//!     ↓
//! ProvisioningUserData    (70%)
//!     ↓
//! InstallingIcons
//!     ↓
//! LinkingCommand          (90%)
//!     ↓
//! RefreshingCaches
//!     ↓
//! Completed               (100%)
//!
//! (Any non-terminal stage can transition to Failed)
//! ```

use std::fmt;
use thiserror::Error;

/// Installation stages in sequential order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstallStage {
    /// Run has not started yet
    NotStarted = 0,
    /// Creating the install directory
    PreparingDirectory = 1,
    /// Copying the executable and marking it executable
    CopyingExecutable = 2,
    /// Writing the application menu entry
    WritingDesktopEntry = 3,
    /// Creating the user data root and its subdirectories
    ProvisioningUserData = 4,
    /// Populating the hicolor icon theme tree
    InstallingIcons = 5,
    /// Creating the `~/.local/bin` symlink
    LinkingCommand = 6,
    /// Best-effort desktop database / icon cache refresh
    RefreshingCaches = 7,
    /// Run finished successfully (terminal state)
    Completed = 8,
    /// Run aborted (terminal state)
    Failed = 255,
}

impl InstallStage {
    /// Returns the numeric order of this stage (0-8, 255 for Failed)
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true if this is a terminal state (Completed or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the next stage in the sequence, or None if at a terminal state
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::PreparingDirectory),
            Self::PreparingDirectory => Some(Self::CopyingExecutable),
            Self::CopyingExecutable => Some(Self::WritingDesktopEntry),
            Self::WritingDesktopEntry => Some(Self::ProvisioningUserData),
            Self::ProvisioningUserData => Some(Self::InstallingIcons),
            Self::InstallingIcons => Some(Self::LinkingCommand),
            Self::LinkingCommand => Some(Self::RefreshingCaches),
            Self::RefreshingCaches => Some(Self::Completed),
            Self::Completed | Self::Failed => None,
        }
    }

    /// Log line announced when the stage begins
    pub const fn description(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::PreparingDirectory => "Creating directories...",
            Self::CopyingExecutable => "Installing application files...",
            Self::WritingDesktopEntry => "Creating desktop entry...",
            Self::ProvisioningUserData => "Setting up user data directory...",
            Self::InstallingIcons => "Installing icons...",
            Self::LinkingCommand => "Creating command-line symlink...",
            Self::RefreshingCaches => "Updating desktop database...",
            Self::Completed => "Installation completed successfully!",
            Self::Failed => "Installation failed",
        }
    }

    /// Progress emitted once this stage has finished, if it is a checkpoint.
    ///
    /// Icons roll into the symlink checkpoint and cache refresh rolls into
    /// completion.
    pub const fn checkpoint(self) -> Option<u8> {
        match self {
            Self::PreparingDirectory => Some(10),
            Self::CopyingExecutable => Some(30),
            Self::WritingDesktopEntry => Some(50),
            Self::ProvisioningUserData => Some(70),
            Self::LinkingCommand => Some(90),
            Self::Completed => Some(100),
            Self::NotStarted
            | Self::InstallingIcons
            | Self::RefreshingCaches
            | Self::Failed => None,
        }
    }

    /// Returns all stages in order (excluding Failed)
    pub const fn all_stages() -> &'static [Self] {
        &[
            Self::NotStarted,
            Self::PreparingDirectory,
            Self::CopyingExecutable,
            Self::WritingDesktopEntry,
            Self::ProvisioningUserData,
            Self::InstallingIcons,
            Self::LinkingCommand,
            Self::RefreshingCaches,
            Self::Completed,
        ]
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::PreparingDirectory => "preparing directory",
            Self::CopyingExecutable => "copying executable",
            Self::WritingDesktopEntry => "writing desktop entry",
            Self::ProvisioningUserData => "provisioning user data",
            Self::InstallingIcons => "installing icons",
            Self::LinkingCommand => "linking command",
            Self::RefreshingCaches => "refreshing caches",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallTransitionError {
    /// Attempted to transition from a terminal state
    #[error("Cannot transition from terminal state {from}")]
    FromTerminalState { from: InstallStage },
}

/// Tracks the stage of a single sequencer run.
///
/// # Example
///
/// ```
/// use theboys_setup::install_state::{InstallStage, InstallerContext};
///
/// let mut ctx = InstallerContext::new();
/// assert_eq!(ctx.advance().unwrap(), InstallStage::PreparingDirectory);
/// assert_eq!(ctx.progress_percent(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct InstallerContext {
    current: InstallStage,
    failed_at: Option<InstallStage>,
    /// Highest checkpoint passed so far
    progress: u8,
}

impl Default for InstallerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallerContext {
    /// Create a new context in the NotStarted state
    pub fn new() -> Self {
        Self {
            current: InstallStage::NotStarted,
            failed_at: None,
            progress: 0,
        }
    }

    #[inline]
    pub fn current_stage(&self) -> InstallStage {
        self.current
    }

    /// Stage that was running when the run failed, if any
    #[inline]
    pub fn failed_at(&self) -> Option<InstallStage> {
        self.failed_at
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current == InstallStage::Completed
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        self.current == InstallStage::Failed
    }

    /// Progress of the last finished checkpoint (0-100)
    #[inline]
    pub fn progress_percent(&self) -> u8 {
        self.progress
    }

    /// Enter the next stage.
    ///
    /// # Errors
    ///
    /// - `FromTerminalState` if already at Completed or Failed
    pub fn advance(&mut self) -> Result<InstallStage, InstallTransitionError> {
        let next = self
            .current
            .next()
            .ok_or(InstallTransitionError::FromTerminalState { from: self.current })?;
        self.current = next;
        // Completed has no work of its own, so its checkpoint is reached on entry
        if next == InstallStage::Completed {
            self.progress = 100;
        }
        Ok(next)
    }

    /// Mark the current stage as finished and return its checkpoint, if any.
    pub fn finish_stage(&mut self) -> Option<u8> {
        let checkpoint = self.current.checkpoint()?;
        if checkpoint > self.progress {
            self.progress = checkpoint;
        }
        Some(self.progress)
    }

    /// Mark the run as failed.
    ///
    /// # Errors
    ///
    /// - `FromTerminalState` if already at Completed or Failed
    pub fn fail(&mut self) -> Result<(), InstallTransitionError> {
        if self.current.is_terminal() {
            return Err(InstallTransitionError::FromTerminalState { from: self.current });
        }
        self.failed_at = Some(self.current);
        self.current = InstallStage::Failed;
        Ok(())
    }
}

impl From<InstallTransitionError> for crate::error::SetupError {
    fn from(err: InstallTransitionError) -> Self {
        crate::error::SetupError::install_transition(err.to_string())
    }
}

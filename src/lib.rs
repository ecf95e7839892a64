//! TheBoys Setup Library
//!
//! Per-user installation of TheBoys Launcher on Linux: the install sequencer,
//! its pre-flight checks and the terminal wizard that drives it.

pub mod app;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod desktop_entry;
pub mod error;
pub mod events;
pub mod fs_ops;
pub mod icons;
pub mod install_state;
pub mod installer;
pub mod launcher;
pub mod layout;
pub mod process_guard;
pub mod refresh;
pub mod sanity;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppState, WizardOutcome, WizardPage};
pub use config::Configuration;
pub use config_file::InstallationConfig;
pub use desktop_entry::DesktopEntry;
pub use error::{Result, SetupError};
pub use events::{CollectingSink, ProgressEvent, ProgressSink};
pub use install_state::{InstallStage, InstallTransitionError, InstallerContext};
pub use installer::{CancelToken, InstallHandle, InstallSequencer, SUCCESS_MESSAGE};
pub use layout::InstallLayout;
pub use process_guard::CommandProcessGroup;

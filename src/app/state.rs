//! Wizard state definitions
//!
//! Everything the wizard shows lives in `AppState`. It is mutated only by
//! key handling and by progress events, so page transitions can be tested
//! without a terminal.

use crate::config::Configuration;
use crate::events::ProgressEvent;
use crate::layout::DEFAULT_INSTALL_DIR;
use crate::sanity;
use std::path::{Path, PathBuf};

/// Pages of the wizard, in order.
///
/// ```text
/// Welcome -> License -> Settings -> Installing -> Finish
/// ```
///
/// # Invariants
///
/// - `License` cannot be left forward until the license is accepted
/// - `Settings` cannot be left forward while the install dir is unusable
/// - `Installing` cannot be left until the run reports `Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPage {
    #[default]
    Welcome,
    License,
    Settings,
    Installing,
    Finish,
}

impl WizardPage {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Welcome => Some(Self::License),
            Self::License => Some(Self::Settings),
            Self::Settings => Some(Self::Installing),
            Self::Installing => Some(Self::Finish),
            Self::Finish => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Welcome => None,
            Self::License => Some(Self::Welcome),
            Self::Settings => Some(Self::License),
            // No way back once files are being written
            Self::Installing | Self::Finish => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to TheBoys Launcher",
            Self::License => "License Agreement",
            Self::Settings => "Installation Settings",
            Self::Installing => "Installing",
            Self::Finish => "Installation Complete",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Welcome => "Modern Minecraft Modpack Launcher",
            Self::License => "Please read the license agreement",
            Self::Settings => "Configure your installation preferences",
            Self::Installing => "Please wait while TheBoys Launcher is being installed...",
            Self::Finish => "TheBoys Launcher has been successfully installed",
        }
    }

    /// 1-indexed position for the "Step N of M" header
    pub fn step_number(self) -> usize {
        self as usize + 1
    }

    pub const TOTAL_STEPS: usize = 5;
}

/// Focusable controls on the Settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    InstallDir,
    Symlink,
    DesktopEntry,
}

impl SettingsField {
    pub fn next(self) -> Self {
        match self {
            Self::InstallDir => Self::Symlink,
            Self::Symlink => Self::DesktopEntry,
            Self::DesktopEntry => Self::InstallDir,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::InstallDir => Self::DesktopEntry,
            Self::Symlink => Self::InstallDir,
            Self::DesktopEntry => Self::Symlink,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub page: WizardPage,
    pub source_executable: PathBuf,
    pub home: PathBuf,
    pub icon_source: Option<PathBuf>,
    pub license_accepted: bool,
    /// Raw text of the install dir input
    pub install_dir_input: String,
    pub create_symlink: bool,
    pub create_desktop_entry: bool,
    pub focused_field: SettingsField,
    /// Why the install dir cannot be used, if it cannot
    pub install_dir_error: Option<String>,
    /// Installation progress percentage
    pub progress: u8,
    /// Installer log lines, in arrival order
    pub log_lines: Vec<String>,
    pub install_running: bool,
    /// Set once the user asked to stop the running installation
    pub cancel_requested: bool,
    /// Message of a failed run; rendered as a modal
    pub failure: Option<String>,
    pub launch_after_install: bool,
    /// Pre-flight warnings shown on the welcome page
    pub warnings: Vec<String>,
}

impl AppState {
    pub fn new(source_executable: PathBuf, home: PathBuf, icon_source: Option<PathBuf>) -> Self {
        let mut state = Self {
            page: WizardPage::Welcome,
            source_executable,
            home,
            icon_source,
            license_accepted: false,
            install_dir_input: DEFAULT_INSTALL_DIR.to_string(),
            create_symlink: true,
            create_desktop_entry: true,
            focused_field: SettingsField::InstallDir,
            install_dir_error: None,
            progress: 0,
            log_lines: Vec::new(),
            install_running: false,
            cancel_requested: false,
            failure: None,
            launch_after_install: true,
            warnings: Vec::new(),
        };
        state.revalidate_install_dir();
        state
    }

    /// Whether the forward action is enabled on the current page
    pub fn can_advance(&self) -> bool {
        match self.page {
            WizardPage::Welcome => true,
            WizardPage::License => self.license_accepted,
            WizardPage::Settings => self.install_dir_error.is_none(),
            // Moves on by itself when the run succeeds
            WizardPage::Installing => false,
            WizardPage::Finish => false,
        }
    }

    /// Move forward one page; returns false when blocked.
    ///
    /// Entering `Installing` only changes the page; the caller starts the run.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.page.next() {
            Some(next) => {
                self.page = next;
                true
            }
            None => false,
        }
    }

    pub fn go_back(&mut self) -> bool {
        match self.page.previous() {
            Some(prev) => {
                self.page = prev;
                true
            }
            None => false,
        }
    }

    /// Esc/q leave the wizard everywhere except during a run
    pub fn can_quit(&self) -> bool {
        !(self.page == WizardPage::Installing && self.install_running)
    }

    pub fn toggle_license(&mut self) {
        self.license_accepted = !self.license_accepted;
    }

    pub fn set_install_dir(&mut self, value: impl Into<String>) {
        self.install_dir_input = value.into();
        self.revalidate_install_dir();
    }

    pub fn push_install_dir_char(&mut self, c: char) {
        self.install_dir_input.push(c);
        self.revalidate_install_dir();
    }

    pub fn pop_install_dir_char(&mut self) {
        self.install_dir_input.pop();
        self.revalidate_install_dir();
    }

    fn revalidate_install_dir(&mut self) {
        self.install_dir_error = sanity::check_install_dir(Path::new(self.install_dir_input.trim()))
            .err()
            .map(|e| e.to_string());
    }

    /// Space on the focused Settings control
    pub fn toggle_focused(&mut self) {
        match self.focused_field {
            SettingsField::InstallDir => {}
            SettingsField::Symlink => self.create_symlink = !self.create_symlink,
            SettingsField::DesktopEntry => self.create_desktop_entry = !self.create_desktop_entry,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused_field = self.focused_field.previous();
    }

    /// Configuration for the run described by the current choices
    pub fn build_configuration(&self) -> Configuration {
        let install_dir = PathBuf::from(self.install_dir_input.trim());
        let install_dir = std::path::absolute(&install_dir).unwrap_or(install_dir);
        Configuration::new(&self.source_executable, &self.home)
            .with_install_dir(install_dir)
            .with_symlink(self.create_symlink)
            .with_desktop_entry(self.create_desktop_entry)
            .with_icon(self.icon_source.clone())
    }

    /// Reset run state when the sequencer starts
    pub fn begin_install(&mut self) {
        self.page = WizardPage::Installing;
        self.progress = 0;
        self.log_lines.clear();
        self.failure = None;
        self.install_running = true;
        self.cancel_requested = false;
    }

    /// Record a cancel request; returns false when there is nothing to cancel
    pub fn request_cancel(&mut self) -> bool {
        if !self.install_running || self.cancel_requested {
            return false;
        }
        self.cancel_requested = true;
        self.log_lines
            .push("Cancelling after the current step...".to_string());
        true
    }

    /// Fold one event from the sequencer into the state
    pub fn apply_event(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Progress(percent) => {
                self.progress = self.progress.max(percent.min(100));
            }
            ProgressEvent::Log(line) => self.log_lines.push(line),
            ProgressEvent::Completed { success, message } => {
                self.install_running = false;
                if success {
                    self.page = WizardPage::Finish;
                } else {
                    self.failure = Some(message);
                }
            }
        }
    }

    /// Close the failure modal and return to Settings for another attempt
    pub fn dismiss_failure(&mut self) {
        if self.failure.take().is_some() {
            self.page = WizardPage::Settings;
            self.revalidate_install_dir();
        }
    }

    pub fn toggle_launch(&mut self) {
        self.launch_after_install = !self.launch_after_install;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(tmp: &Path) -> AppState {
        let mut state = AppState::new(tmp.join("theboys-launcher"), tmp.join("home"), None);
        state.set_install_dir(tmp.join("opt").display().to_string());
        state
    }

    #[test]
    fn test_license_gate() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        assert!(state.advance());
        assert_eq!(state.page, WizardPage::License);
        assert!(!state.advance());
        state.toggle_license();
        assert!(state.advance());
        assert_eq!(state.page, WizardPage::Settings);
    }

    #[test]
    fn test_empty_install_dir_blocks_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        state.page = WizardPage::Settings;
        state.set_install_dir("   ");
        assert!(state.install_dir_error.is_some());
        assert!(!state.can_advance());
    }

    #[test]
    fn test_cannot_quit_while_running() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        state.begin_install();
        assert!(!state.can_quit());
        assert!(!state.go_back());
        state.apply_event(ProgressEvent::Completed {
            success: true,
            message: "ok".into(),
        });
        assert!(state.can_quit());
        assert_eq!(state.page, WizardPage::Finish);
    }

    #[test]
    fn test_progress_never_decreases() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        state.apply_event(ProgressEvent::Progress(50));
        state.apply_event(ProgressEvent::Progress(30));
        assert_eq!(state.progress, 50);
    }

    #[test]
    fn test_failure_returns_to_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        state.begin_install();
        state.apply_event(ProgressEvent::Completed {
            success: false,
            message: "boom".into(),
        });
        assert_eq!(state.page, WizardPage::Installing);
        assert_eq!(state.failure.as_deref(), Some("boom"));
        state.dismiss_failure();
        assert_eq!(state.page, WizardPage::Settings);
        assert!(state.failure.is_none());
    }

    #[test]
    fn test_settings_focus_cycles() {
        let mut field = SettingsField::InstallDir;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, SettingsField::InstallDir);
        assert_eq!(SettingsField::InstallDir.previous(), SettingsField::DesktopEntry);
    }
}

//! Tests for Wizard State Management
//!
//! These tests verify:
//! - Page order and the gates between pages
//! - Settings edits and the configuration they produce
//! - How the state folds installer events

use std::fs;
use std::path::PathBuf;
use theboys_setup::app::{AppState, SettingsField, WizardPage};
use theboys_setup::events::ProgressEvent;
use theboys_setup::layout::DEFAULT_INSTALL_DIR;

fn fresh_state() -> AppState {
    AppState::new(
        PathBuf::from("/downloads/theboys-launcher-linux-amd64"),
        PathBuf::from("/home/player"),
        None,
    )
}

// =============================================================================
// Page Order
// =============================================================================

#[test]
fn test_pages_are_linear() {
    let mut page = WizardPage::Welcome;
    let mut seen = vec![page];
    while let Some(next) = page.next() {
        page = next;
        seen.push(page);
    }
    assert_eq!(
        seen,
        vec![
            WizardPage::Welcome,
            WizardPage::License,
            WizardPage::Settings,
            WizardPage::Installing,
            WizardPage::Finish,
        ]
    );
    assert_eq!(seen.len(), WizardPage::TOTAL_STEPS);
}

#[test]
fn test_step_numbers_are_one_based() {
    assert_eq!(WizardPage::Welcome.step_number(), 1);
    assert_eq!(WizardPage::Finish.step_number(), WizardPage::TOTAL_STEPS);
}

#[test]
fn test_no_going_back_after_settings() {
    assert_eq!(WizardPage::Installing.previous(), None);
    assert_eq!(WizardPage::Finish.previous(), None);
    assert_eq!(WizardPage::Settings.previous(), Some(WizardPage::License));
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_defaults_match_wizard() {
    let state = fresh_state();
    assert_eq!(state.page, WizardPage::Welcome);
    assert_eq!(state.install_dir_input, DEFAULT_INSTALL_DIR);
    assert!(state.create_symlink);
    assert!(state.create_desktop_entry);
    assert!(state.launch_after_install);
    assert!(!state.license_accepted);
    assert_eq!(state.focused_field, SettingsField::InstallDir);
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_configuration_reflects_settings() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = fresh_state();
    state.set_install_dir(format!("  {}  ", tmp.path().join("games").display()));
    state.focus_next();
    state.toggle_focused();
    assert!(!state.create_symlink);

    let config = state.build_configuration();
    assert_eq!(config.install_dir, tmp.path().join("games"));
    assert!(!config.create_symlink);
    assert!(config.create_desktop_entry);
    assert_eq!(config.home, PathBuf::from("/home/player"));
}

#[test]
fn test_unwritable_dir_blocks_install() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("not-a-dir");
    fs::write(&file, "").unwrap();

    let mut state = fresh_state();
    state.page = WizardPage::Settings;
    state.set_install_dir(file.join("inner").display().to_string());
    assert!(!state.can_advance());

    state.set_install_dir(tmp.path().display().to_string());
    assert!(state.install_dir_error.is_none());
    assert!(state.can_advance());
}

#[test]
fn test_typing_revalidates() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = fresh_state();
    state.set_install_dir("");
    assert!(state.install_dir_error.is_some());
    for c in tmp.path().display().to_string().chars() {
        state.push_install_dir_char(c);
    }
    assert!(state.install_dir_error.is_none());
}

// =============================================================================
// Installer Events
// =============================================================================

#[test]
fn test_log_lines_are_appended_in_order() {
    let mut state = fresh_state();
    state.begin_install();
    state.apply_event(ProgressEvent::Log("Creating directories...".into()));
    state.apply_event(ProgressEvent::Log("Installing application files...".into()));
    assert_eq!(
        state.log_lines,
        vec!["Creating directories...", "Installing application files..."]
    );
}

#[test]
fn test_begin_install_resets_previous_run() {
    let mut state = fresh_state();
    state.begin_install();
    state.apply_event(ProgressEvent::Progress(70));
    state.apply_event(ProgressEvent::Log("old".into()));
    state.apply_event(ProgressEvent::Completed {
        success: false,
        message: "Installation cancelled".into(),
    });
    state.dismiss_failure();

    state.begin_install();
    assert_eq!(state.progress, 0);
    assert!(state.log_lines.is_empty());
    assert!(state.failure.is_none());
    assert!(state.install_running);
}

#[test]
fn test_cancel_request_only_while_running() {
    let mut state = fresh_state();
    assert!(!state.request_cancel());

    state.begin_install();
    assert!(state.request_cancel());
    assert!(!state.request_cancel(), "a second request is a no-op");
    assert_eq!(state.log_lines, vec!["Cancelling after the current step..."]);

    state.begin_install();
    assert!(!state.cancel_requested);
}

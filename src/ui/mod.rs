//! User interface rendering module
//!
//! - `header` - Banner, page title, key hints, progress and log widgets
//! - `screens` - One body renderer per wizard page
//! - `dialogs` - The failure modal

mod dialogs;
mod header;
pub mod screens;

use crate::app::{AppState, SettingsField, WizardPage};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub use header::HeaderRenderer;

/// UI renderer for the wizard
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current page
    pub fn render(&self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.height()), // Banner
                Constraint::Length(3),                    // Title
                Constraint::Min(5),                       // Page body
                Constraint::Length(1),                    // Key hints
            ])
            .split(f.area());

        self.header.render_header(f, chunks[0]);
        self.header.render_title(
            f,
            chunks[1],
            state.page.title(),
            state.page.subtitle(),
            (state.page.step_number(), WizardPage::TOTAL_STEPS),
        );

        match state.page {
            WizardPage::Welcome => screens::render_welcome_screen(f, chunks[2], state),
            WizardPage::License => screens::render_license_screen(f, chunks[2], state),
            WizardPage::Settings => screens::render_settings_screen(f, chunks[2], state),
            WizardPage::Installing => screens::render_installing_screen(f, chunks[2], state),
            WizardPage::Finish => screens::render_finish_screen(f, chunks[2], state),
        }

        header::render_key_hints(f, chunks[3], &page_hints(state));

        if let Some(message) = &state.failure {
            dialogs::render_failure_modal(f, message);
        }
    }
}

/// Key hints for the bottom bar
fn page_hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
    if state.failure.is_some() {
        return vec![("Enter", "Back to settings")];
    }
    match state.page {
        WizardPage::Welcome => vec![("Enter", "Next"), ("Esc", "Quit")],
        WizardPage::License => {
            let mut hints = vec![("Space", "Accept")];
            if state.can_advance() {
                hints.push(("Enter", "Next"));
            }
            hints.extend([("Left", "Back"), ("Esc", "Quit")]);
            hints
        }
        WizardPage::Settings => {
            let mut hints = vec![("Tab", "Next field")];
            if state.focused_field != SettingsField::InstallDir {
                hints.push(("Space", "Toggle"));
            }
            if state.can_advance() {
                hints.push(("Enter", "Install"));
            }
            hints.push(("Esc", "Quit"));
            hints
        }
        WizardPage::Installing if state.cancel_requested => vec![("", "Cancelling...")],
        WizardPage::Installing => vec![("Esc", "Cancel")],
        WizardPage::Finish => vec![("Space", "Toggle launch"), ("Enter", "Finish")],
    }
}

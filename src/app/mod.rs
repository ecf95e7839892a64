//! Application module
//!
//! Contains the wizard's event loop and key handling.
//!
//! # Module Structure
//! - `state` - Wizard state types (AppState, WizardPage, SettingsField)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, SettingsField, WizardPage};

use crate::config::Configuration;
use crate::error::{Result, SetupError};
use crate::installer::{InstallHandle, InstallSequencer};
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;

/// How often the loop wakes up to drain installer events
const TICK: Duration = Duration::from_millis(50);

/// What the wizard decided once it exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOutcome {
    /// Configuration of a successful run, if one happened
    pub installed: Option<Configuration>,
    pub launch: bool,
}

/// Main application struct
pub struct App {
    state: AppState,
    handle: Option<InstallHandle>,
    ui_renderer: UiRenderer,
    last_config: Option<Configuration>,
}

impl App {
    /// Create a new application instance
    pub fn new(state: AppState) -> Self {
        info!("Creating new App instance");
        Self {
            state,
            handle: None,
            ui_renderer: UiRenderer::new(),
            last_config: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main loop until the user quits or finishes
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<WizardOutcome> {
        info!("Starting main application loop");

        loop {
            self.poll_installer();

            terminal
                .draw(|f| self.ui_renderer.render(f, &self.state))
                .map_err(|e| SetupError::terminal(format!("Failed to draw: {}", e)))?;

            if crossterm::event::poll(TICK)? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if let Some(outcome) = self.handle_key_event(key_event)? {
                        return Ok(outcome);
                    }
                }
            }
        }
    }

    /// Drain every queued event without blocking
    fn poll_installer(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        while let Some(event) = handle.try_next() {
            debug!("Installer event: {:?}", event);
            self.state.apply_event(event);
        }
        if handle.is_finished() {
            if let Some(handle) = self.handle.take() {
                handle.join();
            }
        }
    }

    /// Handle one key press; returns the outcome when the wizard should exit
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<Option<WizardOutcome>> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(None);
        }

        let ctrl_c = key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c');
        if ctrl_c {
            return Ok(self.quit());
        }

        if self.state.failure.is_some() {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_failure();
            }
            return Ok(None);
        }

        // Text input swallows printable keys, so q only quits elsewhere
        let editing_text = self.state.page == WizardPage::Settings
            && self.state.focused_field == SettingsField::InstallDir;
        match key_event.code {
            KeyCode::Esc => return Ok(self.quit()),
            KeyCode::Char('q') if !editing_text => return Ok(self.quit()),
            _ => {}
        }

        match self.state.page {
            WizardPage::Welcome => {
                if matches!(key_event.code, KeyCode::Enter | KeyCode::Right) {
                    self.state.advance();
                }
            }
            WizardPage::License => match key_event.code {
                KeyCode::Char(' ') | KeyCode::Char('a') => self.state.toggle_license(),
                KeyCode::Enter | KeyCode::Right => {
                    self.state.advance();
                }
                KeyCode::Left | KeyCode::Backspace => {
                    self.state.go_back();
                }
                _ => {}
            },
            WizardPage::Settings => self.handle_settings_key(key_event)?,
            WizardPage::Installing => {}
            WizardPage::Finish => match key_event.code {
                KeyCode::Char(' ') => self.state.toggle_launch(),
                KeyCode::Enter => {
                    return Ok(Some(WizardOutcome {
                        installed: self.last_config.clone(),
                        launch: self.state.launch_after_install,
                    }));
                }
                _ => {}
            },
        }

        Ok(None)
    }

    fn handle_settings_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_previous(),
            KeyCode::Enter => {
                if self.state.can_advance() {
                    self.start_install()?;
                }
            }
            KeyCode::Char(c) if self.state.focused_field == SettingsField::InstallDir => {
                self.state.push_install_dir_char(c);
            }
            KeyCode::Backspace if self.state.focused_field == SettingsField::InstallDir => {
                self.state.pop_install_dir_char();
            }
            KeyCode::Char(' ') => self.state.toggle_focused(),
            KeyCode::Left => {
                self.state.go_back();
            }
            _ => {}
        }
        Ok(())
    }

    fn start_install(&mut self) -> Result<()> {
        let config = self.state.build_configuration();
        info!("Starting installation into {}", config.install_dir.display());
        self.state.begin_install();
        self.last_config = Some(config.clone());

        match InstallSequencer::new(config).spawn() {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => {
                log::error!("Failed to start installer thread: {}", e);
                self.state.install_running = false;
                self.state.failure = Some(e.to_string());
            }
        }
        Ok(())
    }

    fn quit(&mut self) -> Option<WizardOutcome> {
        if !self.state.can_quit() {
            // The page stays until Completed arrives; a cancel only shortens the run
            if self.state.request_cancel() {
                info!("Cancellation requested by user");
                if let Some(handle) = &self.handle {
                    handle.cancel();
                }
            }
            return None;
        }
        info!("Wizard closed on page {:?}", self.state.page);
        let installed = (self.state.page == WizardPage::Finish)
            .then(|| self.last_config.clone())
            .flatten();
        Some(WizardOutcome {
            installed,
            launch: false,
        })
    }
}

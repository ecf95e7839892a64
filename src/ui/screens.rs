//! Wizard page bodies.
//!
//! One function per `WizardPage`, each drawing into the content area below
//! the title. Navigation hints are rendered by the caller.

use crate::app::{AppState, SettingsField};
use crate::layout::{APP_NAME, APP_DISPLAY_NAME};
use crate::theme::Styles;
use crate::ui::header;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// License shown on the License page
pub const LICENSE_TEXT: &str = "\
TheBoys Launcher - License Agreement

Copyright (c) 2024 TheBoys

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.";

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

pub fn render_welcome_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled(format!("Welcome to {}!", APP_DISPLAY_NAME), Styles::title())),
        Line::raw(""),
        Line::raw(format!(
            "This installer will guide you through the installation of {}, \
             a modern, cross-platform Minecraft modpack launcher.",
            APP_DISPLAY_NAME
        )),
        Line::raw(""),
        Line::from(Span::styled("Features:", Styles::text())),
        Line::raw("  - Modern graphical user interface"),
        Line::raw("  - Automatic Java runtime management"),
        Line::raw("  - Support for multiple modpack sources"),
        Line::raw("  - Automatic updates and backups"),
        Line::raw("  - Integration with Prism Launcher"),
        Line::raw(""),
        Line::raw(format!(
            "Your saved games and settings will be stored in ~/.{}/",
            APP_NAME
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Installing: ", Styles::text_secondary()),
            Span::styled(state.source_executable.display().to_string(), Styles::text()),
        ]),
    ];

    for warning in &state.warnings {
        lines.push(Line::from(Span::styled(format!("! {}", warning), Styles::warning())));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_inactive()))
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

pub fn render_license_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let license = Paragraph::new(LICENSE_TEXT)
        .style(Styles::text_secondary())
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_inactive()))
        .wrap(Wrap { trim: false });
    f.render_widget(license, chunks[0]);

    let style = if state.license_accepted { Styles::success() } else { Styles::focused() };
    let accept = Paragraph::new(format!(
        "  {} I accept the terms of the license agreement",
        checkbox(state.license_accepted)
    ))
    .style(style);
    f.render_widget(accept, chunks[1]);
}

pub fn render_settings_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Install dir
            Constraint::Length(1), // Writability
            Constraint::Length(1),
            Constraint::Length(1), // Symlink
            Constraint::Length(1), // Desktop entry
            Constraint::Min(0),
        ])
        .split(area);

    let dir_focused = state.focused_field == SettingsField::InstallDir;
    let cursor = if dir_focused { "_" } else { "" };
    let border_style = if dir_focused {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    let dir_input = Paragraph::new(format!(" {}{}", state.install_dir_input, cursor))
        .style(if dir_focused { Styles::focused() } else { Styles::text() })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Choose where to install {}", APP_DISPLAY_NAME)),
        );
    f.render_widget(dir_input, chunks[0]);

    let status = match &state.install_dir_error {
        Some(error) => Paragraph::new(format!("  {}", error)).style(Styles::error()),
        None => Paragraph::new("  Directory is writable").style(Styles::success()),
    };
    f.render_widget(status, chunks[1]);

    let toggles = [
        (
            SettingsField::Symlink,
            state.create_symlink,
            format!("Create command-line symlink (~/.local/bin/{})", APP_NAME),
        ),
        (
            SettingsField::DesktopEntry,
            state.create_desktop_entry,
            "Add to applications menu".to_string(),
        ),
    ];
    for ((field, checked, label), chunk) in toggles.into_iter().zip([chunks[3], chunks[4]]) {
        let style = if state.focused_field == field {
            Styles::focused()
        } else {
            Styles::text()
        };
        f.render_widget(
            Paragraph::new(format!("  {} {}", checkbox(checked), label)).style(style),
            chunk,
        );
    }
}

pub fn render_installing_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    header::render_progress_bar(f, chunks[0], state.progress);
    header::render_installer_output(f, chunks[1], &state.log_lines);
}

pub fn render_finish_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(Span::styled("Installation Complete!", Styles::success())),
        Line::raw(""),
        Line::raw(format!("{} has been successfully installed on your system.", APP_DISPLAY_NAME)),
        Line::raw(""),
        Line::from(Span::styled("Next Steps:", Styles::text())),
        Line::raw(format!("  - Launch {} from your applications menu", APP_DISPLAY_NAME)),
        Line::raw(format!("  - Or run `{}` from the terminal", APP_NAME)),
        Line::raw(""),
        Line::from(Span::styled("Important Information:", Styles::text())),
        Line::raw(format!("  - Your user data is stored in ~/.{}/", APP_NAME)),
        Line::raw("  - This includes instances, settings, and downloaded files"),
        Line::raw(""),
        Line::from(Span::styled(
            format!(
                "  {} Launch {} now",
                checkbox(state.launch_after_install),
                APP_DISPLAY_NAME
            ),
            Styles::focused(),
        )),
    ];

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_inactive()))
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

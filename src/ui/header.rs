//! Header and common widget rendering
//!
//! This module contains the ASCII art header, the page title, key hints,
//! the progress bar and the installer log panel.

use crate::theme::{self, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Header renderer containing the ASCII art header
pub struct HeaderRenderer {
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Height the banner needs
    pub fn height(&self) -> u16 {
        self.header_lines.len() as u16
    }

    /// Render the ASCII art header
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the page title with its step counter and subtitle
    pub fn render_title(&self, f: &mut Frame, area: Rect, title: &str, subtitle: &str, step: (usize, usize)) {
        let lines = vec![
            Line::from(vec![
                Span::styled(title.to_string(), Styles::title()),
                Span::styled(format!("  (Step {} of {})", step.0, step.1), Styles::text_muted()),
            ]),
            Line::from(Span::styled(subtitle.to_string(), Styles::text_secondary())),
        ];
        let title_widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::BOTTOM).border_style(Styles::border_inactive()))
            .alignment(Alignment::Center);
        f.render_widget(title_widget, area);
    }

    fn create_header() -> Vec<Line<'static>> {
        [
            r" _____ _          ____                 ",
            r"|_   _| |__   ___| __ )  ___  _   _ ___ ",
            r"  | | | '_ \ / _ \  _ \ / _ \| | | / __|",
            r"  | | | | | |  __/ |_) | (_) | |_| \__ \",
            r"  |_| |_| |_|\___|____/ \___/ \__, |___/",
            r"                              |___/     ",
        ]
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Styles::title())))
        .collect()
    }
}

/// Render a row of `[key] action` hints
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            let key = if key.is_empty() {
                Span::raw(" ")
            } else {
                Span::styled(format!(" [{}] ", key), Styles::key_hint())
            };
            [key, Span::styled(format!("{} ", action), Styles::text_secondary())]
        })
        .collect();
    let bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(bar, area);
}

/// Render progress bar
pub fn render_progress_bar(f: &mut Frame, area: Rect, progress: u8) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title("Installation Progress"),
        )
        .gauge_style(Styles::gauge())
        .percent(u16::from(progress.min(100)));
    f.render_widget(gauge, area);
}

/// Render installer output, keeping the newest lines in view
pub fn render_installer_output(f: &mut Frame, area: Rect, output: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = output.len().saturating_sub(visible);
    let output_lines: Vec<Line> = output[start..]
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), theme::log_line_style(line))))
        .collect();

    let output_widget = Paragraph::new(output_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title("Installation Log"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(output_widget, area);
}

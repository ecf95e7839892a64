//! Modal dialogs drawn over a page

use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// "Installation Failed" modal
pub fn render_failure_modal(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("The installation failed: {}", message),
            Styles::error(),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Please check the log output for details.",
            Styles::text_secondary(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[Enter] ", Styles::key_hint()),
            Span::styled("Back to settings", Styles::text()),
        ]),
    ];

    let modal = Paragraph::new(lines)
        .style(Styles::modal())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::error())
                .title(" Installation Failed "),
        );
    f.render_widget(modal, area);
}

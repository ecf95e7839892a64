//! Centralized theme and styling for the wizard
//!
//! Colors and styles are defined once here rather than hardcoded in the
//! page renderers.
//!
//! # Usage
//! ```rust
//! use theboys_setup::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the wizard
pub struct Colors;

impl Colors {
    /// Modal background
    pub const BG_MODAL: Color = Color::Rgb(30, 20, 20);

    /// Gauge background
    pub const BG_GAUGE: Color = Color::Rgb(40, 40, 50);

    pub const FG_PRIMARY: Color = Color::White;
    pub const FG_SECONDARY: Color = Color::Gray;
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Borders, titles, the focused control
    pub const PRIMARY: Color = Color::LightGreen;

    /// Key hints and emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Cyan;

    pub const BORDER_ACTIVE: Color = Color::LightGreen;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Progress bar fill
    pub const PROGRESS: Color = Color::Green;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Main title style (accent, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Focused control label
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Key name in hint lines, e.g. `[Enter]`
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Colors::PROGRESS).bg(Colors::BG_GAUGE)
    }

    pub fn modal() -> Style {
        Style::default().bg(Colors::BG_MODAL).fg(Colors::FG_PRIMARY)
    }
}

/// Style for one installer log line, keyed off its wording
pub fn log_line_style(line: &str) -> Style {
    if line.starts_with("Installation failed") {
        Styles::error()
    } else if line.contains("failed") || line.contains("not found") {
        Styles::warning()
    } else if line.starts_with("Installation completed") {
        Styles::success()
    } else {
        Styles::text_secondary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_line_styles() {
        assert_eq!(log_line_style("Installation failed: boom"), Styles::error());
        assert_eq!(
            log_line_style("gtk-update-icon-cache not found, skipped"),
            Styles::warning()
        );
        assert_eq!(
            log_line_style("Installation completed successfully!"),
            Styles::success()
        );
        assert_eq!(log_line_style("Creating directories..."), Styles::text_secondary());
    }
}

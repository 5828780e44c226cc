use counsel_core::Speaker;
use ratatui::style::{Color, Style};

/// Iceberg color theme for the counsel TUI
///
/// Based on iceberg.vim color scheme (https://github.com/cocopon/iceberg.vim)
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Secondary background: panels, sidebar, input card
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Primary accent: blue
    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    /// Secondary accent: cyan
    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    /// Tertiary accent: purple
    pub const PURPLE: Color = Color::Rgb(160, 147, 199);

    /// In-flight turn indicator
    pub const YELLOW: Color = Color::Rgb(226, 164, 120);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn primary() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Accent color for a message author
    pub fn speaker_color(speaker: Speaker) -> Color {
        match speaker {
            Speaker::User => Self::BLUE,
            Speaker::Assistant => Self::CYAN,
        }
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header rows: title and tagline
pub const HEADER_HEIGHT: u16 = 2;

/// Footer rows: divider, input card (3 rows) and key hints
pub const FOOTER_HEIGHT: u16 = 5;

/// Sidebar width when shown
pub const SIDEBAR_WIDTH: u16 = 28;

/// Layout breakpoints for responsive TUI
///
/// Based on terminal width, we render different layouts:
/// - >= 100 cols: Full layout with sidebar
/// - 80-99 cols: Medium layout, sidebar hidden
/// - < 80 cols: Compact layout, minimal chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full layout with sidebar (>= 100 columns)
    Full,
    /// Medium layout without sidebar (80-99 columns)
    Medium,
    /// Compact layout (<= 79 columns)
    Compact,
}

impl From<u16> for LayoutMode {
    fn from(width: u16) -> Self {
        match width {
            w if w >= 100 => Self::Full,
            w if w >= 80 => Self::Medium,
            _ => Self::Compact,
        }
    }
}

impl LayoutMode {
    /// Check if sidebar should be shown
    pub fn has_sidebar(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Calculated layout for the TUI
#[derive(Debug, Clone)]
pub struct TuiLayout {
    pub header: Rect,
    /// Main transcript area
    pub transcript: Rect,
    /// Options sidebar (only in Full mode)
    pub sidebar: Option<Rect>,
    pub footer: Rect,
}

impl TuiLayout {
    /// Calculate layout based on terminal size and sidebar visibility preference
    pub fn calculate(area: Rect, sidebar_visible: bool) -> Self {
        let effective_sidebar_visible = sidebar_visible && LayoutMode::from(area.width).has_sidebar();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let header = chunks[0];
        let main = chunks[1];
        let footer = chunks[2];

        let (sidebar, transcript) = if effective_sidebar_visible {
            let sidebar_width = main.width.saturating_sub(2).min(SIDEBAR_WIDTH);

            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(sidebar_width)])
                .split(main);

            (Some(main_chunks[1]), main_chunks[0])
        } else {
            (None, main)
        };

        Self { header, transcript, sidebar, footer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_breakpoints() {
        assert_eq!(LayoutMode::from(120), LayoutMode::Full);
        assert_eq!(LayoutMode::from(100), LayoutMode::Full);
        assert_eq!(LayoutMode::from(99), LayoutMode::Medium);
        assert_eq!(LayoutMode::from(80), LayoutMode::Medium);
        assert_eq!(LayoutMode::from(79), LayoutMode::Compact);
    }

    #[test]
    fn test_full_layout_has_sidebar() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 120, 40), true);

        let sidebar = layout.sidebar.unwrap();
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.transcript.width, 120 - SIDEBAR_WIDTH);
        assert_eq!(sidebar.x, layout.transcript.x + layout.transcript.width);
    }

    #[test]
    fn test_sidebar_hidden_when_disabled() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 120, 40), false);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.transcript.width, 120);
    }

    #[test]
    fn test_medium_layout_hides_sidebar() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 90, 30), true);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.transcript.width, 90);
    }

    #[test]
    fn test_vertical_split() {
        let layout = TuiLayout::calculate(Rect::new(0, 0, 80, 30), true);

        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.footer.height, FOOTER_HEIGHT);
        assert_eq!(layout.transcript.height, 30 - HEADER_HEIGHT - FOOTER_HEIGHT);
        assert_eq!(layout.footer.y, 30 - FOOTER_HEIGHT);
    }
}

use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const CLEAR_LABEL: &str = "Clear chat history";
pub const CLEAR_SHORTCUT: &str = "Ctrl+L";

/// Counts shown under the options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub messages: usize,
    pub exchanges: usize,
}

/// Sidebar component with the session options
pub struct Sidebar<'a> {
    provider: &'a str,
    stats: SessionStats,
}

impl<'a> Sidebar<'a> {
    pub fn new(provider: &'a str, stats: SessionStats) -> Self {
        Self { provider, stats }
    }

    /// Render sidebar to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Theme::border())
            .style(Theme::panel())
            .title(Span::styled(" Options", Style::default().fg(Theme::BLUE).bold()));

        let key = Style::default().fg(Theme::BLUE);
        let label = Style::default().fg(Theme::FG);
        let muted = Style::default().fg(Theme::MUTED);

        let lines = vec![
            Line::default(),
            Line::from(vec![Span::styled("[", muted), Span::styled(CLEAR_SHORTCUT, key), Span::styled("] ", muted)]),
            Line::from(Span::styled(CLEAR_LABEL, label)),
            Line::default(),
            Line::from(Span::styled("Session", muted.bold())),
            Line::from(vec![Span::styled("messages  ", muted), Span::styled(self.stats.messages.to_string(), label)]),
            Line::from(vec![Span::styled("remembered ", muted), Span::styled(self.stats.exchanges.to_string(), label)]),
            Line::from(vec![Span::styled("provider  ", muted), Span::styled(self.provider.to_string(), label)]),
        ];

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

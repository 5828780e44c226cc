use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

pub const TITLE: &str = "🎓 Career Counseling Chatbot";
pub const TAGLINE: &str =
    "Get personalized advice on education and career paths! Ask about courses, skills, or job strategies.";

/// Header component: title with the active model, tagline below
pub struct Header<'a> {
    model: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(model: &'a str) -> Self {
        Self { model }
    }

    /// Render the header to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let model_width = u16::try_from(self.model.width()).unwrap_or(u16::MAX);
        let title_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(model_width)])
            .split(rows[0]);

        let title = Paragraph::new(Line::from(Span::styled(TITLE, Style::default().fg(Theme::BLUE).bold())))
            .style(Theme::base());
        frame.render_widget(title, title_row[0]);

        if !self.model.is_empty() {
            let model = Paragraph::new(Line::from(Span::styled(self.model, Style::default().fg(Theme::PURPLE))))
                .alignment(Alignment::Right);
            frame.render_widget(model, title_row[1]);
        }

        if rows[1].height > 0 {
            let tagline = Paragraph::new(Line::from(Span::styled(TAGLINE, Theme::muted()))).style(Theme::base());
            frame.render_widget(tagline, rows[1]);
        }
    }
}

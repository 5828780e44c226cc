use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Ask about education or careers (e.g., 'What skills for data science?')";

/// Footer component displaying the input composer and hints
///
/// - Row 1: divider
/// - Rows 2-4: input card with blue accent bar (2 chars)
/// - Row 5: keyboard shortcuts (right-aligned)
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render footer to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(Theme::MUTED),
            )])),
            rows[0],
        );

        self.render_input_card(frame, rows[1]);
        self.render_hints(frame, rows[2]);
    }

    /// Render input card with blue accent bar
    fn render_input_card(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        frame.render_widget(Block::default().style(Theme::panel()), area);

        let accent_width = 2;
        let accent = if self.state.is_generating() { Theme::YELLOW } else { Theme::BLUE };
        let accent_area = Rect { x: area.x, y: area.y, width: accent_width, height: area.height };
        frame.render_widget(Block::default().style(Style::default().bg(accent)), accent_area);

        let input_area = Rect {
            x: area.x + accent_width + 1,
            y: area.y + area.height / 2,
            width: area.width.saturating_sub(accent_width + 2),
            height: 1,
        };

        let input = &self.state.input;
        let cursor = Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG));
        let mut spans = Vec::new();

        if input.buffer.is_empty() {
            spans.push(cursor);
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG)));
        } else {
            let style = if input.is_navigating_history() {
                Style::default().fg(Theme::YELLOW).bg(Theme::PANEL_BG)
            } else {
                Style::default().fg(Theme::FG).bg(Theme::PANEL_BG)
            };
            let (before, after) = input.split_at_cursor();
            let before = visible_tail(before, (input_area.width as usize).saturating_sub(1));

            if !before.is_empty() {
                spans.push(Span::styled(before.to_string(), style));
            }
            spans.push(cursor);
            if !after.is_empty() {
                spans.push(Span::styled(after.to_string(), style));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let key = Style::default().fg(Theme::BLUE);
        let text = Style::default().fg(Theme::MUTED);

        let spans = if self.state.is_generating() {
            vec![Span::styled("waiting for reply", text)]
        } else {
            vec![
                Span::styled("[Enter]", key),
                Span::styled(" send  ", text),
                Span::styled("[Ctrl+L]", key),
                Span::styled(" clear  ", text),
                Span::styled("[PgUp/PgDn]", key),
                Span::styled(" scroll  ", text),
                Span::styled("[Esc]", key),
                Span::styled(" exit", text),
            ]
        };

        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Right), area);
    }
}

/// Longest suffix of `text` that fits in `width` columns
fn visible_tail(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

use crate::theme::Theme;
use counsel_core::{Message, Speaker, Transcript as TranscriptState};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub const THINKING: &str = "Thinking...";

/// Transcript component displaying the conversation
///
/// Messages are pre-wrapped to the inner width so that scrolling can be
/// computed in whole lines; `scroll_back` counts lines up from the tail.
pub struct Transcript<'a> {
    transcript: &'a TranscriptState,
    pending: Option<&'a str>,
    scroll_back: u16,
}

impl<'a> Transcript<'a> {
    pub fn new(transcript: &'a TranscriptState) -> Self {
        Self { transcript, pending: None, scroll_back: 0 }
    }

    /// Show a question still awaiting its reply
    pub fn with_pending(mut self, question: Option<&'a str>) -> Self {
        self.pending = question;
        self
    }

    pub fn with_scroll_back(mut self, lines: u16) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Render transcript to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(Theme::base())
            .title(Span::styled(" Conversation ", Theme::primary()));

        let lines = self.lines(area.width.saturating_sub(2) as usize);
        let max_top = max_top(lines.len(), area);
        let top = max_top.saturating_sub(self.scroll_back);

        let paragraph = Paragraph::new(Text::from(lines)).block(block).scroll((top, 0));
        frame.render_widget(paragraph, area);
    }

    /// Furthest the view can scroll back when drawn into `area`
    pub fn max_scroll_back(&self, area: Rect) -> u16 {
        max_top(self.lines(area.width.saturating_sub(2) as usize).len(), area)
    }

    /// Lay out every message (and the pending turn) at the given width
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (idx, message) in self.transcript.all().iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            render_message(message, width, &mut lines);
        }

        if let Some(question) = self.pending {
            lines.push(Line::default());
            render_message(&Message::user(question), width, &mut lines);
            lines.push(Line::default());
            lines.push(role_line(Speaker::Assistant));
            lines.push(Line::from(Span::styled(THINKING, Style::default().fg(Theme::YELLOW).italic())));
        }

        lines
    }
}

/// First line shown when following the tail
fn max_top(line_count: usize, area: Rect) -> u16 {
    let inner_height = area.height.saturating_sub(2) as usize;
    u16::try_from(line_count.saturating_sub(inner_height)).unwrap_or(u16::MAX)
}

fn role_line(speaker: Speaker) -> Line<'static> {
    let color = Theme::speaker_color(speaker);
    let (marker, label) = match speaker {
        Speaker::User => ("● ", "You"),
        Speaker::Assistant => ("◆ ", "Counselor"),
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).bold()),
    ])
}

fn render_message(message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
    lines.push(role_line(message.role()));
    match message.role() {
        Speaker::User => render_accent_bar_message(message.content(), Theme::speaker_color(Speaker::User), width, lines),
        Speaker::Assistant => render_plain_message(message.content(), width, lines),
    }
}

/// Message body with an accent bar on the left
fn render_accent_bar_message(content: &str, accent: Color, width: usize, lines: &mut Vec<Line<'static>>) {
    let accent_bar = Span::styled("┃ ", Style::default().fg(accent));
    let content_style = Style::default().fg(Theme::FG);

    for source_line in content.lines() {
        if source_line.is_empty() {
            lines.push(Line::from(vec![accent_bar.clone()]));
            continue;
        }
        for wrapped in wrap_text_to_width(source_line, width.saturating_sub(2)) {
            lines.push(Line::from(vec![accent_bar.clone(), Span::styled(wrapped, content_style)]));
        }
    }
}

fn render_plain_message(content: &str, width: usize, lines: &mut Vec<Line<'static>>) {
    let content_style = Style::default().fg(Theme::FG);

    for source_line in content.lines() {
        if source_line.is_empty() {
            lines.push(Line::default());
            continue;
        }
        for wrapped in wrap_text_to_width(source_line, width) {
            lines.push(Line::from(Span::styled(wrapped, content_style)));
        }
    }
}

fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use counsel_core::{CLEARED_GREETING, WELCOME_GREETING};

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_seed_only_transcript() {
        let state = TranscriptState::new();
        let lines = plain(&Transcript::new(&state).lines(200));

        assert_eq!(lines[0], "◆ Counselor");
        assert_eq!(lines[1], WELCOME_GREETING);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_messages_render_in_order_with_roles() {
        let mut state = TranscriptState::seeded(CLEARED_GREETING);
        state.append(Message::user("What skills for data science?"));
        state.append(Message::assistant("Learn Python, SQL..."));

        let lines = plain(&Transcript::new(&state).lines(80));
        let user_idx = lines.iter().position(|l| l == "● You").unwrap();
        let reply_idx = lines.iter().position(|l| l == "Learn Python, SQL...").unwrap();

        assert!(user_idx < reply_idx);
        assert_eq!(lines[user_idx + 1], "┃ What skills for data science?");
    }

    #[test]
    fn test_pending_turn_shows_thinking() {
        let state = TranscriptState::new();
        let lines = plain(&Transcript::new(&state).with_pending(Some("Courses?")).lines(80));

        assert_eq!(lines.last().map(String::as_str), Some(THINKING));
        assert!(lines.contains(&"┃ Courses?".to_string()));
    }

    #[test]
    fn test_long_replies_wrap() {
        let mut state = TranscriptState::new();
        state.append(Message::assistant("one two three four five six seven eight"));

        let lines = plain(&Transcript::new(&state).lines(10));
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert!(lines.contains(&"one two".to_string()));
    }

    #[test]
    fn test_multiline_reply_keeps_blank_lines() {
        let mut state = TranscriptState::new();
        state.append(Message::assistant("First paragraph.\n\nSecond paragraph."));

        let lines = plain(&Transcript::new(&state).lines(80));
        let first = lines.iter().position(|l| l == "First paragraph.").unwrap();
        assert_eq!(lines[first + 1], "");
        assert_eq!(lines[first + 2], "Second paragraph.");
    }
}

use super::App;
use crate::components::{Footer, Header, SessionStats, Sidebar, Transcript};
use crate::layout::TuiLayout;
use crate::theme::Theme;
use ratatui::{Frame, layout::Rect, widgets::Block};

pub fn render(app: &App, frame: &mut Frame<'_>) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Theme::base()), size);

    let content_area = inset_area(size, 1, 1, 0, 0);
    let layout = TuiLayout::calculate(content_area, app.state.sidebar_visible);

    Header::new(&app.state.model).render(frame, layout.header);

    let transcript = Transcript::new(app.session.transcript())
        .with_pending(app.state.pending_question())
        .with_scroll_back(app.state.scroll_back);
    app.state.set_scroll_limit(transcript.max_scroll_back(layout.transcript));
    transcript.render(frame, layout.transcript);

    if let Some(sidebar_area) = layout.sidebar {
        let stats =
            SessionStats { messages: app.session.transcript().len(), exchanges: app.session.history().len() };
        Sidebar::new(app.session.provider_name(), stats).render(frame, sidebar_area);
    }

    Footer::new(&app.state).render(frame, layout.footer);
}

fn inset_area(area: Rect, left: u16, right: u16, top: u16, bottom: u16) -> Rect {
    let width = area.width.saturating_sub(left + right);
    let height = area.height.saturating_sub(top + bottom);
    if width == 0 || height == 0 {
        return area;
    }
    Rect { x: area.x + left, y: area.y + top, width, height }
}

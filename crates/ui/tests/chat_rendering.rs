use counsel_agent::Session;
use counsel_providers::{MockProvider, MockResponse};
use counsel_ui::App;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::sync::Arc;

fn create_test_app(responses: Vec<MockResponse>) -> App {
    App::new(Session::new(Arc::new(MockProvider::new(responses))), "test-model")
}

fn render(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn test_fresh_session_render() {
    let app = create_test_app(vec![]);
    let content = render(&app, 120, 30);

    assert!(content.contains("Career Counseling Chatbot"));
    assert!(content.contains("Get personalized advice on education and career paths!"));
    assert!(content.contains("test-model"));
    assert!(content.contains("Hi! I'm your career counselor"));
    assert!(content.contains("Options"));
    assert!(content.contains("Clear chat history"));
    assert!(content.contains("Ask about education or careers (e.g., 'What skills for data science?')"));
    assert!(content.contains("[Ctrl+L] clear"));
}

#[test]
fn test_pending_turn_shows_thinking_indicator() {
    let mut app = create_test_app(vec![]);
    app.begin_turn("Which courses fit a nursing career?".to_string());

    let content = render(&app, 120, 30);
    assert!(content.contains("Which courses fit a nursing career?"));
    assert!(content.contains("Thinking..."));
    assert!(content.contains("waiting for reply"));
    assert!(!content.contains("[Esc]"));
}

#[tokio::test]
async fn test_completed_turn_is_rendered() {
    let mut app = create_test_app(vec![MockResponse::Text { content: "  Learn Python, SQL...  ".to_string() }]);
    app.begin_turn("What skills for data science?".to_string());
    app.complete_turn().await;

    let content = render(&app, 120, 30);
    assert!(content.contains("What skills for data science?"));
    assert!(content.contains("Learn Python, SQL..."));
    assert!(!content.contains("Thinking..."));
    assert!(content.contains("messages  3"));
    assert!(content.contains("remembered 1"));
}

#[tokio::test]
async fn test_clear_rerenders_immediately() {
    let mut app = create_test_app(vec![MockResponse::Text { content: "Try an internship.".to_string() }]);
    app.begin_turn("How do I start?".to_string());
    app.complete_turn().await;

    app.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)));

    let content = render(&app, 120, 30);
    assert!(content.contains("Chat history cleared! Ask me about your career or education goals."));
    assert!(!content.contains("Try an internship."));
    assert!(content.contains("remembered 0"));
}

#[test]
fn test_typed_input_replaces_placeholder() {
    let mut app = create_test_app(vec![]);
    for c in "Scholarships?".chars() {
        app.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }

    let content = render(&app, 120, 30);
    assert!(content.contains("Scholarships?"));
    assert!(!content.contains("Ask about education or careers"));
}

#[test]
fn test_narrow_terminal_hides_sidebar() {
    let app = create_test_app(vec![]);
    let content = render(&app, 80, 30);

    assert!(!content.contains("Options"));
    assert!(content.contains("Career Counseling Chatbot"));
}

#[tokio::test]
async fn test_scroll_back_stops_at_first_line() {
    let reply = (1..=60).map(|n| format!("Step {}", n)).collect::<Vec<_>>().join("\n");
    let mut app = create_test_app(vec![MockResponse::Text { content: reply }]);
    app.begin_turn("Plan my career?".to_string());
    app.complete_turn().await;
    render(&app, 120, 30);

    let page_up = Event::Key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
    for _ in 0..40 {
        app.handle_event(&page_up);
    }
    let limit = app.state().scroll_back;
    assert!(limit > 0);
    app.handle_event(&page_up);
    assert_eq!(app.state().scroll_back, limit);
    assert!(render(&app, 120, 30).contains("Hi! I'm your career counselor"));

    app.handle_event(&Event::Key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)));
    assert_eq!(app.state().scroll_back, limit - 5);
    assert!(!render(&app, 120, 30).contains("Hi! I'm your career counselor"));
}

#[test]
fn test_short_transcript_does_not_scroll() {
    let mut app = create_test_app(vec![]);
    render(&app, 120, 30);

    for _ in 0..3 {
        app.handle_event(&Event::Key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE)));
    }
    assert_eq!(app.state().scroll_back, 0);
}

fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut s = String::new();
    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            s.push(buffer[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        s.push('\n');
    }
    s
}

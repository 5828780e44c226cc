use super::App;
use crate::event_handler::{EventHandler, KeyAction};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::panic;

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    terminal.draw(|frame| app.render(frame))?;
    tracing::info!(provider = app.session().provider_name(), "tui started");

    while !app.should_exit() {
        let Some(event) = EventHandler::read() else {
            tokio::task::yield_now().await;
            continue;
        };

        // The turn is awaited inline; keys pressed meanwhile queue up in the terminal.
        if let Some(KeyAction::SendMessage { message }) = app.handle_event(&event) {
            app.begin_turn(message);
            terminal.draw(|frame| app.render(frame))?;
            app.complete_turn().await;
        }

        terminal.draw(|frame| app.render(frame))?;
    }

    tracing::info!(messages = app.session().transcript().len(), "tui exiting");

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}

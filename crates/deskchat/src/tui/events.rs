//! Event handling for the TUI.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deskchat_host::HostBridge;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::App;
use super::input::KeyOutcome;
use super::ui;

/// Result type for TUI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the chat TUI against `host`.
pub fn run(host: Arc<dyn HostBridge>, workspace: &str) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(host, workspace);

    let result = run_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.input.handle_click(mouse.column, mouse.row);
                    }
                    MouseEventKind::ScrollUp => app.scroll_page_up(1),
                    MouseEventKind::ScrollDown => app.scroll_page_down(1),
                    _ => {}
                },
                _ => {}
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if ctrl && key.code == KeyCode::Char('l') {
        app.clear_messages();
        return;
    }

    if app.input.handle_key(key) == KeyOutcome::Handled {
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::PageUp => app.scroll_page_up(10),
        KeyCode::PageDown => app.scroll_page_down(10),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::selector::test_support::MockHost;
    use super::*;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(app, KeyEvent::new(code, modifiers));
    }

    fn app() -> App {
        App::new(Arc::new(MockHost::default()), ".")
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.input.field().is_empty());
    }

    #[test]
    fn test_esc_closes_selector_before_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        assert!(app.input.selector().is_visible());

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.input.selector().is_visible());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].content, "Output cleared");
        assert!(app.input.field().is_empty());
    }
}

//! TUI entry point and terminal setup.

use std::io::{self, Write};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::session::Session;
use crate::tui::app::App;

/// Initialise the terminal, run the task list UI on `session`, and restore
/// the terminal even when the event loop fails or panics.
pub fn run_tui(session: &mut Session) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    install_panic_hook();

    let mut app = App::new(session);
    let result = app.run(&mut terminal);

    restore_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "ui loop failed");
    }
    result
}

/// Leave raw mode and the alternate screen before the previous hook prints
/// the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut io::stdout());
        original_hook(panic_info);
    }));
}

fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen)?;
    Ok(())
}

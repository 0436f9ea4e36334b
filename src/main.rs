mod kanban_board;
mod storage;
mod task;
mod ui;

use std::{io, path::PathBuf};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{kanban_board::KanbanBoard, ui::App};

fn main() -> anyhow::Result<()> {
    install_panic_hook();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Board setup
    let store_path = PathBuf::from(storage::STORE_FILE);
    let mut board = KanbanBoard::new();
    board.tasks = storage::load_tasks(&store_path);
    let mut app = App::new(board, store_path);

    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

/// Restores the terminal before panicking so a crash does not leave the
/// shell in raw mode on the alternate screen.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

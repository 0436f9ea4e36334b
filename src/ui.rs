use std::{
    io,
    path::PathBuf,
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

use crate::{
    kanban_board::{column_index, DragSource, DropEvent, DropTarget, KanbanBoard},
    storage,
    task::Status,
};

/// How long to wait for a key before redrawing.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Interaction state. Dragging carries the grabbed task's source
/// position and the drop target the arrows are steering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Board,
    Input,
    Dragging { source: DragSource, target: DropTarget },
}

pub struct App {
    pub board: KanbanBoard,
    store_path: PathBuf,
    mode: Mode,
    selected_status: usize,
    selected_task: usize,
    last_error: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(board: KanbanBoard, store_path: PathBuf) -> Self {
        Self {
            board,
            store_path,
            mode: Mode::Board,
            selected_status: 0,
            selected_task: 0,
            last_error: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_column(&self) -> Status {
        Status::ALL[self.selected_status]
    }

    fn column_len(&self, status: Status) -> usize {
        self.board.tasks_by_status(status).len()
    }

    /// Writes the full sequence to the store after an accepted mutation.
    /// Fire-and-forget: a failure only shows up on the status line.
    fn persist(&mut self) {
        self.last_error = storage::save_tasks(&self.store_path, &self.board.tasks)
            .err()
            .map(|err| err.to_string());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Board => self.handle_board_key(key),
            Mode::Input => self.handle_input_key(key),
            Mode::Dragging { source, target } => self.handle_drag_key(key, source, target),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Char('i') => self.mode = Mode::Input,
            KeyCode::Left => {
                if self.selected_status > 0 {
                    self.selected_status -= 1;
                    self.clamp_selected_task();
                }
            }
            KeyCode::Right => {
                if self.selected_status < Status::ALL.len() - 1 {
                    self.selected_status += 1;
                    self.clamp_selected_task();
                }
            }
            KeyCode::Up => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.column_len(self.selected_column());
                if len > 0 && self.selected_task < len - 1 {
                    self.selected_task += 1;
                }
            }
            KeyCode::Char('d') => {
                let status = self.selected_column();
                let id = self
                    .board
                    .tasks_by_status(status)
                    .get(self.selected_task)
                    .map(|t| t.id.clone());
                if let Some(id) = id {
                    if self.board.delete_task(&id) {
                        self.persist();
                    }
                    self.clamp_selected_task();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let status = self.selected_column();
                if self.selected_task < self.column_len(status) {
                    let source = DragSource {
                        status,
                        index: self.selected_task,
                    };
                    let target = DropTarget {
                        status,
                        index: self.selected_task,
                    };
                    self.mode = Mode::Dragging { source, target };
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Board,
            KeyCode::Enter => {
                // Blank drafts are rejected and the text stays put.
                if self.board.submit_draft() {
                    self.persist();
                    self.mode = Mode::Board;
                }
            }
            KeyCode::Tab => {
                self.board.draft_status = self.board.draft_status.cycle();
            }
            KeyCode::Backspace => {
                self.board.draft_text.pop();
            }
            KeyCode::Char(c) => self.board.draft_text.push(c),
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent, source: DragSource, target: DropTarget) {
        match key.code {
            KeyCode::Esc => {
                // Cancelled gesture: no mutation, no persistence write.
                self.finish_drag(DropEvent {
                    source,
                    destination: None,
                });
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.finish_drag(DropEvent {
                    source,
                    destination: Some(target),
                });
            }
            KeyCode::Left => {
                if let Some(status) = Status::from_index(target.status.index().wrapping_sub(1)) {
                    self.retarget(source, status, target.index);
                }
            }
            KeyCode::Right => {
                if let Some(status) = Status::from_index(target.status.index() + 1) {
                    self.retarget(source, status, target.index);
                }
            }
            KeyCode::Up => {
                self.retarget(source, target.status, target.index.saturating_sub(1));
            }
            KeyCode::Down => {
                self.retarget(source, target.status, target.index + 1);
            }
            _ => {}
        }
    }

    /// Moves the drop target, clamping the index to the destination
    /// column's valid insertion range (which excludes the grabbed task
    /// itself when targeting its own column).
    fn retarget(&mut self, source: DragSource, status: Status, index: usize) {
        let mut max = self.column_len(status);
        if status == source.status {
            max = max.saturating_sub(1);
        }
        self.mode = Mode::Dragging {
            source,
            target: DropTarget {
                status,
                index: index.min(max),
            },
        };
    }

    fn finish_drag(&mut self, event: DropEvent) {
        if let Some(global) = self.board.reorder_on_drop(&event) {
            self.persist();
            // Keep the cursor on the task that just landed.
            self.selected_status = self.board.tasks[global].status.index();
            self.selected_task = column_index(&self.board.tasks, global).unwrap_or(0);
        }
        self.mode = Mode::Board;
        self.clamp_selected_task();
    }

    fn clamp_selected_task(&mut self) {
        let len = self.column_len(self.selected_column());
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.draw_input_row(frame, chunks[0]);
        self.draw_columns(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_input_row(&self, frame: &mut Frame, area: Rect) {
        let editing = self.mode == Mode::Input;
        let input = Paragraph::new(Line::from(vec![
            Span::raw(self.board.draft_text.as_str()),
            Span::styled(
                if editing { "█" } else { "" },
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("  [{}]", self.board.draft_status.display_name()),
                Style::default().fg(Color::Yellow),
            ),
        ]))
        .block(
            Block::default()
                .title("New Task")
                .borders(Borders::ALL)
                .border_style(if editing {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        );
        frame.render_widget(input, area);
    }

    fn draw_columns(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(area);

        for (i, status) in Status::ALL.into_iter().enumerate() {
            let highlighted = match self.mode {
                Mode::Dragging { target, .. } => target.status == status,
                _ => self.selected_status == i,
            };

            let list = List::new(self.column_items(status)).block(
                Block::default()
                    .title(format!(
                        "{} ({})",
                        status.display_name(),
                        self.column_len(status)
                    ))
                    .borders(Borders::ALL)
                    .border_style(if highlighted {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            );
            frame.render_widget(list, chunks[i]);
        }
    }

    fn column_items(&self, status: Status) -> Vec<ListItem<'_>> {
        let tasks = self.board.tasks_by_status(status);
        let mut lines: Vec<Line> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let selected = self.mode == Mode::Board
                    && self.selected_column() == status
                    && self.selected_task == i;
                let style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(task.text.as_str(), style))
            })
            .collect();

        if let Mode::Dragging { source, target } = self.mode {
            if source.status == status {
                if let Some(line) = lines.get_mut(source.index) {
                    *line = Line::from(Span::styled(
                        tasks[source.index].text.as_str(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ));
                }
            }
            if target.status == status {
                // Target indices are relative to the column with the
                // grabbed task removed; shift past the grayed original
                // when previewing in its own column.
                let mut at = target.index;
                if source.status == status && target.index >= source.index {
                    at += 1;
                }
                lines.insert(
                    at.min(lines.len()),
                    Line::from(vec![
                        Span::styled("▸ ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            self.dragged_text(source),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::ITALIC),
                        ),
                    ]),
                );
            }
        }

        lines.into_iter().map(ListItem::new).collect()
    }

    fn dragged_text(&self, source: DragSource) -> String {
        self.board
            .tasks_by_status(source.status)
            .get(source.index)
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.mode {
            Mode::Board => "a: add  d: delete  enter: grab  arrows: navigate  q: quit",
            Mode::Input => "enter: add task  tab: status  esc: back",
            Mode::Dragging { .. } => "arrows: move  enter: drop  esc: cancel",
        };
        let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
        if let Some(err) = &self.last_error {
            spans.push(Span::styled(
                format!("  {err}"),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                // Key releases also arrive on some platforms.
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

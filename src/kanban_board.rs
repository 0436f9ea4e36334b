use crate::task::{Status, Task};

/// Where a drag started: the column it left and the task's position
/// within that column's filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSource {
    pub status: Status,
    pub index: usize,
}

/// Where a drag should land, with the index again relative to the
/// destination column's filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub status: Status,
    pub index: usize,
}

/// A completed drag gesture. `destination` is `None` when the gesture
/// was cancelled (dropped outside any column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub source: DragSource,
    pub destination: Option<DropTarget>,
}

/// Maps a column-relative index to a position in the global sequence:
/// the `column_index`-th task whose status matches `status`. Returns
/// `None` when the column has no task at that index.
pub fn global_index(tasks: &[Task], status: Status, column_index: usize) -> Option<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.status == status)
        .map(|(i, _)| i)
        .nth(column_index)
}

/// Inverse of [`global_index`]: the position of `tasks[global]` within
/// its own column's filtered view.
pub fn column_index(tasks: &[Task], global: usize) -> Option<usize> {
    let task = tasks.get(global)?;
    Some(
        tasks[..global]
            .iter()
            .filter(|t| t.status == task.status)
            .count(),
    )
}

/// Global position at which a task should be spliced in so that it ends
/// up at `column_index` within the given column. Past the end of the
/// column (including an empty column) means directly after the column's
/// last task, or the end of the sequence if the column is empty.
fn insertion_index(tasks: &[Task], status: Status, column_index: usize) -> usize {
    match global_index(tasks, status, column_index) {
        Some(global) => global,
        None => tasks
            .iter()
            .rposition(|t| t.status == status)
            .map_or(tasks.len(), |last| last + 1),
    }
}

#[derive(Debug, Default)]
pub struct KanbanBoard {
    /// Global task sequence. A task's position here is its position
    /// within whichever column it belongs to after filtering.
    pub tasks: Vec<Task>,
    pub draft_text: String,
    pub draft_status: Status,
}

impl KanbanBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new task. Rejects blank text (returns false and leaves
    /// the board untouched).
    pub fn add_task(&mut self, text: &str, status: Status) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.tasks.push(Task::new(text, status));
        true
    }

    /// Adds a task from the draft fields; the draft text is cleared only
    /// when the submission is accepted.
    pub fn submit_draft(&mut self) -> bool {
        let text = self.draft_text.clone();
        let added = self.add_task(&text, self.draft_status);
        if added {
            self.draft_text.clear();
        }
        added
    }

    /// Removes the task with the given id. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: &str) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(pos) => {
                self.tasks.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Applies a completed drag gesture: removes the task at the source
    /// position, moves it to the destination column, and re-inserts it
    /// at the destination's column-relative index. Tasks that are not
    /// being moved keep their relative order. Returns the moved task's
    /// new global position, or `None` without touching the sequence for
    /// cancelled gestures and unresolvable source positions; callers
    /// skip the persistence write in that case.
    pub fn reorder_on_drop(&mut self, event: &DropEvent) -> Option<usize> {
        let dest = event.destination?;
        let from = global_index(&self.tasks, event.source.status, event.source.index)?;

        let mut task = self.tasks.remove(from);
        task.status = dest.status;
        let to = insertion_index(&self.tasks, dest.status, dest.index);
        self.tasks.insert(to, task);
        Some(to)
    }

    /// Tasks in the given column, preserving global relative order.
    pub fn tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }
}

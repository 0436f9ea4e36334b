use std::{fs, io, path::Path};

use crate::task::Task;

/// Fixed store location, matching the original board's storage key.
pub const STORE_FILE: &str = "kanban-tasks.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write task store: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads the stored task sequence. A missing, unreadable, or malformed
/// store degrades to an empty board instead of surfacing a parse error.
pub fn load_tasks(path: impl AsRef<Path>) -> Vec<Task> {
    let path = path.as_ref();
    if !path.exists() {
        return Vec::new();
    }
    match fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

/// Overwrites the store with the full task sequence. Callers treat this
/// as fire-and-forget: failures are surfaced but never retried.
pub fn save_tasks(path: impl AsRef<Path>, tasks: &[Task]) -> Result<(), StorageError> {
    let data = serde_json::to_string_pretty(tasks)?;
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    #[test]
    fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tasks = load_tasks(dir.path().join(STORE_FILE));
        assert!(tasks.is_empty());
    }

    #[test]
    fn malformed_store_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STORE_FILE);
        fs::write(&path, "{not json").expect("write");

        assert!(load_tasks(&path).is_empty());
    }

    #[test]
    fn unknown_status_in_store_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STORE_FILE);
        fs::write(
            &path,
            r#"[{"id": "1", "text": "A", "status": "Archived"}]"#,
        )
        .expect("write");

        assert!(load_tasks(&path).is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STORE_FILE);

        let tasks = vec![
            Task::new("plan", Status::Todo),
            Task::new("build", Status::InProgress),
            Task::new("ship", Status::Done),
        ];
        save_tasks(&path, &tasks).expect("save");

        assert_eq!(load_tasks(&path), tasks);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STORE_FILE);

        let first = vec![Task::new("old", Status::Todo)];
        save_tasks(&path, &first).expect("save");

        let second = vec![Task::new("new", Status::Done)];
        save_tasks(&path, &second).expect("save");

        assert_eq!(load_tasks(&path), second);
    }

    #[test]
    fn stored_format_uses_column_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STORE_FILE);

        save_tasks(&path, &[Task::new("A", Status::InProgress)]).expect("save");
        let raw = fs::read_to_string(&path).expect("read");
        assert!(raw.contains(r#""In Progress""#));
    }
}

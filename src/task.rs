use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the three fixed board columns. The serialized names match the
/// stored file format, so an unknown status in stored data is a parse
/// error rather than an orphaned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// All columns in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::InProgress),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Next column in workflow order, cycling back to the first after Done.
    pub const fn cycle(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub status: Status,
}

impl Task {
    /// Creates a task with a fresh random id. UUIDs avoid the collision
    /// risk of timestamp-derived ids under rapid successive creation.
    pub fn new(text: impl Into<String>, status: Status) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            status,
        }
    }
}

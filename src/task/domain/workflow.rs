//! Task status state machine.

use super::ParseTaskFieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started. Initial status of every task.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Awaiting review.
    #[serde(rename = "In Review")]
    InReview,
    /// Finished. May be reopened.
    Closed,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::InReview, Self::Closed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Closed => "Closed",
        }
    }

    /// Returns the statuses reachable from `self` in one step.
    ///
    /// `Closed -> InReview` is deliberately absent: a reopened task goes
    /// back to `ToDo` or `InProgress` first.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::ToDo => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::ToDo, Self::InReview, Self::Closed],
            Self::InReview => &[Self::ToDo, Self::InProgress, Self::Closed],
            Self::Closed => &[Self::ToDo, Self::InProgress],
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "");
        match normalized.as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "inreview" => Ok(Self::InReview),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskFieldError::new("task status", value)),
        }
    }
}

/// Returns whether a task may move from `from` to `to`.
#[must_use]
pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
    from.can_transition_to(to)
}

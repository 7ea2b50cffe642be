//! Task type and priority enumerations.

use super::ParseTaskFieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work item. Determines where a task may sit in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Smallest unit; never has children.
    Subtask,
    /// Regular piece of work.
    Task,
    /// Defect report.
    Bug,
    /// Support request.
    Support,
    /// Groups tasks, bugs and support requests.
    Epic,
    /// Groups epics.
    Initiative,
}

impl TaskType {
    /// All task types, leaves first.
    pub const ALL: [Self; 6] = [
        Self::Subtask,
        Self::Task,
        Self::Bug,
        Self::Support,
        Self::Epic,
        Self::Initiative,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subtask => "Subtask",
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Support => "Support",
            Self::Epic => "Epic",
            Self::Initiative => "Initiative",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "subtask" => Ok(Self::Subtask),
            "task" => Ok(Self::Task),
            "bug" => Ok(Self::Bug),
            "support" => Ok(Self::Support),
            "epic" => Ok(Self::Epic),
            "initiative" => Ok(Self::Initiative),
            _ => Err(ParseTaskFieldError::new("task type", value)),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Drop everything.
    Urgent,
    /// Next in line.
    High,
    /// Default priority.
    #[default]
    Medium,
    /// Whenever there is time.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskFieldError::new("priority", value)),
        }
    }
}

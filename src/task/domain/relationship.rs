//! Parent/child nesting rules between task types.
//!
//! | parent     | allowed children      |
//! |------------|-----------------------|
//! | Subtask    | none                  |
//! | Task       | Subtask               |
//! | Bug        | Subtask               |
//! | Support    | Subtask               |
//! | Epic       | Task, Bug, Support    |
//! | Initiative | Epic                  |
//!
//! Every allowed child sits strictly lower in the hierarchy
//! (`Initiative > Epic > {Task, Bug, Support} > Subtask`) than its parent,
//! so no chain of valid links can form a cycle.

use super::TaskType;

impl TaskType {
    /// Returns the task types that may be direct children of `self`.
    #[must_use]
    pub const fn allowed_children(self) -> &'static [Self] {
        match self {
            Self::Subtask => &[],
            Self::Task | Self::Bug | Self::Support => &[Self::Subtask],
            Self::Epic => &[Self::Task, Self::Bug, Self::Support],
            Self::Initiative => &[Self::Epic],
        }
    }

    /// Returns the hierarchy level, leaves at zero.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Subtask => 0,
            Self::Task | Self::Bug | Self::Support => 1,
            Self::Epic => 2,
            Self::Initiative => 3,
        }
    }
}

/// Returns whether a task of type `child` may be nested under a task of
/// type `parent`.
#[must_use]
pub fn can_nest(parent: TaskType, child: TaskType) -> bool {
    parent.allowed_children().contains(&child)
}

//! Domain model for tasks.
//!
//! Covers the task aggregate, its status workflow, the type-based nesting
//! policy and the comments attached to tasks. Everything here is pure: no
//! persistence, no clocks other than the injected [`mockable::Clock`].

mod comment;
mod error;
mod ids;
mod kind;
mod relationship;
mod task;
pub mod text;
mod workflow;

pub use comment::{Comment, PersistedCommentData};
pub use error::{ParseTaskFieldError, TaskDomainError};
pub use ids::{CommentId, TaskKey};
pub use kind::{Priority, TaskType};
pub use relationship::can_nest;
pub use task::{NewTask, PersistedTaskData, Task, TaskDetailsUpdate};
pub use workflow::{TaskStatus, can_transition};

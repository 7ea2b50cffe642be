//! Application services for task orchestration.

mod collaboration;
mod lifecycle;

pub use lifecycle::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult};

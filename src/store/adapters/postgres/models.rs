//! Diesel row models for tracker persistence.

use super::schema::{comments, project_members, projects, sprints, task_observers, task_sprints, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Project record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Last minted task number.
    pub last_task_index: i64,
}

/// Project membership record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Owning project.
    pub project_id: String,
    /// Member user identifier.
    pub user_id: String,
    /// Role name.
    pub role: String,
}

/// Sprint record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct SprintRow {
    /// Sprint identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: String,
    /// Timestamp of the start transition.
    pub start_date: Option<DateTime<Utc>>,
    /// Timestamp of the close transition.
    pub close_date: Option<DateTime<Utc>>,
}

/// Task record, also returned by the recursive descendant query.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Display key.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub id: String,
    /// Owning project.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub project_id: String,
    /// Per-project task number.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub number: i64,
    /// Parent task key.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub parent_id: Option<String>,
    /// Task type name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_type: String,
    /// Priority name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Workflow status name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Creator user identifier.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub creator: String,
    /// Assignee user identifier.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub assignee: Option<String>,
    /// One-line summary.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub summary: String,
    /// Longer description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Deadline.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of the last close.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub close_date: Option<DateTime<Utc>>,
    /// Effort estimate.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Integer>)]
    pub estimate: Option<i32>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable task columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Parent task key.
    pub parent_id: Option<String>,
    /// Priority name.
    pub priority: String,
    /// Workflow status name.
    pub status: String,
    /// Assignee user identifier.
    pub assignee: Option<String>,
    /// One-line summary.
    pub summary: String,
    /// Longer description.
    pub description: String,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of the last close.
    pub close_date: Option<DateTime<Utc>>,
    /// Effort estimate.
    pub estimate: Option<i32>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Sprint membership record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskSprintRow {
    /// Member task.
    pub task_id: String,
    /// Sprint.
    pub sprint_id: uuid::Uuid,
}

/// Observer record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_observers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskObserverRow {
    /// Watched task.
    pub task_id: String,
    /// Watching user.
    pub user_id: String,
}

/// Comment record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: String,
    /// Author user identifier.
    pub author: String,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

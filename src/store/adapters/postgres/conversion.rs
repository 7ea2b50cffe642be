//! Conversions between domain aggregates and Diesel rows.

use std::collections::BTreeSet;

use super::models::{CommentRow, MemberRow, ProjectRow, SprintRow, TaskChangeset, TaskRow};
use crate::{
    project::domain::{
        PersistedProjectData, Project, ProjectId, ProjectMember, ProjectName, Role, UserId,
    },
    sprint::domain::{PersistedSprintData, Sprint, SprintId, SprintName, SprintStatus},
    store::ports::{StoreError, StoreResult},
    task::domain::{
        Comment, CommentId, PersistedCommentData, PersistedTaskData, Priority, Task, TaskKey,
        TaskStatus, TaskType,
    },
};

pub(super) fn project_to_row(project: &Project) -> StoreResult<ProjectRow> {
    Ok(ProjectRow {
        id: project.id().as_str().to_owned(),
        name: project.name().as_str().to_owned(),
        last_task_index: i64::try_from(project.last_task_index())
            .map_err(StoreError::persistence)?,
    })
}

pub(super) fn row_to_project(row: ProjectRow) -> StoreResult<Project> {
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(row.id).map_err(StoreError::persistence)?,
        name: ProjectName::new(row.name).map_err(StoreError::persistence)?,
        last_task_index: u64::try_from(row.last_task_index).map_err(StoreError::persistence)?,
    }))
}

pub(super) fn member_to_row(member: &ProjectMember) -> MemberRow {
    MemberRow {
        project_id: member.project_id().as_str().to_owned(),
        user_id: member.user_id().as_str().to_owned(),
        role: member.role().as_str().to_owned(),
    }
}

pub(super) fn row_to_member(row: MemberRow) -> StoreResult<ProjectMember> {
    Ok(ProjectMember::new(
        ProjectId::new(row.project_id).map_err(StoreError::persistence)?,
        UserId::new(row.user_id).map_err(StoreError::persistence)?,
        Role::try_from(row.role.as_str()).map_err(StoreError::persistence)?,
    ))
}

pub(super) fn sprint_to_row(sprint: &Sprint) -> SprintRow {
    SprintRow {
        id: sprint.id().into_inner(),
        project_id: sprint.project_id().as_str().to_owned(),
        name: sprint.name().as_str().to_owned(),
        status: sprint.status().as_str().to_owned(),
        start_date: sprint.start_date(),
        close_date: sprint.close_date(),
    }
}

pub(super) fn row_to_sprint(row: SprintRow) -> StoreResult<Sprint> {
    Ok(Sprint::from_persisted(PersistedSprintData {
        id: SprintId::from_uuid(row.id),
        project_id: ProjectId::new(row.project_id).map_err(StoreError::persistence)?,
        name: SprintName::new(row.name).map_err(StoreError::persistence)?,
        status: SprintStatus::try_from(row.status.as_str()).map_err(StoreError::persistence)?,
        start_date: row.start_date,
        close_date: row.close_date,
    }))
}

fn estimate_to_column(task: &Task) -> StoreResult<Option<i32>> {
    task.estimate()
        .map(i32::try_from)
        .transpose()
        .map_err(StoreError::persistence)
}

pub(super) fn task_to_row(task: &Task) -> StoreResult<TaskRow> {
    Ok(TaskRow {
        id: task.key().to_string(),
        project_id: task.project_id().as_str().to_owned(),
        number: i64::try_from(task.key().number().value()).map_err(StoreError::persistence)?,
        parent_id: task.parent().map(ToString::to_string),
        task_type: task.task_type().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        creator: task.creator().as_str().to_owned(),
        assignee: task.assignee().map(|user| user.as_str().to_owned()),
        summary: task.summary().to_owned(),
        description: task.description().to_owned(),
        due_date: task.due_date(),
        close_date: task.close_date(),
        estimate: estimate_to_column(task)?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(super) fn task_to_changeset(task: &Task) -> StoreResult<TaskChangeset> {
    Ok(TaskChangeset {
        parent_id: task.parent().map(ToString::to_string),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee: task.assignee().map(|user| user.as_str().to_owned()),
        summary: task.summary().to_owned(),
        description: task.description().to_owned(),
        due_date: task.due_date(),
        close_date: task.close_date(),
        estimate: estimate_to_column(task)?,
        updated_at: task.updated_at(),
    })
}

pub(super) fn row_to_task(
    row: TaskRow,
    sprints: BTreeSet<SprintId>,
    observers: BTreeSet<UserId>,
) -> StoreResult<Task> {
    let TaskRow {
        id,
        parent_id,
        task_type,
        priority,
        status,
        creator,
        assignee,
        summary,
        description,
        due_date,
        close_date,
        estimate,
        created_at,
        updated_at,
        ..
    } = row;

    let data = PersistedTaskData {
        key: id.parse::<TaskKey>().map_err(StoreError::persistence)?,
        parent: parent_id
            .map(|parent| parent.parse::<TaskKey>())
            .transpose()
            .map_err(StoreError::persistence)?,
        sprints,
        observers,
        task_type: TaskType::try_from(task_type.as_str()).map_err(StoreError::persistence)?,
        priority: Priority::try_from(priority.as_str()).map_err(StoreError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(StoreError::persistence)?,
        creator: UserId::new(creator).map_err(StoreError::persistence)?,
        assignee: assignee
            .map(UserId::new)
            .transpose()
            .map_err(StoreError::persistence)?,
        summary,
        description,
        due_date,
        close_date,
        estimate: estimate
            .map(u32::try_from)
            .transpose()
            .map_err(StoreError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

pub(super) fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task().to_string(),
        author: comment.author().as_str().to_owned(),
        content: comment.content().to_owned(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

pub(super) fn row_to_comment(row: CommentRow) -> StoreResult<Comment> {
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task: row.task_id.parse::<TaskKey>().map_err(StoreError::persistence)?,
        author: UserId::new(row.author).map_err(StoreError::persistence)?,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

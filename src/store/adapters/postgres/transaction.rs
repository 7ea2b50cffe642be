//! Row operations executed on a connection that is inside a transaction.

use std::collections::{BTreeMap, BTreeSet};

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::{
    conversion::{
        comment_to_row, member_to_row, project_to_row, row_to_comment, row_to_member,
        row_to_project, row_to_sprint, row_to_task, sprint_to_row, task_to_changeset,
        task_to_row,
    },
    models::{CommentRow, MemberRow, ProjectRow, SprintRow, TaskObserverRow, TaskRow, TaskSprintRow},
    schema::{comments, project_members, projects, sprints, task_observers, task_sprints, tasks},
};
use crate::{
    project::{
        domain::{Project, ProjectId, ProjectMember, UserId},
        ports::ProjectStore,
    },
    sprint::{
        domain::{Sprint, SprintId},
        ports::SprintStore,
    },
    store::ports::{StoreError, StoreResult},
    task::{
        domain::{Comment, CommentId, Task, TaskKey},
        ports::TaskStore,
    },
};

const DESCENDANTS_QUERY: &str = concat!(
    "WITH RECURSIVE descendants (id) AS (",
    "SELECT id FROM tasks WHERE parent_id = $1 ",
    "UNION ",
    "SELECT t.id FROM tasks t JOIN descendants d ON t.parent_id = d.id",
    ") ",
    "SELECT t.id, t.project_id, t.number, t.parent_id, t.task_type, t.priority, t.status, ",
    "t.creator, t.assignee, t.summary, t.description, t.due_date, t.close_date, t.estimate, ",
    "t.created_at, t.updated_at ",
    "FROM tasks t JOIN descendants d ON t.id = d.id ",
    "ORDER BY t.project_id, t.number ",
    "FOR UPDATE OF t",
);

/// Store transaction bound to a Diesel connection.
pub(super) struct PgStoreTransaction<'conn> {
    conn: &'conn mut PgConnection,
}

impl<'conn> PgStoreTransaction<'conn> {
    pub(super) const fn new(conn: &'conn mut PgConnection) -> Self {
        Self { conn }
    }

    /// Loads sprint memberships and observers for `rows` in two queries.
    fn hydrate(&mut self, rows: Vec<TaskRow>) -> StoreResult<Vec<Task>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();

        let mut sprints_by_task: BTreeMap<String, BTreeSet<SprintId>> = BTreeMap::new();
        for membership in task_sprints::table
            .filter(task_sprints::task_id.eq_any(&ids))
            .select(TaskSprintRow::as_select())
            .load::<TaskSprintRow>(self.conn)
            .map_err(StoreError::persistence)?
        {
            sprints_by_task
                .entry(membership.task_id)
                .or_default()
                .insert(SprintId::from_uuid(membership.sprint_id));
        }

        let mut observers_by_task: BTreeMap<String, BTreeSet<UserId>> = BTreeMap::new();
        for observer in task_observers::table
            .filter(task_observers::task_id.eq_any(&ids))
            .select(TaskObserverRow::as_select())
            .load::<TaskObserverRow>(self.conn)
            .map_err(StoreError::persistence)?
        {
            observers_by_task
                .entry(observer.task_id)
                .or_default()
                .insert(UserId::new(observer.user_id).map_err(StoreError::persistence)?);
        }

        rows.into_iter()
            .map(|row| {
                let sprints = sprints_by_task.remove(&row.id).unwrap_or_default();
                let observers = observers_by_task.remove(&row.id).unwrap_or_default();
                row_to_task(row, sprints, observers)
            })
            .collect()
    }

    /// Brings the sprint and observer rows of `task` in line with the
    /// aggregate, touching only the rows that differ.
    fn sync_task_links(&mut self, task: &Task) -> StoreResult<()> {
        let task_id = task.key().to_string();

        let kept_sprints: Vec<_> = task.sprints().iter().map(|sprint| sprint.into_inner()).collect();
        diesel::delete(
            task_sprints::table
                .filter(task_sprints::task_id.eq(&task_id))
                .filter(task_sprints::sprint_id.ne_all(&kept_sprints)),
        )
        .execute(self.conn)
        .map_err(StoreError::persistence)?;
        let memberships: Vec<TaskSprintRow> = kept_sprints
            .into_iter()
            .map(|sprint_id| TaskSprintRow {
                task_id: task_id.clone(),
                sprint_id,
            })
            .collect();
        if !memberships.is_empty() {
            diesel::insert_into(task_sprints::table)
                .values(&memberships)
                .on_conflict_do_nothing()
                .execute(self.conn)
                .map_err(|err| map_write_error(err, "sprint", &task_id))?;
        }

        let kept_observers: Vec<String> = task
            .observers()
            .iter()
            .map(|user| user.as_str().to_owned())
            .collect();
        diesel::delete(
            task_observers::table
                .filter(task_observers::task_id.eq(&task_id))
                .filter(task_observers::user_id.ne_all(&kept_observers)),
        )
        .execute(self.conn)
        .map_err(StoreError::persistence)?;
        let observers: Vec<TaskObserverRow> = kept_observers
            .into_iter()
            .map(|user_id| TaskObserverRow {
                task_id: task_id.clone(),
                user_id,
            })
            .collect();
        if !observers.is_empty() {
            diesel::insert_into(task_observers::table)
                .values(&observers)
                .on_conflict_do_nothing()
                .execute(self.conn)
                .map_err(StoreError::persistence)?;
        }
        Ok(())
    }
}

/// Maps constraint violations on writes to semantic store errors.
///
/// `entity` names the row being written for unique violations; foreign-key
/// violations report the referenced row as missing.
fn map_write_error(err: DieselError, entity: &'static str, key: &str) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::duplicate(entity, key)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info) => {
            StoreError::missing(info.table_name().map_or("referenced row", referenced), key)
        }
        other => StoreError::persistence(other),
    }
}

/// Names the entity a foreign key on `table` points at.
fn referenced(table: &str) -> &'static str {
    match table {
        "comments" | "task_observers" => "task",
        "task_sprints" => "sprint",
        _ => "project",
    }
}

impl ProjectStore for PgStoreTransaction<'_> {
    fn insert_project(&mut self, project: &Project) -> StoreResult<()> {
        let row = project_to_row(project)?;
        diesel::insert_into(projects::table)
            .values(&row)
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "project", project.id().as_str()))?;
        Ok(())
    }

    fn find_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>> {
        projects::table
            .find(id.as_str())
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_project)
            .transpose()
    }

    fn lock_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>> {
        projects::table
            .find(id.as_str())
            .select(ProjectRow::as_select())
            .for_update()
            .first::<ProjectRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_project)
            .transpose()
    }

    fn update_project(&mut self, project: &Project) -> StoreResult<()> {
        let row = project_to_row(project)?;
        let updated = diesel::update(projects::table.find(&row.id))
            .set((
                projects::name.eq(&row.name),
                projects::last_task_index.eq(row.last_task_index),
            ))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        if updated == 0 {
            return Err(StoreError::missing("project", project.id()));
        }
        Ok(())
    }

    fn delete_project(&mut self, id: &ProjectId) -> StoreResult<bool> {
        let deleted = diesel::delete(projects::table.find(id.as_str()))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        Ok(deleted > 0)
    }

    fn find_member(
        &mut self,
        project: &ProjectId,
        user: &UserId,
    ) -> StoreResult<Option<ProjectMember>> {
        project_members::table
            .find((project.as_str(), user.as_str()))
            .select(MemberRow::as_select())
            .first::<MemberRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_member)
            .transpose()
    }

    fn upsert_member(&mut self, member: &ProjectMember) -> StoreResult<()> {
        let row = member_to_row(member);
        diesel::insert_into(project_members::table)
            .values(&row)
            .on_conflict((project_members::project_id, project_members::user_id))
            .do_update()
            .set(project_members::role.eq(&row.role))
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "member", member.user_id().as_str()))?;
        Ok(())
    }

    fn delete_member(&mut self, project: &ProjectId, user: &UserId) -> StoreResult<bool> {
        let deleted = diesel::delete(project_members::table.find((project.as_str(), user.as_str())))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        Ok(deleted > 0)
    }

    fn members_of(&mut self, project: &ProjectId) -> StoreResult<Vec<ProjectMember>> {
        project_members::table
            .filter(project_members::project_id.eq(project.as_str()))
            .order(project_members::user_id.asc())
            .select(MemberRow::as_select())
            .load::<MemberRow>(self.conn)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_member)
            .collect()
    }
}

impl SprintStore for PgStoreTransaction<'_> {
    fn insert_sprint(&mut self, sprint: &Sprint) -> StoreResult<()> {
        diesel::insert_into(sprints::table)
            .values(&sprint_to_row(sprint))
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "sprint", &sprint.id().to_string()))?;
        Ok(())
    }

    fn find_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>> {
        sprints::table
            .find(id.into_inner())
            .select(SprintRow::as_select())
            .first::<SprintRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_sprint)
            .transpose()
    }

    fn lock_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>> {
        sprints::table
            .find(id.into_inner())
            .select(SprintRow::as_select())
            .for_update()
            .first::<SprintRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_sprint)
            .transpose()
    }

    fn update_sprint(&mut self, sprint: &Sprint) -> StoreResult<()> {
        let updated = diesel::update(sprints::table.find(sprint.id().into_inner()))
            .set(&sprint_to_row(sprint))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        if updated == 0 {
            return Err(StoreError::missing("sprint", sprint.id()));
        }
        Ok(())
    }

    fn delete_sprint(&mut self, id: SprintId) -> StoreResult<bool> {
        let deleted = diesel::delete(sprints::table.find(id.into_inner()))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        Ok(deleted > 0)
    }

    fn sprints_of(&mut self, project: &ProjectId) -> StoreResult<Vec<Sprint>> {
        sprints::table
            .filter(sprints::project_id.eq(project.as_str()))
            .order(sprints::name.asc())
            .select(SprintRow::as_select())
            .load::<SprintRow>(self.conn)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_sprint)
            .collect()
    }
}

impl TaskStore for PgStoreTransaction<'_> {
    fn insert_task(&mut self, task: &Task) -> StoreResult<()> {
        let row = task_to_row(task)?;
        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "task", &row.id))?;
        self.sync_task_links(task)
    }

    fn find_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>> {
        let Some(row) = tasks::table
            .find(key.to_string())
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row])?.pop())
    }

    fn lock_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>> {
        let Some(row) = tasks::table
            .find(key.to_string())
            .select(TaskRow::as_select())
            .for_update()
            .first::<TaskRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row])?.pop())
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<()> {
        let changes = task_to_changeset(task)?;
        let updated = diesel::update(tasks::table.find(task.key().to_string()))
            .set(&changes)
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "task", &task.key().to_string()))?;
        if updated == 0 {
            return Err(StoreError::missing("task", task.key()));
        }
        self.sync_task_links(task)
    }

    fn delete_task(&mut self, key: &TaskKey) -> StoreResult<bool> {
        let deleted = diesel::delete(tasks::table.find(key.to_string()))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        Ok(deleted > 0)
    }

    fn children_of(&mut self, key: &TaskKey) -> StoreResult<Vec<Task>> {
        let rows = tasks::table
            .filter(tasks::parent_id.eq(key.to_string()))
            .order((tasks::project_id.asc(), tasks::number.asc()))
            .select(TaskRow::as_select())
            .load::<TaskRow>(self.conn)
            .map_err(StoreError::persistence)?;
        self.hydrate(rows)
    }

    fn descendants_of(&mut self, root: &TaskKey) -> StoreResult<Vec<Task>> {
        let rows = diesel::sql_query(DESCENDANTS_QUERY)
            .bind::<diesel::sql_types::Varchar, _>(root.to_string())
            .load::<TaskRow>(self.conn)
            .map_err(StoreError::persistence)?;
        self.hydrate(rows)
    }

    fn insert_comment(&mut self, comment: &Comment) -> StoreResult<()> {
        diesel::insert_into(comments::table)
            .values(&comment_to_row(comment))
            .execute(self.conn)
            .map_err(|err| map_write_error(err, "comment", &comment.id().to_string()))?;
        Ok(())
    }

    fn find_comment(&mut self, id: CommentId) -> StoreResult<Option<Comment>> {
        comments::table
            .find(id.into_inner())
            .select(CommentRow::as_select())
            .first::<CommentRow>(self.conn)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_comment)
            .transpose()
    }

    fn update_comment(&mut self, comment: &Comment) -> StoreResult<()> {
        let updated = diesel::update(comments::table.find(comment.id().into_inner()))
            .set((
                comments::content.eq(comment.content()),
                comments::updated_at.eq(comment.updated_at()),
            ))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        if updated == 0 {
            return Err(StoreError::missing("comment", comment.id()));
        }
        Ok(())
    }

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<bool> {
        let deleted = diesel::delete(comments::table.find(id.into_inner()))
            .execute(self.conn)
            .map_err(StoreError::persistence)?;
        Ok(deleted > 0)
    }

    fn comments_for(&mut self, task: &TaskKey) -> StoreResult<Vec<Comment>> {
        comments::table
            .filter(comments::task_id.eq(task.to_string()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load::<CommentRow>(self.conn)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_comment)
            .collect()
    }
}

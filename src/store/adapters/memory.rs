//! In-memory unit of work for tests and single-process use.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    project::{
        domain::{Project, ProjectId, ProjectMember, UserId},
        ports::ProjectStore,
    },
    sprint::{
        domain::{Sprint, SprintId},
        ports::SprintStore,
    },
    store::ports::{StoreError, StoreResult, StoreTransaction, UnitOfWork},
    task::{
        domain::{Comment, CommentId, Task, TaskKey},
        ports::TaskStore,
    },
};

/// Thread-safe in-memory store.
///
/// Transactions are fully serialized: each one works on a private copy of
/// the state, which replaces the shared state only when the work succeeds.
/// A failed transaction therefore leaves no trace, and every lock method is
/// trivially exclusive.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    projects: BTreeMap<ProjectId, Project>,
    members: BTreeMap<(ProjectId, UserId), ProjectMember>,
    sprints: HashMap<SprintId, Sprint>,
    tasks: BTreeMap<TaskKey, Task>,
    comments: Vec<Comment>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E>,
    {
        let mut shared = self
            .state
            .lock()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut snapshot = shared.clone();
        let output = work(&mut MemoryTransaction {
            state: &mut snapshot,
        })?;
        *shared = snapshot;
        Ok(output)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn transact<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static,
    {
        self.run(work)
    }
}

struct MemoryTransaction<'a> {
    state: &'a mut MemoryState,
}

impl MemoryTransaction<'_> {
    fn ensure_project(&self, id: &ProjectId) -> StoreResult<()> {
        if self.state.projects.contains_key(id) {
            Ok(())
        } else {
            Err(StoreError::missing("project", id))
        }
    }
}

impl ProjectStore for MemoryTransaction<'_> {
    fn insert_project(&mut self, project: &Project) -> StoreResult<()> {
        if self.state.projects.contains_key(project.id()) {
            return Err(StoreError::duplicate("project", project.id()));
        }
        self.state
            .projects
            .insert(project.id().clone(), project.clone());
        Ok(())
    }

    fn find_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.state.projects.get(id).cloned())
    }

    fn lock_project(&mut self, id: &ProjectId) -> StoreResult<Option<Project>> {
        self.find_project(id)
    }

    fn update_project(&mut self, project: &Project) -> StoreResult<()> {
        let stored = self
            .state
            .projects
            .get_mut(project.id())
            .ok_or_else(|| StoreError::missing("project", project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    fn delete_project(&mut self, id: &ProjectId) -> StoreResult<bool> {
        if self.state.projects.remove(id).is_none() {
            return Ok(false);
        }
        self.state
            .members
            .retain(|(project_id, _), _| project_id != id);
        self.state
            .sprints
            .retain(|_, sprint| sprint.project_id() != id);
        self.state.tasks.retain(|key, _| key.project_id() != id);
        self.state
            .comments
            .retain(|comment| comment.task().project_id() != id);
        Ok(true)
    }

    fn find_member(
        &mut self,
        project: &ProjectId,
        user: &UserId,
    ) -> StoreResult<Option<ProjectMember>> {
        Ok(self
            .state
            .members
            .get(&(project.clone(), user.clone()))
            .cloned())
    }

    fn upsert_member(&mut self, member: &ProjectMember) -> StoreResult<()> {
        self.ensure_project(member.project_id())?;
        self.state.members.insert(
            (member.project_id().clone(), member.user_id().clone()),
            member.clone(),
        );
        Ok(())
    }

    fn delete_member(&mut self, project: &ProjectId, user: &UserId) -> StoreResult<bool> {
        Ok(self
            .state
            .members
            .remove(&(project.clone(), user.clone()))
            .is_some())
    }

    fn members_of(&mut self, project: &ProjectId) -> StoreResult<Vec<ProjectMember>> {
        Ok(self
            .state
            .members
            .values()
            .filter(|member| member.project_id() == project)
            .cloned()
            .collect())
    }
}

impl SprintStore for MemoryTransaction<'_> {
    fn insert_sprint(&mut self, sprint: &Sprint) -> StoreResult<()> {
        self.ensure_project(sprint.project_id())?;
        if self.state.sprints.contains_key(&sprint.id()) {
            return Err(StoreError::duplicate("sprint", sprint.id()));
        }
        self.state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    fn find_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>> {
        Ok(self.state.sprints.get(&id).cloned())
    }

    fn lock_sprint(&mut self, id: SprintId) -> StoreResult<Option<Sprint>> {
        self.find_sprint(id)
    }

    fn update_sprint(&mut self, sprint: &Sprint) -> StoreResult<()> {
        let stored = self
            .state
            .sprints
            .get_mut(&sprint.id())
            .ok_or_else(|| StoreError::missing("sprint", sprint.id()))?;
        *stored = sprint.clone();
        Ok(())
    }

    fn delete_sprint(&mut self, id: SprintId) -> StoreResult<bool> {
        if self.state.sprints.remove(&id).is_none() {
            return Ok(false);
        }
        for task in self.state.tasks.values_mut() {
            task.forget_sprint(id);
        }
        Ok(true)
    }

    fn sprints_of(&mut self, project: &ProjectId) -> StoreResult<Vec<Sprint>> {
        let mut sprints: Vec<Sprint> = self
            .state
            .sprints
            .values()
            .filter(|sprint| sprint.project_id() == project)
            .cloned()
            .collect();
        sprints.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(sprints)
    }
}

impl TaskStore for MemoryTransaction<'_> {
    fn insert_task(&mut self, task: &Task) -> StoreResult<()> {
        self.ensure_project(task.project_id())?;
        if self.state.tasks.contains_key(task.key()) {
            return Err(StoreError::duplicate("task", task.key()));
        }
        self.state.tasks.insert(task.key().clone(), task.clone());
        Ok(())
    }

    fn find_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>> {
        Ok(self.state.tasks.get(key).cloned())
    }

    fn lock_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>> {
        self.find_task(key)
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<()> {
        let stored = self
            .state
            .tasks
            .get_mut(task.key())
            .ok_or_else(|| StoreError::missing("task", task.key()))?;
        *stored = task.clone();
        Ok(())
    }

    fn delete_task(&mut self, key: &TaskKey) -> StoreResult<bool> {
        if self.state.tasks.remove(key).is_none() {
            return Ok(false);
        }
        for task in self.state.tasks.values_mut() {
            if task.parent() == Some(key) {
                task.orphan();
            }
        }
        self.state.comments.retain(|comment| comment.task() != key);
        Ok(true)
    }

    fn children_of(&mut self, key: &TaskKey) -> StoreResult<Vec<Task>> {
        Ok(self
            .state
            .tasks
            .values()
            .filter(|task| task.parent() == Some(key))
            .cloned()
            .collect())
    }

    fn descendants_of(&mut self, root: &TaskKey) -> StoreResult<Vec<Task>> {
        let mut children: HashMap<&TaskKey, Vec<&Task>> = HashMap::new();
        for task in self.state.tasks.values() {
            if let Some(parent) = task.parent() {
                children.entry(parent).or_default().push(task);
            }
        }

        let mut visited = BTreeSet::new();
        let mut pending = VecDeque::from([root]);
        let mut found = Vec::new();
        while let Some(key) = pending.pop_front() {
            for child in children.get(key).into_iter().flatten() {
                if visited.insert(child.key()) {
                    found.push((*child).clone());
                    pending.push_back(child.key());
                }
            }
        }
        Ok(found)
    }

    fn insert_comment(&mut self, comment: &Comment) -> StoreResult<()> {
        if !self.state.tasks.contains_key(comment.task()) {
            return Err(StoreError::missing("task", comment.task()));
        }
        if self.state.comments.iter().any(|c| c.id() == comment.id()) {
            return Err(StoreError::duplicate("comment", comment.id()));
        }
        self.state.comments.push(comment.clone());
        Ok(())
    }

    fn find_comment(&mut self, id: CommentId) -> StoreResult<Option<Comment>> {
        Ok(self
            .state
            .comments
            .iter()
            .find(|comment| comment.id() == id)
            .cloned())
    }

    fn update_comment(&mut self, comment: &Comment) -> StoreResult<()> {
        let stored = self
            .state
            .comments
            .iter_mut()
            .find(|stored| stored.id() == comment.id())
            .ok_or_else(|| StoreError::missing("comment", comment.id()))?;
        *stored = comment.clone();
        Ok(())
    }

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<bool> {
        let before = self.state.comments.len();
        self.state.comments.retain(|comment| comment.id() != id);
        Ok(self.state.comments.len() != before)
    }

    fn comments_for(&mut self, task: &TaskKey) -> StoreResult<Vec<Comment>> {
        Ok(self
            .state
            .comments
            .iter()
            .filter(|comment| comment.task() == task)
            .cloned()
            .collect())
    }
}

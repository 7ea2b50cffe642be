//! Row operations on tasks and comments inside a store transaction.

use crate::task::domain::{Comment, CommentId, Task, TaskKey};
use crate::store::ports::StoreResult;

/// Task and comment persistence contract.
///
/// A task row carries its parent link, sprint memberships and observers;
/// implementations store and load them together.
pub trait TaskStore {
    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Duplicate`] when the key
    /// already exists.
    fn insert_task(&mut self, task: &Task) -> StoreResult<()>;

    /// Reads a task.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn find_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>>;

    /// Reads a task and takes an exclusive lock on its row.
    ///
    /// The lock is held until the transaction ends, so the sprint
    /// memberships and observers read here cannot change underneath a
    /// later [`TaskStore::update_task`].
    ///
    /// # Errors
    ///
    /// Returns a store error when the read or the lock fails.
    fn lock_task(&mut self, key: &TaskKey) -> StoreResult<Option<Task>>;

    /// Persists every mutable attribute of an existing task, including its
    /// parent link, sprint memberships and observers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the task
    /// does not exist.
    fn update_task(&mut self, task: &Task) -> StoreResult<()>;

    /// Deletes a task with its comments, observers and sprint memberships.
    /// Direct children lose their parent link. Returns `false` when the task
    /// did not exist.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_task(&mut self, key: &TaskKey) -> StoreResult<bool>;

    /// Lists the direct children of `key`, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn children_of(&mut self, key: &TaskKey) -> StoreResult<Vec<Task>>;

    /// Reads every descendant of `root` (excluding `root`) in one pass and
    /// locks their rows until the transaction ends.
    ///
    /// Implementations must terminate even if the stored links contain a
    /// cycle; the caller detects cycles by looking for `root` in the result.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn descendants_of(&mut self, root: &TaskKey) -> StoreResult<Vec<Task>>;

    /// Inserts a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the task
    /// does not exist.
    fn insert_comment(&mut self, comment: &Comment) -> StoreResult<()>;

    /// Reads a comment.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn find_comment(&mut self, id: CommentId) -> StoreResult<Option<Comment>>;

    /// Persists the content and edit timestamp of an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::ports::StoreError::Missing`] when the comment
    /// does not exist.
    fn update_comment(&mut self, comment: &Comment) -> StoreResult<()>;

    /// Deletes a comment. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    fn delete_comment(&mut self, id: CommentId) -> StoreResult<bool>;

    /// Lists the comments of `task` in creation order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read fails.
    fn comments_for(&mut self, task: &TaskKey) -> StoreResult<Vec<Comment>>;
}

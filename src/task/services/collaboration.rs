//! Observers and comments on tasks.

use super::lifecycle::{TaskService, TaskServiceError, TaskServiceResult, load_task, lock_task};
use crate::project::domain::UserId;
use crate::store::ports::UnitOfWork;
use crate::task::domain::{Comment, CommentId, TaskKey, text};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, instrument};

impl<S, C> TaskService<S, C>
where
    S: UnitOfWork,
    C: Clock + Send + Sync + 'static,
{
    /// Starts watching a task. Returns `false` when `user` already watched it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key, user = %user))]
    pub async fn watch_task(&self, key: &TaskKey, user: UserId) -> TaskServiceResult<bool> {
        let target = key.clone();
        let added = self
            .store
            .transact(move |tx| -> TaskServiceResult<bool> {
                let mut task = lock_task(tx, &target)?;
                let added = task.watch(user);
                if added {
                    tx.update_task(&task)?;
                }
                Ok(added)
            })
            .await?;
        debug!(added, "watch requested");
        Ok(added)
    }

    /// Stops watching a task. Returns `false` when `user` was not watching.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key, user = %user))]
    pub async fn unwatch_task(&self, key: &TaskKey, user: &UserId) -> TaskServiceResult<bool> {
        let (target, observer) = (key.clone(), user.clone());
        self.store
            .transact(move |tx| -> TaskServiceResult<bool> {
                let mut task = lock_task(tx, &target)?;
                let removed = task.unwatch(&observer);
                if removed {
                    tx.update_task(&task)?;
                }
                Ok(removed)
            })
            .await
    }

    /// Returns whether `user` watches the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn is_watched_by(&self, key: &TaskKey, user: &UserId) -> TaskServiceResult<bool> {
        let (target, observer) = (key.clone(), user.clone());
        self.store
            .transact(move |tx| -> TaskServiceResult<bool> {
                Ok(load_task(tx, &target)?.is_watched_by(&observer))
            })
            .await
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for blank or over-long content
    /// and [`TaskServiceError::TaskNotFound`] when the task is missing.
    #[instrument(skip_all, fields(task = %key, author = %author))]
    pub async fn add_comment(
        &self,
        key: &TaskKey,
        author: UserId,
        content: &str,
    ) -> TaskServiceResult<Comment> {
        let body = text::required("comment", content, self.config.max_comment_length)?;
        let target = key.clone();
        let clock = Arc::clone(&self.clock);
        let comment = self
            .store
            .transact(move |tx| -> TaskServiceResult<Comment> {
                load_task(tx, &target)?;
                let created = Comment::new(target, author, body, &*clock);
                tx.insert_comment(&created)?;
                Ok(created)
            })
            .await?;
        info!(comment = %comment.id(), "comment added");
        Ok(comment)
    }

    /// Replaces the content of a comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for blank or over-long content
    /// and [`TaskServiceError::CommentNotFound`] when the comment is missing.
    #[instrument(skip_all, fields(comment = %id))]
    pub async fn edit_comment(&self, id: CommentId, content: &str) -> TaskServiceResult<Comment> {
        let body = text::required("comment", content, self.config.max_comment_length)?;
        let clock = Arc::clone(&self.clock);
        self.store
            .transact(move |tx| -> TaskServiceResult<Comment> {
                let mut comment = tx
                    .find_comment(id)?
                    .ok_or(TaskServiceError::CommentNotFound(id))?;
                comment.edit(body, &*clock);
                tx.update_comment(&comment)?;
                Ok(comment)
            })
            .await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CommentNotFound`] when the comment is
    /// missing.
    #[instrument(skip_all, fields(comment = %id))]
    pub async fn delete_comment(&self, id: CommentId) -> TaskServiceResult<()> {
        self.store
            .transact(move |tx| -> TaskServiceResult<()> {
                if tx.delete_comment(id)? {
                    Ok(())
                } else {
                    Err(TaskServiceError::CommentNotFound(id))
                }
            })
            .await?;
        info!("comment deleted");
        Ok(())
    }

    /// Lists the comments of a task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn list_comments(&self, key: &TaskKey) -> TaskServiceResult<Vec<Comment>> {
        let target = key.clone();
        self.store
            .transact(move |tx| -> TaskServiceResult<Vec<Comment>> {
                load_task(tx, &target)?;
                Ok(tx.comments_for(&target)?)
            })
            .await
    }
}

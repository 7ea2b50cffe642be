//! Diesel schema for tracker persistence.

diesel::table! {
    /// Projects with their task-number counter.
    projects (id) {
        /// Three-character project identifier.
        #[max_length = 3]
        id -> Varchar,
        /// Display name.
        #[max_length = 25]
        name -> Varchar,
        /// Last minted task number.
        last_task_index -> Int8,
    }
}

diesel::table! {
    /// Role of each user inside each project.
    project_members (project_id, user_id) {
        /// Owning project.
        #[max_length = 3]
        project_id -> Varchar,
        /// Member user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Role name.
        #[max_length = 16]
        role -> Varchar,
    }
}

diesel::table! {
    /// Sprints with their lifecycle dates.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Owning project.
        #[max_length = 3]
        project_id -> Varchar,
        /// Display name.
        #[max_length = 32]
        name -> Varchar,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Timestamp of the start transition.
        start_date -> Nullable<Timestamptz>,
        /// Timestamp of the close transition.
        close_date -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Tasks keyed by their `{project}-{number}` identifier.
    tasks (id) {
        /// Display key, for example `ABC-12`.
        #[max_length = 32]
        id -> Varchar,
        /// Owning project.
        #[max_length = 3]
        project_id -> Varchar,
        /// Per-project task number.
        number -> Int8,
        /// Parent task key.
        #[max_length = 32]
        parent_id -> Nullable<Varchar>,
        /// Task type name.
        #[max_length = 16]
        task_type -> Varchar,
        /// Priority name.
        #[max_length = 16]
        priority -> Varchar,
        /// Workflow status name.
        #[max_length = 16]
        status -> Varchar,
        /// Creator user identifier.
        #[max_length = 255]
        creator -> Varchar,
        /// Assignee user identifier.
        #[max_length = 255]
        assignee -> Nullable<Varchar>,
        /// One-line summary.
        summary -> Text,
        /// Longer description.
        description -> Text,
        /// Deadline.
        due_date -> Nullable<Timestamptz>,
        /// Timestamp of the last close.
        close_date -> Nullable<Timestamptz>,
        /// Effort estimate.
        estimate -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sprint membership of tasks.
    task_sprints (task_id, sprint_id) {
        /// Member task.
        #[max_length = 32]
        task_id -> Varchar,
        /// Sprint.
        sprint_id -> Uuid,
    }
}

diesel::table! {
    /// Users watching tasks.
    task_observers (task_id, user_id) {
        /// Watched task.
        #[max_length = 32]
        task_id -> Varchar,
        /// Watching user.
        #[max_length = 255]
        user_id -> Varchar,
    }
}

diesel::table! {
    /// Comments on tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        #[max_length = 32]
        task_id -> Varchar,
        /// Author user identifier.
        #[max_length = 255]
        author -> Varchar,
        /// Comment body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(sprints -> projects (project_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(task_sprints -> tasks (task_id));
diesel::joinable!(task_sprints -> sprints (sprint_id));
diesel::joinable!(task_observers -> tasks (task_id));
diesel::joinable!(comments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    project_members,
    sprints,
    tasks,
    task_sprints,
    task_observers,
    comments,
);

//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, including tombstones.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Free-form description.
        description -> Text,
        /// Lifecycle status label.
        status -> Text,
        /// Priority label.
        priority -> Text,
        /// Due date.
        due_date -> Timestamptz,
        /// Creator reference.
        created_by -> Uuid,
        /// Optional assignee reference.
        assigned_to -> Nullable<Uuid>,
        /// Owning project reference.
        project_id -> Uuid,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

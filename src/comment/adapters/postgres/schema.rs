//! Diesel schema for comment persistence.

diesel::table! {
    /// Task comments, including tombstones.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Author; null for anonymous comments.
        author_id -> Nullable<Uuid>,
        /// Trimmed, non-empty content.
        content -> Text,
        /// Parent comment for replies.
        parent_id -> Nullable<Uuid>,
        /// Whether the content was ever changed.
        is_edited -> Bool,
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

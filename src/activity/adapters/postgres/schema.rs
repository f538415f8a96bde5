//! Diesel schema for audit persistence.

diesel::table! {
    /// Append-only audit entries.
    activity_logs (seq) {
        /// Append sequence; breaks timestamp ties.
        seq -> Int8,
        /// Entry identifier.
        id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Actor role at the time of the action.
        role -> Text,
        /// Recorded action label.
        action -> Text,
        /// Target task.
        task_id -> Uuid,
        /// Project, recorded on creation only.
        project_id -> Nullable<Uuid>,
        /// When the action happened.
        occurred_at -> Timestamptz,
    }
}

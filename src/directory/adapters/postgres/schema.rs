//! Diesel schema for directory lookups.

diesel::table! {
    /// Users resolvable by identifier or name.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name used for name-based lookups.
        #[max_length = 255]
        name -> Varchar,
        /// Contact email.
        #[max_length = 255]
        email -> Varchar,
        /// Role label.
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects that own tasks.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Owning user identifier.
        owner_id -> Uuid,
    }
}

//! Diesel schema for CRM persistence.

diesel::table! {
    /// Companies on file.
    clients (client_id) {
        /// Human-readable client identifier.
        #[max_length = 20]
        client_id -> Varchar,
        /// Company name, unique across the directory.
        #[max_length = 255]
        company_name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Activity log entries attached to clients.
    activity_log (activity_id) {
        /// Store-allocated entry identifier.
        activity_id -> Int8,
        /// Owning client identifier.
        #[max_length = 20]
        client_id -> Varchar,
        /// Kind of work recorded.
        #[max_length = 20]
        action_type -> Varchar,
        /// Free-text content.
        content -> Text,
        /// Origin of the entry.
        #[max_length = 10]
        source -> Varchar,
        /// Date the work is logged against.
        logged_on -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

//! Diesel schema for ingestion job persistence.

diesel::table! {
    /// Durable ingestion jobs.
    ingest_jobs (job_id) {
        /// Store-allocated job identifier.
        job_id -> Int8,
        /// Raw input text, immutable once enqueued.
        raw_text -> Text,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Structured result payload, present only when completed.
        result_data -> Nullable<Jsonb>,
        /// Error message, present only when failed.
        error_message -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Claim timestamp, set the moment the status leaves pending.
        processed_at -> Nullable<Timestamptz>,
    }
}

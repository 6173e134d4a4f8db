//! Diesel schema for deal pipeline persistence.

diesel::table! {
    /// Deal records tracked through the lifecycle.
    deals (deal_id) {
        /// Store-allocated deal identifier.
        deal_id -> Int8,
        /// Owning client identifier.
        #[max_length = 20]
        client_id -> Varchar,
        /// Deal name, unique within the client.
        #[max_length = 255]
        deal_name -> Varchar,
        /// Responsible owner, if assigned.
        #[max_length = 255]
        owner -> Nullable<Varchar>,
        /// Commercial priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Current lifecycle stage code.
        #[max_length = 10]
        stage -> Varchar,
        /// Timestamp of the last accepted stage change.
        stage_changed_at -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Qualification sheets, one per deal.
    qualifications (deal_id) {
        /// Deal the sheet belongs to.
        deal_id -> Int8,
        /// Quantified benefit the client expects.
        metrics -> Nullable<Text>,
        /// Person with final budget authority.
        economic_buyer -> Nullable<Text>,
        /// Criteria the client evaluates vendors on.
        decision_criteria -> Nullable<Text>,
        /// The client's internal purchasing process.
        decision_process -> Nullable<Text>,
        /// The concrete pain driving the purchase.
        identified_pain -> Nullable<Text>,
        /// Internal advocate at the client.
        champion -> Nullable<Text>,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `transition_flow_tests`: Gated lifecycle transitions end to end
//! - `queue_claim_tests`: Exclusive, non-blocking job claiming
//! - `ingest_flow_tests`: Worker scenarios from raw text to stored records

mod in_memory {
    pub mod helpers;

    mod ingest_flow_tests;
    mod queue_claim_tests;
    mod transition_flow_tests;
}

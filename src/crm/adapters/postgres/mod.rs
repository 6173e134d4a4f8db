//! `PostgreSQL` adapters for CRM persistence.

mod activity_log;
mod directory;
mod models;
mod schema;

pub use activity_log::PostgresActivityLog;
pub use directory::{CrmPgPool, PostgresClientDirectory};

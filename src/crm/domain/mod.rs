//! Domain model for the client directory and activity log.

mod activity;
mod client;
mod error;
mod ids;

pub use activity::{ActionType, Activity, ActivitySource, NewActivity};
pub use client::Client;
pub use error::{CrmDomainError, ParseActionTypeError, ParseActivitySourceError};
pub use ids::{ActivityId, ClientId, CompanyName};

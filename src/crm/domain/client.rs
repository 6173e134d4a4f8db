//! Client aggregate for the company directory.

use super::{ClientId, CompanyName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    company_name: CompanyName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a client with an already-allocated identifier.
    #[must_use]
    pub const fn new(
        id: ClientId,
        company_name: CompanyName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_name,
            created_at,
            updated_at: created_at,
        }
    }

    /// Reconstructs a client from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ClientId,
        company_name: CompanyName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_name,
            created_at,
            updated_at,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> &ClientId {
        &self.id
    }

    /// Returns the company name.
    #[must_use]
    pub const fn company_name(&self) -> &CompanyName {
        &self.company_name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

//! Port contracts for the deal pipeline.
//!
//! Ports define infrastructure-agnostic interfaces used by pipeline
//! services.

pub mod repository;

pub use repository::{
    DealRepository, DealRepositoryError, DealRepositoryResult, QualificationRepository,
    QualificationRepositoryError, QualificationRepositoryResult,
};

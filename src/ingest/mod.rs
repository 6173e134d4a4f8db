//! Asynchronous ingestion of free-form activity notes.
//!
//! Callers enqueue raw text; worker processes claim jobs exclusively,
//! invoke the external text-parsing collaborator, upsert the referenced
//! client and deal, record a derived activity entry, and mark the job
//! terminal. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The polling worker in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

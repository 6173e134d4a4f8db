//! Dealflow: deal lifecycle and ingestion core for a B2B sales tracker.
//!
//! This crate provides the engine behind the tracker's CRUD surfaces: a
//! gated multi-stage deal lifecycle and an asynchronous ingestion queue
//! that turns free-form activity notes into structured records.
//!
//! # Architecture
//!
//! Dealflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`pipeline`]: Deal stages, gate rules, and the transition engine
//! - [`crm`]: Client directory and activity log
//! - [`ingest`]: Ingestion job queue and the polling worker

pub mod crm;
pub mod ingest;
pub mod pipeline;

//! Deal lifecycle management.
//!
//! This module implements the gated deal lifecycle: the static 13-stage
//! transition graph, gate rules evaluated against per-deal qualification
//! sheets, and the transition engine that applies validated stage changes
//! including the automatic chain from contract signing into post-sale
//! planning. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

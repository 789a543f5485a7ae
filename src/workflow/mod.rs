//! Workflow mutation, access control, and bulk orchestration.
//!
//! This module owns the task phase-progression engine: the single-task
//! update pipeline, the bulk fan-out that replays the same rules across a
//! selection, privacy/guest automation, and column-level edit
//! authorization. It follows hexagonal architecture:
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

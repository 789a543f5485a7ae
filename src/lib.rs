//! Dubflow: work-order tracking for dubbing and localization production.
//!
//! Tasks move through a fixed sequence of production phases, each phase
//! represented by its own board. This crate implements the core around
//! that movement: the single-task update pipeline with its status guards,
//! bulk operations with partial-failure semantics, privacy/guest-viewer
//! automation, and dynamic column-level edit permissions.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//!   (persistence, the advance-phase service, guest lookup, notification,
//!   cache invalidation)
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`calendar`]: Business-day arithmetic
//! - [`phase`]: The fixed phase sequence and its role-field directory
//! - [`workflow`]: Task mutation, access control, and bulk orchestration

pub mod calendar;
pub mod phase;
pub mod workflow;

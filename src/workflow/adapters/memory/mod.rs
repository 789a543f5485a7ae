//! In-memory adapters for workflow persistence.

mod store;

pub use store::InMemoryTaskStore;

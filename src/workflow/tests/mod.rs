//! Unit and orchestration tests for the workflow module.

mod access_tests;
mod mutation_tests;
mod support;

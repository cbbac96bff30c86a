//! Shared fixtures for the integration tests.

pub mod objects;
pub mod terms;

//! Shared fixtures for Paddock's cross-crate tests.

pub mod drivers;

//! Extensions used across the crate.

pub mod api;

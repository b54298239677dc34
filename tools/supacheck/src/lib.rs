//! The library for the `supacheck` connectivity checker.
//!
//! `supacheck` answers one question: can this machine reach a Supabase project
//! with the configured URL and API key? It does so with a single read-only
//! session lookup against the project's auth service.
//!
//! The pieces are kept separate so that each one can be swapped in tests:
//!
//! - [`config`] finds the endpoint and key, from any [`config::Source`].
//! - [`api`] describes the remote service as a [`api::Connector`] that builds
//!   an [`api::Client`]; [`api::v1`] is the real HTTP implementation.
//! - [`check`] runs the check and decides the [`check::Outcome`].
//! - [`report`] renders the console transcript.

#![deny(clippy::unwrap_used)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod ext;

pub mod api;
pub mod check;
pub mod config;
pub mod report;
pub mod url;

//! Shared test utilities for the bugtraq workspace.
//!
//! This crate provides git repository fixtures used by the adapter and CLI
//! test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`git`] — git repository fixtures (work tree and bare)

pub mod git;

pub use git::TestRepo;

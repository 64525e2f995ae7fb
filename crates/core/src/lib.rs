//! Floret Core - Shared types library.
//!
//! This crate provides common types used across all Floret components:
//! - `client` - Typed client for the flower shop's JSON API
//! - `cli` - Command-line front end for cart and admin operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, statuses, cart entries, and the API
//!   response envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

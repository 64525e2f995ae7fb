//! Floret Client - Typed client for the flower shop's JSON API.
//!
//! This crate replaces the shop's page scripts with one library: cart
//! management (local and server-backed), admin user/order actions, the
//! audit log with CSV export, theming, and toast-style notifications.
//!
//! # Architecture
//!
//! - [`cart`] - One cart capability, two backends. `CartService` wraps either
//!   a [`cart::LocalCartStore`] (entries persisted in the key-value store) or
//!   a [`cart::RemoteCartGateway`] (server-authoritative, per-session cart),
//!   selected by configuration. Callers never see the difference.
//! - [`http`] - Shared request plumbing: anti-forgery token header, status
//!   mapping, envelope unwrapping.
//! - [`notify`] - Transient, auto-dismissing notifications; everything else
//!   reports outcomes through a [`notify::Notifier`].
//! - [`admin`] - Admin panel actions (roles, deletes, order status, audit).
//! - [`storage`] - The durable key-value slot shared by the cart and theme.
//!
//! # Example
//!
//! ```rust,ignore
//! use floret_client::{config::ClientConfig, cart::CartService, notify::Notifier};
//!
//! let config = ClientConfig::from_env()?;
//! let notifier = Notifier::new();
//! let mut cart = CartService::from_config(&config, notifier.clone())?;
//!
//! cart.add(ItemId::new(12), 2).await?;
//! let count = *cart.counter().borrow();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod storage;
pub mod theme;

pub use error::ClientError;

//! Core domain types shared across Floret crates.

mod cart;
mod envelope;
mod id;
mod price;
mod status;

pub use cart::*;
pub use envelope::*;
pub use id::*;
pub use price::*;
pub use status::*;

//! `stockroom-core` — domain types for the item catalogue.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod filter;
pub mod id;
pub mod item;

pub use error::DomainError;
pub use filter::{ItemFilter, Page};
pub use id::ItemId;
pub use item::{Item, ItemFields};

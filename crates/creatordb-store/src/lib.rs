//! Pass-through client for the creator cache collection, spoken to over the
//! document database's HTTP data API.
//!
//! Unlike the platform adapters this layer never swallows failures: every
//! non-2xx response or undecodable body is a typed [`StoreError`] for the
//! caller to handle, so "no data" and "store broken" stay distinguishable.

mod client;
mod error;
pub mod filters;

pub use client::{StoreClient, UpdateOutcome};
pub use error::StoreError;

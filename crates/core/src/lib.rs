//! Storewatch Core - Shared types library.
//!
//! This crate provides the domain types used across the Storewatch
//! loss-prevention register:
//! - `server` - The submission service (sheet client, reference data, forms)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no caching.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - SKUs, stores, form types, row schemas, and reference records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

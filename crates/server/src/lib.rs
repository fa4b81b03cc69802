//! Storewatch Server - loss-prevention submission service.
//!
//! Library surface for the `storewatch-server` binary and its integration
//! tests. See the individual modules:
//!
//! - [`sheets`] - the spreadsheet store contract and the Google Sheets client
//! - [`reference`] - TTL-cached, schema-validated reference tables
//! - [`lookup`] - pure derivation functions (month names, hour ranges, ...)
//! - [`forms`] - the submission pipeline (validate, derive, assemble, append)
//! - [`routes`] - the thin HTTP surface the form frontend calls

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod forms;
pub mod lookup;
pub mod reference;
pub mod routes;
pub mod sheets;
pub mod state;

//! Core types for the Storewatch register.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! between the submission pipeline and its callers.

pub mod form;
pub mod records;
pub mod sku;
pub mod store;

pub use form::{FormType, RowSchema};
pub use records::{CatalogEntry, GuardRosterEntry, WarehouseUser};
pub use sku::Sku;
pub use store::{Store, UnknownStore};

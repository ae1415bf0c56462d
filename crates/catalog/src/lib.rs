//! Catalog domain module.
//!
//! This crate turns untyped product records from the data source into typed
//! [`Product`]s and filters them by category. Pure domain logic: no IO, no async.

pub mod classifier;
pub mod filter;
pub mod product;

pub use classifier::{CategoryRule, ProductFactory, RawProductRecord, CATEGORY_RULES};
pub use filter::CategoryFilter;
pub use product::{PLACEHOLDER_IMAGE, Product, ProductKind};

//! Infrastructure adapters: the asynchronous product data source.
//!
//! The domain crates never see this layer. The controller in `safequote-app` receives
//! a [`CatalogSource`] at construction time and turns its raw records into products.

pub mod source;

pub use source::mock::{MockCatalogSource, seed_records};
pub use source::{CatalogSource, TransportError};

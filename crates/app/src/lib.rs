//! Application layer: wires the catalog, basket, validation and data source into a
//! single quote session driven by the presentation layer.

pub mod config;
pub mod controller;
pub mod error;
pub mod sequencer;

pub use config::{AppConfig, ConfigError, FromEnv};
pub use controller::{FetchOutcome, QuoteController};
pub use error::QuoteError;
pub use sequencer::RequestSequencer;

//! Quotes domain module.
//!
//! The basket of products selected for a quote, and the payload/receipt pair exchanged
//! with the data source when the quote is submitted. Deterministic, no IO.

pub mod basket;
pub mod submission;

pub use basket::{BasketError, QuoteBasket};
pub use submission::{QuoteItem, QuotePayload, SubmissionReceipt};

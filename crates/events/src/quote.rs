//! Notifications published by the quote controller.
//!
//! These are the Rust-side replacement for the widget's modal dialogs and list
//! refreshes: every state change the user should see becomes one `QuoteEvent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use safequote_core::{Money, ProductId};

use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuoteEvent {
    /// A product listing finished loading and replaced the visible list.
    ProductsLoaded {
        filter: String,
        count: usize,
        occurred_at: DateTime<Utc>,
    },
    /// A listing could not be fetched; the previous list is still shown and the user may retry.
    LoadFailed {
        filter: String,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
    ProductAdded {
        product_id: ProductId,
        name: String,
        price: Money,
        basket_total: Money,
        occurred_at: DateTime<Utc>,
    },
    ProductRemoved {
        product_id: ProductId,
        name: String,
        basket_total: Money,
        occurred_at: DateTime<Utc>,
    },
    /// An add was refused (unknown, unavailable or already selected product).
    BasketRejected {
        product_id: Option<ProductId>,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
    QuoteSubmitted {
        reference_code: String,
        eta: String,
        item_count: usize,
        occurred_at: DateTime<Utc>,
    },
    SubmissionFailed {
        reason: String,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for QuoteEvent {
    fn event_type(&self) -> &'static str {
        match self {
            QuoteEvent::ProductsLoaded { .. } => "quote.catalog.loaded",
            QuoteEvent::LoadFailed { .. } => "quote.catalog.load_failed",
            QuoteEvent::ProductAdded { .. } => "quote.basket.product_added",
            QuoteEvent::ProductRemoved { .. } => "quote.basket.product_removed",
            QuoteEvent::BasketRejected { .. } => "quote.basket.rejected",
            QuoteEvent::QuoteSubmitted { .. } => "quote.submission.accepted",
            QuoteEvent::SubmissionFailed { .. } => "quote.submission.failed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            QuoteEvent::ProductsLoaded { occurred_at, .. }
            | QuoteEvent::LoadFailed { occurred_at, .. }
            | QuoteEvent::ProductAdded { occurred_at, .. }
            | QuoteEvent::ProductRemoved { occurred_at, .. }
            | QuoteEvent::BasketRejected { occurred_at, .. }
            | QuoteEvent::QuoteSubmitted { occurred_at, .. }
            | QuoteEvent::SubmissionFailed { occurred_at, .. } => *occurred_at,
        }
    }
}

//! Data source contract.
//!
//! Every call is asynchronous and may fail with a [`TransportError`]. Records are
//! returned untyped (`serde_json::Value`): decoding them is the catalog's job, done
//! once at the boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use safequote_quotes::{QuotePayload, SubmissionReceipt};

pub mod mock;

/// Failure talking to the data source. Always retryable from the user's point of view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The data source could not be reached.
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    /// The data source answered with something that is not the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product record.
    async fn list_products(&self) -> Result<Vec<JsonValue>, TransportError>;

    /// Records whose category contains `category`, case-insensitively.
    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<JsonValue>, TransportError>;

    async fn submit_quote(
        &self,
        payload: &QuotePayload,
    ) -> Result<SubmissionReceipt, TransportError>;
}

#[async_trait]
impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    async fn list_products(&self) -> Result<Vec<JsonValue>, TransportError> {
        (**self).list_products().await
    }

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<JsonValue>, TransportError> {
        (**self).list_products_by_category(category).await
    }

    async fn submit_quote(
        &self,
        payload: &QuotePayload,
    ) -> Result<SubmissionReceipt, TransportError> {
        (**self).submit_quote(payload).await
    }
}

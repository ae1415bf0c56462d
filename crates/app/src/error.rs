use thiserror::Error;

use safequote_core::ProductId;
use safequote_infra::TransportError;
use safequote_quotes::BasketError;
use safequote_validation::ValidationResult;

/// Failures surfaced by [`QuoteController`](crate::QuoteController) operations.
///
/// None of these are fatal: the session stays usable and the caller may retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error(transparent)]
    Basket(#[from] BasketError),

    #[error("product {0} is not in the loaded catalog")]
    ProductNotFound(ProductId),

    #[error("select at least one product before requesting a quote")]
    EmptyBasket,

    #[error("quote form is invalid: {0}")]
    InvalidForm(ValidationResult),

    #[error("a quote submission is already in progress")]
    SubmissionInProgress,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The data source answered but refused the quote.
    #[error("quote rejected: {0}")]
    Rejected(String),
}

impl QuoteError {
    /// Whether the same call may succeed if simply repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuoteError::Transport(_) | QuoteError::SubmissionInProgress)
    }
}

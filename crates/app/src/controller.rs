//! Quote session orchestration.
//!
//! The controller composes a [`CatalogSource`] and an [`EventBus`] handed to it at
//! construction time. It owns the session state (catalog, visible listing, basket) and
//! runs every user intent through the same pipeline:
//!
//! ```text
//! intent -> domain rule (classifier / basket / validator) -> state change -> QuoteEvent
//! ```
//!
//! State sits behind a `std::sync::Mutex` that is never held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use safequote_catalog::{CategoryFilter, Product, ProductFactory};
use safequote_core::{Money, ProductId};
use safequote_events::{EventBus, QuoteEvent, Subscription};
use safequote_infra::CatalogSource;
use safequote_quotes::{QuoteBasket, QuotePayload, SubmissionReceipt};
use safequote_validation::{QuoteForm, validate_quote_form};

use crate::error::QuoteError;
use crate::sequencer::RequestSequencer;

/// Result of a listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest one issued and replaced the visible listing.
    Applied(Vec<Product>),
    /// A newer fetch was issued while this one was in flight; its response was dropped.
    Superseded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied(_))
    }

    pub fn products(&self) -> Option<&[Product]> {
        match self {
            FetchOutcome::Applied(products) => Some(products),
            FetchOutcome::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    /// Every product seen by an unfiltered fetch.
    catalog: Vec<Product>,
    /// What the presentation layer currently shows.
    listing: Vec<Product>,
    filter: CategoryFilter,
    basket: QuoteBasket,
}

impl SessionState {
    fn find(&self, id: ProductId) -> Option<&Product> {
        self.catalog
            .iter()
            .chain(self.listing.iter())
            .find(|p| p.id_typed() == id)
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct SubmissionGuard<'a>(&'a AtomicBool);

impl<'a> SubmissionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user's quote-building session.
#[derive(Debug)]
pub struct QuoteController<S, B> {
    source: S,
    bus: B,
    default_filter: CategoryFilter,
    state: Mutex<SessionState>,
    fetches: RequestSequencer,
    submitting: AtomicBool,
}

impl<S, B> QuoteController<S, B> {
    pub fn new(source: S, bus: B) -> Self {
        Self {
            source,
            bus,
            default_filter: CategoryFilter::All,
            state: Mutex::new(SessionState::default()),
            fetches: RequestSequencer::new(),
            submitting: AtomicBool::new(false),
        }
    }

    /// Filter applied by [`initialize`](Self::initialize) once the catalog is loaded.
    pub fn with_default_filter(mut self, filter: CategoryFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (S, B) {
        (self.source, self.bus)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // Every mutation keeps the state consistent before it can panic, so a
        // poisoned lock still guards valid data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn basket(&self) -> QuoteBasket {
        self.state().basket.clone()
    }

    pub fn basket_total(&self) -> Money {
        self.state().basket.total()
    }

    pub fn listing(&self) -> Vec<Product> {
        self.state().listing.clone()
    }

    pub fn current_filter(&self) -> CategoryFilter {
        self.state().filter.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }
}

impl<S, B> QuoteController<S, B>
where
    S: CatalogSource,
    B: EventBus<QuoteEvent>,
{
    pub fn subscribe(&self) -> Subscription<QuoteEvent> {
        self.bus.subscribe()
    }

    /// Load the full catalog, then fetch the listing for the default filter.
    ///
    /// This is the single entry point a host calls before any other operation. The
    /// default filter goes through the data source like any later selection, so both
    /// paths show the same products.
    pub async fn initialize(&self) -> Result<FetchOutcome, QuoteError> {
        tracing::info!(default_filter = %self.default_filter, "initializing quote session");

        let outcome = self.load_products().await?;
        if self.default_filter.is_all() || !outcome.is_applied() {
            return Ok(outcome);
        }

        self.fetch(self.default_filter.clone()).await
    }

    /// Fetch every product.
    pub async fn load_products(&self) -> Result<FetchOutcome, QuoteError> {
        self.fetch(CategoryFilter::All).await
    }

    /// Fetch the products for a filter selection (`todos` shows everything).
    pub async fn filter_by_category(&self, selection: &str) -> Result<FetchOutcome, QuoteError> {
        self.fetch(CategoryFilter::parse(selection)).await
    }

    async fn fetch(&self, filter: CategoryFilter) -> Result<FetchOutcome, QuoteError> {
        let ticket = self.fetches.issue();
        tracing::debug!(ticket, filter = %filter, "fetching products");

        let response = match &filter {
            CategoryFilter::All => self.source.list_products().await,
            CategoryFilter::Keyword(keyword) => {
                self.source.list_products_by_category(keyword).await
            }
        };

        let records = match response {
            Ok(records) => records,
            Err(err) if self.fetches.is_current(ticket) => {
                tracing::warn!(error = %err, filter = %filter, "product fetch failed");
                self.publish(QuoteEvent::LoadFailed {
                    filter: filter.to_string(),
                    reason: err.to_string(),
                    occurred_at: Utc::now(),
                });
                return Err(err.into());
            }
            Err(err) => {
                tracing::debug!(ticket, error = %err, "discarding failure of superseded fetch");
                return Ok(FetchOutcome::Superseded);
            }
        };

        let products = ProductFactory::create_all(&records);

        let event = {
            let mut state = self.state();
            if !self.fetches.is_current(ticket) {
                tracing::debug!(
                    ticket,
                    latest = self.fetches.latest(),
                    "discarding stale product listing"
                );
                return Ok(FetchOutcome::Superseded);
            }

            if filter.is_all() {
                state.catalog = products.clone();
            }
            state.listing = products.clone();
            state.filter = filter;

            QuoteEvent::ProductsLoaded {
                filter: state.filter.to_string(),
                count: products.len(),
                occurred_at: Utc::now(),
            }
        };

        tracing::info!(count = products.len(), "product listing updated");
        self.publish(event);

        Ok(FetchOutcome::Applied(products))
    }

    /// Add a loaded product to the basket. Returns the new basket total.
    ///
    /// Refused with [`QuoteError::SubmissionInProgress`] while a submission is in flight.
    pub fn add_to_quote(&self, id: ProductId) -> Result<Money, QuoteError> {
        let outcome = {
            let mut state = self.state();
            let found = state.find(id).cloned();
            match found {
                _ if self.is_submitting() => Err(QuoteError::SubmissionInProgress),
                None => Err(QuoteError::ProductNotFound(id)),
                Some(product) => match state.basket.add_product(&product) {
                    Ok(()) => Ok((product, state.basket.total())),
                    Err(err) => Err(QuoteError::from(err)),
                },
            }
        };

        match outcome {
            Ok((product, total)) => {
                tracing::info!(product_id = %id, total = %total, "product added to quote");
                self.publish(QuoteEvent::ProductAdded {
                    product_id: id,
                    name: product.name().to_string(),
                    price: product.price(),
                    basket_total: total,
                    occurred_at: Utc::now(),
                });
                Ok(total)
            }
            Err(err) => {
                tracing::warn!(product_id = %id, error = %err, "product not added to quote");
                self.publish(QuoteEvent::BasketRejected {
                    product_id: Some(id),
                    reason: err.to_string(),
                    occurred_at: Utc::now(),
                });
                Err(err)
            }
        }
    }

    /// Remove the basket entry at `index`. Refused while a submission is in flight.
    pub fn remove_from_quote(&self, index: usize) -> Result<Product, QuoteError> {
        let (removed, total) = {
            let mut state = self.state();
            if self.is_submitting() {
                tracing::warn!(index, "basket is locked by an in-flight submission");
                return Err(QuoteError::SubmissionInProgress);
            }
            let removed = state.basket.remove_at(index)?;
            (removed, state.basket.total())
        };

        tracing::info!(
            product_id = %removed.id_typed(),
            total = %total,
            "product removed from quote"
        );
        self.publish(QuoteEvent::ProductRemoved {
            product_id: removed.id_typed(),
            name: removed.name().to_string(),
            basket_total: total,
            occurred_at: Utc::now(),
        });

        Ok(removed)
    }

    /// Validate the contact form and send the basket to the data source.
    ///
    /// Checks run in order: non-empty basket, form validity, no submission already in
    /// flight. The basket stays locked until the data source answers and is cleared
    /// only when the quote is accepted.
    pub async fn submit(&self, form: &QuoteForm) -> Result<SubmissionReceipt, QuoteError> {
        let (payload, _guard) = {
            let state = self.state();
            if state.basket.is_empty() {
                drop(state);
                return Err(self.submission_failed(QuoteError::EmptyBasket));
            }

            let validation = validate_quote_form(form);
            if !validation.is_valid() {
                drop(state);
                return Err(self.submission_failed(QuoteError::InvalidForm(validation)));
            }

            // Held with the state lock: basket edits check the same flag.
            let Some(guard) = SubmissionGuard::acquire(&self.submitting) else {
                tracing::warn!("submission ignored: another one is in flight");
                return Err(QuoteError::SubmissionInProgress);
            };

            (QuotePayload::assemble(form, &state.basket), guard)
        };

        tracing::info!(items = payload.items.len(), "submitting quote");
        let receipt = match self.source.submit_quote(&payload).await {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.submission_failed(err.into())),
        };

        if !receipt.success {
            return Err(self.submission_failed(QuoteError::Rejected(receipt.message)));
        }

        self.state().basket.clear();

        tracing::info!(reference_code = %receipt.reference_code, "quote accepted");
        self.publish(QuoteEvent::QuoteSubmitted {
            reference_code: receipt.reference_code.clone(),
            eta: receipt.eta.clone(),
            item_count: payload.items.len(),
            occurred_at: Utc::now(),
        });

        Ok(receipt)
    }

    fn submission_failed(&self, err: QuoteError) -> QuoteError {
        tracing::warn!(error = %err, "quote submission failed");
        self.publish(QuoteEvent::SubmissionFailed {
            reason: err.to_string(),
            occurred_at: Utc::now(),
        });
        err
    }

    fn publish(&self, event: QuoteEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = ?err, "failed to publish quote event");
        }
    }
}

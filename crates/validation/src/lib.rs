//! Contact-form validation for quote requests.
//!
//! - `rules`: atomic field validators (pure functions returning a [`FieldCheck`])
//! - `form`: the aggregator that binds rules to the quote form's fields
//! - `mask`: as-you-type phone formatting

pub mod form;
pub mod mask;
pub mod rules;

pub use form::{FieldError, FormValidator, QuoteForm, ValidationResult, validate_quote_form};
pub use mask::format_phone;
pub use rules::FieldCheck;

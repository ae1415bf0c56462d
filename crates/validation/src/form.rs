//! Form validation aggregator.
//!
//! Rules run independently and unconditionally; each failing field contributes one
//! entry. Entries keep the order in which fields were checked, so `first_error()` is
//! deterministic regardless of how the raw form data was laid out.

use serde::{Deserialize, Serialize};

use crate::rules::{self, FieldCheck};

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_CATEGORY: &str = "category";

/// Raw values of the quote contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
}

impl QuoteForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            category: Some(category.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field → message mapping of failed checks, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message of the first failing field, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|e| (e.field.as_str(), e.message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl core::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.errors() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Accumulates rule outcomes per field.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    result: ValidationResult,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `check` against `field`. Passing checks are ignored; a second failure on
    /// the same field replaces the message but keeps the field's position.
    pub fn check(mut self, field: &str, check: FieldCheck) -> Self {
        if check.valid {
            return self;
        }
        match self.result.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = check.message,
            None => self.result.errors.push(FieldError {
                field: field.to_string(),
                message: check.message,
            }),
        }
        self
    }

    pub fn finish(self) -> ValidationResult {
        self.result
    }
}

/// Validate the quote contact form: name, email, phone, category, in that order.
pub fn validate_quote_form(form: &QuoteForm) -> ValidationResult {
    FormValidator::new()
        .check(FIELD_NAME, rules::min_length(form.name.as_deref(), 3, "Nome Completo"))
        .check(FIELD_EMAIL, rules::email(form.email.as_deref()))
        .check(FIELD_PHONE, rules::phone(form.phone.as_deref()))
        .check(FIELD_CATEGORY, rules::required(form.category.as_deref(), "Categoria de EPI"))
        .finish()
}

//! Payload sent to the data source when a quote is submitted, and its receipt.

use serde::{Deserialize, Serialize};

use safequote_core::ProductId;
use safequote_validation::QuoteForm;

use crate::basket::QuoteBasket;

/// One requested product. Quantity is always 1 per distinct product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub category: String,
    pub items: Vec<QuoteItem>,
}

impl QuotePayload {
    /// Combine the contact form with the basket contents, in basket order.
    pub fn assemble(form: &QuoteForm, basket: &QuoteBasket) -> Self {
        Self {
            contact_name: form.name.clone().unwrap_or_default(),
            contact_email: form.email.clone().unwrap_or_default(),
            contact_phone: form.phone.clone().unwrap_or_default(),
            category: form.category.clone().unwrap_or_default(),
            items: basket
                .items()
                .iter()
                .map(|p| QuoteItem {
                    id: p.id_typed(),
                    name: p.name().to_string(),
                    quantity: 1,
                })
                .collect(),
        }
    }
}

/// Data source answer to a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    pub reference_code: String,
    pub eta: String,
}

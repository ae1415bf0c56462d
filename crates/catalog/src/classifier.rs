//! Boundary decode and category classification of raw product records.
//!
//! Records arrive from the data source as untyped JSON. They are decoded once into a
//! [`RawProductRecord`] (only `id` and `name` are mandatory) and then classified into a
//! [`Product`] by matching the lower-cased category against [`CATEGORY_RULES`].
//!
//! The rule order is part of the contract: a category mentioning several keywords
//! resolves to the first rule in the list.

use serde_json::{Map, Value};

use safequote_core::{DomainError, DomainResult, Money, ProductId};

use crate::product::{Product, ProductKind};

/// Typed view of a record as sent by the data source.
///
/// Optional fields holding the wrong JSON type are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProductRecord {
    pub id: u64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub certification_code: Option<String>,
    pub available: Option<bool>,
    pub material: Option<String>,
    pub adjustable: Option<bool>,
    pub respirator_type: Option<String>,
    pub protection_factor: Option<String>,
    pub size: Option<String>,
    pub toe_cap_type: Option<String>,
    pub lens_type: Option<String>,
    pub anti_fog: Option<bool>,
}

impl RawProductRecord {
    /// Minimal record with only the mandatory fields.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Decode an untyped JSON record.
    ///
    /// Fails only when the value is not an object or has no usable `id` / `name`.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::validation("product record must be a JSON object"))?;

        let id = id_field(obj)?;
        let name = text(obj, "name")
            .ok_or_else(|| DomainError::validation(format!("product {id} has no name")))?;

        let price = match obj.get("price") {
            Some(v) => number(v),
            None => None,
        };
        if price.is_none() {
            tracing::warn!(
                product_id = id,
                "product record has no usable price; defaulting to zero"
            );
        }

        Ok(Self {
            id,
            name,
            category: text(obj, "category"),
            description: text(obj, "description"),
            price,
            image: text(obj, "image"),
            certification_code: text(obj, "certificationCode"),
            available: flag(obj, "available"),
            material: text(obj, "material"),
            adjustable: flag(obj, "adjustable"),
            respirator_type: text(obj, "type"),
            protection_factor: text(obj, "protectionFactor"),
            size: text(obj, "size"),
            toe_cap_type: text(obj, "toeCapType"),
            lens_type: text(obj, "lensType"),
            anti_fog: flag(obj, "antiFog"),
        })
    }
}

fn id_field(obj: &Map<String, Value>) -> DomainResult<u64> {
    match obj.get("id") {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            DomainError::invalid_id(format!(
                "product id must be a non-negative integer, got {n}"
            ))
        }),
        Some(Value::String(s)) => s
            .parse::<ProductId>()
            .map(ProductId::get),
        Some(other) => Err(DomainError::invalid_id(format!("unsupported product id: {other}"))),
        None => Err(DomainError::validation("product record has no id")),
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn flag(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}

/// Empty strings count as absent, like missing fields.
fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// One entry of the ordered keyword table.
#[derive(Debug)]
pub struct CategoryRule {
    keywords: &'static [&'static str],
    label: &'static str,
    build: fn(&RawProductRecord) -> ProductKind,
}

impl CategoryRule {
    /// Keywords tested (any one suffices) against the lower-cased category.
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Category label stored on products classified by this rule.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn matches(&self, lowered_category: &str) -> bool {
        self.keywords.iter().any(|k| lowered_category.contains(k))
    }

    fn kind_for(&self, raw: &RawProductRecord) -> ProductKind {
        (self.build)(raw)
    }
}

/// Ordered rules: head, respiratory, hands, feet, face/eye. First match wins.
pub static CATEGORY_RULES: [CategoryRule; 5] = [
    CategoryRule {
        keywords: &["cabeça"],
        label: "Proteção para cabeça",
        build: head_protection,
    },
    CategoryRule {
        keywords: &["respiratória"],
        label: "Proteção respiratória",
        build: respiratory_protection,
    },
    CategoryRule {
        keywords: &["mãos"],
        label: "Proteção para mãos",
        build: hand_protection,
    },
    CategoryRule {
        keywords: &["pés"],
        label: "Proteção para os pés",
        build: foot_protection,
    },
    CategoryRule {
        keywords: &["facial", "ocular"],
        label: "Proteção facial e ocular",
        build: face_eye_protection,
    },
];

fn head_protection(raw: &RawProductRecord) -> ProductKind {
    ProductKind::HeadProtection {
        material: or_default(&raw.material, "Polietileno de alta densidade"),
        adjustable: raw.adjustable != Some(false),
    }
}

fn respiratory_protection(raw: &RawProductRecord) -> ProductKind {
    ProductKind::RespiratoryProtection {
        respirator_type: or_default(&raw.respirator_type, "Descartável"),
        protection_factor: or_default(&raw.protection_factor, "P2"),
    }
}

fn hand_protection(raw: &RawProductRecord) -> ProductKind {
    ProductKind::HandProtection {
        material: or_default(&raw.material, "Látex"),
        size: or_default(&raw.size, "M"),
    }
}

fn foot_protection(raw: &RawProductRecord) -> ProductKind {
    ProductKind::FootProtection {
        toe_cap_type: or_default(&raw.toe_cap_type, "Composite"),
        size: or_default(&raw.size, "40"),
    }
}

fn face_eye_protection(raw: &RawProductRecord) -> ProductKind {
    ProductKind::FaceEyeProtection {
        lens_type: or_default(&raw.lens_type, "Incolor"),
        anti_fog: raw.anti_fog != Some(false),
    }
}

/// Builds typed products from raw records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFactory;

impl ProductFactory {
    /// The first rule matching `category` (case-insensitive substring), if any.
    pub fn rule_for(category: &str) -> Option<&'static CategoryRule> {
        let lowered = category.to_lowercase();
        CATEGORY_RULES.iter().find(|rule| rule.matches(&lowered))
    }

    /// Classify a decoded record. Never fails.
    pub fn create(raw: &RawProductRecord) -> Product {
        let category = raw.category.clone().unwrap_or_default();
        let price = raw.price.map(Money::from_reais).unwrap_or(Money::ZERO);

        let (category, kind) = match Self::rule_for(&category) {
            Some(rule) => (rule.label().to_string(), rule.kind_for(raw)),
            None => (category, ProductKind::General),
        };

        let mut product = Product::new(ProductId::new(raw.id), raw.name.clone(), category, price)
            .with_availability(raw.available != Some(false))
            .with_kind(kind);

        if let Some(description) = &raw.description {
            product = product.with_description(description.clone());
        }
        if let Some(image) = &raw.image {
            product = product.with_image(image.clone());
        }
        if let Some(code) = &raw.certification_code {
            product = product.with_certification_code(code.clone());
        }

        product
    }

    /// Decode and classify a batch; undecodable records are skipped.
    pub fn create_all<'a, I>(values: I) -> Vec<Product>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values
            .into_iter()
            .filter_map(|value| match RawProductRecord::from_json(value) {
                Ok(raw) => Some(Self::create(&raw)),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping undecodable product record");
                    None
                }
            })
            .collect()
    }
}

use serde::Serialize;

use safequote_core::{Entity, Money, ProductId};

/// Image shown for products the data source sends without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200.png?text=Produto+EPI";

/// Category-specific attributes of a product.
///
/// Every variant behaves exactly like the base product; the payload only carries the
/// extra attributes its category defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// No category keyword matched.
    General,
    HeadProtection {
        material: String,
        adjustable: bool,
    },
    RespiratoryProtection {
        respirator_type: String,
        protection_factor: String,
    },
    HandProtection {
        material: String,
        size: String,
    },
    FootProtection {
        toe_cap_type: String,
        size: String,
    },
    FaceEyeProtection {
        lens_type: String,
        anti_fog: bool,
    },
}

impl ProductKind {
    /// Stable machine name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            ProductKind::General => "general",
            ProductKind::HeadProtection { .. } => "head_protection",
            ProductKind::RespiratoryProtection { .. } => "respiratory_protection",
            ProductKind::HandProtection { .. } => "hand_protection",
            ProductKind::FootProtection { .. } => "foot_protection",
            ProductKind::FaceEyeProtection { .. } => "face_eye_protection",
        }
    }
}

/// A catalog product (immutable once built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    description: String,
    price: Money,
    image: String,
    certification_code: String,
    available: bool,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    /// Start a general, available product with the placeholder image.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price,
            image: PLACEHOLDER_IMAGE.to_string(),
            certification_code: String::new(),
            available: true,
            kind: ProductKind::General,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Blank images keep the placeholder.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        if !image.trim().is_empty() {
            self.image = image;
        }
        self
    }

    pub fn with_certification_code(mut self, code: impl Into<String>) -> Self {
        self.certification_code = code.into();
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn certification_code(&self) -> &str {
        &self.certification_code
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check if the product can be put in a quote.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Price rendered as Brazilian Real (`R$ 1.234,56`).
    pub fn format_price(&self) -> String {
        self.price.format_brl()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

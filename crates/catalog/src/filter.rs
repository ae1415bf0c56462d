//! Category filter applied to product listings.

use crate::product::Product;

/// Which products a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product (the "todos" button).
    #[default]
    All,
    /// Products whose category contains the keyword, case-insensitively.
    Keyword(String),
}

impl CategoryFilter {
    /// Interpret a raw filter selection from the presentation layer.
    ///
    /// Blank input, `todos` and `all` select everything.
    pub fn parse(selection: &str) -> Self {
        let trimmed = selection.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("todos")
            || trimmed.eq_ignore_ascii_case("all")
        {
            CategoryFilter::All
        } else {
            CategoryFilter::Keyword(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Keyword(keyword) => category
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
        }
    }

    /// Matching products, in their original order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p.category()))
            .cloned()
            .collect()
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("todos"),
            CategoryFilter::Keyword(keyword) => f.write_str(keyword),
        }
    }
}

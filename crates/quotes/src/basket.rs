use thiserror::Error;

use safequote_catalog::Product;
use safequote_core::{Money, ProductId};

/// Why a basket operation was refused. The basket is unchanged after any of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasketError {
    /// The caller could not resolve the product it wanted to add.
    #[error("product not found")]
    NotFound,

    #[error("product {id} is unavailable for quotes")]
    Unavailable { id: ProductId },

    #[error("product {id} is already in the quote")]
    Duplicate { id: ProductId },

    #[error("no basket entry at position {index} (basket holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Products selected for a quote, in selection order.
///
/// Invariants:
/// - no two entries share a `ProductId`
/// - every entry is available
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBasket {
    items: Vec<Product>,
}

impl QuoteBasket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product resolved by the caller.
    ///
    /// `None` stands for a lookup that found nothing.
    pub fn add(&mut self, product: Option<&Product>) -> Result<(), BasketError> {
        let product = product.ok_or(BasketError::NotFound)?;
        let id = product.id_typed();

        if !product.is_available() {
            return Err(BasketError::Unavailable { id });
        }

        if self.contains(id) {
            return Err(BasketError::Duplicate { id });
        }

        self.items.push(product.clone());
        Ok(())
    }

    pub fn add_product(&mut self, product: &Product) -> Result<(), BasketError> {
        self.add(Some(product))
    }

    /// Remove the entry at `index`, keeping the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Result<Product, BasketError> {
        if index >= self.items.len() {
            return Err(BasketError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Sum of member prices; zero when empty.
    pub fn total(&self) -> Money {
        self.items.iter().map(Product::price).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id_typed() == id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, centavos: u64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Produto {id}"),
            "Proteção para mãos",
            Money::from_centavos(centavos),
        )
    }

    #[test]
    fn new_basket_is_empty_with_zero_total() {
        let basket = QuoteBasket::new();
        assert!(basket.is_empty());
        assert_eq!(basket.total(), Money::ZERO);
    }

    #[test]
    fn add_appends_in_selection_order() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(3, 890)).unwrap();
        basket.add_product(&product(1, 4590)).unwrap();

        let ids: Vec<u64> = basket.items().iter().map(|p| p.id_typed().get()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(basket.total(), Money::from_centavos(5480));
    }

    #[test]
    fn add_rejects_missing_product() {
        let mut basket = QuoteBasket::new();
        assert_eq!(basket.add(None), Err(BasketError::NotFound));
        assert!(basket.is_empty());
    }

    #[test]
    fn add_rejects_unavailable_product() {
        let mut basket = QuoteBasket::new();
        let unavailable = product(9, 1190).with_availability(false);

        let err = basket.add_product(&unavailable).unwrap_err();
        assert_eq!(err, BasketError::Unavailable { id: ProductId::new(9) });
        assert!(basket.is_empty());
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(3, 890)).unwrap();

        // Same id with a different price is still the same product.
        let err = basket.add_product(&product(3, 999)).unwrap_err();
        assert_eq!(err, BasketError::Duplicate { id: ProductId::new(3) });
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.total(), Money::from_centavos(890));
    }

    #[test]
    fn remove_at_preserves_order_of_remaining_entries() {
        let mut basket = QuoteBasket::new();
        for (id, price) in [(1, 100), (2, 200), (3, 300)] {
            basket.add_product(&product(id, price)).unwrap();
        }

        let removed = basket.remove_at(1).unwrap();
        assert_eq!(removed.id_typed(), ProductId::new(2));

        let ids: Vec<u64> = basket.items().iter().map(|p| p.id_typed().get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(basket.total(), Money::from_centavos(400));
    }

    #[test]
    fn remove_at_out_of_range_leaves_basket_unchanged() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(1, 100)).unwrap();
        basket.add_product(&product(2, 200)).unwrap();
        let before = basket.clone();

        let err = basket.remove_at(5).unwrap_err();
        assert_eq!(err, BasketError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(basket, before);

        assert!(basket.remove_at(2).is_err());
        assert_eq!(basket.len(), 2);
    }

    #[test]
    fn removed_product_can_be_added_again() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(1, 100)).unwrap();
        basket.remove_at(0).unwrap();
        assert!(basket.add_product(&product(1, 100)).is_ok());
    }

    #[test]
    fn clear_empties_the_basket() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(1, 100)).unwrap();
        basket.clear();
        assert!(basket.is_empty());
        assert_eq!(basket.total(), Money::ZERO);
    }

    #[test]
    fn zero_priced_entries_do_not_disturb_the_total() {
        let mut basket = QuoteBasket::new();
        basket.add_product(&product(1, 0)).unwrap();
        basket.add_product(&product(2, 650)).unwrap();
        assert_eq!(basket.total(), Money::from_centavos(650));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add { id: u64, price: u64, available: bool },
            Remove(usize),
            Clear,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (0u64..8, 0u64..100_000, prop::bool::weighted(0.8))
                    .prop_map(|(id, price, available)| Op::Add { id, price, available }),
                3 => (0usize..10).prop_map(Op::Remove),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                .. ProptestConfig::default()
            })]

            /// Property: no sequence of operations breaks uniqueness or availability, and
            /// rejected operations never change the basket.
            #[test]
            fn invariants_hold_for_any_operation_sequence(ops in prop::collection::vec(arb_op(), 0..40)) {
                let mut basket = QuoteBasket::new();

                for op in ops {
                    let before = basket.clone();
                    let outcome = match op {
                        Op::Add { id, price, available } => basket
                            .add_product(&product(id, price).with_availability(available))
                            .map(|_| ()),
                        Op::Remove(index) => basket.remove_at(index).map(|_| ()),
                        Op::Clear => {
                            basket.clear();
                            Ok(())
                        }
                    };

                    if outcome.is_err() {
                        prop_assert_eq!(&basket, &before);
                    }

                    let mut ids: Vec<ProductId> = basket.items().iter().map(|p| p.id_typed()).collect();
                    ids.sort();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), basket.len());
                    prop_assert!(basket.items().iter().all(Product::is_available));
                }
            }

            /// Property: removing an entry of price P from a basket totalling T leaves T - P.
            #[test]
            fn removal_subtracts_exactly_the_removed_price(
                prices in prop::collection::vec(0u64..1_000_000, 1..12),
                pick in any::<prop::sample::Index>(),
            ) {
                let mut basket = QuoteBasket::new();
                for (id, price) in prices.iter().enumerate() {
                    basket.add_product(&product(id as u64, *price)).unwrap();
                }

                let total = basket.total();
                prop_assert_eq!(total.centavos(), prices.iter().sum::<u64>());

                let index = pick.index(basket.len());
                let removed = basket.remove_at(index).unwrap();
                prop_assert_eq!(basket.total(), total.saturating_sub(removed.price()));
            }
        }
    }
}

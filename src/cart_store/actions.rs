use crate::domain::Product;

/// Actions accepted by the cart store.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds one unit of the product, carrying the full fetched record.
    Add(Product),
}

use crate::domain::Product;
use crate::store_framework::Reducer;
use super::actions::CartAction;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub qty: u32,
}

/// Cart contents in insertion order.
#[derive(Debug, Default)]
pub struct CartReducer {
    lines: Vec<CartLine>,
}

impl Reducer for CartReducer {
    type Action = CartAction;
    type State = Vec<CartLine>;

    const NAME: &'static str = "cart";

    /// # Actions
    /// - `Add(product)`: bumps the quantity of an existing line with the same id,
    ///   otherwise appends a new line with quantity 1.
    fn reduce(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => {
                match self.lines.iter_mut().find(|line| line.product.id == product.id) {
                    Some(line) => line.qty += 1,
                    None => self.lines.push(CartLine { product, qty: 1 }),
                }
            }
        }
    }

    fn state(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}

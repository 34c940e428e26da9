use serde::{Deserialize, Serialize};

use super::Category;

/// Every `OUT_OF_STOCK_EVERY`-th product (by zero-based position) is shown as
/// unavailable. Purely a presentation mock; there is no inventory behind it.
pub const OUT_OF_STOCK_EVERY: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}

/// A product as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

// Fixture builders.
#[cfg(test)]
impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category,
            image: String::new(),
            rating: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_rating(mut self, rate: f64, count: u32) -> Self {
        self.rating = Some(Rating { rate, count });
        self
    }
}

/// A fetched product plus its mocked availability.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProduct {
    pub product: Product,
    pub in_stock: bool,
}

impl DisplayProduct {
    /// Tags each product with `in_stock` based on its position in the fetched list.
    pub fn from_catalog(products: Vec<Product>) -> Vec<DisplayProduct> {
        products
            .into_iter()
            .enumerate()
            .map(|(index, product)| DisplayProduct {
                product,
                in_stock: index % OUT_OF_STOCK_EVERY != 0,
            })
            .collect()
    }

    pub fn id(&self) -> u64 {
        self.product.id
    }

    pub fn price(&self) -> f64 {
        self.product.price
    }

    pub fn category(&self) -> &Category {
        &self.product.category
    }
}

/// Sizes offered on apparel cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl Size {
    pub const ALL: [Size; 4] = [Size::S, Size::M, Size::L, Size::XL];

    pub fn label(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }
}

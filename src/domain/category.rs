use std::fmt;

use serde::{Deserialize, Serialize};

/// Product category as reported by the catalog endpoint.
///
/// The four storefront labels are closed variants. Anything else the upstream
/// sends is kept verbatim in `Other` so one unexpected label never fails the
/// whole catalog decode; those products are only reachable through "All".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    MensClothing,
    WomensClothing,
    Jewelery,
    Electronics,
    Other(String),
}

impl Category {
    /// The categories offered as filter buttons, in display order.
    pub const FIXED: [Category; 4] = [
        Category::MensClothing,
        Category::WomensClothing,
        Category::Jewelery,
        Category::Electronics,
    ];

    /// Exact, case-sensitive lookup of one of the fixed labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "men's clothing" => Some(Category::MensClothing),
            "women's clothing" => Some(Category::WomensClothing),
            "jewelery" => Some(Category::Jewelery),
            "electronics" => Some(Category::Electronics),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::MensClothing => "men's clothing",
            Category::WomensClothing => "women's clothing",
            Category::Jewelery => "jewelery",
            Category::Electronics => "electronics",
            Category::Other(label) => label,
        }
    }

    /// Apparel categories get a size selector on their cards.
    pub fn has_sizes(&self) -> bool {
        matches!(self, Category::MensClothing | Category::WomensClothing)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label).unwrap_or(Category::Other(label))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            fixed => fixed.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

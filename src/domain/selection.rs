//! User-selectable filter and sort values.

use std::str::FromStr;

use super::Category;
use crate::error::ViewError;

/// Which category the grid is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// The filter buttons in display order.
    pub fn buttons() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::FIXED.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ViewError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        if label == Self::ALL_LABEL {
            return Ok(CategoryFilter::All);
        }
        Category::from_label(label)
            .map(CategoryFilter::Only)
            .ok_or_else(|| ViewError::UnknownCategory(label.to_string()))
    }
}

/// Price ordering applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// "Sort By": keep the current order.
    #[default]
    None,
    PriceLowHigh,
    PriceHighLow,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [
        SortOption::None,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
    ];

    /// Form value of the option in the sort selector.
    pub fn value(&self) -> &'static str {
        match self {
            SortOption::None => "",
            SortOption::PriceLowHigh => "priceLowHigh",
            SortOption::PriceHighLow => "priceHighLow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::None => "Sort By",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
        }
    }
}

impl FromStr for SortOption {
    type Err = ViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.value() == value)
            .ok_or_else(|| ViewError::UnknownSortOption(value.to_string()))
    }
}

use super::text::{capitalize_first, excerpt_description, format_price, truncate_title};
use crate::domain::{CategoryFilter, DisplayProduct, Size, SortOption};
use crate::view::{LoadPhase, Route, ViewState};

pub const HEADING: &str = "Latest Products";
pub const SKELETON_BLOCKS: usize = 6;
pub const SKELETON_HEIGHT_PX: u32 = 350;
pub const OUT_OF_STOCK_OPACITY: f32 = 0.6;

/// What the grid shows right now.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub heading: &'static str,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Skeleton { blocks: usize, height_px: u32 },
    Grid { controls: Controls, cards: Vec<Card> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub sort_options: Vec<SortChoice>,
    pub filters: Vec<FilterButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    pub value: String,
    pub caption: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeSelector {
    pub sizes: Vec<&'static str>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub product_id: u64,
    pub title: String,
    pub image_alt: String,
    pub image: String,
    pub price: String,
    pub rating: Option<String>,
    pub description: String,
    pub sizes: Option<SizeSelector>,
    pub in_stock: bool,
    /// `None` when navigation is suppressed.
    pub detail_href: Option<String>,
}

impl Card {
    pub fn from_product(item: &DisplayProduct) -> Self {
        let product = &item.product;
        Self {
            product_id: product.id,
            title: truncate_title(&product.title),
            image_alt: product.title.clone(),
            image: product.image.clone(),
            price: format_price(product.price),
            rating: product.rating.as_ref().map(|r| r.rate.to_string()),
            description: excerpt_description(&product.description),
            sizes: product.category.has_sizes().then(|| SizeSelector {
                sizes: Size::ALL.iter().map(Size::label).collect(),
                enabled: item.in_stock,
            }),
            in_stock: item.in_stock,
            detail_href: item
                .in_stock
                .then(|| Route::ProductDetail(product.id).to_string()),
        }
    }

    pub fn add_to_cart_enabled(&self) -> bool {
        self.in_stock
    }

    pub fn opacity(&self) -> f32 {
        if self.in_stock {
            1.0
        } else {
            OUT_OF_STOCK_OPACITY
        }
    }
}

impl Controls {
    pub fn new(active_category: &CategoryFilter, active_sort: SortOption) -> Self {
        Self {
            sort_options: SortOption::ALL
                .iter()
                .map(|option| SortChoice {
                    value: option.value(),
                    label: option.label(),
                    selected: *option == active_sort,
                })
                .collect(),
            filters: CategoryFilter::buttons()
                .iter()
                .map(|button| FilterButton {
                    value: button.label().to_string(),
                    caption: capitalize_first(button.label()),
                    active: button == active_category,
                })
                .collect(),
        }
    }
}

/// Picks the render mode from the load phase and builds the view tree.
pub fn build_page(state: &ViewState) -> Page {
    let body = match state.phase() {
        LoadPhase::Loading => PageBody::Skeleton {
            blocks: SKELETON_BLOCKS,
            height_px: SKELETON_HEIGHT_PX,
        },
        LoadPhase::Failed(message) => PageBody::Failed { message: message.clone() },
        LoadPhase::Ready => PageBody::Grid {
            controls: Controls::new(state.category(), state.sort()),
            cards: state.visible().iter().map(Card::from_product).collect(),
        },
    };
    Page { heading: HEADING, body }
}

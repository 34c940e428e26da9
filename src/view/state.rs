use crate::domain::{CategoryFilter, DisplayProduct, Product, SortOption};

/// Where the catalog load stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    /// Only reachable when fetch errors are surfaced.
    Failed(String),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

/// Everything the product grid shows, owned by a single view task.
///
/// `catalog` is replaced wholesale on each successful load and never edited.
/// `visible` is always `catalog` filtered by `category`, then optionally sorted
/// by price.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    catalog: Vec<DisplayProduct>,
    visible: Vec<DisplayProduct>,
    phase: LoadPhase,
    category: CategoryFilter,
    sort: SortOption,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_loading(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Installs a freshly fetched catalog and resets the selection to "All", unsorted.
    pub fn commit_catalog(&mut self, products: Vec<Product>) {
        self.catalog = DisplayProduct::from_catalog(products);
        self.visible = self.catalog.clone();
        self.category = CategoryFilter::All;
        self.sort = SortOption::None;
        self.phase = LoadPhase::Ready;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.phase = LoadPhase::Failed(reason.into());
    }

    /// Restricts the visible list to `filter`, in catalog order.
    ///
    /// Always rebuilds from the catalog, so any sort applied before is lost.
    pub fn filter_by_category(&mut self, filter: CategoryFilter) {
        self.visible = self
            .catalog
            .iter()
            .filter(|item| filter.matches(item.category()))
            .cloned()
            .collect();
        self.category = filter;
        self.sort = SortOption::None;
    }

    /// Reorders the current visible list by price. Ties keep their relative order.
    pub fn sort_by(&mut self, option: SortOption) {
        self.sort = option;
        match option {
            SortOption::None => {}
            SortOption::PriceLowHigh => {
                self.visible.sort_by(|a, b| a.price().total_cmp(&b.price()));
            }
            SortOption::PriceHighLow => {
                self.visible.sort_by(|a, b| b.price().total_cmp(&a.price()));
            }
        }
    }

    /// Looks a product up among the cards currently on screen.
    pub fn find_visible(&self, product_id: u64) -> Option<&DisplayProduct> {
        self.visible.iter().find(|item| item.id() == product_id)
    }

    pub fn catalog(&self) -> &[DisplayProduct] {
        &self.catalog
    }

    pub fn visible(&self) -> &[DisplayProduct] {
        &self.visible
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }
}

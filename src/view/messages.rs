use tokio::sync::oneshot;

use super::{LoadPhase, Route};
use crate::domain::{CategoryFilter, DisplayProduct, Product, SortOption};
use crate::error::CatalogError;

/// Read-only copy of the view state handed out to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub phase: LoadPhase,
    pub category: CategoryFilter,
    pub sort: SortOption,
    pub visible: Vec<DisplayProduct>,
    pub catalog_len: usize,
}

/// Everything the view task reacts to. User events carry a oneshot for the reply.
#[derive(Debug)]
pub enum ViewRequest {
    /// Posted by the fetch task; `attempt` lets the view ignore superseded fetches.
    CatalogLoaded {
        attempt: u32,
        outcome: Result<Vec<Product>, CatalogError>,
    },
    FilterByCategory {
        filter: CategoryFilter,
        respond_to: oneshot::Sender<usize>,
    },
    SortBy {
        option: SortOption,
        respond_to: oneshot::Sender<usize>,
    },
    AddToCart {
        product_id: u64,
        respond_to: oneshot::Sender<bool>,
    },
    OpenDetail {
        product_id: u64,
        respond_to: oneshot::Sender<Option<Route>>,
    },
    Retry {
        respond_to: oneshot::Sender<bool>,
    },
    Render {
        respond_to: oneshot::Sender<String>,
    },
    Snapshot {
        respond_to: oneshot::Sender<ViewSnapshot>,
    },
    Unmount,
}

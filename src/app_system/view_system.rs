use std::sync::Arc;
use tracing::{error, info};

use super::ViewConfig;
use crate::cart_store::{CartDispatcher, CartReducer, CartStore};
use crate::catalog::CatalogSource;
use crate::clients::ProductsViewClient;
use crate::error::ViewError;
use crate::notify::{ToastService, Toaster};
use crate::view::ProductsView;

/// Starts the view and its collaborators and tears them down again.
///
/// The cart store and toaster stand in for the application-wide services the
/// view talks to; the view itself is mounted on start.
pub struct ViewSystem {
    pub view: ProductsViewClient,
    pub cart: CartDispatcher,
    pub toaster: Toaster,
    handles: Vec<(&'static str, tokio::task::JoinHandle<()>)>,
}

impl ViewSystem {
    pub fn start(config: &ViewConfig, source: Arc<dyn CatalogSource>) -> Self {
        let (cart_store, cart) = CartStore::new(config.buffer_size, CartReducer::default());
        let cart_handle = tokio::spawn(cart_store.run());

        let (toast_service, toaster) = ToastService::new(config.buffer_size, config.toast_duration);
        let toast_handle = tokio::spawn(toast_service.run());

        let (view, view_client) = ProductsView::new(config, source, cart.clone(), toaster.clone());
        let view_handle = tokio::spawn(view.run());

        info!(url = %config.catalog_url, "View system started");
        Self {
            view: view_client,
            cart,
            toaster,
            handles: vec![
                ("products_view", view_handle),
                ("cart_store", cart_handle),
                ("toast_service", toast_handle),
            ],
        }
    }

    /// Unmounts the view, then lets the store and toaster drain and stop.
    pub async fn shutdown(self) -> Result<(), ViewError> {
        info!("Shutting down view system...");
        // The view may already be gone; dropping the handles below still stops everything.
        let _ = self.view.unmount().await;

        drop(self.view);
        drop(self.cart);
        drop(self.toaster);

        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(task = name, "Task failed: {:?}", e);
                return Err(ViewError::TaskFailed(format!("{}: {}", name, e)));
            }
        }

        info!("View system shutdown complete.");
        Ok(())
    }
}

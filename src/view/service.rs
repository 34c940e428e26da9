use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::{LoadPhase, Route, ViewRequest, ViewSnapshot, ViewState};
use crate::app_system::ViewConfig;
use crate::cart_store::{CartAction, CartDispatcher};
use crate::catalog::{spawn_fetch, CatalogSource};
use crate::clients::ProductsViewClient;
use crate::domain::{CategoryFilter, Product, SortOption};
use crate::error::CatalogError;
use crate::notify::{Notification, Toaster};
use crate::render::build_page;

pub const ADDED_TO_CART: &str = "Added to cart";

/// The product grid component.
///
/// Owns its [`ViewState`] exclusively and handles one event at a time. The
/// catalog fetch runs in its own task and reports back through this view's
/// channel; only this task ever commits state.
pub struct ProductsView {
    receiver: mpsc::Receiver<ViewRequest>,
    // Weak so an idle view does not keep its own channel open.
    loopback: mpsc::WeakSender<ViewRequest>,
    source: Arc<dyn CatalogSource>,
    cart: CartDispatcher,
    toaster: Toaster,
    state: ViewState,
    phase_tx: watch::Sender<LoadPhase>,
    mounted: CancellationToken,
    attempt: u32,
    surface_fetch_errors: bool,
}

impl ProductsView {
    pub fn new(
        config: &ViewConfig,
        source: Arc<dyn CatalogSource>,
        cart: CartDispatcher,
        toaster: Toaster,
    ) -> (Self, ProductsViewClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (phase_tx, phase_rx) = watch::channel(LoadPhase::Loading);
        let view = Self {
            receiver,
            loopback: sender.downgrade(),
            source,
            cart,
            toaster,
            state: ViewState::new(),
            phase_tx,
            mounted: CancellationToken::new(),
            attempt: 0,
            surface_fetch_errors: config.surface_fetch_errors,
        };
        let client = ProductsViewClient::new(sender, phase_rx);
        (view, client)
    }

    /// Mount: start the fetch, then serve events until unmounted.
    #[instrument(name = "products_view", skip(self))]
    pub async fn run(mut self) {
        info!("ProductsView mounted");
        self.start_fetch();

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ViewRequest::CatalogLoaded { attempt, outcome } => {
                    self.handle_catalog_loaded(attempt, outcome);
                }
                ViewRequest::FilterByCategory { filter, respond_to } => {
                    self.handle_filter_by_category(filter, respond_to);
                }
                ViewRequest::SortBy { option, respond_to } => {
                    self.handle_sort_by(option, respond_to);
                }
                ViewRequest::AddToCart { product_id, respond_to } => {
                    self.handle_add_to_cart(product_id, respond_to).await;
                }
                ViewRequest::OpenDetail { product_id, respond_to } => {
                    self.handle_open_detail(product_id, respond_to);
                }
                ViewRequest::Retry { respond_to } => {
                    self.handle_retry(respond_to);
                }
                ViewRequest::Render { respond_to } => {
                    let _ = respond_to.send(build_page(&self.state).to_html());
                }
                ViewRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.snapshot());
                }
                ViewRequest::Unmount => {
                    info!("ProductsView unmounting");
                    break;
                }
            }
        }

        self.mounted.cancel();
        info!("ProductsView unmounted");
    }

    fn start_fetch(&mut self) {
        let Some(reply) = self.loopback.upgrade() else {
            debug!("No clients left; skipping fetch");
            return;
        };
        self.attempt += 1;
        self.state.begin_loading();
        self.publish_phase();
        spawn_fetch(self.source.clone(), reply, self.mounted.child_token(), self.attempt);
    }

    #[instrument(skip(self, outcome))]
    fn handle_catalog_loaded(&mut self, attempt: u32, outcome: Result<Vec<Product>, CatalogError>) {
        if attempt != self.attempt {
            debug!(current = self.attempt, "Ignoring superseded fetch");
            return;
        }
        match outcome {
            Ok(products) => {
                self.state.commit_catalog(products);
                info!(count = self.state.catalog().len(), "Catalog loaded");
            }
            Err(e) if self.surface_fetch_errors => {
                error!(error = %e, "Catalog fetch failed");
                self.state.fail(e.to_string());
            }
            Err(e) => {
                error!(error = %e, "Catalog fetch failed; grid stays on loading placeholders");
                return;
            }
        }
        self.publish_phase();
    }

    #[instrument(fields(category = %filter.label()), skip(self, filter, respond_to))]
    fn handle_filter_by_category(&mut self, filter: CategoryFilter, respond_to: oneshot::Sender<usize>) {
        self.state.filter_by_category(filter);
        let shown = self.state.visible().len();
        debug!(shown, "Category applied");
        let _ = respond_to.send(shown);
    }

    #[instrument(fields(sort = option.value()), skip(self, option, respond_to))]
    fn handle_sort_by(&mut self, option: SortOption, respond_to: oneshot::Sender<usize>) {
        self.state.sort_by(option);
        let shown = self.state.visible().len();
        debug!(shown, "Sort applied");
        let _ = respond_to.send(shown);
    }

    /// Dispatches one cart action and shows one toast for an in-stock card.
    /// Anything else does nothing.
    #[instrument(skip(self, respond_to))]
    async fn handle_add_to_cart(&mut self, product_id: u64, respond_to: oneshot::Sender<bool>) {
        let product = match self.state.find_visible(product_id) {
            Some(item) if item.in_stock => item.product.clone(),
            Some(_) => {
                debug!("Product is out of stock");
                let _ = respond_to.send(false);
                return;
            }
            None => {
                warn!("Product is not on screen");
                let _ = respond_to.send(false);
                return;
            }
        };

        if let Err(e) = self.cart.dispatch(CartAction::Add(product)).await {
            error!(error = %e, "Cart dispatch failed");
            let _ = respond_to.send(false);
            return;
        }
        if let Err(e) = self.toaster.push(Notification::success(ADDED_TO_CART)).await {
            warn!(error = %e, "Could not show notification");
        }
        info!("Product added to cart");
        let _ = respond_to.send(true);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_open_detail(&self, product_id: u64, respond_to: oneshot::Sender<Option<Route>>) {
        let route = self
            .state
            .find_visible(product_id)
            .filter(|item| item.in_stock)
            .map(|item| Route::ProductDetail(item.id()));
        if route.is_none() {
            debug!("Navigation suppressed");
        }
        let _ = respond_to.send(route);
    }

    fn handle_retry(&mut self, respond_to: oneshot::Sender<bool>) {
        let retrying = matches!(self.state.phase(), LoadPhase::Failed(_));
        if retrying {
            info!("Retrying catalog fetch");
            self.start_fetch();
        }
        let _ = respond_to.send(retrying);
    }

    fn publish_phase(&self) {
        self.phase_tx.send_replace(self.state.phase().clone());
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            phase: self.state.phase().clone(),
            category: self.state.category().clone(),
            sort: self.state.sort(),
            visible: self.state.visible().to_vec(),
            catalog_len: self.state.catalog().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_store::CartReducer;
    use crate::domain::Category;
    use crate::mock_framework::{
        create_mock_store, create_mock_toaster, expect_dispatch, expect_toast, sample_catalog,
        FailingSource, StaticSource,
    };
    use crate::notify::ToastKind;

    fn mount(
        config: &ViewConfig,
        source: Arc<dyn CatalogSource>,
    ) -> (
        ProductsViewClient,
        mpsc::Receiver<crate::store_framework::StoreRequest<CartReducer>>,
        mpsc::Receiver<crate::notify::ToastRequest>,
        tokio::task::JoinHandle<()>,
    ) {
        let (cart, cart_rx) = create_mock_store::<CartReducer>(8);
        let (toaster, toast_rx) = create_mock_toaster(8);
        let (view, client) = ProductsView::new(config, source, cart, toaster);
        let handle = tokio::spawn(view.run());
        (client, cart_rx, toast_rx, handle)
    }

    #[tokio::test]
    async fn test_add_to_cart_in_stock_dispatches_once() {
        let catalog = sample_catalog(8);
        let (client, mut cart_rx, mut toast_rx, _handle) =
            mount(&ViewConfig::default(), Arc::new(StaticSource::new(catalog.clone())));
        client.wait_until_settled().await.unwrap();

        // index 1 is in stock
        assert!(client.add_to_cart(catalog[1].id).await.unwrap());

        let action = expect_dispatch(&mut cart_rx).await.expect("Expected cart dispatch");
        assert_eq!(action, CartAction::Add(catalog[1].clone()));
        let toast = expect_toast(&mut toast_rx).await.expect("Expected toast");
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, ADDED_TO_CART);

        assert!(cart_rx.try_recv().is_err());
        assert!(toast_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_to_cart_out_of_stock_is_noop() {
        let catalog = sample_catalog(8);
        let (client, mut cart_rx, mut toast_rx, _handle) =
            mount(&ViewConfig::default(), Arc::new(StaticSource::new(catalog.clone())));
        client.wait_until_settled().await.unwrap();

        assert!(!client.add_to_cart(catalog[0].id).await.unwrap());
        assert!(!client.add_to_cart(catalog[4].id).await.unwrap());
        assert!(!client.add_to_cart(9_999).await.unwrap());

        assert!(cart_rx.try_recv().is_err());
        assert!(toast_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_to_cart_ignores_filtered_out_products() {
        let catalog = sample_catalog(8);
        let (client, mut cart_rx, _toast_rx, _handle) =
            mount(&ViewConfig::default(), Arc::new(StaticSource::new(catalog.clone())));
        client.wait_until_settled().await.unwrap();

        // index 1 is jewelery
        client
            .filter_by_category(CategoryFilter::Only(Category::Electronics))
            .await
            .unwrap();
        assert!(!client.add_to_cart(catalog[1].id).await.unwrap());
        assert!(cart_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_open_detail_suppressed_when_out_of_stock() {
        let catalog = sample_catalog(4);
        let (client, _cart_rx, _toast_rx, _handle) =
            mount(&ViewConfig::default(), Arc::new(StaticSource::new(catalog.clone())));
        client.wait_until_settled().await.unwrap();

        assert_eq!(client.open_detail(catalog[0].id).await.unwrap(), None);
        assert_eq!(
            client.open_detail(catalog[2].id).await.unwrap(),
            Some(Route::ProductDetail(catalog[2].id))
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_stays_loading_by_default() {
        let (client, _cart_rx, _toast_rx, _handle) =
            mount(&ViewConfig::default(), Arc::new(FailingSource::new(503)));

        // Give the fetch task and the view time to process the failure.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, LoadPhase::Loading);
        assert_eq!(snapshot.catalog_len, 0);
        assert!(!client.retry().await.unwrap());
        assert!(client.render().await.unwrap().contains("skeleton"));
    }

    #[tokio::test]
    async fn test_surfaced_failure_can_be_retried() {
        let config = ViewConfig { surface_fetch_errors: true, ..ViewConfig::default() };
        let source = Arc::new(FailingSource::new(500));
        let (client, _cart_rx, _toast_rx, _handle) = mount(&config, source.clone());

        let phase = client.wait_until_settled().await.unwrap();
        assert!(matches!(phase, LoadPhase::Failed(ref reason) if reason.contains("500")));
        assert!(client.render().await.unwrap().contains("Retry"));

        source.recover_with(sample_catalog(3));
        assert!(client.retry().await.unwrap());
        let phase = client.wait_until_settled().await.unwrap();
        assert_eq!(phase, LoadPhase::Ready);
        assert_eq!(client.snapshot().await.unwrap().visible.len(), 3);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_unmount_stops_view() {
        let (client, _cart_rx, _toast_rx, handle) =
            mount(&ViewConfig::default(), Arc::new(StaticSource::new(sample_catalog(2))));

        client.unmount().await.unwrap();
        handle.await.unwrap();
        assert!(matches!(
            client.snapshot().await,
            Err(crate::error::ViewError::ActorCommunicationError(_))
        ));
    }
}

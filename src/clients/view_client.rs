use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{CategoryFilter, SortOption};
use crate::error::ViewError;
use crate::view::{LoadPhase, Route, ViewRequest, ViewSnapshot};

/// Handle to a mounted [`ProductsView`](crate::view::ProductsView).
///
/// Every method is one discrete user event; the view processes them in order.
#[derive(Clone)]
pub struct ProductsViewClient {
    sender: mpsc::Sender<ViewRequest>,
    phase: watch::Receiver<LoadPhase>,
}

impl ProductsViewClient {
    pub fn new(sender: mpsc::Sender<ViewRequest>, phase: watch::Receiver<LoadPhase>) -> Self {
        Self { sender, phase }
    }

    /// Current load phase without a round trip to the view.
    #[allow(dead_code)]
    pub fn load_phase(&self) -> LoadPhase {
        self.phase.borrow().clone()
    }

    /// Waits until the view leaves [`LoadPhase::Loading`].
    ///
    /// With fetch errors hidden, a failed load never settles; bound the wait
    /// with `tokio::time::timeout` where that matters.
    pub async fn wait_until_settled(&self) -> Result<LoadPhase, ViewError> {
        let mut phase = self.phase.clone();
        let settled = phase
            .wait_for(|phase| !phase.is_loading())
            .await
            .map_err(|_| ViewError::ActorCommunicationError("View dropped".to_string()))?;
        Ok(settled.clone())
    }

    /// Category button click, by label.
    pub async fn select_category(&self, label: &str) -> Result<usize, ViewError> {
        self.filter_by_category(label.parse()?).await
    }

    /// Sort selector change, by form value.
    pub async fn select_sort(&self, value: &str) -> Result<usize, ViewError> {
        self.sort_by(value.parse()?).await
    }

    #[instrument(skip(self))]
    pub async fn unmount(&self) -> Result<(), ViewError> {
        debug!("Sending request");
        self.sender
            .send(ViewRequest::Unmount)
            .await
            .map_err(|_| ViewError::ActorCommunicationError("View closed".to_string()))
    }
}

view_client_method!(ProductsViewClient => fn filter_by_category(filter: CategoryFilter) -> usize as ViewRequest::FilterByCategory);
view_client_method!(ProductsViewClient => fn sort_by(option: SortOption) -> usize as ViewRequest::SortBy);
view_client_method!(ProductsViewClient => fn add_to_cart(product_id: u64) -> bool as ViewRequest::AddToCart);
view_client_method!(ProductsViewClient => fn open_detail(product_id: u64) -> Option<Route> as ViewRequest::OpenDetail);
view_client_method!(ProductsViewClient => fn retry() -> bool as ViewRequest::Retry);
view_client_method!(ProductsViewClient => fn render() -> String as ViewRequest::Render);
view_client_method!(ProductsViewClient => fn snapshot() -> ViewSnapshot as ViewRequest::Snapshot);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn mock_client() -> (ProductsViewClient, mpsc::Receiver<ViewRequest>, watch::Sender<LoadPhase>) {
        let (sender, receiver) = mpsc::channel(4);
        let (phase_tx, phase_rx) = watch::channel(LoadPhase::Loading);
        (ProductsViewClient::new(sender, phase_rx), receiver, phase_tx)
    }

    #[tokio::test]
    async fn test_select_category_parses_label() {
        let (client, mut rx, _phase_tx) = mock_client();

        let task = tokio::spawn(async move { client.select_category("jewelery").await });
        match rx.recv().await {
            Some(ViewRequest::FilterByCategory { filter, respond_to }) => {
                assert_eq!(filter, CategoryFilter::Only(Category::Jewelery));
                respond_to.send(3).unwrap();
            }
            other => panic!("Unexpected request: {:?}", other),
        }
        assert_eq!(task.await.unwrap(), Ok(3));
    }

    #[tokio::test]
    async fn test_unknown_labels_never_reach_the_view() {
        let (client, mut rx, _phase_tx) = mock_client();

        assert_eq!(
            client.select_category("shoes").await,
            Err(ViewError::UnknownCategory("shoes".into()))
        );
        assert_eq!(
            client.select_sort("newest").await,
            Err(ViewError::UnknownSortOption("newest".into()))
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_wait_until_settled_sees_phase_change() {
        let (client, _rx, phase_tx) = mock_client();
        assert_eq!(client.load_phase(), LoadPhase::Loading);

        let waiter = tokio::spawn({
            let client = client.clone();
            async move { client.wait_until_settled().await }
        });
        phase_tx.send_replace(LoadPhase::Ready);

        assert_eq!(waiter.await.unwrap(), Ok(LoadPhase::Ready));
        assert_eq!(client.load_phase(), LoadPhase::Ready);
    }

    #[tokio::test]
    async fn test_closed_view_reports_communication_error() {
        let (client, rx, _phase_tx) = mock_client();
        drop(rx);

        assert_eq!(
            client.render().await,
            Err(ViewError::ActorCommunicationError("View closed".into()))
        );
    }
}

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

use super::CatalogSource;
use crate::view::ViewRequest;

/// Runs one catalog fetch and posts the outcome back to the view task.
///
/// The token is checked after the await point: once the view has unmounted the
/// result is dropped instead of being committed. The request itself is left to
/// finish.
pub fn spawn_fetch(
    source: Arc<dyn CatalogSource>,
    reply: mpsc::Sender<ViewRequest>,
    token: CancellationToken,
    attempt: u32,
) -> JoinHandle<()> {
    let span = info_span!("catalog_fetch", attempt);
    tokio::spawn(
        async move {
            let outcome = source.fetch_products().await;
            if token.is_cancelled() {
                debug!("View unmounted before the catalog arrived; discarding result");
                return;
            }
            if reply.send(ViewRequest::CatalogLoaded { attempt, outcome }).await.is_err() {
                debug!("View closed before the catalog arrived");
            }
        }
        .instrument(span),
    )
}

mod app_system;
mod cart_store;
mod catalog;
mod clients;
mod domain;
mod error;
mod notify;
mod render;
mod store_framework;
mod view;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, warn, Instrument};

use crate::app_system::{setup_tracing, ViewConfig, ViewSystem};
use crate::catalog::HttpCatalogSource;
use crate::view::LoadPhase;

/// How long the demo waits for the grid to leave its loading state.
const LOAD_WAIT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = ViewConfig::from_env()?;
    info!(surface_fetch_errors = config.surface_fetch_errors, "Starting product grid");

    let source = Arc::new(HttpCatalogSource::from_config(&config)?);
    info!(url = source.url(), timeout = ?config.catalog_timeout, "Catalog source ready");
    let system = ViewSystem::start(&config, source);

    let phase = async {
        match tokio::time::timeout(LOAD_WAIT, system.view.wait_until_settled()).await {
            Ok(phase) => phase,
            Err(_) => {
                warn!(waited = ?LOAD_WAIT, "Catalog still loading");
                Ok(LoadPhase::Loading)
            }
        }
    }
    .instrument(info_span!("catalog_load"))
    .await?;

    println!("{}", system.view.render().await?);
    if phase != LoadPhase::Ready {
        system.shutdown().await?;
        return Ok(());
    }

    // Walk through a typical session: narrow down, sort, buy.
    let span = info_span!("browse");
    async {
        let shown = system.view.select_category("electronics").await?;
        info!(shown, "Filtered to electronics");
        system.view.select_sort("priceHighLow").await?;

        let snapshot = system.view.snapshot().await?;
        match snapshot.visible.iter().find(|item| item.in_stock) {
            Some(item) => {
                let added = system.view.add_to_cart(item.id()).await?;
                info!(product_id = item.id(), added, "Add to cart clicked");
            }
            None => warn!("No electronics in stock"),
        }

        for line in system.cart.get_state().await? {
            info!(product_id = line.product.id, title = %line.product.title, qty = line.qty, "Cart line");
        }
        for toast in system.toaster.active().await? {
            info!(kind = ?toast.kind, message = %toast.message, "Active notification");
        }
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    println!("{}", system.view.render().await?);

    system.shutdown().await?;
    info!("Product grid finished");
    Ok(())
}

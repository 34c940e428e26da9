//! # Mock Framework
//!
//! Test doubles for the view's collaborators.
//!
//! Use [`create_mock_store`] / [`create_mock_toaster`] to get a handle plus the
//! receiving end of its channel, then assert on what arrives with
//! [`expect_dispatch`] and [`expect_toast`]. Catalog sources never touch the
//! network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, Notify};

use crate::catalog::CatalogSource;
use crate::domain::{Category, Product};
use crate::error::CatalogError;
use crate::notify::{Notification, ToastRequest, Toaster};
use crate::store_framework::{Reducer, StoreClient, StoreRequest};

/// A store handle whose requests land on a channel the test controls.
pub fn create_mock_store<R: Reducer>(buffer_size: usize) -> (StoreClient<R>, mpsc::Receiver<StoreRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next message must be a dispatch; returns its action.
pub async fn expect_dispatch<R: Reducer>(receiver: &mut mpsc::Receiver<StoreRequest<R>>) -> Option<R::Action> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch { action }) => Some(action),
        _ => None,
    }
}

pub fn create_mock_toaster(buffer_size: usize) -> (Toaster, mpsc::Receiver<ToastRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Toaster::new(sender), receiver)
}

pub async fn expect_toast(receiver: &mut mpsc::Receiver<ToastRequest>) -> Option<Notification> {
    match receiver.recv().await {
        Some(ToastRequest::Push(notification)) => Some(notification),
        _ => None,
    }
}

/// `n` products alternating electronics (even index) and jewelery (odd index),
/// with distinct prices in no particular order.
pub fn sample_catalog(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| {
            let category = if i % 2 == 0 { Category::Electronics } else { Category::Jewelery };
            let price = ((i * 37) % 101) as f64 + 0.99;
            Product::new(i as u64 + 1, format!("Product {}", i + 1), price, category)
                .with_description(format!("description of product {}", i + 1))
                .with_image(format!("https://img.example/{}.jpg", i + 1))
                .with_rating(4.0, 10)
        })
        .collect()
}

/// Always answers with the same catalog.
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

/// Fails with an HTTP status until [`FailingSource::recover_with`] is called.
pub struct FailingSource {
    status: u16,
    recovered: Mutex<Option<Vec<Product>>>,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            recovered: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn recover_with(&self, products: Vec<Product>) {
        *self.recovered.lock().unwrap() = Some(products);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FailingSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.recovered.lock().unwrap().clone() {
            Some(products) => Ok(products),
            None => Err(CatalogError::Status(self.status)),
        }
    }
}

/// Holds the response until [`GatedSource::release`] is called.
pub struct GatedSource {
    products: Vec<Product>,
    gate: Notify,
}

impl GatedSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products, gate: Notify::new() }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl CatalogSource for GatedSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.gate.notified().await;
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_store::{CartAction, CartReducer};

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store::<CartReducer>(4);
        let product = sample_catalog(1).remove(0);

        client.dispatch(CartAction::Add(product.clone())).await.unwrap();

        let action = expect_dispatch(&mut receiver).await.expect("Expected dispatch");
        assert_eq!(action, CartAction::Add(product));
    }

    #[test]
    fn sample_catalog_alternates_categories() {
        let catalog = sample_catalog(8);
        assert_eq!(catalog.iter().filter(|p| p.category == Category::Electronics).count(), 4);
        assert_eq!(catalog[1].category, Category::Jewelery);
        let mut prices: Vec<f64> = catalog.iter().map(|p| p.price).collect();
        prices.dedup();
        assert_eq!(prices.len(), 8);
    }
}

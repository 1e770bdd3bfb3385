pub mod carts;
pub mod common;
pub mod products;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{CartService, ProductCatalogService};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub carts: Arc<CartService>,
    pub products: Arc<ProductCatalogService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let carts = Arc::new(CartService::new(db.clone(), event_sender));
        let products = Arc::new(ProductCatalogService::new(db));
        Self { carts, products }
    }
}

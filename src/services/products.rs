use crate::{
    entities::{product, Product},
    errors::{ErrorCode, ServiceError},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Read-side access to the product catalog. The catalog itself is owned by
/// another system; this service never writes to it.
#[derive(Clone)]
pub struct ProductCatalogService {
    db: Arc<DatabaseConnection>,
}

impl ProductCatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i64) -> Result<product::Model, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", product_id),
                )
            })
    }

    /// Lists products with pagination, ordered by id.
    ///
    /// # Returns
    ///
    /// Tuple of (products for page, total count). `page` is 1-indexed.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<product::Model>, u64), ServiceError> {
        let paginator = Product::find()
            .order_by_asc(product::Column::Id)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((data, total))
    }
}

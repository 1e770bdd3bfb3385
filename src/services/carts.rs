use crate::{
    entities::{cart_item, product, CartItem, Product},
    errors::{ErrorCode, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Cart service managing the items in each user's cart.
///
/// Every operation takes the caller's user ID explicitly; nothing here
/// reads ambient identity. Mutations that target an existing item run a
/// lookup-then-authorize sequence inside a single transaction, so a
/// concurrent delete cannot slip between the ownership check and the
/// write. Ordering of failures is fixed: a missing item reports not-found
/// before any ownership comparison happens.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl CartService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Adds an item to the caller's cart.
    ///
    /// The referenced product must exist at creation time. Adding the same
    /// product twice creates a second independent record; there is no
    /// merge-on-duplicate behavior.
    ///
    /// # Returns
    ///
    /// * `Ok(cart_item::Model)` - The created record, without product join
    /// * `Err(ServiceError::NotFound)` - PRODUCT_NOT_FOUND
    #[instrument(skip(self))]
    pub async fn add_item_to_cart(
        &self,
        caller_user_id: i64,
        input: AddItemToCartInput,
    ) -> Result<cart_item::Model, ServiceError> {
        let product = Product::find_by_id(input.product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", input.product_id),
                )
            })?;

        let now = Utc::now();
        let item = cart_item::ActiveModel {
            user_id: Set(caller_user_id),
            product_id: Set(product.id),
            quantity: Set(input.quantity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let item = item.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CartItemAdded {
                item_id: item.id,
                product_id: item.product_id,
            })
            .await;

        info!(
            "Added cart item {} for user {}: product {} x{}",
            item.id, caller_user_id, item.product_id, item.quantity
        );
        Ok(item)
    }

    /// Returns every cart item owned by the caller, each joined with its
    /// product. Never fails for an empty cart.
    #[instrument(skip(self))]
    pub async fn get_cart(
        &self,
        caller_user_id: i64,
    ) -> Result<Vec<CartItemWithProduct>, ServiceError> {
        let rows = CartItem::find()
            .filter(cart_item::Column::UserId.eq(caller_user_id))
            .order_by_asc(cart_item::Column::Id)
            .find_also_related(Product)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(item, product)| CartItemWithProduct { item, product })
            .collect())
    }

    /// Updates the quantity of a cart item owned by the caller.
    ///
    /// Runs find, ownership check, and update in one transaction. Only
    /// `quantity` (and `updated_at`) change; id, owner, and product are
    /// immutable.
    ///
    /// # Returns
    ///
    /// * `Ok(cart_item::Model)` - The updated record
    /// * `Err(ServiceError::NotFound)` - CART_ITEM_NOT_FOUND
    /// * `Err(ServiceError::Unauthorized)` - item belongs to another user
    #[instrument(skip(self))]
    pub async fn change_quantity(
        &self,
        item_id: i64,
        caller_user_id: i64,
        input: ChangeQuantityInput,
    ) -> Result<cart_item::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let item = CartItem::find_by_id(item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    ErrorCode::CartItemNotFound,
                    format!("Cart item {} not found", item_id),
                )
            })?;

        if item.user_id != caller_user_id {
            return Err(ServiceError::Unauthorized(
                "Not permitted to update this cart item".to_string(),
            ));
        }

        let mut item: cart_item::ActiveModel = item.into();
        item.quantity = Set(input.quantity);
        item.updated_at = Set(Utc::now());
        let item = item.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartItemQuantityChanged {
                item_id,
                quantity: item.quantity,
            })
            .await;

        info!(
            "Changed quantity of cart item {} to {}",
            item_id, item.quantity
        );
        Ok(item)
    }

    /// Permanently removes a cart item owned by the caller.
    ///
    /// Same transactional lookup-then-authorize sequence as
    /// [`change_quantity`](Self::change_quantity).
    #[instrument(skip(self))]
    pub async fn delete_item_from_cart(
        &self,
        item_id: i64,
        caller_user_id: i64,
    ) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let item = CartItem::find_by_id(item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    ErrorCode::CartItemNotFound,
                    format!("Cart item {} not found", item_id),
                )
            })?;

        if item.user_id != caller_user_id {
            return Err(ServiceError::Unauthorized(
                "Not permitted to delete this cart item".to_string(),
            ));
        }

        item.delete(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartItemRemoved { item_id })
            .await;

        info!("Removed cart item {}", item_id);
        Ok(())
    }
}

/// Input for adding an item to the cart
#[derive(Debug, Deserialize)]
pub struct AddItemToCartInput {
    pub product_id: i64,
    pub quantity: i32,
}

/// Input for changing a cart item's quantity
#[derive(Debug, Deserialize)]
pub struct ChangeQuantityInput {
    pub quantity: i32,
}

/// Cart item joined with its product
#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: cart_item::Model,
    pub product: Option<product::Model>,
}

use crate::handlers::common::{
    created_response, map_service_error, success_response, validate_input,
};
use crate::{
    auth::AuthenticatedUser,
    entities::cart_item,
    errors::ApiError,
    services::carts::{AddItemToCartInput, CartItemWithProduct, ChangeQuantityInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Creates the router for cart endpoints
pub fn carts_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/items", post(add_to_cart))
        .route("/items/{id}", put(change_quantity).delete(remove_from_cart))
}

/// Add an item to the caller's cart
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 201, description = "Cart item created", body = cart_item::Model),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = AddItemToCartInput {
        product_id: payload.product_id,
        quantity: payload.quantity,
    };

    let item = state
        .services
        .carts
        .add_item_to_cart(user.user_id, input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(item))
}

/// List the caller's cart, each item joined with its product
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Cart items", body = [CartItemWithProduct]),
        (status = 401, description = "Missing or invalid token", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .services
        .carts
        .get_cart(user.user_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(items))
}

/// Change the quantity of a cart item owned by the caller
#[utoipa::path(
    put,
    path = "/api/v1/cart/items/{id}",
    params(("id" = i64, Path, description = "Cart item id")),
    request_body = ChangeQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ChangeQuantityResponse),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 401, description = "Caller does not own the item", body = crate::errors::ErrorResponse),
        (status = 404, description = "Cart item not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<i64>,
    Json(payload): Json<ChangeQuantityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = ChangeQuantityInput {
        quantity: payload.quantity,
    };

    let item = state
        .services
        .carts
        .change_quantity(item_id, user.user_id, input)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ChangeQuantityResponse {
        success: true,
        updated_cart: item,
    }))
}

/// Remove a cart item owned by the caller
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{id}",
    params(("id" = i64, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Cart item removed", body = DeleteItemResponse),
        (status = 401, description = "Caller does not own the item", body = crate::errors::ErrorResponse),
        (status = 404, description = "Cart item not found", body = crate::errors::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .carts
        .delete_item_from_cart(item_id, user.user_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(DeleteItemResponse { success: true }))
}

// Request/response DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddItemRequest {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ChangeQuantityRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuantityResponse {
    pub success: bool,
    pub updated_cart: cart_item::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteItemResponse {
    pub success: bool,
}

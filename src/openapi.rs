use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cart API",
        version = "0.1.0",
        description = r#"
# Cart API

Cart management for an e-commerce backend: add items, list the cart,
change quantities, and remove items. Cart endpoints require a bearer token
issued by the upstream identity service:

```
Authorization: Bearer <jwt>
```

Errors use a consistent JSON shape with a machine-readable `code`
(for example `PRODUCT_NOT_FOUND`, `CART_ITEM_NOT_FOUND`, `UNAUTHORIZED`).
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Cart", description = "Cart item management endpoints"),
        (name = "Products", description = "Product catalog read endpoints")
    ),
    paths(
        crate::handlers::carts::add_to_cart,
        crate::handlers::carts::get_cart,
        crate::handlers::carts::change_quantity,
        crate::handlers::carts::remove_from_cart,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
    ),
    components(
        schemas(
            crate::entities::cart_item::Model,
            crate::entities::product::Model,
            crate::services::carts::CartItemWithProduct,
            crate::handlers::carts::AddItemRequest,
            crate::handlers::carts::ChangeQuantityRequest,
            crate::handlers::carts::ChangeQuantityResponse,
            crate::handlers::carts::DeleteItemResponse,
            crate::handlers::common::PaginatedResponse<crate::entities::product::Model>,
            crate::handlers::common::PaginationMeta,
            crate::errors::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_contains_cart_paths() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("/api/v1/cart/items"));
        assert!(json.contains("/api/v1/products"));
        assert!(json.contains("bearer_auth"));
    }
}

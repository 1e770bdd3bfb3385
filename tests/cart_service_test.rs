mod common;

use common::TestApp;
use rust_decimal_macros::dec;
use cart_api::{
    errors::{ErrorCode, ServiceError},
    services::carts::{AddItemToCartInput, ChangeQuantityInput},
};

const ALICE: i64 = 1;
const BOB: i64 = 2;

#[tokio::test]
async fn add_item_creates_record_owned_by_caller() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Mechanical Keyboard", dec!(89.99)).await;

    let item = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id,
                quantity: 3,
            },
        )
        .await
        .expect("add item succeeds");

    assert!(item.id > 0);
    assert_eq!(item.user_id, ALICE);
    assert_eq!(item.product_id, product_id);
    assert_eq!(item.quantity, 3);
}

#[tokio::test]
async fn add_item_with_unknown_product_fails_and_creates_nothing() {
    let app = TestApp::new().await;

    let result = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id: 9999,
                quantity: 1,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::NotFound {
            code: ErrorCode::ProductNotFound,
            ..
        })
    ));

    let cart = app
        .state
        .services
        .carts
        .get_cart(ALICE)
        .await
        .expect("get_cart succeeds");
    assert!(cart.is_empty());
}

#[tokio::test]
async fn adding_same_product_twice_creates_separate_records() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("USB Cable", dec!(9.50)).await;

    for quantity in [2, 5] {
        app.state
            .services
            .carts
            .add_item_to_cart(
                ALICE,
                AddItemToCartInput {
                    product_id,
                    quantity,
                },
            )
            .await
            .expect("add item succeeds");
    }

    let cart = app.state.services.carts.get_cart(ALICE).await.unwrap();
    assert_eq!(cart.len(), 2);
    assert_ne!(cart[0].item.id, cart[1].item.id);
    assert_eq!(cart[0].item.quantity, 2);
    assert_eq!(cart[1].item.quantity, 5);
}

#[tokio::test]
async fn get_cart_is_empty_for_new_user() {
    let app = TestApp::new().await;

    let cart = app
        .state
        .services
        .carts
        .get_cart(ALICE)
        .await
        .expect("get_cart succeeds");

    assert!(cart.is_empty());
}

#[tokio::test]
async fn get_cart_returns_only_callers_items_with_product_data() {
    let app = TestApp::new().await;
    let keyboard = app.seed_product("Keyboard", dec!(49.00)).await;
    let mouse = app.seed_product("Mouse", dec!(25.00)).await;

    app.state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id: keyboard,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    app.state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id: mouse,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    app.state
        .services
        .carts
        .add_item_to_cart(
            BOB,
            AddItemToCartInput {
                product_id: mouse,
                quantity: 7,
            },
        )
        .await
        .unwrap();

    let cart = app.state.services.carts.get_cart(ALICE).await.unwrap();
    assert_eq!(cart.len(), 2);
    for entry in &cart {
        assert_eq!(entry.item.user_id, ALICE);
        let product = entry.product.as_ref().expect("product joined");
        assert_eq!(product.id, entry.item.product_id);
    }

    let product_names: Vec<&str> = cart
        .iter()
        .filter_map(|entry| entry.product.as_ref().map(|p| p.name.as_str()))
        .collect();
    assert_eq!(product_names, vec!["Keyboard", "Mouse"]);
}

#[tokio::test]
async fn change_quantity_updates_only_the_quantity() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Monitor", dec!(199.00)).await;

    let created = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let updated = app
        .state
        .services
        .carts
        .change_quantity(created.id, ALICE, ChangeQuantityInput { quantity: 4 })
        .await
        .expect("change quantity succeeds");

    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, created.user_id);
    assert_eq!(updated.product_id, created.product_id);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn change_quantity_on_missing_item_is_not_found_for_any_caller() {
    let app = TestApp::new().await;

    for caller in [ALICE, BOB] {
        let result = app
            .state
            .services
            .carts
            .change_quantity(424242, caller, ChangeQuantityInput { quantity: 2 })
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::NotFound {
                code: ErrorCode::CartItemNotFound,
                ..
            })
        ));
    }
}

#[tokio::test]
async fn change_quantity_on_foreign_item_is_unauthorized_and_leaves_it_unchanged() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Webcam", dec!(59.00)).await;

    let item = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id,
                quantity: 3,
            },
        )
        .await
        .unwrap();

    let result = app
        .state
        .services
        .carts
        .change_quantity(item.id, BOB, ChangeQuantityInput { quantity: 5 })
        .await;

    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));

    let cart = app.state.services.carts.get_cart(ALICE).await.unwrap();
    assert_eq!(cart[0].item.quantity, 3);
}

#[tokio::test]
async fn delete_on_missing_item_is_not_found() {
    let app = TestApp::new().await;

    let result = app
        .state
        .services
        .carts
        .delete_item_from_cart(424242, ALICE)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::NotFound {
            code: ErrorCode::CartItemNotFound,
            ..
        })
    ));
}

#[tokio::test]
async fn delete_on_foreign_item_is_unauthorized_and_keeps_the_record() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Desk Lamp", dec!(19.00)).await;

    let item = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let result = app
        .state
        .services
        .carts
        .delete_item_from_cart(item.id, BOB)
        .await;

    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));

    let cart = app.state.services.carts.get_cart(ALICE).await.unwrap();
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn deleted_item_no_longer_appears_in_the_cart() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Headphones", dec!(120.00)).await;

    let item = app
        .state
        .services
        .carts
        .add_item_to_cart(
            ALICE,
            AddItemToCartInput {
                product_id,
                quantity: 2,
            },
        )
        .await
        .unwrap();

    app.state
        .services
        .carts
        .delete_item_from_cart(item.id, ALICE)
        .await
        .expect("delete succeeds");

    let cart = app.state.services.carts.get_cart(ALICE).await.unwrap();
    assert!(cart.is_empty());
}

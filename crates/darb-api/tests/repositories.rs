//! Repository tests against an in-process storefront API.

mod common;

use chrono::{TimeZone, Utc};

use darb_api::{ApiClientError, ApiConfig, DarbApi};
use darb_core::cart::{Cart, CartInfo};
use darb_core::discount::calculate_discounts;
use darb_core::order::build_bill;
use darb_core::review::{Rating, ReviewChange};
use darb_core::{Money, Review};

fn api(server: &common::TestServer) -> DarbApi {
    DarbApi::new(&ApiConfig::with_base_url(&server.base_url)).unwrap()
}

fn review(client: &str, stars: u8) -> Review {
    Review {
        client_id: client.to_string(),
        client_name: format!("client {}", client),
        comment: "Lasts all day".to_string(),
        rating: stars,
        timestamp: Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_list_products() {
    let server = common::start_default().await;
    let products = api(&server).products().list().await.unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].price, Money::from_major(450));
    assert_eq!(products[1].rating, Some(Rating::from_tenths(35)));
    assert!(products[2].is_discovery_set());
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let server = common::start_default().await;
    let err = api(&server).products().get("404").await.unwrap_err();
    assert!(matches!(err, ApiClientError::NotFound(_)));
}

#[tokio::test]
async fn test_get_product_with_space_in_id() {
    let server = common::start_default().await;
    let product = api(&server).products().get("Discovery set").await.unwrap();
    assert_eq!(product.name, "Discovery set");
}

#[tokio::test]
async fn test_new_review_is_prepended_and_rating_recomputed() {
    let server = common::start_default().await;
    let submission = api(&server)
        .products()
        .submit_review("2", review("u-3", 4))
        .await
        .unwrap();

    assert_eq!(submission.change, ReviewChange::Added);
    assert_eq!(submission.review_count, 3);

    let stored = server.product("2");
    assert_eq!(stored["reviews"][0]["clientId"], "u-3");
    // (4 + 5 + 2) / 3 = 3.67
    assert_eq!(stored["rating"], "3.7");
    assert_eq!(
        server.requests(),
        vec!["GET /products/2".to_string(), "PATCH /products/2".to_string()]
    );
}

#[tokio::test]
async fn test_existing_review_is_replaced() {
    let server = common::start_default().await;
    let submission = api(&server)
        .products()
        .submit_review("2", review("u-1", 5))
        .await
        .unwrap();

    assert_eq!(submission.change, ReviewChange::Updated { index: 1 });
    assert_eq!(submission.rating, Some(Rating::from_tenths(50)));

    let stored = server.product("2");
    assert_eq!(stored["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(stored["reviews"][1]["rating"], 5);
    assert_eq!(stored["rating"], "5.0");
}

#[tokio::test]
async fn test_first_review_on_product() {
    let server = common::start_default().await;
    api(&server)
        .products()
        .submit_review("1", review("u-1", 4))
        .await
        .unwrap();
    assert_eq!(server.product("1")["rating"], "4.0");
}

#[tokio::test]
async fn test_failed_patch_surfaces_remote_error() {
    let server = common::start_default().await;
    server.set_fail_patches(true);

    let err = api(&server)
        .products()
        .submit_review("2", review("u-3", 4))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiClientError::Remote { status: 500, .. }));
    assert_eq!(server.product("2")["reviews"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_save_cart_writes_cart_info() {
    let server = common::start_default().await;
    let api = api(&server);
    let product = api.products().get("1").await.unwrap();

    let mut cart = Cart::new();
    cart.add(&product);
    cart.increase("1");
    api.users().save_cart("u-1", &CartInfo::from(&cart)).await.unwrap();

    let user = server.user("u-1");
    assert_eq!(user["cartInfo"]["totalPrice"], 900);
    assert_eq!(user["cartInfo"]["isEmpty"], false);
    assert_eq!(user["cartInfo"]["cart"][0]["quantity"], 2);

    let reloaded = api.users().get("u-1").await.unwrap();
    let restored = Cart::from(reloaded.cart_info.unwrap());
    assert_eq!(restored, cart);
}

#[tokio::test]
async fn test_bill_append_reads_then_writes_history() {
    let server = common::start_default().await;
    let api = api(&server);
    let product = api.products().get("2").await.unwrap();

    let mut cart = Cart::new();
    cart.add(&product);
    let discount = calculate_discounts(cart.total_price(), 0, None);
    let bill = build_bill(&cart, &discount, "Maadi, Cairo", Utc::now());

    let count = api.bills().append("u-1", bill.clone()).await.unwrap();
    assert_eq!(count, 1);

    let stored = server.user("u-1");
    assert_eq!(stored["billsHistory"][0]["paymentMethod"], "WhatsApp");
    assert_eq!(stored["billsHistory"][0]["status"], "pending");
    assert_eq!(stored["billsHistory"][0]["totalPrice"], 360);

    let history = api.bills().list_for_user("u-1").await.unwrap();
    assert_eq!(history, vec![bill]);
}

#[tokio::test]
async fn test_history_of_user_without_bills() {
    let server = common::start_default().await;
    let history = api(&server).bills().list_for_user("u-9").await.unwrap();
    assert!(history.is_empty());
}

//! In-process stand-in for the storefront REST API, with shoppers in
//! every state the storefront commands care about.
//!
//! Records are kept as raw JSON and PATCH merges top-level keys, the way
//! the hosted API behaves.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Debug, Default)]
pub struct Store {
    pub products: Vec<Value>,
    pub users: Vec<Value>,
    /// `"GET /products/7"`, in arrival order.
    pub requests: Vec<String>,
    /// Answer every PATCH with a 500.
    pub fail_patches: bool,
}

type Shared = Arc<Mutex<Store>>;

pub struct TestServer {
    pub base_url: String,
    store: Shared,
}

impl TestServer {
    pub async fn start(store: Store) -> Self {
        let shared = Arc::new(Mutex::new(store));
        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product).patch(patch_product))
            .route("/users/{id}", get(get_user).patch(patch_user))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{}", addr),
            store: shared,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn product(&self, id: &str) -> Value {
        find(&self.store.lock().unwrap().products, id).cloned().unwrap()
    }

    pub fn user(&self, id: &str) -> Value {
        find(&self.store.lock().unwrap().users, id).cloned().unwrap()
    }

    pub fn set_fail_patches(&self, fail: bool) {
        self.store.lock().unwrap().fail_patches = fail;
    }
}

fn find<'a>(records: &'a [Value], id: &str) -> Option<&'a Value> {
    records.iter().find(|r| r["id"] == id)
}

fn merge(record: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (record, patch) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
}

async fn list_products(State(store): State<Shared>) -> Json<Value> {
    let mut store = store.lock().unwrap();
    store.requests.push("GET /products".to_string());
    Json(Value::Array(store.products.clone()))
}

async fn get_product(State(store): State<Shared>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("GET /products/{}", id));
    find(&store.products, &id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn patch_product(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("PATCH /products/{}", id));
    if store.fail_patches {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let record = store
        .products
        .iter_mut()
        .find(|r| r["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    merge(record, body);
    Ok(Json(record.clone()))
}

async fn get_user(State(store): State<Shared>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("GET /users/{}", id));
    find(&store.users, &id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn patch_user(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("PATCH /users/{}", id));
    if store.fail_patches {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let record = store
        .users
        .iter_mut()
        .find(|r| r["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    merge(record, body);
    Ok(Json(record.clone()))
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn catalog() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "name": "Amber Oud",
            "type": "Men's perfume",
            "price": 450,
            "maxQuantity": 10,
            "sales": 40,
            "reviews": [],
        }),
        json!({
            "id": "2",
            "name": "Rose Musk",
            "type": "Women's perfume",
            "price": 400,
            "maxQuantity": 3,
            "sales": 75,
            "reviews": [
                {
                    "clientId": "u-2",
                    "clientName": "omar",
                    "comment": "Soft and warm",
                    "rating": 5,
                    "timestamp": "2025-01-10T09:00:00Z"
                },
                {
                    "clientId": "u-1",
                    "clientName": "layla",
                    "comment": "Too sweet",
                    "rating": 2,
                    "timestamp": "2025-01-08T09:00:00Z"
                }
            ],
            "rating": "3.5",
        }),
        json!({
            "id": "4",
            "name": "Oud Noir",
            "type": "Men's perfume",
            "price": 500,
            "maxQuantity": 0,
            "sales": 90,
            "reviews": [],
        }),
        json!({
            "id": "Discovery set",
            "name": "Discovery set",
            "price": 900,
            "maxQuantity": 20,
            "sales": 12,
            "reviews": [],
        }),
    ]
}

pub fn users() -> Vec<Value> {
    vec![
        json!({ "id": "u-1", "username": "layla", "role": "user", "billsHistory": [] }),
        json!({
            "id": "u-2",
            "name": "Omar",
            "role": "user",
            "cartInfo": {
                "cart": [{
                    "product": { "id": "1", "name": "Amber Oud", "price": 450, "maxQuantity": 10 },
                    "quantity": 2
                }],
                "totalPrice": 900,
                "isEmpty": false
            },
            "billsHistory": [{
                "id": "bill_1736500000000_a1b2c3d4e",
                "products": [{ "id": "2", "title": "Rose Musk", "price": 400, "quantity": 1 }],
                "totalPrice": 360,
                "orderDate": "2025-01-10T09:00:00Z",
                "location": "5 Tahrir Sq, Cairo",
                "paymentMethod": "WhatsApp",
                "status": "delivered"
            }]
        }),
        json!({ "id": "u-9", "name": "Admin", "role": "admin" }),
    ]
}

pub async fn start_default() -> TestServer {
    TestServer::start(Store {
        products: catalog(),
        users: users(),
        ..Store::default()
    })
    .await
}

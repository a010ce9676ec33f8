#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardController` against a wiremock API.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agrisci_core::session::{TOKEN_KEY, USERNAME_KEY};
use agrisci_core::{
    ControllerConfig, CoreError, CredentialStore, DashboardController, DeleteOutcome, Dialog,
    DialogState, EntityKind, MemoryCredentialStore, Navigation, Rows, Severity, Tab,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(token: Option<&str>) -> (MockServer, DashboardController, Arc<MemoryCredentialStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::new());
    if let Some(token) = token {
        store.set(TOKEN_KEY, token).unwrap();
        store.set(USERNAME_KEY, "admin").unwrap();
    }

    let config = ControllerConfig {
        base_url: server.uri(),
        ..ControllerConfig::default()
    };
    let controller = DashboardController::new(config, store.clone()).unwrap();
    (server, controller, store)
}

async fn mount_lists(server: &MockServer, products: Value, carts: Value, shippings: Value) {
    for (route, body) in [("/products", products), ("/cart", carts), ("/shippings", shippings)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

async fn count_requests(server: &MockServer, verb: &str, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .count()
}

fn two_products() -> Value {
    json!([
        { "id": 1, "name": "Bio Stimulant", "description": "Liquid", "price": 24.5,
          "productInformation": "1L", "images": ["a.png"] },
        { "id": 2, "name": "Seed Mix", "description": "Dry", "price": 10,
          "productInformation": "5kg", "images": [] }
    ])
}

fn one_cart_three_items() -> Value {
    json!([{
        "id": 12,
        "orderId": "ORD-1",
        "items": [
            { "id": 1, "name": "Bio Stimulant", "price": 24.5, "quantity": 1 },
            { "id": 2, "name": "Seed Mix", "price": 10, "quantity": 2 },
            { "id": 3, "name": "Seed Mix", "price": 10, "quantity": 3 }
        ]
    }])
}

fn one_shipping() -> Value {
    json!([{
        "id": "s1", "orderId": "ORD-1", "fullName": "Ada Farmer", "phoneNumber": "555-0100",
        "email": "ada@example.com", "address": "1 Field Rd", "city": "Ames",
        "postalCode": "50010", "country": "US", "status": "ON_TRACK"
    }])
}

fn fill_product(controller: &mut DashboardController) {
    for (field, value) in [
        ("name", "Humic Acid"),
        ("description", "Soil conditioner"),
        ("price", "12.75"),
        ("productInformation", "20L drum"),
        ("images", "a.png, b.png , c.png"),
    ] {
        controller.set_field(EntityKind::Product, field, value).unwrap();
    }
}

// ── Loading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_scenario_counts_and_rows() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_products()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_cart_three_items()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shippings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    controller.load().await.unwrap();

    let summary = controller.summary();
    assert_eq!((summary.products, summary.orders, summary.shipping), (2, 1, 0));

    let rows = controller.order_rows();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.order_id == "ORD-1"));
    let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["ORD-1-1", "ORD-1-2", "ORD-1-3"]);

    assert!(!controller.load_status().loading);
    assert!(controller.load_status().error.is_none());
    assert!(controller.store().last_full_refresh().is_some());
}

#[tokio::test]
async fn test_partial_failure_fails_whole_load() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_products()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shippings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::Load { .. }), "got {err:?}");
    assert_eq!(
        controller.load_status().error.as_deref(),
        Some("Failed to load data. Please try again later.")
    );
    assert_eq!(controller.summary().products, 0);
    assert!(controller.store().last_full_refresh().is_none());
}

#[tokio::test]
async fn test_load_without_session_redirects_to_login() {
    let (server, mut controller, _store) = setup(None).await;

    let err = controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));
    assert_eq!(controller.take_navigation(), Some(Navigation::Login));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_load_ends_session() {
    let (server, mut controller, store) = setup(Some("expired")).await;

    for route in ["/products", "/cart", "/shippings"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
    }

    let err = controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::Unauthorized));
    assert!(!controller.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(controller.take_navigation(), Some(Navigation::Login));

    let note = controller.notifications().current().unwrap();
    assert_eq!(note.severity, Severity::Warning);
    assert_eq!(note.message, "Session expired. Please log in again.");
}

#[tokio::test]
async fn test_unauthorized_wins_over_other_load_failures() {
    let (server, mut controller, store) = setup(Some("expired")).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shippings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::Unauthorized), "got {err:?}");
    assert!(!controller.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(controller.take_navigation(), Some(Navigation::Login));
}

#[tokio::test]
async fn test_switching_tabs_changes_rows_without_fetching() {
    let (server, mut controller, _store) = setup(Some("tok")).await;
    mount_lists(&server, two_products(), one_cart_three_items(), one_shipping()).await;

    controller.load().await.unwrap();
    let fetched = server.received_requests().await.unwrap().len();

    assert_eq!(controller.tab(), Tab::Products);
    assert!(matches!(controller.visible_rows(), Rows::Products(ref rows) if rows.len() == 2));

    controller.set_tab(Tab::Orders);
    match controller.visible_rows() {
        Rows::Orders(rows) => assert_eq!(rows[0].id, "ORD-1-1"),
        other => panic!("expected order rows, got {other:?}"),
    }
    assert_eq!(controller.visible_rows().len(), 3);

    controller.set_tab(Tab::Shipping);
    assert!(matches!(controller.visible_rows(), Rows::Shipping(ref rows) if rows.len() == 1));

    assert_eq!(server.received_requests().await.unwrap().len(), fetched);
}

// ── Editing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_validation_failure_never_reaches_network() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    controller.open_editor(EntityKind::Product, None).unwrap();
    controller.set_field(EntityKind::Product, "name", "Only a name").unwrap();

    let err = controller.submit(EntityKind::Product).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));

    let dialog = controller.dialog(EntityKind::Product);
    assert_eq!(dialog.error(), Some("Please fill in all required fields."));
    assert_eq!(dialog.state(), DialogState::Editing);
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(controller.notifications().shown_count(), 0);
}

#[tokio::test]
async fn test_create_success_refreshes_once_and_notifies_once() {
    let (server, mut controller, _store) = setup(Some("tok")).await;
    mount_lists(&server, two_products(), json!([]), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/products/add"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "name": "Humic Acid",
            "description": "Soil conditioner",
            "price": 12.75,
            "productInformation": "20L drum",
            "detailDescription2": "",
            "images": ["a.png", "b.png", "c.png"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    controller.open_editor(EntityKind::Product, None).unwrap();
    fill_product(&mut controller);
    controller.submit(EntityKind::Product).await.unwrap();

    assert_eq!(count_requests(&server, "GET", "/products").await, 1);
    assert_eq!(count_requests(&server, "GET", "/cart").await, 1);
    assert_eq!(count_requests(&server, "GET", "/shippings").await, 1);

    assert_eq!(controller.notifications().shown_count(), 1);
    let note = controller.notifications().current().unwrap();
    assert_eq!(note.message, "Product added successfully.");
    assert_eq!(note.severity, Severity::Success);
    assert_eq!(controller.dialog(EntityKind::Product).state(), DialogState::Closed);
    assert_eq!(controller.summary().products, 2);
}

#[tokio::test]
async fn test_expired_session_on_reload_keeps_warning() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    Mock::given(method("POST"))
        .and(path("/products/add"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    for route in ["/products", "/cart", "/shippings"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
    }

    controller.open_editor(EntityKind::Product, None).unwrap();
    fill_product(&mut controller);
    controller.submit(EntityKind::Product).await.unwrap();

    assert!(!controller.is_authenticated());
    assert_eq!(controller.take_navigation(), Some(Navigation::Login));
    let note = controller.notifications().current().unwrap();
    assert_eq!(note.severity, Severity::Warning);
    assert_eq!(note.message, "Session expired. Please log in again.");
}

#[tokio::test]
async fn test_update_failure_keeps_dialog_open() {
    let (server, mut controller, _store) = setup(Some("tok")).await;
    mount_lists(&server, json!([]), json!([]), one_shipping()).await;

    Mock::given(method("PUT"))
        .and(path("/shippings/s1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    controller.open_editor(EntityKind::Shipping, Some("s1")).unwrap();
    assert!(controller.dialog(EntityKind::Shipping).is_disabled("orderId"));
    controller.set_field(EntityKind::Shipping, "city", "Boone").unwrap();

    let err = controller.submit(EntityKind::Shipping).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: 500, .. }));

    let dialog = controller.dialog(EntityKind::Shipping);
    assert_eq!(dialog.state(), DialogState::Editing);
    assert_eq!(dialog.value("city"), "Boone");
    assert_eq!(
        dialog.error(),
        Some("Failed to save shipping information. Please try again.")
    );

    assert_eq!(controller.notifications().shown_count(), 1);
    let note = controller.notifications().current().unwrap();
    assert_eq!(note.message, "Failed to save shipping information.");
    assert_eq!(note.severity, Severity::Error);

    // Only the initial load hit the list endpoints.
    assert_eq!(count_requests(&server, "GET", "/shippings").await, 1);
}

#[tokio::test]
async fn test_order_update_targets_owning_cart() {
    let (server, mut controller, _store) = setup(Some("tok")).await;
    mount_lists(&server, json!([]), one_cart_three_items(), json!([])).await;

    Mock::given(method("PUT"))
        .and(path("/cart/12"))
        .and(body_json(json!({
            "orderId": "ORD-1",
            "itemName": "Seed Mix",
            "price": 10.0,
            "quantity": 5
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    controller.open_editor(EntityKind::Order, Some("ORD-1-3")).unwrap();
    assert!(
        controller
            .set_field(EntityKind::Order, "orderId", "ORD-9")
            .is_err()
    );
    controller.set_field(EntityKind::Order, "quantity", "5").unwrap();
    controller.submit(EntityKind::Order).await.unwrap();

    assert_eq!(
        controller.notifications().current().unwrap().message,
        "Order updated successfully."
    );
    assert_eq!(count_requests(&server, "GET", "/cart").await, 2);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_declined_sends_nothing() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompts = Vec::new();
    let outcome = controller
        .delete(EntityKind::Product, "1", &mut |prompt: &str| {
            prompts.push(prompt.to_owned());
            false
        })
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(prompts, vec!["Are you sure you want to delete this product?"]);
    assert_eq!(controller.notifications().shown_count(), 0);
}

#[tokio::test]
async fn test_delete_confirmed_deletes_once_then_refreshes() {
    let (server, mut controller, _store) = setup(Some("tok")).await;
    mount_lists(&server, json!([]), one_cart_three_items(), json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/cart/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let outcome = controller
        .delete(EntityKind::Order, "ORD-1-2", &mut |_: &str| true)
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(count_requests(&server, "GET", "/cart").await, 2);
    assert_eq!(
        controller.notifications().current().unwrap().message,
        "Order deleted successfully."
    );
}

#[tokio::test]
async fn test_delete_failure_notifies_error() {
    let (server, mut controller, _store) = setup(Some("tok")).await;

    Mock::given(method("DELETE"))
        .and(path("/shippings/s1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = controller
        .delete(EntityKind::Shipping, "s1", &mut |_: &str| true)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Api { status: 500, .. }));

    let note = controller.notifications().current().unwrap();
    assert_eq!(note.message, "Failed to delete shipping information.");
    assert_eq!(note.severity, Severity::Error);
    assert_eq!(count_requests(&server, "GET", "/shippings").await, 0);
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_persists_token_for_next_request() {
    let (server, mut controller, store) = setup(None).await;
    mount_lists(&server, json!([]), json!([]), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let nav = controller
        .login("admin", &SecretString::from("hunter2"))
        .await
        .unwrap();
    assert_eq!(nav, Navigation::Dashboard);
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
    assert_eq!(store.get(USERNAME_KEY).unwrap().as_deref(), Some("admin"));

    controller.load().await.unwrap();
    let received = server.received_requests().await.unwrap();
    let list = received
        .iter()
        .find(|r| r.url.path() == "/products")
        .unwrap();
    assert_eq!(
        list.headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer fresh"
    );
}

#[tokio::test]
async fn test_login_failure_is_generic_and_stores_nothing() {
    let (server, mut controller, store) = setup(None).await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = controller
        .login("admin", &SecretString::from("nope"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert!(!controller.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_logout_then_bootstrap_is_unauthenticated() {
    let (_server, mut controller, store) = setup(Some("tok")).await;
    assert!(controller.is_authenticated());

    assert_eq!(controller.logout(), Navigation::Login);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USERNAME_KEY).unwrap(), None);

    let reopened =
        DashboardController::new(controller.config().clone(), store.clone()).unwrap();
    assert!(!reopened.is_authenticated());
}

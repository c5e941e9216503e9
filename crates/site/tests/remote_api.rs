//! Integration tests for the food service client.
//!
//! A stub of the remote service runs in-process on an ephemeral port and
//! the real client is pointed at it, covering the JSON endpoints, the
//! string-body login protocol, and the transport-failure path.

#![allow(clippy::unwrap_used)]

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use hunger_box_core::{ContactNumber, Counter};
use hunger_box_site::hungerbox::{ApiClient, ApiError};
use hunger_box_site::models::order;

const KNOWN_CONTACT: &str = "9876543210";
const KNOWN_PASSWORD: &str = "hunter22";

#[derive(Deserialize)]
struct LoginBody {
    contactnumber: String,
    password: String,
}

#[derive(Deserialize)]
struct ContactQuery {
    #[serde(default, alias = "contactNumber")]
    contactnumber: String,
}

async fn stub_menu() -> Json<serde_json::Value> {
    Json(json!([
        { "fid": "F001", "fname": "Veg Patties", "price": 20.0 },
        { "fid": "F004", "fname": "Coke Can", "price": 40.0 },
        { "fid": "F006", "fname": "Burger Chicken", "price": 54.0 }
    ]))
}

async fn stub_login(Json(body): Json<LoginBody>) -> String {
    if body.contactnumber == KNOWN_CONTACT && body.password == KNOWN_PASSWORD {
        "Welcome Ankur!".to_string()
    } else {
        "Invalid contact number or password".to_string()
    }
}

async fn stub_user_details(Query(query): Query<ContactQuery>) -> Response {
    if query.contactnumber == KNOWN_CONTACT {
        Json(json!({ "userId": 17, "username": "Ankur" })).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn stub_order_food(Json(body): Json<serde_json::Value>) -> Response {
    // the service stores strings verbatim; reject anything else
    let all_strings = ["userid", "username", "fooditems", "price", "billid", "date", "time"]
        .iter()
        .all(|key| body.get(*key).is_some_and(serde_json::Value::is_string));
    if all_strings {
        StatusCode::OK.into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}

async fn stub_order_details() -> Json<serde_json::Value> {
    Json(json!([
        {
            "billid": "NEWEST",
            "username": "Ankur",
            "fooditems": "Veg Patties,Coke Can",
            "price": "60",
            "date": "07-08-2026",
            "time": "12:30"
        },
        {
            "billid": "OLDEST",
            "username": "Ankur",
            "fooditems": "Burger Chicken",
            "price": 54.0,
            "date": "01-01-2026",
            "time": "09:00"
        },
        { "billid": "NEWEST", "username": "Ankur", "price": "60" },
        { "billid": "JUNKED", "username": "", "price": "10" }
    ]))
}

async fn stub_update_password(Json(body): Json<serde_json::Value>) -> Response {
    if body.get("oldPassword").and_then(serde_json::Value::as_str) == Some(KNOWN_PASSWORD) {
        StatusCode::OK.into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn stub_delete(Query(query): Query<ContactQuery>) -> String {
    if query.contactnumber == KNOWN_CONTACT {
        "User deleted successfully".to_string()
    } else {
        "Failed, Something Went Wrong".to_string()
    }
}

/// Start the stub service on an ephemeral port and return its base URL.
async fn spawn_stub() -> Url {
    let app = Router::new()
        .route("/hungerbox/counter1food", get(stub_menu))
        .route("/order/orderFood", post(stub_order_food))
        .route("/order/orderDetails", get(stub_order_details))
        .route("/auth/login", post(stub_login))
        .route("/auth/getUserDetailsForOrder", get(stub_user_details))
        .route("/auth/updatePassword", put(stub_update_password))
        .route("/auth/deletebycontact", delete(stub_delete));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}")).unwrap()
}

/// A base URL that nothing listens on.
async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn known_contact() -> ContactNumber {
    ContactNumber::parse(KNOWN_CONTACT).unwrap()
}

#[tokio::test]
async fn menu_fetch_converts_and_caches() {
    let client = ApiClient::new(spawn_stub().await);

    let menu = client.counter_menu(Counter::TimeOut).await.unwrap();
    assert_eq!(menu.len(), 3);
    assert_eq!(menu[0].name, "Veg Patties");
    // the boundary assigned categories
    assert_eq!(menu[1].category.label(), "Drinks");
    assert_eq!(menu[2].category.label(), "Burgers");

    // second call is served from cache and agrees
    let cached = client.counter_menu(Counter::TimeOut).await.unwrap();
    assert_eq!(cached.len(), menu.len());
}

#[tokio::test]
async fn menu_fetch_reports_transport_failure() {
    let client = ApiClient::new(dead_url().await);
    let err = client.counter_menu(Counter::TimeOut).await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err}");
    assert_eq!(
        err.user_message(),
        "Network error. Please check your connection."
    );
}

#[tokio::test]
async fn login_success_returns_clean_display_name() {
    let client = ApiClient::new(spawn_stub().await);
    let name = client
        .login(&known_contact(), KNOWN_PASSWORD)
        .await
        .unwrap();
    assert_eq!(name, "Ankur");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let client = ApiClient::new(spawn_stub().await);
    let err = client
        .login(&known_contact(), "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn user_details_resolve_order_id() {
    let client = ApiClient::new(spawn_stub().await);
    let details = client
        .user_details_for_order(&known_contact())
        .await
        .unwrap();
    assert_eq!(details.user_id.map(|id| id.as_i32()), Some(17));
    assert_eq!(details.username.as_deref(), Some("Ankur"));
}

#[tokio::test]
async fn order_placement_round_trip() {
    let client = ApiClient::new(spawn_stub().await);

    let menu = client.counter_menu(Counter::TimeOut).await.unwrap();
    let mut cart = hunger_box_site::cart::Cart::default();
    cart.add(menu[0].clone());
    cart.add(menu[0].clone());
    cart.add(menu[1].clone());

    let user = hunger_box_site::models::CurrentUser {
        user_id: hunger_box_core::UserId::new(17),
        username: "Ankur".to_string(),
        contact_number: known_contact(),
        logged_in_at: chrono::Utc::now(),
    };
    let now = chrono::NaiveDate::from_ymd_opt(2026, 8, 7)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let new_order = order::NewOrder::from_cart(&user, &cart, now);

    assert_eq!(new_order.date, "07-08-2026");
    assert_eq!(new_order.time, "12:30");
    client.place_order(&new_order).await.unwrap();
}

#[tokio::test]
async fn order_history_is_cleaned_for_display() {
    let client = ApiClient::new(spawn_stub().await);

    let records = client.orders_for("Ankur").await.unwrap();
    // raw: four rows, including a duplicate bill id and a blank username
    assert_eq!(records.len(), 4);

    let history = order::prepare_history(records);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].bill_id.as_ref().unwrap().as_str(), "NEWEST");
    assert_eq!(history[1].bill_id.as_ref().unwrap().as_str(), "OLDEST");
    // price arrived as a string for one row and a number for the other
    assert_eq!(history[0].subtotal.to_string(), "₹60.00");
    assert_eq!(history[1].subtotal.to_string(), "₹54.00");
}

#[tokio::test]
async fn password_update_maps_wrong_old_password() {
    let client = ApiClient::new(spawn_stub().await);

    client
        .update_password(&known_contact(), KNOWN_PASSWORD, "hunter23")
        .await
        .unwrap();

    let err = client
        .update_password(&known_contact(), "wrong", "hunter23")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 401, .. }));
}

#[tokio::test]
async fn delete_account_requires_confirmation_string() {
    let client = ApiClient::new(spawn_stub().await);
    client.delete_account(&known_contact()).await.unwrap();

    let other = ContactNumber::parse("1112223334").unwrap();
    let err = client.delete_account(&other).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
}

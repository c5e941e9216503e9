//! End-to-end flow tests.
//!
//! Both the site and a stub of the food service run in-process on
//! ephemeral ports; a cookie-holding HTTP client walks the screens the
//! way a browser would.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::routing::{get, post};
use axum::{Json, extract::Query};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use hunger_box_site::config::SiteConfig;
use hunger_box_site::{middleware, routes, state::AppState};

const KNOWN_CONTACT: &str = "9876543210";
const KNOWN_PASSWORD: &str = "hunter22";

#[derive(Deserialize)]
struct LoginBody {
    contactnumber: String,
    password: String,
}

#[derive(Deserialize)]
struct UsernameQuery {
    #[serde(default)]
    username: String,
}

async fn stub_login(Json(body): Json<LoginBody>) -> String {
    if body.contactnumber == KNOWN_CONTACT && body.password == KNOWN_PASSWORD {
        "Welcome Ankur!".to_string()
    } else {
        "Invalid contact number or password".to_string()
    }
}

async fn stub_menu() -> Json<serde_json::Value> {
    Json(json!([
        { "fid": "F001", "fname": "Veg Patties", "price": 20.0 },
        { "fid": "F004", "fname": "Coke Can", "price": 40.0 }
    ]))
}

async fn stub_user_details() -> Json<serde_json::Value> {
    Json(json!({ "userId": 17, "username": "Ankur" }))
}

async fn stub_orders(Query(query): Query<UsernameQuery>) -> Json<serde_json::Value> {
    if query.username == "Ankur" {
        Json(json!([
            {
                "billid": "AAAAAA",
                "username": "Ankur",
                "fooditems": "Veg Patties",
                "price": "20",
                "date": "01-08-2026",
                "time": "10:00"
            }
        ]))
    } else {
        Json(json!([]))
    }
}

async fn stub_order_food() -> &'static str {
    "Order placed"
}

/// Start the stub food service; returns its base URL.
async fn spawn_service() -> Url {
    let app = Router::new()
        .route("/auth/login", post(stub_login))
        .route("/auth/getUserDetailsForOrder", get(stub_user_details))
        .route("/hungerbox/counter1food", get(stub_menu))
        .route("/order/orderDetails", get(stub_orders))
        .route("/order/orderFood", post(stub_order_food));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Start the site wired to the given service; returns its base URL.
async fn spawn_site(api_base_url: Url) -> String {
    let config = SiteConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kXq9mJ2vLp8wRt4nZs7bYc3dFg6hQe1A"),
        api_base_url,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };

    let state = AppState::new(config.clone());
    let session_layer = middleware::create_session_layer(&config);
    let app = routes::routes().layer(session_layer).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Browser-like client: keeps cookies, never follows redirects (so tests
/// can observe Location headers).
fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn failed_login_writes_no_session_and_shows_error() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    // unrecognized contact number
    let response = client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", "1112223334"), ("password", "hunter22")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/auth/login?error=credentials");

    // the error is visible on the login page
    let page = client
        .get(format!("{site}/auth/login?error=credentials"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Invalid contact number or password"));

    // and no session was written: protected screens still bounce to login
    let response = client.get(format!("{site}/home")).send().await.unwrap();
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn login_validation_rejects_malformed_contact_number() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    let response = client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", "12345"), ("password", "hunter22")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/auth/login?error=contact");
}

#[tokio::test]
async fn successful_login_reaches_home() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    let response = client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/home");

    let page = client
        .get(format!("{site}/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Ankur"));
    assert!(page.contains("Time Out"));
    assert!(page.contains("Main Cafe"));
    assert!(page.contains("Food Court"));
}

#[tokio::test]
async fn cart_flow_add_remove_checkout() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();

    // menu screen renders live items
    let page = client
        .get(format!("{site}/counters/time-out"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Veg Patties"));
    assert!(page.contains("Your cart is empty"));

    // add the same item twice: one line, quantity 2, totals per the 5% GST
    for _ in 0..2 {
        let fragment = client
            .post(format!("{site}/counters/time-out/cart/add"))
            .form(&[("food_id", "F001")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(fragment.contains("Veg Patties"));
    }
    let fragment = client
        .post(format!("{site}/counters/time-out/cart/add"))
        .form(&[("food_id", "F004")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    // subtotal 2×20 + 40 = 80, GST 4, total 84
    assert!(fragment.contains("₹80.00"));
    assert!(fragment.contains("₹4.00"));
    assert!(fragment.contains("₹84.00"));

    // drop the single Coke line entirely
    let fragment = client
        .post(format!("{site}/counters/time-out/cart/remove"))
        .form(&[("food_id", "F004")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!fragment.contains("Coke Can"));
    assert!(fragment.contains("₹40.00"));

    // checkout clears the cart and shows a receipt with a bill id
    let fragment = client
        .post(format!("{site}/counters/time-out/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(fragment.contains("Order placed successfully!"));
    assert!(fragment.contains("Bill ID"));
    assert!(fragment.contains("₹42.00"));

    // a fresh checkout on the now-empty cart is rejected
    let fragment = client
        .post(format!("{site}/counters/time-out/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(fragment.contains("Your cart is empty!"));
}

#[tokio::test]
async fn menu_screen_falls_back_to_sample_when_fetch_fails() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();

    // the stub serves no Main Cafe menu, so the screen shows the warning
    // banner and the built-in sample items
    let page = client
        .get(format!("{site}/counters/main-cafe"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Failed to load food items. Please try again."));
    assert!(page.contains("Chicken Biriyani"));
}

#[tokio::test]
async fn login_surfaces_network_error_when_service_is_down() {
    // point the site at a dead service
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
    drop(listener);

    let site = spawn_site(dead).await;
    let client = browser();

    let response = client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/auth/login?error=network");
}

#[tokio::test]
async fn order_history_lists_cleaned_records() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();

    let page = client
        .get(format!("{site}/orders"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("AAAAAA"));
    assert!(page.contains("₹20.00"));

    let detail = client
        .get(format!("{site}/orders/AAAAAA"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(detail.contains("Veg Patties"));
    // GST derived from the stored subtotal
    assert!(detail.contains("₹1.00"));
    assert!(detail.contains("₹21.00"));
}

#[tokio::test]
async fn theme_toggle_flips_dark_mode() {
    let site = spawn_site(spawn_service().await).await;
    let client = browser();

    client
        .post(format!("{site}/auth/login"))
        .form(&[("contact_number", KNOWN_CONTACT), ("password", KNOWN_PASSWORD)])
        .send()
        .await
        .unwrap();

    let page = client
        .get(format!("{site}/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("dark-mode"));

    client
        .post(format!("{site}/theme"))
        .send()
        .await
        .unwrap();

    let page = client
        .get(format!("{site}/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("dark-mode"));
}

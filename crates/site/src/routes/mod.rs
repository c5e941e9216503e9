//! HTTP route handlers for the ordering site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to /home or /auth/login
//! GET  /health                  - Health check (wired in main)
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! GET  /auth/signup             - Signup page
//! POST /auth/signup             - Signup action
//! POST /auth/logout             - Logout action
//!
//! # Home (requires auth)
//! GET  /home                    - Dashboard with the three counters
//!
//! # Orders (requires auth)
//! GET  /orders                  - Order history
//! GET  /orders/{bill_id}        - Order details
//!
//! # Counter screens (requires auth; HTMX fragments for the cart)
//! GET  /counters/{slug}         - Menu page (starts a fresh cart)
//! POST /counters/{slug}/cart/add    - Add one unit (cart fragment)
//! POST /counters/{slug}/cart/remove - Remove one unit (cart fragment)
//! POST /counters/{slug}/cart/clear  - Empty the cart (cart fragment)
//! POST /counters/{slug}/checkout    - Place the order (cart fragment)
//!
//! # Profile (requires auth)
//! GET  /profile                 - Account page
//! POST /profile/username        - Change username
//! POST /profile/password        - Change password
//! POST /profile/delete          - Delete account
//!
//! # Theme
//! POST /theme                   - Toggle dark mode
//! ```

pub mod auth;
pub mod counter;
pub mod home;
pub mod orders;
pub mod profile;
pub mod theme;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Landing redirect: signed-in users go home, everyone else to login.
async fn index(OptionalAuth(user): OptionalAuth) -> Redirect {
    if user.is_some() {
        Redirect::to("/home")
    } else {
        Redirect::to("/auth/login")
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the order-history routes router.
pub fn orders_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{bill_id}", get(orders::show))
}

/// Create the counter-screen routes router.
pub fn counter_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(counter::show))
        .route("/{slug}/cart/add", post(counter::add))
        .route("/{slug}/cart/remove", post(counter::remove))
        .route("/{slug}/cart/clear", post(counter::clear))
        .route("/{slug}/checkout", post(counter::checkout))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/username", post(profile::update_username))
        .route("/password", post(profile::update_password))
        .route("/delete", post(profile::delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/auth", auth_routes())
        .route("/home", get(home::home))
        .nest("/orders", orders_routes())
        .nest("/counters", counter_routes())
        .nest("/profile", profile_routes())
        .route("/theme", post(theme::toggle))
}

//! Dark-mode toggle route handler.

use axum::http::HeaderMap;
use axum::http::header::REFERER;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::middleware::dark_mode;
use crate::models::session_keys;

/// Flip the dark-mode flag and bounce back to the referring page.
pub async fn toggle(headers: HeaderMap, session: Session) -> Response {
    let enabled = !dark_mode(&session).await;
    if let Err(e) = session.insert(session_keys::DARK_MODE, enabled).await {
        tracing::error!("Failed to store dark-mode flag: {e}");
    }

    let back = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/home");

    Redirect::to(back).into_response()
}

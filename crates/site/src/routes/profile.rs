//! Profile route handlers.
//!
//! Account data is fetched fresh from the service on every view; the
//! session copy is only a fallback when the service is unreachable.
//! Deletion is deliberately two-step: the password is re-verified
//! against the login endpoint before the delete call goes out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::hungerbox::ApiError;
use crate::middleware::{RequireAuth, dark_mode, set_current_user};
use crate::state::AppState;

use super::auth::MessageQuery;

/// Exact phrase required to arm account deletion.
const DELETE_CONFIRMATION_PHRASE: &str = "delete my account";

// =============================================================================
// Form Types
// =============================================================================

/// Username change form data.
#[derive(Debug, Deserialize)]
pub struct UsernameForm {
    pub username: String,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Account deletion form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirmation: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub user_name: String,
    pub username: String,
    pub contact_number: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub dark_mode: bool,
}

// =============================================================================
// Message tables
// =============================================================================

fn profile_error_message(code: &str) -> &'static str {
    match code {
        "username_empty" => "Username cannot be empty",
        "password_empty" => "Please enter your current password",
        "password_short" => "New password must be at least 6 characters long",
        "password_mismatch" => "New passwords do not match",
        "password_same" => "New password must be different from the old password",
        "old_password" => "Current password is incorrect",
        "delete_confirm" => "Please type \"delete my account\" to confirm",
        "delete_password" => "Incorrect password. Please try again.",
        "not_found" => "User not found.",
        "bad_request" => "Bad request. Please check your input.",
        "network" => "Network error. Please check your connection.",
        _ => "Server error. Please try again later.",
    }
}

fn profile_success_message(code: &str) -> &'static str {
    match code {
        "username" => "Username updated successfully!",
        "password" => "Password updated successfully!",
        _ => "Done.",
    }
}

/// Map a service error to a redirect code for this screen.
fn error_code(err: &ApiError) -> &'static str {
    if err.is_transport() {
        return "network";
    }
    match err {
        ApiError::Api { status: 400, .. } => "bad_request",
        ApiError::Api { status: 404, .. } => "not_found",
        _ => "server",
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the profile page.
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> impl IntoResponse {
    // Prefer the service's copy; fall back to the session on failure
    let (username, contact_number) = match state.api().account(&user.contact_number).await {
        Ok(account) => (
            account.username.unwrap_or_else(|| user.username.clone()),
            account
                .contact_number
                .unwrap_or_else(|| user.contact_number.as_str().to_owned()),
        ),
        Err(e) => {
            tracing::warn!("Account fetch failed, showing session data: {e}");
            (
                user.username.clone(),
                user.contact_number.as_str().to_owned(),
            )
        }
    };

    ProfileTemplate {
        user_name: user.display_name().to_owned(),
        username,
        contact_number,
        error: query
            .error
            .as_deref()
            .map(|c| profile_error_message(c).to_owned()),
        success: query
            .success
            .as_deref()
            .map(|c| profile_success_message(c).to_owned()),
        dark_mode: dark_mode(&session).await,
    }
}

/// Handle username change.
pub async fn update_username(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<UsernameForm>,
) -> Response {
    let username = form.username.trim();
    if username.is_empty() {
        return Redirect::to("/profile?error=username_empty").into_response();
    }

    match state
        .api()
        .update_username(&user.contact_number, username)
        .await
    {
        Ok(()) => {
            // Keep the session copy in sync with the service
            let mut updated = user;
            updated.username = username.to_owned();
            if let Err(e) = set_current_user(&session, &updated).await {
                tracing::error!("Failed to refresh session username: {e}");
            }
            Redirect::to("/profile?success=username").into_response()
        }
        Err(e) => {
            tracing::warn!("Username update failed: {e}");
            Redirect::to(&format!("/profile?error={}", error_code(&e))).into_response()
        }
    }
}

/// Handle password change.
pub async fn update_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Response {
    if form.old_password.trim().is_empty() {
        return Redirect::to("/profile?error=password_empty").into_response();
    }
    if form.new_password.trim().len() < 6 {
        return Redirect::to("/profile?error=password_short").into_response();
    }
    if form.new_password != form.new_password_confirm {
        return Redirect::to("/profile?error=password_mismatch").into_response();
    }
    if form.old_password == form.new_password {
        return Redirect::to("/profile?error=password_same").into_response();
    }

    match state
        .api()
        .update_password(
            &user.contact_number,
            form.old_password.trim(),
            form.new_password.trim(),
        )
        .await
    {
        Ok(()) => Redirect::to("/profile?success=password").into_response(),
        Err(ApiError::Api { status: 401, .. }) => {
            Redirect::to("/profile?error=old_password").into_response()
        }
        Err(e) => {
            tracing::warn!("Password update failed: {e}");
            Redirect::to(&format!("/profile?error={}", error_code(&e))).into_response()
        }
    }
}

/// Handle account deletion.
///
/// The password is verified by a login call first; only then is the
/// delete issued. On success the whole session is destroyed.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<DeleteForm>,
) -> Response {
    if form.confirmation.trim().to_lowercase() != DELETE_CONFIRMATION_PHRASE {
        return Redirect::to("/profile?error=delete_confirm").into_response();
    }
    if form.password.trim().is_empty() {
        return Redirect::to("/profile?error=delete_password").into_response();
    }

    // Verify identity before the destructive call
    match state.api().login(&user.contact_number, &form.password).await {
        Ok(_) => {}
        Err(ApiError::InvalidCredentials) => {
            return Redirect::to("/profile?error=delete_password").into_response();
        }
        Err(e) => {
            tracing::warn!("Password verification for deletion failed: {e}");
            return Redirect::to(&format!("/profile?error={}", error_code(&e))).into_response();
        }
    }

    match state.api().delete_account(&user.contact_number).await {
        Ok(()) => {
            if let Err(e) = session.flush().await {
                tracing::error!("Failed to flush session after deletion: {e}");
            }
            Redirect::to("/auth/login?success=deleted").into_response()
        }
        Err(e) => {
            tracing::warn!("Account deletion failed: {e}");
            Redirect::to(&format!("/profile?error={}", error_code(&e))).into_response()
        }
    }
}

//! Authentication route handlers.
//!
//! Login and signup delegate credential checks entirely to the food
//! service; the only thing decided here is what goes into the session.
//! Failures redirect back to the form with an error code in the query
//! string, which the page handler maps to a fixed message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use hunger_box_core::{ContactNumber, UserId};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::hungerbox::ApiError;
use crate::middleware::set_current_user;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Minimum password length enforced client-side, matching the service.
const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub contact_number: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub contact_number: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Message tables
// =============================================================================

fn login_error_message(code: &str) -> &'static str {
    match code {
        "contact" => "Please enter a valid 10-digit contact number",
        "password" => "Password must be at least 6 characters long",
        "credentials" => "Invalid contact number or password",
        "network" => "Network error. Please check your connection.",
        "session" => "Could not start your session. Please try again.",
        _ => "Login failed. Please try again.",
    }
}

fn login_success_message(code: &str) -> &'static str {
    match code {
        "registered" => "Successfully signed up! Please sign in.",
        "deleted" => "Account deleted successfully.",
        _ => "Done.",
    }
}

fn signup_error_message(code: &str) -> &'static str {
    match code {
        "username" => "Username is required",
        "contact" => "Please enter a valid 10-digit contact number",
        "password" => "Password must be at least 6 characters long",
        "password_mismatch" => "Passwords do not match",
        "taken" => "Username or contact number already exists.",
        "network" => "Network error. Please check your connection.",
        _ => "Signup failed. Please try again.",
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(|c| login_error_message(c).to_owned()),
        success: query
            .success
            .as_deref()
            .map(|c| login_success_message(c).to_owned()),
    }
}

/// Handle login form submission.
///
/// On success the user id is resolved through `getUserDetailsForOrder`;
/// when that endpoint is unavailable a stable id is derived from the
/// contact number so orders can still be attributed. A failed login never
/// writes to the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(contact_number) = ContactNumber::parse(&form.contact_number) else {
        return Redirect::to("/auth/login?error=contact").into_response();
    };

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Redirect::to("/auth/login?error=password").into_response();
    }

    match state.api().login(&contact_number, &form.password).await {
        Ok(display_name) => {
            // Resolve the id the order subsystem knows; fall back to a
            // derived one when the endpoint is unavailable
            let details = match state.api().user_details_for_order(&contact_number).await {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!("User details lookup failed, deriving user id: {e}");
                    None
                }
            };

            let user_id = details
                .as_ref()
                .and_then(|d| d.user_id)
                .unwrap_or_else(|| derive_user_id(&contact_number));
            let username = details
                .and_then(|d| d.username)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(display_name);

            let user = CurrentUser {
                user_id,
                username,
                contact_number,
                logged_in_at: Utc::now(),
            };

            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/home").into_response()
        }
        Err(ApiError::InvalidCredentials) => {
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) if e.is_transport() => Redirect::to("/auth/login?error=network").into_response(),
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/auth/login?error=server").into_response()
        }
    }
}

/// Derive a stable user id from the contact number.
///
/// Same scheme the order subsystem has always seen from this client: a
/// 32-bit string hash folded into 2..=1000.
fn derive_user_id(contact_number: &ContactNumber) -> UserId {
    let mut hash: i32 = 0;
    for byte in contact_number.as_str().bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(byte));
    }
    UserId::new((hash % 999).abs() + 2)
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignupTemplate {
        error: query
            .error
            .as_deref()
            .map(|c| signup_error_message(c).to_owned()),
    }
}

/// Handle signup form submission.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    if form.username.trim().is_empty() {
        return Redirect::to("/auth/signup?error=username").into_response();
    }

    let Ok(contact_number) = ContactNumber::parse(&form.contact_number) else {
        return Redirect::to("/auth/signup?error=contact").into_response();
    };

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Redirect::to("/auth/signup?error=password").into_response();
    }

    if form.password != form.password_confirm {
        return Redirect::to("/auth/signup?error=password_mismatch").into_response();
    }

    match state
        .api()
        .sign_up(form.username.trim(), &contact_number, &form.password)
        .await
    {
        Ok(_) => Redirect::to("/auth/login?success=registered").into_response(),
        Err(ApiError::Api { status: 409, .. }) => {
            Redirect::to("/auth/signup?error=taken").into_response()
        }
        Err(e) if e.is_transport() => Redirect::to("/auth/signup?error=network").into_response(),
        Err(e) => {
            tracing::warn!("Signup failed: {e}");
            Redirect::to("/auth/signup?error=server").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the entire session, dark-mode flag and carts included.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

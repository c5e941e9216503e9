//! Client for the Hunger Box food service.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; the service is the source of
//!   truth, there is no local sync
//! - Typed wire structs at the boundary ([`types`]), converted to domain
//!   types on arrival ([`conversions`])
//! - Counter menus are cached in-memory via `moka` (5 minute TTL)
//! - No retries anywhere: a failure is mapped to [`ApiError`] and the
//!   caller decides (menu screens fall back to [`sample`] data)
//!
//! # Protocol quirks
//!
//! Several endpoints answer HTTP 200 with a plain string body and encode
//! failure in its content (`"Invalid contact number or password"`, or any
//! string containing `Failed`). That parsing is centralized here; callers
//! only ever see typed results.

pub mod conversions;
pub mod sample;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use hunger_box_core::{ContactNumber, Counter, UserId};
use moka::future::Cache;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::models::menu::MenuItem;
use crate::models::order::{NewOrder, OrderRecord};

use types::{
    AccountWire, LoginRequest, MenuItemWire, OrderRecordWire, OrderRequest, SignupRequest,
    UpdatePasswordRequest, UpdateUsernameRequest, UserDetailsWire,
};

/// Menu cache TTL.
const MENU_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the food service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The service rejected the credentials.
    #[error("invalid contact number or password")]
    InvalidCredentials,

    /// The service answered 200 but with a failure string in the body.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Failed to parse a response body.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this is a transport-level failure (nothing reached the
    /// service, or nothing came back).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Fixed user-facing message for this error.
    ///
    /// Keyed by HTTP status where one exists; flows with more specific
    /// wording (e.g. the change-password screen) override at the call
    /// site.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Network error. Please check your connection.".to_string(),
            Self::InvalidCredentials => "Invalid contact number or password".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Parse(_) => "Unexpected response from the server.".to_string(),
            Self::Api { status, .. } => match *status {
                400 => "Bad request. Please check your input.".to_string(),
                401 => "Invalid contact number or password".to_string(),
                404 => "User not found.".to_string(),
                409 => "Username or contact number already exists.".to_string(),
                500.. => "Server error. Please try again later.".to_string(),
                status => format!("Server error ({status})"),
            },
        }
    }
}

/// User id and name as known to the order subsystem.
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub user_id: Option<UserId>,
    pub username: Option<String>,
}

/// Account data as stored by the auth subsystem.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: Option<String>,
    pub contact_number: Option<String>,
}

/// Client for the food service API.
///
/// Cheaply cloneable; all methods take `&self`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    menus: Cache<Counter, Arc<Vec<MenuItem>>>,
}

impl ApiClient {
    /// Create a new client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let menus = Cache::builder()
            .max_capacity(8)
            .time_to_live(MENU_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
                menus,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Map non-success statuses to [`ApiError::Api`].
    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    // =========================================================================
    // Menus & orders
    // =========================================================================

    /// Fetch a counter's menu, serving from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails; the caller is
    /// expected to fall back to [`sample::menu`] on menu screens.
    #[instrument(skip(self))]
    pub async fn counter_menu(&self, counter: Counter) -> Result<Arc<Vec<MenuItem>>, ApiError> {
        if let Some(menu) = self.inner.menus.get(&counter).await {
            debug!("cache hit for counter menu");
            return Ok(menu);
        }

        let path = format!("/hungerbox/counter{}food", counter.number());
        let response = self.inner.client.get(self.endpoint(&path)).send().await?;
        let response = Self::expect_success(response).await?;
        let body = response.text().await?;
        let wire: Vec<MenuItemWire> = serde_json::from_str(&body)?;

        let items: Vec<MenuItem> = wire
            .into_iter()
            .filter_map(|item| conversions::menu_item(counter, item))
            .collect();

        let menu = Arc::new(items);
        self.inner.menus.insert(counter, Arc::clone(&menu)).await;
        Ok(menu)
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status. Never retried.
    #[instrument(skip(self, order), fields(bill_id = %order.bill_id))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<(), ApiError> {
        let body = OrderRequest::from(order);
        let response = self
            .inner
            .client
            .post(self.endpoint("/order/orderFood"))
            .json(&body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// Fetch the order history for a username.
    ///
    /// Records come back as stored; filtering, de-duplication and sorting
    /// happen in [`crate::models::order::prepare_history`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, username: &str) -> Result<Vec<OrderRecord>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/order/orderDetails"))
            .query(&[("username", username)])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let body = response.text().await?;
        let wire: Vec<OrderRecordWire> = serde_json::from_str(&body)?;
        Ok(wire.into_iter().map(conversions::order_record).collect())
    }

    // =========================================================================
    // Auth & account
    // =========================================================================

    /// Authenticate, returning the cleaned display name on success.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for rejected credentials (whether signalled by
    /// status or by the body string), otherwise transport/status errors.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        contact_number: &ContactNumber,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = LoginRequest {
            password: password.to_owned(),
            contactnumber: contact_number.as_str().to_owned(),
        };
        let response = self
            .inner
            .client
            .post(self.endpoint("/auth/login"))
            .json(&body)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
        ) {
            return Err(ApiError::InvalidCredentials);
        }

        let response = Self::expect_success(response).await?;
        let text = response.text().await?;

        // 200 with a failure sentinel in the body
        if text.contains("Invalid") {
            return Err(ApiError::InvalidCredentials);
        }
        if text.contains("Failed") {
            return Err(ApiError::Rejected(text));
        }

        Ok(conversions::clean_display_name(&text))
    }

    /// Register a new account, returning the service's success message.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    /// (409 means the username or contact number is taken).
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        username: &str,
        contact_number: &ContactNumber,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = SignupRequest {
            username: username.to_owned(),
            password: password.to_owned(),
            contactnumber: contact_number.as_str().to_owned(),
        };
        let response = self
            .inner
            .client
            .post(self.endpoint("/auth/signup"))
            .json(&body)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let text = response.text().await?;

        if text.contains("Failed") || text.contains("Invalid") {
            return Err(ApiError::Rejected(text));
        }

        if text.contains("Successfully") {
            Ok(text)
        } else {
            Ok("Successfully Signed Up!".to_string())
        }
    }

    /// Fetch the user id the order subsystem knows for a contact number.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unavailable; callers fall back
    /// to a derived id.
    #[instrument(skip(self))]
    pub async fn user_details_for_order(
        &self,
        contact_number: &ContactNumber,
    ) -> Result<UserDetails, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/auth/getUserDetailsForOrder"))
            .query(&[("contactNumber", contact_number.as_str())])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let body = response.text().await?;
        let wire: UserDetailsWire = serde_json::from_str(&body)?;

        Ok(UserDetails {
            user_id: wire.user_id.and_then(|id| id.as_i32()).map(UserId::new),
            username: wire.username,
        })
    }

    /// Fetch the stored account for a contact number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn account(&self, contact_number: &ContactNumber) -> Result<Account, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/auth/getUser"))
            .query(&[("contactnumber", contact_number.as_str())])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let body = response.text().await?;
        let wire: AccountWire = serde_json::from_str(&body)?;

        Ok(Account {
            username: wire.username,
            contact_number: wire.contactnumber,
        })
    }

    /// Change the stored username.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    #[instrument(skip(self))]
    pub async fn update_username(
        &self,
        contact_number: &ContactNumber,
        username: &str,
    ) -> Result<(), ApiError> {
        let body = UpdateUsernameRequest {
            username: username.to_owned(),
            contactnumber: contact_number.as_str().to_owned(),
        };
        let response = self
            .inner
            .client
            .put(self.endpoint("/auth/updateUserData"))
            .json(&body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// Change the stored password. The service verifies the old one.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status (401
    /// means the current password did not match).
    #[instrument(skip(self, old_password, new_password))]
    pub async fn update_password(
        &self,
        contact_number: &ContactNumber,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = UpdatePasswordRequest {
            contactnumber: contact_number.as_str().to_owned(),
            old_password: old_password.to_owned(),
            new_password: new_password.to_owned(),
        };
        let response = self
            .inner
            .client
            .put(self.endpoint("/auth/updatePassword"))
            .json(&body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// Delete the account for a contact number.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or when
    /// the service answers with anything other than its deletion
    /// confirmation string.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, contact_number: &ContactNumber) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.endpoint("/auth/deletebycontact"))
            .query(&[("contactnumber", contact_number.as_str())])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let text = response.text().await?;

        if text.trim() == "User deleted successfully" {
            Ok(())
        } else {
            Err(ApiError::Rejected(text))
        }
    }
}

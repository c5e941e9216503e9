//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAuth, dark_mode};
use crate::models::OrderRecord;
use crate::models::order;
use crate::state::AppState;

// =============================================================================
// View types
// =============================================================================

/// Order list row display data.
pub struct OrderRow {
    pub bill_id: String,
    pub date: String,
    pub time: String,
    pub preview: String,
    pub subtotal: String,
    pub counter: Option<&'static str>,
}

impl From<&OrderRecord> for OrderRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            // prepare_history dropped records without a bill id
            bill_id: record
                .bill_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            date: record.date_display(),
            time: record.time.clone(),
            preview: record.items_preview(),
            subtotal: record.subtotal.to_string(),
            counter: record.counter_hint().map(hunger_box_core::Counter::name),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub user_name: String,
    pub orders: Vec<OrderRow>,
    pub total_spent: String,
    pub error: Option<String>,
    pub dark_mode: bool,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderDetailTemplate {
    pub user_name: String,
    pub bill_id: String,
    pub date: String,
    pub time: String,
    pub items: Vec<String>,
    pub subtotal: String,
    pub gst: String,
    pub total: String,
    pub counter: Option<&'static str>,
    pub dark_mode: bool,
}

// =============================================================================
// Handlers
// =============================================================================

async fn fetch_history(state: &AppState, username: &str) -> (Vec<OrderRecord>, Option<String>) {
    match state.api().orders_for(username).await {
        Ok(records) => {
            let history = order::prepare_history(records);
            let error = if history.is_empty() {
                Some("No orders found for your account.".to_owned())
            } else {
                None
            };
            (history, error)
        }
        Err(e) => {
            tracing::warn!("Failed to load order history: {e}");
            (Vec::new(), Some(e.user_message()))
        }
    }
}

/// Display the order history.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> impl IntoResponse {
    let (history, error) = fetch_history(&state, user.display_name()).await;

    OrdersTemplate {
        user_name: user.display_name().to_owned(),
        orders: history.iter().map(OrderRow::from).collect(),
        total_spent: order::total_spent(&history).to_string(),
        error,
        dark_mode: dark_mode(&session).await,
    }
}

/// Display a single order's details.
pub async fn show(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let (history, _) = fetch_history(&state, user.display_name()).await;

    let record = history
        .iter()
        .find(|record| {
            record
                .bill_id
                .as_ref()
                .is_some_and(|id| id.as_str() == bill_id)
        })
        .ok_or_else(|| AppError::NotFound(format!("order '{bill_id}'")))?;

    Ok(OrderDetailTemplate {
        user_name: user.display_name().to_owned(),
        bill_id,
        date: record.date_display(),
        time: record.time.clone(),
        items: record.food_items.clone(),
        subtotal: record.subtotal.to_string(),
        gst: record.gst().to_string(),
        total: record.grand_total().to_string(),
        counter: record.counter_hint().map(hunger_box_core::Counter::name),
        dark_mode: dark_mode(&session).await,
    })
}

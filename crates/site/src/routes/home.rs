//! Home dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use hunger_box_core::{Counter, Price};
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{RequireAuth, dark_mode};
use crate::models::order;
use crate::state::AppState;

/// Counter card display data.
pub struct CounterCard {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub items_blurb: &'static str,
}

impl From<Counter> for CounterCard {
    fn from(counter: Counter) -> Self {
        let items_blurb = match counter {
            Counter::TimeOut => "15+ quick options",
            Counter::MainCafe => "30+ dishes",
            Counter::FoodCourt => "20+ food stalls",
        };
        Self {
            name: counter.name(),
            slug: counter.slug(),
            description: counter.description(),
            items_blurb,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub user_name: String,
    pub counters: Vec<CounterCard>,
    pub order_count: usize,
    pub total_spent: Price,
    pub dark_mode: bool,
}

/// Display the home dashboard.
///
/// The order summary is best-effort: a failed history fetch leaves the
/// counters usable and just shows zero orders.
pub async fn home(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> impl IntoResponse {
    let history = match state.api().orders_for(user.display_name()).await {
        Ok(records) => order::prepare_history(records),
        Err(e) => {
            tracing::warn!("Failed to load order history for home: {e}");
            Vec::new()
        }
    };

    HomeTemplate {
        user_name: user.display_name().to_owned(),
        counters: Counter::ALL.into_iter().map(CounterCard::from).collect(),
        order_count: history.len(),
        total_spent: order::total_spent(&history),
        dark_mode: dark_mode(&session).await,
    }
}

//! Counter menu route handlers.
//!
//! Each counter screen owns a cart stored in the session under a
//! per-counter key. A full page load starts a fresh cart; the cart panel
//! itself is updated through HTMX fragments without reloading the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Local;
use hunger_box_core::{Category, Counter, FoodId};
use serde::Deserialize;
use tower_sessions::Session;

use crate::cart::Cart;
use crate::error::{AppError, Result};
use crate::filters;
use crate::hungerbox::sample;
use crate::middleware::{RequireAuth, dark_mode};
use crate::models::menu::{MenuItem, filter_menu};
use crate::models::order::NewOrder;
use crate::models::session_keys;
use crate::state::AppState;

/// Banner shown when the live menu is unavailable.
const MENU_FALLBACK_NOTICE: &str = "Failed to load food items. Please try again.";

// =============================================================================
// View types
// =============================================================================

/// Menu item display data.
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: &'static str,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.price.to_string(),
            category: item.category.label(),
        }
    }
}

/// Category filter chip.
pub struct CategoryChip {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Cart line display data.
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Order receipt shown after a successful checkout.
pub struct ReceiptView {
    pub bill_id: String,
    pub subtotal: String,
    pub gst: String,
    pub total: String,
}

/// Cart panel display data.
pub struct CartPanel {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub gst: String,
    pub total: String,
    pub notice: Option<String>,
    pub receipt: Option<ReceiptView>,
}

impl CartPanel {
    fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.item.id.to_string(),
                    name: line.item.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.item.price.to_string(),
                    line_total: line.line_total().to_string(),
                })
                .collect(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal().to_string(),
            gst: cart.gst().to_string(),
            total: cart.total().to_string(),
            notice: None,
            receipt: None,
        }
    }

    fn with_notice(cart: &Cart, notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::from_cart(cart)
        }
    }

    fn with_receipt(receipt: ReceiptView) -> Self {
        Self {
            receipt: Some(receipt),
            ..Self::from_cart(&Cart::default())
        }
    }
}

// =============================================================================
// Form & Query Types
// =============================================================================

/// Query parameters for the menu screen.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Cart mutation form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub food_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Counter menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "counter/show.html")]
pub struct CounterTemplate {
    pub user_name: String,
    pub counter_name: &'static str,
    pub slug: &'static str,
    pub chips: Vec<CategoryChip>,
    pub all_active: bool,
    pub q: String,
    pub items: Vec<MenuItemView>,
    pub banner: Option<String>,
    pub cart: CartPanel,
    pub dark_mode: bool,
}

/// Cart panel fragment template (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartFragmentTemplate {
    pub slug: &'static str,
    pub cart: CartPanel,
}

// =============================================================================
// Session helpers
// =============================================================================

fn counter_from_slug(slug: &str) -> Result<Counter> {
    Counter::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("counter '{slug}'")))
}

/// Get a counter's cart from the session, empty if absent.
async fn get_cart(session: &Session, counter: Counter) -> Result<Cart> {
    Ok(session
        .get::<Cart>(&session_keys::cart(counter))
        .await?
        .unwrap_or_default())
}

/// Store a counter's cart in the session.
async fn save_cart(session: &Session, counter: Counter, cart: &Cart) -> Result<()> {
    session.insert(&session_keys::cart(counter), cart).await?;
    Ok(())
}

/// Drop a counter's cart from the session.
async fn discard_cart(session: &Session, counter: Counter) -> Result<()> {
    session.remove::<Cart>(&session_keys::cart(counter)).await?;
    Ok(())
}

/// Fetch the counter's menu, falling back to the sample data.
///
/// Returns the items plus the banner notice when the fallback kicked in.
async fn menu_or_sample(state: &AppState, counter: Counter) -> (Vec<MenuItem>, Option<String>) {
    match state.api().counter_menu(counter).await {
        Ok(menu) => (menu.as_ref().clone(), None),
        Err(e) => {
            tracing::warn!("Menu fetch failed for {counter}, using sample menu: {e}");
            (sample::menu(counter), Some(MENU_FALLBACK_NOTICE.to_owned()))
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display a counter's menu screen.
///
/// Every full page load starts a fresh cart for this counter: the cart
/// belongs to the visit, not to the session's lifetime.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<MenuQuery>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let counter = counter_from_slug(&slug)?;
    discard_cart(&session, counter).await?;

    let (items, banner) = menu_or_sample(&state, counter).await;

    let category = query
        .category
        .as_deref()
        .and_then(Category::from_slug)
        .filter(|c| counter.categories().contains(c));
    let q = query.q.unwrap_or_default();

    let filtered = filter_menu(&items, category, &q);

    let chips = counter
        .categories()
        .iter()
        .map(|&c| CategoryChip {
            slug: c.slug(),
            label: c.label(),
            active: category == Some(c),
        })
        .collect();

    Ok(CounterTemplate {
        user_name: user.display_name().to_owned(),
        counter_name: counter.name(),
        slug: counter.slug(),
        chips,
        all_active: category.is_none(),
        q,
        items: filtered.into_iter().map(MenuItemView::from).collect(),
        banner,
        cart: CartPanel::from_cart(&Cart::default()),
        dark_mode: dark_mode(&session).await,
    })
}

/// Add one unit to the cart (HTMX fragment).
pub async fn add(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<impl IntoResponse> {
    let counter = counter_from_slug(&slug)?;
    let mut cart = get_cart(&session, counter).await?;

    let (items, _) = menu_or_sample(&state, counter).await;
    let food_id = FoodId::new(form.food_id);

    let panel = if let Some(item) = items.iter().find(|item| item.id == food_id) {
        cart.add(item.clone());
        save_cart(&session, counter, &cart).await?;
        CartPanel::from_cart(&cart)
    } else {
        CartPanel::with_notice(&cart, "That item is no longer on the menu.")
    };

    Ok(CartFragmentTemplate {
        slug: counter.slug(),
        cart: panel,
    })
}

/// Remove one unit from the cart (HTMX fragment).
pub async fn remove(
    Path(slug): Path<String>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<impl IntoResponse> {
    let counter = counter_from_slug(&slug)?;
    let mut cart = get_cart(&session, counter).await?;

    cart.remove(&FoodId::new(form.food_id));
    save_cart(&session, counter, &cart).await?;

    Ok(CartFragmentTemplate {
        slug: counter.slug(),
        cart: CartPanel::from_cart(&cart),
    })
}

/// Empty the cart (HTMX fragment).
pub async fn clear(
    Path(slug): Path<String>,
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let counter = counter_from_slug(&slug)?;
    discard_cart(&session, counter).await?;

    Ok(CartFragmentTemplate {
        slug: counter.slug(),
        cart: CartPanel::from_cart(&Cart::default()),
    })
}

/// Place the order (HTMX fragment).
///
/// Assembles the order client-side (bill id, date, time), submits it, and
/// on success clears the cart and shows the receipt. Failures leave the
/// cart untouched so the user can retry.
pub async fn checkout(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let counter = counter_from_slug(&slug)?;
    let cart = get_cart(&session, counter).await?;

    if cart.is_empty() {
        return Ok(CartFragmentTemplate {
            slug: counter.slug(),
            cart: CartPanel::with_notice(&cart, "Your cart is empty! Add some items first."),
        });
    }

    let order = NewOrder::from_cart(&user, &cart, Local::now().naive_local());

    let panel = match state.api().place_order(&order).await {
        Ok(()) => {
            discard_cart(&session, counter).await?;
            tracing::info!(bill_id = %order.bill_id, counter = %counter, "order placed");
            CartPanel::with_receipt(ReceiptView {
                bill_id: order.bill_id.to_string(),
                subtotal: cart.subtotal().to_string(),
                gst: cart.gst().to_string(),
                total: cart.total().to_string(),
            })
        }
        Err(e) if e.is_transport() => {
            tracing::warn!("Order submission failed: {e}");
            CartPanel::with_notice(
                &cart,
                "Failed to place order. Please check your connection and try again.",
            )
        }
        Err(e) => {
            tracing::warn!("Order submission rejected: {e}");
            CartPanel::with_notice(&cart, e.user_message())
        }
    };

    Ok(CartFragmentTemplate {
        slug: counter.slug(),
        cart: panel,
    })
}

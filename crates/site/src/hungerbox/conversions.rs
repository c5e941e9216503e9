//! Conversions from wire types to domain types.
//!
//! The category classifier lives here so that an item's category is
//! decided exactly once, when it crosses the boundary. The keyword table
//! is per counter because the same word means different things at
//! different counters (a pastry is a dessert at Time Out but its own
//! shelf at the Food Court).

use hunger_box_core::{BillId, Category, Counter, FoodId, Price};
use tracing::warn;

use crate::models::menu::MenuItem;
use crate::models::order::{self, NewOrder, OrderRecord};

use super::types::{MenuItemWire, OrderRecordWire, OrderRequest};

/// Convert a wire menu item, assigning its category.
///
/// Items with an unrepresentable price are dropped with a warning rather
/// than poisoning the whole menu.
pub(crate) fn menu_item(counter: Counter, wire: MenuItemWire) -> Option<MenuItem> {
    let Some(price) = Price::from_f64(wire.price) else {
        warn!(fid = %wire.fid, price = wire.price, "menu item has unusable price, skipping");
        return None;
    };

    let category = classify(counter, &wire.fname);
    Some(MenuItem {
        id: FoodId::new(wire.fid),
        name: wire.fname,
        price,
        category,
    })
}

/// Assign a category from the item name.
pub(crate) fn classify(counter: Counter, name: &str) -> Category {
    let name = name.to_lowercase();
    let has = |needle: &str| name.contains(needle);
    let has_any = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    match counter {
        Counter::TimeOut => {
            if has("burger") {
                Category::Burgers
            } else if has_any(&["water", "coke", "maaza", "drink"]) {
                Category::Drinks
            } else if has_any(&["patties", "fritters", "cutlet", "roll", "fry"]) {
                Category::Snacks
            } else if has("pastry") || has("sweet") {
                Category::Desserts
            } else {
                Category::Other
            }
        }
        Counter::MainCafe => {
            if has("chowmin") || has("noodle") {
                Category::Noodles
            } else if has("biriyani") {
                Category::Biriyani
            } else if has("idli") || has("dosa") {
                Category::SouthIndian
            } else if has("luchi") {
                Category::Bengali
            } else if has("rice") {
                Category::Rice
            } else {
                Category::Other
            }
        }
        Counter::FoodCourt => {
            if has("ice cream") {
                Category::IceCream
            } else if has("cake") {
                Category::Cakes
            } else if has("pastry") || has("slice") {
                Category::Pastries
            } else if has("mousse") || has("brownie") {
                Category::Desserts
            } else if has("gulab") || has("rasgulla") {
                Category::IndianSweets
            } else {
                Category::Other
            }
        }
    }
}

/// Extract the bare display name from the service's login greeting
/// (`"Welcome Ankur!"` becomes `"Ankur"`).
pub(crate) fn clean_display_name(greeting: &str) -> String {
    let mut name = greeting.trim();
    if let Some(rest) = name
        .get(..8)
        .filter(|prefix| prefix.eq_ignore_ascii_case("welcome "))
        .and_then(|_| name.get(8..))
    {
        name = rest.trim();
    }
    name.trim_end_matches('!').trim().to_owned()
}

/// Convert a stored order row.
pub(crate) fn order_record(wire: OrderRecordWire) -> OrderRecord {
    let date = wire.date.unwrap_or_default();
    let time = wire.time.unwrap_or_default();
    let placed_at = order::parse_placed_at(&date, &time);

    OrderRecord {
        bill_id: wire
            .billid
            .filter(|id| !id.trim().is_empty())
            .map(BillId::new),
        username: wire.username.unwrap_or_default(),
        food_items: wire
            .fooditems
            .map(|items| {
                items
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default(),
        subtotal: wire
            .price
            .and_then(|p| p.as_f64())
            .and_then(Price::from_f64)
            .unwrap_or(Price::ZERO),
        date,
        time,
        placed_at,
    }
}

impl From<&NewOrder> for OrderRequest {
    fn from(order: &NewOrder) -> Self {
        Self {
            userid: order.user_id.to_string(),
            username: order.username.clone(),
            fooditems: order.item_names.join(","),
            price: order.subtotal.amount().to_string(),
            billid: order.bill_id.to_string(),
            date: order.date.clone(),
            time: order.time.clone(),
        }
    }
}

//! Order types: checkout assembly and history post-processing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hunger_box_core::{BillId, Counter, Price, UserId};
use rand::Rng;

use crate::cart::{Cart, GST_RATE};
use crate::models::session::CurrentUser;

/// Characters used in generated bill ids.
const BILL_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Date format used by the order endpoints (`dd-mm-yyyy`).
const ORDER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Time format used by the order endpoints (`HH:MM`).
const ORDER_TIME_FORMAT: &str = "%H:%M";

/// Generate a random six-character alphanumeric bill id.
#[must_use]
pub fn generate_bill_id() -> BillId {
    let mut rng = rand::rng();
    let id: String = (0..BillId::LENGTH)
        .map(|_| {
            let index = rng.random_range(0..BILL_ID_CHARSET.len());
            char::from(BILL_ID_CHARSET[index])
        })
        .collect();
    BillId::new(id)
}

/// An order assembled at checkout, ready for submission.
///
/// The price carried is the cart subtotal; the service stores it verbatim
/// and GST is re-derived for display.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub username: String,
    pub item_names: Vec<String>,
    pub subtotal: Price,
    pub bill_id: BillId,
    pub date: String,
    pub time: String,
}

impl NewOrder {
    /// Assemble an order from the current cart.
    #[must_use]
    pub fn from_cart(user: &CurrentUser, cart: &Cart, now: NaiveDateTime) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            item_names: cart.item_names(),
            subtotal: cart.subtotal(),
            bill_id: generate_bill_id(),
            date: now.format(ORDER_DATE_FORMAT).to_string(),
            time: now.format(ORDER_TIME_FORMAT).to_string(),
        }
    }
}

/// A stored order from the history endpoint, post conversion.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub bill_id: Option<BillId>,
    pub username: String,
    pub food_items: Vec<String>,
    /// Stored subtotal (GST not included).
    pub subtotal: Price,
    /// Raw `dd-mm-yyyy` date string, kept for display.
    pub date: String,
    /// Raw `HH:MM` time string, kept for display.
    pub time: String,
    /// Parsed timestamp, used for sorting. `None` when unparseable.
    pub placed_at: Option<NaiveDateTime>,
}

impl OrderRecord {
    /// GST derived from the stored subtotal.
    #[must_use]
    pub fn gst(&self) -> Price {
        self.subtotal * GST_RATE
    }

    /// Subtotal plus GST.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.subtotal + self.gst()
    }

    /// Date reformatted for display (`dd/mm/yyyy`); falls back to the raw
    /// string when it does not parse.
    #[must_use]
    pub fn date_display(&self) -> String {
        self.placed_at.map_or_else(
            || self.date.clone(),
            |at| at.format("%d/%m/%Y").to_string(),
        )
    }

    /// Short preview of the item names: first two, with an ellipsis when
    /// more follow.
    #[must_use]
    pub fn items_preview(&self) -> String {
        let preview: Vec<&str> = self
            .food_items
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        if self.food_items.len() > 2 {
            format!("{}…", preview.join(", "))
        } else {
            preview.join(", ")
        }
    }

    /// Guess which counter an order came from by its item names.
    ///
    /// Orders only store names, so attribution stays a heuristic; it is
    /// display-only.
    #[must_use]
    pub fn counter_hint(&self) -> Option<Counter> {
        let names = self.food_items.join(",").to_lowercase();
        let has_any = |needles: &[&str]| needles.iter().any(|n| names.contains(n));

        if has_any(&["cake", "pastry", "mousse", "brownie", "ice cream"]) {
            Some(Counter::FoodCourt)
        } else if has_any(&["chowmin", "biriyani", "rice", "dosa", "idli"]) {
            Some(Counter::MainCafe)
        } else if has_any(&["burger", "patties", "fritters", "hot dog"]) {
            Some(Counter::TimeOut)
        } else {
            None
        }
    }
}

/// Parse an order's `dd-mm-yyyy` date and `HH:MM` time into a timestamp.
///
/// A missing time defaults to midnight; a missing or malformed date makes
/// the whole timestamp `None`.
#[must_use]
pub fn parse_placed_at(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), ORDER_DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), ORDER_TIME_FORMAT)
        .unwrap_or_else(|_| NaiveTime::MIN);
    Some(date.and_time(time))
}

/// Clean up raw history records for display.
///
/// - Drops records with a blank username (the service stores whatever it
///   was sent, including junk rows)
/// - Drops records without a bill id and de-duplicates by bill id
/// - Sorts newest first; unparseable timestamps sink to the end
#[must_use]
pub fn prepare_history(records: Vec<OrderRecord>) -> Vec<OrderRecord> {
    let mut seen = std::collections::HashSet::new();
    let mut orders: Vec<OrderRecord> = records
        .into_iter()
        .filter(|record| !record.username.trim().is_empty())
        .filter(|record| {
            record
                .bill_id
                .as_ref()
                .is_some_and(|id| seen.insert(id.as_str().to_owned()))
        })
        .collect();

    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    orders
}

/// Sum of stored subtotals, for the "total spent" figure.
#[must_use]
pub fn total_spent(records: &[OrderRecord]) -> Price {
    records.iter().map(|record| record.subtotal).sum()
}

//! Shopping cart engine.
//!
//! A cart is an ordered list of lines merged by food id. It belongs to a
//! single counter and is stored in the session under a per-counter key;
//! all mutation happens synchronously inside one request.

use hunger_box_core::{FoodId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::menu::MenuItem;

/// GST applied to every order subtotal. Fixed, not configurable.
pub const GST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2); // 5% = 0.05

/// One cart line.
///
/// Invariant: `quantity >= 1`. A line that would reach zero is removed
/// from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price * self.quantity
    }
}

/// An in-memory cart for one counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add one unit of `item`.
    ///
    /// If a line with the same food id exists its quantity is incremented,
    /// otherwise a new line is appended with quantity 1.
    pub fn add(&mut self, item: MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine { item, quantity: 1 });
        }
    }

    /// Remove one unit of the item with `id`.
    ///
    /// A quantity-1 line is deleted outright. An absent id is a no-op.
    pub fn remove(&mut self, id: &FoodId) {
        if let Some(index) = self.lines.iter().position(|line| &line.item.id == id) {
            if let Some(line) = self.lines.get_mut(index) {
                if line.quantity > 1 {
                    line.quantity -= 1;
                } else {
                    self.lines.remove(index);
                }
            }
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// GST on the subtotal.
    #[must_use]
    pub fn gst(&self) -> Price {
        self.subtotal() * GST_RATE
    }

    /// Subtotal plus GST.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.gst()
    }

    /// The line item names, one per line regardless of quantity, in cart
    /// order. This is what the order submission carries.
    #[must_use]
    pub fn item_names(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.item.name.clone()).collect()
    }
}

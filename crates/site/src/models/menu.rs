//! Menu domain types.

use hunger_box_core::{Category, FoodId, Price};
use serde::{Deserialize, Serialize};

/// A single item on a counter's menu.
///
/// Immutable once converted from the wire; the category is assigned at
/// that point and travels with the item (it is never re-derived from the
/// name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: FoodId,
    pub name: String,
    pub price: Price,
    pub category: Category,
}

impl MenuItem {
    /// Case-insensitive substring match against the search box input.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Apply the screen's category filter and search box to a menu.
#[must_use]
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    category: Option<Category>,
    query: &str,
) -> Vec<&'a MenuItem> {
    let query = query.trim();
    items
        .iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .filter(|item| query.is_empty() || item.matches_search(query))
        .collect()
}

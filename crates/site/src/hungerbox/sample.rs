//! Built-in sample menus.
//!
//! When a menu fetch fails the screen falls back to these items so the
//! counter stays browsable (orders against a sample menu still go through
//! the normal checkout path). Contents mirror the food service's seed
//! data.

use hunger_box_core::{Counter, FoodId, Price};

use crate::models::menu::MenuItem;

use super::conversions::classify;

const TIME_OUT: &[(&str, &str, i64)] = &[
    ("F001", "Veg Patties", 20),
    ("F002", "Tomato Ketchup Sachet", 5),
    ("F003", "Drinking Water Bottle", 9),
    ("F004", "Coke Can", 40),
    ("F005", "Maaza", 20),
    ("F006", "Burger Chicken", 54),
    ("F007", "Fish Fry", 55),
    ("F008", "Chicken Fritters", 20),
    ("F009", "Chicken Cutlet", 50),
    ("F010", "Sweet Corn Roll", 23),
    ("F011", "Chicken Hot Dog", 42),
    ("F012", "Black Forest Pastry", 40),
    ("F013", "Mango Pastry", 20),
];

const MAIN_CAFE: &[(&str, &str, i64)] = &[
    ("F101", "Chicken Rice", 60),
    ("F102", "Plain Rice with Dal", 30),
    ("F103", "Veg Chowmin", 40),
    ("F104", "Egg Chowmin", 50),
    ("F105", "Chicken Chowmin", 70),
    ("F106", "Egg Fried Rice", 55),
    ("F107", "Veg Fried Rice", 45),
    ("F108", "Chicken Fried Rice", 75),
    ("F109", "Aloo Biriyani", 50),
    ("F110", "Egg Biriyani", 60),
    ("F111", "Chicken Biriyani", 90),
    ("F112", "Mutton Biriyani", 130),
    ("F113", "Idli", 25),
    ("F114", "Dosa", 35),
    ("F115", "Luchi with Aloo Dum", 30),
];

const FOOD_COURT: &[(&str, &str, i64)] = &[
    ("F201", "Mango Cake", 35),
    ("F202", "Strawberry Cake", 40),
    ("F203", "Eggless Cake", 45),
    ("F204", "Chocolate Cake", 40),
    ("F205", "Vanilla Cake", 30),
    ("F206", "Black Forest Cake", 45),
    ("F207", "Red Velvet Cake", 50),
    ("F208", "Butterscotch Slice", 35),
    ("F209", "Pineapple Pastry", 30),
    ("F210", "Chocolate Mousse Cup", 50),
    ("F211", "Brownie", 35),
    ("F212", "Ice Cream Cup Vanilla", 25),
    ("F213", "Ice Cream Cup Chocolate", 25),
    ("F214", "Gulab Jamun (2pc)", 20),
    ("F215", "Rasgulla (2pc)", 20),
];

/// The sample menu for a counter.
#[must_use]
pub fn menu(counter: Counter) -> Vec<MenuItem> {
    let rows = match counter {
        Counter::TimeOut => TIME_OUT,
        Counter::MainCafe => MAIN_CAFE,
        Counter::FoodCourt => FOOD_COURT,
    };

    rows.iter()
        .map(|&(fid, name, rupees)| MenuItem {
            id: FoodId::from(fid),
            name: name.to_owned(),
            price: Price::from_rupees(rupees),
            category: classify(counter, name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hunger_box_core::Category;

    use super::*;

    #[test]
    fn test_sample_menu_sizes() {
        assert_eq!(menu(Counter::TimeOut).len(), 13);
        assert_eq!(menu(Counter::MainCafe).len(), 15);
        assert_eq!(menu(Counter::FoodCourt).len(), 15);
    }

    #[test]
    fn test_sample_ids_are_unique_per_counter() {
        for counter in Counter::ALL {
            let items = menu(counter);
            let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str().to_owned()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), items.len());
        }
    }

    #[test]
    fn test_every_listed_category_has_items() {
        // every filter chip a counter offers should surface at least one
        // sample item, otherwise the chip is dead on fallback
        for counter in Counter::ALL {
            let items = menu(counter);
            for &category in counter.categories() {
                assert!(
                    items.iter().any(|i| i.category == category),
                    "{counter} has no sample items in {category}"
                );
            }
        }
    }

    #[test]
    fn test_other_items_exist_only_where_expected() {
        let time_out = menu(Counter::TimeOut);
        assert!(
            time_out
                .iter()
                .any(|i| i.name == "Chicken Hot Dog" && i.category == Category::Other)
        );
    }
}

//! Counters and menu categories.

use serde::{Deserialize, Serialize};

/// One of the three food counters.
///
/// Each counter is an independent menu source on the food service; the
/// numeric suffix in the service's menu paths follows the original counter
/// numbering (Time Out = 1, Main Cafe = 2, Food Court = 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Counter {
    TimeOut,
    MainCafe,
    FoodCourt,
}

impl Counter {
    /// All counters, in the order they appear on the home screen.
    pub const ALL: [Self; 3] = [Self::FoodCourt, Self::TimeOut, Self::MainCafe];

    /// URL slug for this counter.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TimeOut => "time-out",
            Self::MainCafe => "main-cafe",
            Self::FoodCourt => "food-court",
        }
    }

    /// Parse a counter from its URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "time-out" => Some(Self::TimeOut),
            "main-cafe" => Some(Self::MainCafe),
            "food-court" => Some(Self::FoodCourt),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TimeOut => "Time Out",
            Self::MainCafe => "Main Cafe",
            Self::FoodCourt => "Food Court",
        }
    }

    /// Short blurb shown on the home screen.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::TimeOut => "Quick bites and snacks for those in a hurry",
            Self::MainCafe => "Main dining area with comfortable seating and full meals",
            Self::FoodCourt => "A variety of cuisines from different restaurants all in one place",
        }
    }

    /// Counter number used by the food service's menu paths.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::TimeOut => 1,
            Self::MainCafe => 2,
            Self::FoodCourt => 3,
        }
    }

    /// The category filters offered on this counter's screen.
    #[must_use]
    pub const fn categories(self) -> &'static [Category] {
        match self {
            Self::TimeOut => &[
                Category::Snacks,
                Category::Drinks,
                Category::Burgers,
                Category::Desserts,
            ],
            Self::MainCafe => &[
                Category::Rice,
                Category::Noodles,
                Category::Biriyani,
                Category::SouthIndian,
                Category::Bengali,
            ],
            Self::FoodCourt => &[
                Category::Cakes,
                Category::Pastries,
                Category::Desserts,
                Category::IceCream,
                Category::IndianSweets,
            ],
        }
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Menu item category.
///
/// An explicit field on every menu item, assigned once when the item
/// crosses the wire boundary. The set of categories in use differs per
/// counter; `Other` catches items no filter claims, which are then only
/// visible without a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Snacks,
    Drinks,
    Burgers,
    Desserts,
    Rice,
    Noodles,
    Biriyani,
    SouthIndian,
    Bengali,
    Cakes,
    Pastries,
    IceCream,
    IndianSweets,
    Other,
}

impl Category {
    /// URL slug used in filter query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Snacks => "snacks",
            Self::Drinks => "drinks",
            Self::Burgers => "burgers",
            Self::Desserts => "desserts",
            Self::Rice => "rice",
            Self::Noodles => "noodles",
            Self::Biriyani => "biriyani",
            Self::SouthIndian => "south-indian",
            Self::Bengali => "bengali",
            Self::Cakes => "cakes",
            Self::Pastries => "pastries",
            Self::IceCream => "ice-cream",
            Self::IndianSweets => "indian-sweets",
            Self::Other => "other",
        }
    }

    /// Parse a category from its slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "snacks" => Some(Self::Snacks),
            "drinks" => Some(Self::Drinks),
            "burgers" => Some(Self::Burgers),
            "desserts" => Some(Self::Desserts),
            "rice" => Some(Self::Rice),
            "noodles" => Some(Self::Noodles),
            "biriyani" => Some(Self::Biriyani),
            "south-indian" => Some(Self::SouthIndian),
            "bengali" => Some(Self::Bengali),
            "cakes" => Some(Self::Cakes),
            "pastries" => Some(Self::Pastries),
            "ice-cream" => Some(Self::IceCream),
            "indian-sweets" => Some(Self::IndianSweets),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Label shown on filter buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Snacks => "Snacks",
            Self::Drinks => "Drinks",
            Self::Burgers => "Burgers",
            Self::Desserts => "Desserts",
            Self::Rice => "Rice",
            Self::Noodles => "Noodles",
            Self::Biriyani => "Biriyani",
            Self::SouthIndian => "South Indian",
            Self::Bengali => "Bengali",
            Self::Cakes => "Cakes",
            Self::Pastries => "Pastries",
            Self::IceCream => "Ice Cream",
            Self::IndianSweets => "Indian Sweets",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

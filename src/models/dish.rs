//! Dish (menu item) model.
//!
//! Dishes are published by the menu catalog as `Arc<Dish>` and never
//! mutated afterwards; editing a menu entry publishes a new `Arc`, so an
//! order placed earlier keeps the snapshot it was created with.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kitchen category of a dish, which decides its backlog discipline.
///
/// | Category | Menu label | Backlog |
/// |----------|-----------|---------|
/// | `Quick` | tapas | FIFO |
/// | `Slow` | main dish | longest prep first |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishCategory {
    #[serde(alias = "tapas")]
    Quick,
    #[serde(alias = "main dish")]
    Slow,
}

impl DishCategory {
    /// All categories, in dispatch order (quick before slow).
    pub const ALL: [DishCategory; 2] = [DishCategory::Quick, DishCategory::Slow];

    /// Canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DishCategory::Quick => "quick",
            DishCategory::Slow => "slow",
        }
    }
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that names neither category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dish category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for DishCategory {
    type Err = UnknownCategory;

    /// Accepts `quick`/`slow` and the menu file labels `tapas`/`main dish`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" | "tapas" => Ok(DishCategory::Quick),
            "slow" | "main dish" => Ok(DishCategory::Slow),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Unique name within the catalog.
    pub name: String,
    /// Preparation time in minutes (positive).
    pub prep_minutes: u32,
    /// Ingredients, in menu order.
    pub ingredients: Vec<String>,
    pub category: DishCategory,
}

impl Dish {
    /// Creates a dish with no ingredients.
    pub fn new(name: impl Into<String>, prep_minutes: u32, category: DishCategory) -> Self {
        Self {
            name: name.into(),
            prep_minutes,
            ingredients: Vec::new(),
            category,
        }
    }

    /// Creates a quick (FIFO) dish.
    pub fn quick(name: impl Into<String>, prep_minutes: u32) -> Self {
        Self::new(name, prep_minutes, DishCategory::Quick)
    }

    /// Creates a slow (longest-prep-first) dish.
    pub fn slow(name: impl Into<String>, prep_minutes: u32) -> Self {
        Self::new(name, prep_minutes, DishCategory::Slow)
    }

    /// Adds an ingredient.
    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients.push(ingredient.into());
        self
    }

    /// Replaces the ingredient list.
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Preparation time as a duration.
    #[inline]
    pub fn prep_time(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.prep_minutes))
    }
}

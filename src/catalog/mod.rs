//! Menu catalog.
//!
//! The scheduler only needs read access to dish definitions, through the
//! [`MenuCatalog`] trait. [`Menu`] is the in-memory implementation; its
//! dish list sits behind its own lock, so catalog reads never contend with
//! the scheduler state.
//!
//! Editing a dish publishes a new `Arc<Dish>`; orders already placed keep
//! pointing at the snapshot they were created with.

pub mod csv;

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::{Dish, DishCategory};
use crate::validation::{validate_dish, ValidationError};

/// Read-only source of dish definitions.
pub trait MenuCatalog: Send + Sync + Debug {
    /// All dishes, in menu order.
    fn list_dishes(&self) -> Vec<Arc<Dish>>;

    /// Finds a dish by exact name.
    fn find_dish(&self, name: &str) -> Option<Arc<Dish>> {
        self.list_dishes().into_iter().find(|d| d.name == name)
    }
}

/// In-memory menu.
///
/// # Example
/// ```
/// use kitchen_dispatch::catalog::{Menu, MenuCatalog};
/// use kitchen_dispatch::models::Dish;
///
/// let menu = Menu::new();
/// menu.add_dish(Dish::quick("Olives", 2).with_ingredient("olives")).unwrap();
/// assert!(menu.find_dish("Olives").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Menu {
    dishes: RwLock<Vec<Arc<Dish>>>,
}

impl Menu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a menu from a dish list, validating every entry.
    pub fn from_dishes<I>(dishes: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Dish>,
    {
        let menu = Self::new();
        for dish in dishes {
            menu.add_dish(dish)?;
        }
        Ok(menu)
    }

    /// Adds a dish at the end of the menu.
    pub fn add_dish(&self, dish: Dish) -> Result<Arc<Dish>, CatalogError> {
        validate_dish(&dish).map_err(|errors| invalid_dish(&dish.name, &errors))?;

        let mut dishes = self.dishes.write();
        if dishes.iter().any(|d| d.name == dish.name) {
            return Err(CatalogError::DuplicateDish(dish.name));
        }
        let dish = Arc::new(dish);
        dishes.push(Arc::clone(&dish));
        debug!(dish = %dish.name, category = %dish.category, "dish added to menu");
        Ok(dish)
    }

    /// Removes a dish by name and returns it.
    pub fn remove_dish(&self, name: &str) -> Result<Arc<Dish>, CatalogError> {
        let mut dishes = self.dishes.write();
        let index = dishes
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| CatalogError::DishNotFound(name.to_string()))?;
        let removed = dishes.remove(index);
        debug!(dish = %removed.name, "dish removed from menu");
        Ok(removed)
    }

    /// Replaces the dish named `name`, keeping its menu position.
    ///
    /// The new definition may rename the dish, as long as the new name is
    /// not taken by another entry.
    pub fn replace_dish(&self, name: &str, dish: Dish) -> Result<Arc<Dish>, CatalogError> {
        validate_dish(&dish).map_err(|errors| invalid_dish(&dish.name, &errors))?;

        let mut dishes = self.dishes.write();
        let index = dishes
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| CatalogError::DishNotFound(name.to_string()))?;
        if dish.name != name && dishes.iter().any(|d| d.name == dish.name) {
            return Err(CatalogError::DuplicateDish(dish.name));
        }
        let dish = Arc::new(dish);
        dishes[index] = Arc::clone(&dish);
        debug!(old = name, dish = %dish.name, "dish replaced on menu");
        Ok(dish)
    }

    /// Dishes of one category, in menu order.
    pub fn by_category(&self, category: DishCategory) -> Vec<Arc<Dish>> {
        self.dishes
            .read()
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.dishes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.read().is_empty()
    }
}

impl MenuCatalog for Menu {
    fn list_dishes(&self) -> Vec<Arc<Dish>> {
        self.dishes.read().clone()
    }

    fn find_dish(&self, name: &str) -> Option<Arc<Dish>> {
        self.dishes.read().iter().find(|d| d.name == name).cloned()
    }
}

fn invalid_dish(name: &str, errors: &[ValidationError]) -> CatalogError {
    CatalogError::InvalidDish {
        name: name.to_string(),
        reason: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    }
}

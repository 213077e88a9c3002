//! Input validation for menus and slot quotas.
//!
//! Checks structural integrity before a menu is published or a scheduler
//! is built. Detects:
//! - Duplicate dish names
//! - Empty dish names
//! - Zero preparation times
//! - Dishes without ingredients
//! - Slot quotas that cannot admit anything, or sub-quotas above the total
//!
//! All checks run to completion; every issue found is reported.

use std::collections::HashSet;

use crate::config::SlotQuota;
use crate::models::Dish;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two dishes share the same name.
    DuplicateName,
    /// A dish has an empty (or blank) name.
    EmptyName,
    /// A dish has zero preparation time.
    InvalidPrepTime,
    /// A dish lists no ingredients.
    MissingIngredients,
    /// The total slot count is zero.
    NoCapacity,
    /// A category sub-quota exceeds the total.
    QuotaAboveTotal,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a single dish.
pub fn validate_dish(dish: &Dish) -> ValidationResult {
    let mut errors = Vec::new();
    check_dish(dish, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_dish(dish: &Dish, errors: &mut Vec<ValidationError>) {
    if dish.name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            "Dish name is empty",
        ));
    }
    if dish.prep_minutes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPrepTime,
            format!("Dish '{}' has zero preparation time", dish.name),
        ));
    }
    if dish.ingredients.iter().all(|i| i.trim().is_empty()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingIngredients,
            format!("Dish '{}' has no ingredients", dish.name),
        ));
    }
}

/// Validates a whole menu.
///
/// Checks:
/// 1. Every dish passes [`validate_dish`]
/// 2. No two dishes share a name
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_menu<'a, I>(dishes: I) -> ValidationResult
where
    I: IntoIterator<Item = &'a Dish>,
{
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for dish in dishes {
        check_dish(dish, &mut errors);
        if !names.insert(dish.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate dish name: {}", dish.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a slot quota.
///
/// Checks:
/// 1. `total >= 1`
/// 2. `quick <= total`
/// 3. `slow <= total`
pub fn validate_quota(quota: &SlotQuota) -> ValidationResult {
    let mut errors = Vec::new();

    if quota.total == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoCapacity,
            "Total cooking slots must be at least 1",
        ));
    }
    if quota.quick > quota.total {
        errors.push(ValidationError::new(
            ValidationErrorKind::QuotaAboveTotal,
            format!("Quick slots ({}) exceed total ({})", quota.quick, quota.total),
        ));
    }
    if quota.slow > quota.total {
        errors.push(ValidationError::new(
            ValidationErrorKind::QuotaAboveTotal,
            format!("Slow slots ({}) exceed total ({})", quota.slow, quota.total),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Error types.
//!
//! Every error here is local and recoverable: the scheduler never treats
//! one as fatal, and batch operations report them per item.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{DishCategory, Order, OrderId, OrderStatus};

/// Scheduling errors returned by queues, board, and scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KitchenError {
    /// Lifecycle transition not allowed from the order's current status.
    #[error("order {id} cannot {action} while {status}")]
    InvalidState {
        id: OrderId,
        status: OrderStatus,
        action: &'static str,
    },

    /// Admission would exceed the category sub-quota or the total.
    #[error("no free {category} cooking slot")]
    CapacityExceeded { category: DishCategory },

    #[error("{0} backlog is empty")]
    EmptyQueue(DishCategory),

    #[error("order {0} is not on the cooking board")]
    NotFound(OrderId),

    #[error("unknown dish: {0}")]
    UnknownDish(String),

    #[error("invalid table number: {0}")]
    InvalidTable(u32),
}

impl KitchenError {
    pub(crate) fn invalid_state(order: &Order, action: &'static str) -> Self {
        Self::InvalidState {
            id: order.id(),
            status: order.status(),
            action,
        }
    }
}

/// Admission failure that hands the order back to the caller.
///
/// The board never drops an order it refuses, so ownership stays with
/// whoever tried to admit it.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct Rejected {
    pub reason: KitchenError,
    pub order: Order,
}

impl Rejected {
    /// Splits the rejection into its reason and the returned order.
    pub fn into_parts(self) -> (KitchenError, Order) {
        (self.reason, self.order)
    }
}

/// Menu catalog and menu file errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to access menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed menu file: {0}")]
    Csv(#[from] csv::Error),

    #[error("menu record {record}: unknown dish type '{value}'")]
    UnknownCategory { record: usize, value: String },

    #[error("menu record {record}: invalid prep time '{value}'")]
    InvalidPrepTime { record: usize, value: String },

    #[error("dish already on the menu: {0}")]
    DuplicateDish(String),

    #[error("dish not on the menu: {0}")]
    DishNotFound(String),

    #[error("invalid dish '{name}': {reason}")]
    InvalidDish { name: String, reason: String },
}

/// Kitchen configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid slot quota: {0}")]
    InvalidQuota(String),
}

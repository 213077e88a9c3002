//! Order model.
//!
//! An order is one dish for one table. Its status only moves forward:
//!
//! ```text
//! Pending --start_cooking--> Cooking --complete--> Completed
//! ```
//!
//! The status fields are private; the transition methods are crate-internal
//! so that only the cooking board can move an order along.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{Dish, DishCategory};
use crate::error::KitchenError;

/// Order identifier, assigned in intake order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cooking,
    /// Terminal.
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Completed => "completed",
        })
    }
}

/// A single dish ordered by a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    table_number: u32,
    /// Snapshot of the dish at order time.
    dish: Arc<Dish>,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    started_at: Option<DateTime<Utc>>,
    estimated_completion: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a pending order.
    pub fn new(id: OrderId, table_number: u32, dish: Arc<Dish>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            table_number,
            dish,
            created_at,
            status: OrderStatus::Pending,
            started_at: None,
            estimated_completion: None,
            completed_at: None,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn table_number(&self) -> u32 {
        self.table_number
    }

    #[inline]
    pub fn dish(&self) -> &Arc<Dish> {
        &self.dish
    }

    /// Category of the ordered dish.
    #[inline]
    pub fn category(&self) -> DishCategory {
        self.dish.category
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// When the order was admitted to the cooking board.
    #[inline]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Admission time plus prep time. `None` while pending.
    #[inline]
    pub fn estimated_completion(&self) -> Option<DateTime<Utc>> {
        self.estimated_completion
    }

    #[inline]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time spent waiting in the backlog.
    pub fn queue_wait(&self) -> Option<TimeDelta> {
        self.started_at.map(|s| s - self.created_at)
    }

    /// Time from intake to retirement.
    pub fn lead_time(&self) -> Option<TimeDelta> {
        self.completed_at.map(|c| c - self.created_at)
    }

    /// Whether the order was retired no later than its estimate.
    pub fn finished_on_time(&self) -> Option<bool> {
        match (self.completed_at, self.estimated_completion) {
            (Some(done), Some(eta)) => Some(done <= eta),
            _ => None,
        }
    }

    /// `Pending -> Cooking`; stamps the start time and the estimate.
    pub(crate) fn start_cooking(&mut self, now: DateTime<Utc>) -> Result<(), KitchenError> {
        if self.status != OrderStatus::Pending {
            return Err(KitchenError::invalid_state(self, "start cooking"));
        }
        self.status = OrderStatus::Cooking;
        self.started_at = Some(now);
        self.estimated_completion = Some(now + self.dish.prep_time());
        Ok(())
    }

    /// `Cooking -> Completed`.
    pub(crate) fn complete(&mut self, now: DateTime<Utc>) -> Result<(), KitchenError> {
        if self.status != OrderStatus::Cooking {
            return Err(KitchenError::invalid_state(self, "complete"));
        }
        self.status = OrderStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {} - {}", self.table_number, self.dish.name)
    }
}

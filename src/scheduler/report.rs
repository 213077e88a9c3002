//! Point-in-time kitchen view for reporting surfaces.
//!
//! A [`KitchenSnapshot`] owns copies of every order, so it can be
//! serialized or rendered after the scheduler lock is released.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::KitchenScheduler;
use crate::config::SlotQuota;
use crate::models::{DishCategory, Order};

/// Copy of the kitchen state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenSnapshot {
    pub quota: SlotQuota,
    /// Cooking orders per category.
    pub occupancy: BTreeMap<DishCategory, usize>,
    /// Quick backlog, front first.
    pub queued_quick: Vec<Order>,
    /// Slow backlog, front first.
    pub queued_slow: Vec<Order>,
    /// Cooking orders, by id.
    pub cooking: Vec<Order>,
    /// Completed orders, in completion order.
    pub completed: Vec<Order>,
}

impl KitchenSnapshot {
    pub(crate) fn capture(kitchen: &KitchenScheduler) -> Self {
        let board = kitchen.board();
        let queues = kitchen.queues();
        Self {
            quota: board.quota(),
            occupancy: DishCategory::ALL
                .into_iter()
                .map(|c| (c, board.occupied(c)))
                .collect(),
            queued_quick: queues.iter(DishCategory::Quick).cloned().collect(),
            queued_slow: queues.iter(DishCategory::Slow).cloned().collect(),
            cooking: board.snapshot().cloned().collect(),
            completed: kitchen.completed().to_vec(),
        }
    }

    /// Backlog of one category, front first.
    pub fn queued(&self, category: DishCategory) -> &[Order] {
        match category {
            DishCategory::Quick => &self.queued_quick,
            DishCategory::Slow => &self.queued_slow,
        }
    }
}

impl fmt::Display for KitchenSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cooking ({}/{}):", self.cooking.len(), self.quota.total)?;
        for order in &self.cooking {
            write!(f, "  {} {}", order.id(), order)?;
            if let Some(eta) = order.estimated_completion() {
                write!(f, " (ready {})", eta.format("%H:%M"))?;
            }
            writeln!(f)?;
        }
        for category in DishCategory::ALL {
            let queued = self.queued(category);
            writeln!(f, "Queued {} ({}):", category, queued.len())?;
            for order in queued {
                writeln!(f, "  {} {}", order.id(), order)?;
            }
        }
        write!(f, "Completed: {}", self.completed.len())
    }
}

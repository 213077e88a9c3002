//! Backlog policies and order queues.
//!
//! Both kitchen backlogs are the same ordered container, a [`Backlog`],
//! parameterized by a [`BacklogPolicy`] that ranks orders:
//!
//! - [`rules::Fifo`]: arrival order, used for quick dishes.
//! - [`rules::LongestPrepFirst`]: longest preparation first, ties in arrival
//!   order, used for slow dishes.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use chrono::Utc;
//! use kitchen_dispatch::dispatching::OrderQueues;
//! use kitchen_dispatch::models::{Dish, DishCategory, Order, OrderId};
//!
//! let mut queues = OrderQueues::new();
//! let now = Utc::now();
//! queues.enqueue(Order::new(OrderId(1), 3, Arc::new(Dish::slow("Stew", 10)), now)).unwrap();
//! queues.enqueue(Order::new(OrderId(2), 5, Arc::new(Dish::slow("Roast", 40)), now)).unwrap();
//!
//! let first = queues.pop_front(DishCategory::Slow).unwrap();
//! assert_eq!(first.dish().name, "Roast");
//! ```

mod backlog;
mod queues;
pub mod rules;

pub use backlog::Backlog;
pub use queues::OrderQueues;

use crate::models::Order;
use std::fmt::Debug;

/// Position of an order inside a backlog.
///
/// Ordered by `rank` first, then by `seq`, so equal ranks keep arrival
/// order. `seq` is stamped by the backlog on insertion and is independent
/// of the order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceKey {
    /// Policy-defined rank. Lower = served first.
    pub rank: i64,
    /// Insertion sequence.
    pub seq: u64,
}

/// Ordering discipline of a backlog.
///
/// # Rank Convention
/// **Lower rank = served first.** Orders with equal rank are served in
/// insertion order.
pub trait BacklogPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FIFO").
    fn name(&self) -> &'static str;

    /// Ranks an order. Must depend only on immutable order data.
    fn rank(&self, order: &Order) -> i64;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Full sort key for an order inserted at position `seq`.
    fn key(&self, order: &Order, seq: u64) -> SequenceKey {
        SequenceKey {
            rank: self.rank(order),
            seq,
        }
    }
}

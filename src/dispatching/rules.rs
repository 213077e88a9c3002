//! Built-in backlog policies.
//!
//! All policies return lower ranks for orders that should leave the
//! backlog first; insertion order breaks ties.

use super::BacklogPolicy;
use crate::models::Order;

/// First In First Out.
///
/// Every order gets the same rank, so the insertion sequence alone decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl BacklogPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn rank(&self, _order: &Order) -> i64 {
        0
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Longest Preparation First.
///
/// Ranks by negated prep time, so the longest dish starts first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestPrepFirst;

impl BacklogPolicy for LongestPrepFirst {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn rank(&self, order: &Order) -> i64 {
        -i64::from(order.dish().prep_minutes)
    }

    fn description(&self) -> &'static str {
        "Longest Preparation Time"
    }
}

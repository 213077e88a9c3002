//! The two kitchen backlogs.

use tracing::{debug, warn};

use super::{rules, Backlog, BacklogPolicy, SequenceKey};
use crate::error::KitchenError;
use crate::models::{DishCategory, Order, OrderId};

/// Pending orders, split by dish category.
///
/// Quick dishes wait in a FIFO backlog; slow dishes wait in a
/// longest-prep-first backlog. The two are independent: a slow order
/// never overtakes or delays a quick one inside the queues.
#[derive(Debug, Clone)]
pub struct OrderQueues {
    quick: Backlog,
    slow: Backlog,
}

impl OrderQueues {
    /// Creates empty queues with the standard kitchen policies.
    pub fn new() -> Self {
        Self {
            quick: Backlog::new(rules::Fifo),
            slow: Backlog::new(rules::LongestPrepFirst),
        }
    }

    /// Replaces the policy of an empty category backlog.
    ///
    /// Orders already queued keep their old key, so swapping a non-empty
    /// backlog would mix orderings; the swap is refused with a warning and
    /// the current policy stays.
    pub fn with_policy<P: BacklogPolicy + 'static>(
        mut self,
        category: DishCategory,
        policy: P,
    ) -> Self {
        let backlog = self.backlog_mut(category);
        if backlog.is_empty() {
            *backlog = Backlog::new(policy);
        } else {
            warn!(
                %category,
                queued = backlog.len(),
                current = backlog.policy_name(),
                requested = policy.name(),
                "backlog policy not replaced: backlog is not empty"
            );
        }
        self
    }

    /// Queues a pending order in its category backlog.
    pub fn enqueue(&mut self, order: Order) -> Result<(), KitchenError> {
        let id = order.id();
        let category = order.category();
        let prep = order.dish().prep_minutes;
        self.backlog_mut(category).push(order)?;
        debug!(order_id = id.0, %category, prep_minutes = prep, "order queued");
        Ok(())
    }

    /// Up to `count` orders from the head of a backlog, without removing them.
    pub fn peek_admissible(
        &self,
        category: DishCategory,
        count: usize,
    ) -> impl Iterator<Item = &Order> + Clone + '_ {
        self.backlog(category).peek(count)
    }

    /// Removes and returns the head order of a backlog.
    pub fn pop_front(&mut self, category: DishCategory) -> Result<Order, KitchenError> {
        self.backlog_mut(category)
            .pop_front()
            .ok_or(KitchenError::EmptyQueue(category))
    }

    /// Removes the head of a backlog with its key, for a later
    /// [`OrderQueues::restore`].
    pub(crate) fn take_front(&mut self, category: DishCategory) -> Option<(SequenceKey, Order)> {
        self.backlog_mut(category).take_front()
    }

    /// Returns a taken order to its old position in its category backlog.
    pub(crate) fn restore(&mut self, key: SequenceKey, order: Order) {
        self.backlog_mut(order.category()).restore(key, order);
    }

    /// Read-only view of one backlog.
    pub fn backlog(&self, category: DishCategory) -> &Backlog {
        match category {
            DishCategory::Quick => &self.quick,
            DishCategory::Slow => &self.slow,
        }
    }

    fn backlog_mut(&mut self, category: DishCategory) -> &mut Backlog {
        match category {
            DishCategory::Quick => &mut self.quick,
            DishCategory::Slow => &mut self.slow,
        }
    }

    /// Queued orders of one category in service order.
    pub fn iter(&self, category: DishCategory) -> impl Iterator<Item = &Order> + Clone + '_ {
        self.backlog(category).iter()
    }

    /// Looks up a queued order in either backlog.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.quick.get(id).or_else(|| self.slow.get(id))
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.quick.contains(id) || self.slow.contains(id)
    }

    pub fn len(&self, category: DishCategory) -> usize {
        self.backlog(category).len()
    }

    pub fn total_len(&self) -> usize {
        self.quick.len() + self.slow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quick.is_empty() && self.slow.is_empty()
    }
}

impl Default for OrderQueues {
    fn default() -> Self {
        Self::new()
    }
}

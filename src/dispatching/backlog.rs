//! Ordered backlog of pending orders.
//!
//! Orders are kept in a `BTreeMap` keyed by [`SequenceKey`], so insertion
//! and removal of the head are O(log n) and iteration is always in
//! service order. The backlog stamps each push with its own counter, so
//! ties follow the order of `push` calls whatever the order ids are.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{BacklogPolicy, SequenceKey};
use crate::error::KitchenError;
use crate::models::{Order, OrderId, OrderStatus};

/// A backlog of pending orders in policy order.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use chrono::Utc;
/// use kitchen_dispatch::dispatching::{rules, Backlog};
/// use kitchen_dispatch::models::{Dish, Order, OrderId};
///
/// let mut backlog = Backlog::new(rules::Fifo);
/// let dish = Arc::new(Dish::quick("Olives", 2));
/// backlog.push(Order::new(OrderId(1), 1, Arc::clone(&dish), Utc::now())).unwrap();
/// backlog.push(Order::new(OrderId(2), 2, dish, Utc::now())).unwrap();
/// assert_eq!(backlog.pop_front().map(|o| o.id()), Some(OrderId(1)));
/// ```
#[derive(Clone)]
pub struct Backlog {
    policy: Arc<dyn BacklogPolicy>,
    orders: BTreeMap<SequenceKey, Order>,
    keys: HashMap<OrderId, SequenceKey>,
    next_seq: u64,
}

impl Backlog {
    /// Creates an empty backlog with the given policy.
    pub fn new<P: BacklogPolicy + 'static>(policy: P) -> Self {
        Self {
            policy: Arc::new(policy),
            orders: BTreeMap::new(),
            keys: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Name of the ordering policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Inserts a pending order at its policy position.
    ///
    /// Fails with `InvalidState` if the order is not pending or an order
    /// with the same id is already queued.
    pub fn push(&mut self, order: Order) -> Result<(), KitchenError> {
        if order.status() != OrderStatus::Pending || self.keys.contains_key(&order.id()) {
            return Err(KitchenError::invalid_state(&order, "enqueue"));
        }
        let key = self.policy.key(&order, self.next_seq);
        self.next_seq += 1;
        self.insert(key, order);
        Ok(())
    }

    /// Removes and returns the head order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.take_front().map(|(_, order)| order)
    }

    /// Removes the head order together with its key.
    pub(crate) fn take_front(&mut self) -> Option<(SequenceKey, Order)> {
        let (key, order) = self.orders.pop_first()?;
        self.keys.remove(&order.id());
        Some((key, order))
    }

    /// Puts back an order taken with [`Backlog::take_front`] at its old
    /// position.
    pub(crate) fn restore(&mut self, key: SequenceKey, order: Order) {
        self.insert(key, order);
    }

    fn insert(&mut self, key: SequenceKey, order: Order) {
        self.keys.insert(order.id(), key);
        self.orders.insert(key, order);
    }

    /// The head order, if any.
    pub fn front(&self) -> Option<&Order> {
        self.orders.values().next()
    }

    /// Up to `count` orders from the head, without removing them.
    pub fn peek(&self, count: usize) -> impl Iterator<Item = &Order> + Clone + '_ {
        self.orders.values().take(count)
    }

    /// All queued orders in service order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + Clone + '_ {
        self.orders.values()
    }

    /// Looks up a queued order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.keys.get(&id).and_then(|key| self.orders.get(key))
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl std::fmt::Debug for Backlog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backlog")
            .field("policy", &self.policy.name())
            .field(
                "orders",
                &self.orders.values().map(|o| o.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::Dish;
    use chrono::Utc;

    fn make_order(id: u64, prep: u32) -> Order {
        Order::new(OrderId(id), 1, Arc::new(Dish::slow(format!("D{id}"), prep)), Utc::now())
    }

    fn ids(backlog: &Backlog) -> Vec<u64> {
        backlog.iter().map(|o| o.id().0).collect()
    }

    #[test]
    fn test_fifo_backlog() {
        let mut backlog = Backlog::new(rules::Fifo);
        for (id, prep) in [(1, 30), (2, 5), (3, 20)] {
            backlog.push(make_order(id, prep)).unwrap();
        }
        assert_eq!(ids(&backlog), vec![1, 2, 3]);
        assert_eq!(backlog.policy_name(), "FIFO");
    }

    #[test]
    fn test_priority_backlog() {
        let mut backlog = Backlog::new(rules::LongestPrepFirst);
        for (id, prep) in [(1, 10), (2, 30), (3, 20), (4, 30)] {
            backlog.push(make_order(id, prep)).unwrap();
        }
        // 30-minute orders first, in arrival order, then 20, then 10
        assert_eq!(ids(&backlog), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_ties_follow_push_order_not_ids() {
        let mut fifo = Backlog::new(rules::Fifo);
        for id in [5, 2, 9] {
            fifo.push(make_order(id, 10)).unwrap();
        }
        assert_eq!(ids(&fifo), vec![5, 2, 9]);

        let mut lpt = Backlog::new(rules::LongestPrepFirst);
        for (id, prep) in [(7, 20), (3, 20), (1, 40), (4, 20)] {
            lpt.push(make_order(id, prep)).unwrap();
        }
        assert_eq!(ids(&lpt), vec![1, 7, 3, 4]);
    }

    #[test]
    fn test_restore_keeps_position() {
        let mut backlog = Backlog::new(rules::Fifo);
        for id in [4, 1, 3] {
            backlog.push(make_order(id, 5)).unwrap();
        }
        let (key, head) = backlog.take_front().unwrap();
        assert_eq!(head.id(), OrderId(4));
        assert!(!backlog.contains(OrderId(4)));

        backlog.push(make_order(8, 5)).unwrap();
        backlog.restore(key, head);
        assert_eq!(ids(&backlog), vec![4, 1, 3, 8]);
        assert_eq!(backlog.get(OrderId(4)).map(|o| o.id()), Some(OrderId(4)));
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut backlog = Backlog::new(rules::Fifo);
        for id in 1..=4 {
            backlog.push(make_order(id, 5)).unwrap();
        }
        let peeked: Vec<u64> = backlog.peek(2).map(|o| o.id().0).collect();
        assert_eq!(peeked, vec![1, 2]);
        assert_eq!(backlog.len(), 4);
        assert_eq!(backlog.peek(10).count(), 4);
        assert_eq!(backlog.front().map(|o| o.id()), Some(OrderId(1)));
    }

    #[test]
    fn test_pop_front_empties() {
        let mut backlog = Backlog::new(rules::Fifo);
        backlog.push(make_order(1, 5)).unwrap();
        assert!(backlog.contains(OrderId(1)));
        assert_eq!(backlog.pop_front().map(|o| o.id()), Some(OrderId(1)));
        assert!(!backlog.contains(OrderId(1)));
        assert!(backlog.pop_front().is_none());
        assert!(backlog.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut backlog = Backlog::new(rules::Fifo);
        backlog.push(make_order(1, 5)).unwrap();
        let err = backlog.push(make_order(1, 5)).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidState { .. }));
        assert_eq!(backlog.len(), 1);
    }

    #[test]
    fn test_rejects_non_pending() {
        let mut backlog = Backlog::new(rules::Fifo);
        let mut order = make_order(1, 5);
        order.start_cooking(Utc::now()).unwrap();
        assert!(backlog.push(order).is_err());
        assert!(backlog.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let mut backlog = Backlog::new(rules::LongestPrepFirst);
        backlog.push(make_order(5, 12)).unwrap();
        assert_eq!(backlog.get(OrderId(5)).map(|o| o.dish().prep_minutes), Some(12));
        assert!(backlog.get(OrderId(6)).is_none());
    }
}

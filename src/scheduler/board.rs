//! The cooking board: orders currently being prepared.
//!
//! # Capacity
//!
//! An admission must satisfy both limits at once:
//!
//! ```text
//! occupied(category) < quota(category)   and   len < total
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SlotQuota;
use crate::error::{KitchenError, Rejected};
use crate::models::{DishCategory, Order, OrderId, OrderStatus};

/// Bounded set of cooking orders.
#[derive(Debug, Clone)]
pub struct CookingBoard {
    quota: SlotQuota,
    orders: BTreeMap<OrderId, Order>,
    quick: usize,
    slow: usize,
}

impl CookingBoard {
    /// Creates an empty board.
    pub fn new(quota: SlotQuota) -> Self {
        Self {
            quota,
            orders: BTreeMap::new(),
            quick: 0,
            slow: 0,
        }
    }

    pub fn quota(&self) -> SlotQuota {
        self.quota
    }

    /// Orders of a category currently cooking.
    pub fn occupied(&self, category: DishCategory) -> usize {
        match category {
            DishCategory::Quick => self.quick,
            DishCategory::Slow => self.slow,
        }
    }

    /// Slots still open to a category under both limits.
    pub fn free_slots(&self, category: DishCategory) -> usize {
        let by_total = self.quota.total.saturating_sub(self.orders.len());
        let by_category = self
            .quota
            .for_category(category)
            .saturating_sub(self.occupied(category));
        by_total.min(by_category)
    }

    /// Whether one more order of `category` may be admitted.
    pub fn has_room(&self, category: DishCategory) -> bool {
        self.free_slots(category) > 0
    }

    /// Whether the global total is reached.
    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.quota.total
    }

    /// Starts cooking a pending order.
    ///
    /// Sets the estimated completion to `now + prep time`. On failure the
    /// board is unchanged and the order comes back inside [`Rejected`]:
    /// - `InvalidState` if the order is not pending or already on the board
    /// - `CapacityExceeded` if either limit is reached
    pub fn admit(&mut self, mut order: Order, now: DateTime<Utc>) -> Result<OrderId, Rejected> {
        let reject = |reason, order| Err(Rejected { reason, order });

        if let Some(existing) = self.orders.get(&order.id()) {
            return reject(KitchenError::invalid_state(existing, "be admitted"), order);
        }
        if order.status() != OrderStatus::Pending {
            return reject(KitchenError::invalid_state(&order, "be admitted"), order);
        }
        let category = order.category();
        if !self.has_room(category) {
            return reject(KitchenError::CapacityExceeded { category }, order);
        }
        if let Err(reason) = order.start_cooking(now) {
            return reject(reason, order);
        }

        let id = order.id();
        debug!(
            order_id = id.0,
            table = order.table_number(),
            dish = %order.dish().name,
            %category,
            "order admitted to cooking board"
        );
        match category {
            DishCategory::Quick => self.quick += 1,
            DishCategory::Slow => self.slow += 1,
        }
        self.orders.insert(id, order);
        Ok(id)
    }

    /// Marks a cooking order completed and takes it off the board.
    pub fn retire(&mut self, id: OrderId, now: DateTime<Utc>) -> Result<Order, KitchenError> {
        let order = self.orders.get_mut(&id).ok_or(KitchenError::NotFound(id))?;
        order.complete(now)?;

        let order = self.orders.remove(&id).ok_or(KitchenError::NotFound(id))?;
        match order.category() {
            DishCategory::Quick => self.quick -= 1,
            DishCategory::Slow => self.slow -= 1,
        }
        debug!(order_id = id.0, dish = %order.dish().name, "order retired from cooking board");
        Ok(order)
    }

    /// Cooking orders in id order.
    ///
    /// The iterator is lazy and `Clone`, so a reporting surface can walk
    /// it more than once.
    pub fn snapshot(&self) -> impl Iterator<Item = &Order> + Clone + '_ {
        self.orders.values()
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dish;
    use chrono::{TimeDelta, TimeZone};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap()
    }

    fn make_order(id: u64, category: DishCategory, prep: u32) -> Order {
        let dish = Dish::new(format!("D{id}"), prep, category);
        Order::new(OrderId(id), 1, Arc::new(dish), t0())
    }

    #[test]
    fn test_admit_sets_estimate() {
        let mut board = CookingBoard::new(SlotQuota::default());
        let now = t0() + TimeDelta::minutes(3);
        board.admit(make_order(1, DishCategory::Slow, 25), now).unwrap();

        let order = board.get(OrderId(1)).unwrap();
        assert_eq!(order.status(), OrderStatus::Cooking);
        assert_eq!(order.started_at(), Some(now));
        assert_eq!(order.estimated_completion(), Some(now + TimeDelta::minutes(25)));
        assert_eq!(board.occupied(DishCategory::Slow), 1);
    }

    #[test]
    fn test_category_quota() {
        let mut board = CookingBoard::new(SlotQuota::new(5, 3, 2));
        for id in 1..=3 {
            board.admit(make_order(id, DishCategory::Quick, 5), t0()).unwrap();
        }
        assert!(!board.has_room(DishCategory::Quick));
        assert!(board.has_room(DishCategory::Slow));

        let rejected = board
            .admit(make_order(4, DishCategory::Quick, 5), t0())
            .unwrap_err();
        assert_eq!(
            rejected.reason,
            KitchenError::CapacityExceeded {
                category: DishCategory::Quick
            }
        );
        assert_eq!(rejected.order.id(), OrderId(4));
        assert_eq!(rejected.order.status(), OrderStatus::Pending);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_total_quota() {
        // Sub-quotas sum above total: the total must still bind
        let mut board = CookingBoard::new(SlotQuota::new(3, 3, 3));
        board.admit(make_order(1, DishCategory::Quick, 5), t0()).unwrap();
        board.admit(make_order(2, DishCategory::Slow, 5), t0()).unwrap();
        board.admit(make_order(3, DishCategory::Slow, 5), t0()).unwrap();

        assert!(board.is_full());
        assert_eq!(board.free_slots(DishCategory::Quick), 0);
        let (reason, _) = board
            .admit(make_order(4, DishCategory::Quick, 5), t0())
            .unwrap_err()
            .into_parts();
        assert!(matches!(reason, KitchenError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_admit_cooking_order_is_invalid_state() {
        let mut board = CookingBoard::new(SlotQuota::default());
        board.admit(make_order(1, DishCategory::Quick, 5), t0()).unwrap();
        let cooking = board.get(OrderId(1)).cloned().unwrap();
        let before: Vec<OrderId> = board.snapshot().map(|o| o.id()).collect();

        let rejected = board.admit(cooking, t0()).unwrap_err();
        assert!(matches!(
            rejected.reason,
            KitchenError::InvalidState {
                status: OrderStatus::Cooking,
                ..
            }
        ));
        let after: Vec<OrderId> = board.snapshot().map(|o| o.id()).collect();
        assert_eq!(before, after);
        assert_eq!(board.occupied(DishCategory::Quick), 1);
    }

    #[test]
    fn test_admit_completed_order_is_invalid_state() {
        let mut board = CookingBoard::new(SlotQuota::default());
        board.admit(make_order(1, DishCategory::Slow, 5), t0()).unwrap();
        let done = board.retire(OrderId(1), t0()).unwrap();

        let (reason, order) = board.admit(done, t0()).unwrap_err().into_parts();
        assert!(matches!(
            reason,
            KitchenError::InvalidState {
                status: OrderStatus::Completed,
                ..
            }
        ));
        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(board.is_empty());
    }

    #[test]
    fn test_retire() {
        let mut board = CookingBoard::new(SlotQuota::default());
        board.admit(make_order(1, DishCategory::Quick, 5), t0()).unwrap();
        let done_at = t0() + TimeDelta::minutes(4);

        let order = board.retire(OrderId(1), done_at).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.completed_at(), Some(done_at));
        assert_eq!(board.occupied(DishCategory::Quick), 0);
        assert!(!board.contains(OrderId(1)));

        assert_eq!(
            board.retire(OrderId(1), done_at).unwrap_err(),
            KitchenError::NotFound(OrderId(1))
        );
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let mut board = CookingBoard::new(SlotQuota::default());
        board.admit(make_order(2, DishCategory::Quick, 5), t0()).unwrap();
        board.admit(make_order(1, DishCategory::Slow, 5), t0()).unwrap();

        let snapshot = board.snapshot();
        let first: Vec<OrderId> = snapshot.clone().map(|o| o.id()).collect();
        let second: Vec<OrderId> = snapshot.map(|o| o.id()).collect();
        assert_eq!(first, vec![OrderId(1), OrderId(2)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quota_invariant_random() {
        let mut rng = StdRng::seed_from_u64(2024);
        let quota = SlotQuota::new(5, 3, 2);
        let mut board = CookingBoard::new(quota);
        let mut next_id = 0u64;

        for _ in 0..2000 {
            let head = board.snapshot().next().map(|o| o.id());
            if rng.random_bool(0.6) {
                next_id += 1;
                let category = if rng.random_bool(0.5) {
                    DishCategory::Quick
                } else {
                    DishCategory::Slow
                };
                let _ = board.admit(make_order(next_id, category, 5), t0());
            } else if let Some(id) = head {
                board.retire(id, t0()).unwrap();
            }

            assert!(board.len() <= quota.total);
            let quick = board
                .snapshot()
                .filter(|o| o.category() == DishCategory::Quick)
                .count();
            let slow = board.len() - quick;
            assert!(quick <= quota.quick);
            assert!(slow <= quota.slow);
            assert_eq!(quick, board.occupied(DishCategory::Quick));
            assert_eq!(slow, board.occupied(DishCategory::Slow));
        }
    }
}

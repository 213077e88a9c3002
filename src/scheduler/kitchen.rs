//! Kitchen order scheduler.
//!
//! # Algorithm
//!
//! 1. `submit`: resolve the dish, assign the next id, queue it by category.
//! 2. `fill_cooking_board`: for each category in dispatch order (quick, then
//!    slow), pop the backlog head while the board has room for it.
//! 3. `complete_orders`: retire each named cooking order, then fill again so
//!    freed slots are backfilled in the same call.
//!
//! # Complexity
//! Submission and each admission are O(log n) in the backlog size.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{CookingBoard, KitchenKpi, KitchenSnapshot};
use crate::catalog::MenuCatalog;
use crate::config::KitchenConfig;
use crate::dispatching::OrderQueues;
use crate::error::{ConfigError, KitchenError};
use crate::models::{Dish, DishCategory, Order, OrderId};

/// Where an order currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderLocation {
    /// Pending in a category backlog.
    Queued,
    /// On the cooking board.
    Cooking,
    /// In the completed log.
    Completed,
}

/// Result for one id of a completion batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub id: OrderId,
    pub result: Result<(), KitchenError>,
}

/// Per-item results of [`KitchenScheduler::complete_orders`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompletionReport {
    /// One entry per requested id, in request order.
    pub outcomes: Vec<CompletionOutcome>,
    /// Orders admitted by the backfill that followed the batch.
    pub backfilled: Vec<OrderId>,
}

impl CompletionReport {
    /// Ids that were retired.
    pub fn succeeded(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.id)
    }

    /// Ids that failed, with their error.
    pub fn failed(&self) -> impl Iterator<Item = (OrderId, &KitchenError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id, e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Single-owner kitchen state: two backlogs, the cooking board and the
/// completed log.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::Utc;
/// use kitchen_dispatch::catalog::Menu;
/// use kitchen_dispatch::config::KitchenConfig;
/// use kitchen_dispatch::models::Dish;
/// use kitchen_dispatch::scheduler::KitchenScheduler;
///
/// let menu = Menu::from_dishes([
///     Dish::quick("Patatas Bravas", 8).with_ingredient("potato"),
///     Dish::slow("Paella", 35).with_ingredient("rice"),
/// ])
/// .unwrap();
/// let mut kitchen = KitchenScheduler::new(Arc::new(menu), KitchenConfig::default()).unwrap();
///
/// let now = Utc::now();
/// let bravas = kitchen.submit(3, "Patatas Bravas", now).unwrap();
/// kitchen.submit(3, "Paella", now).unwrap();
///
/// assert_eq!(kitchen.fill_cooking_board(now).len(), 2);
/// let report = kitchen.complete_orders([bravas], now);
/// assert!(report.all_succeeded());
/// assert_eq!(kitchen.completed().len(), 1);
/// ```
#[derive(Debug)]
pub struct KitchenScheduler {
    catalog: Arc<dyn MenuCatalog>,
    config: KitchenConfig,
    queues: OrderQueues,
    board: CookingBoard,
    completed: Vec<Order>,
    completed_index: HashMap<OrderId, usize>,
    next_id: u64,
}

impl KitchenScheduler {
    /// Creates an empty kitchen. Fails if the slot quota is invalid.
    pub fn new(catalog: Arc<dyn MenuCatalog>, config: KitchenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            board: CookingBoard::new(config.slots),
            config,
            queues: OrderQueues::new(),
            completed: Vec::new(),
            completed_index: HashMap::new(),
            next_id: 1,
        })
    }

    /// Replaces the backlogs, e.g. to install a different backlog policy.
    ///
    /// Only effective before the first submission and with empty queues;
    /// otherwise the call is refused with a warning.
    pub fn with_queues(mut self, queues: OrderQueues) -> Self {
        if self.next_id == 1 && queues.is_empty() {
            self.queues = queues;
        } else {
            warn!(
                issued = self.next_id - 1,
                offered = queues.total_len(),
                "backlogs not replaced: orders already issued or queued"
            );
        }
        self
    }

    /// Accepts an order for `dish_name` at table `table_number`.
    ///
    /// # Errors
    /// - `InvalidTable` if the table number is 0
    /// - `UnknownDish` if the catalog has no such dish
    pub fn submit(
        &mut self,
        table_number: u32,
        dish_name: &str,
        now: DateTime<Utc>,
    ) -> Result<OrderId, KitchenError> {
        let dish = resolve_intake(self.catalog.as_ref(), table_number, dish_name)?;
        self.enqueue_order(table_number, dish, now)
    }

    /// Accepts an order for an already resolved dish snapshot.
    pub fn submit_dish(
        &mut self,
        table_number: u32,
        dish: Arc<Dish>,
        now: DateTime<Utc>,
    ) -> Result<OrderId, KitchenError> {
        check_table(table_number)?;
        self.enqueue_order(table_number, dish, now)
    }

    /// Queues an order whose intake was already checked.
    pub(crate) fn enqueue_order(
        &mut self,
        table_number: u32,
        dish: Arc<Dish>,
        now: DateTime<Utc>,
    ) -> Result<OrderId, KitchenError> {
        let id = OrderId(self.next_id);
        debug!(
            order_id = id.0,
            table = table_number,
            dish = %dish.name,
            category = %dish.category,
            "order submitted"
        );
        self.queues.enqueue(Order::new(id, table_number, dish, now))?;
        self.next_id += 1;

        if self.config.dispatch_on_submit {
            self.fill_cooking_board(now);
        }
        Ok(id)
    }

    /// Moves backlog heads onto the board while slots allow, quick first.
    ///
    /// Returns the admitted ids in admission order. Empty backlogs and a
    /// full board are not errors; a second call with nothing changed in
    /// between admits nothing.
    pub fn fill_cooking_board(&mut self, now: DateTime<Utc>) -> Vec<OrderId> {
        let mut admitted = Vec::new();

        for category in DishCategory::ALL {
            while self.board.has_room(category) {
                let Some((key, order)) = self.queues.take_front(category) else {
                    break;
                };
                match self.board.admit(order, now) {
                    Ok(id) => admitted.push(id),
                    Err(rejected) => {
                        let (reason, order) = rejected.into_parts();
                        warn!(order_id = order.id().0, %category, error = %reason, "admission rejected");
                        self.queues.restore(key, order);
                        break;
                    }
                }
            }
        }

        if !admitted.is_empty() {
            info!(
                admitted = admitted.len(),
                cooking = self.board.len(),
                queued = self.queues.total_len(),
                "cooking board filled"
            );
        }
        admitted
    }

    /// Retires each named cooking order, then backfills the board.
    ///
    /// Failures are reported per id and never abort the batch:
    /// - `NotFound` for an id the kitchen never issued
    /// - `InvalidState` for an id still queued or already completed,
    ///   including an id repeated within the batch
    pub fn complete_orders<I>(&mut self, ids: I, now: DateTime<Utc>) -> CompletionReport
    where
        I: IntoIterator<Item = OrderId>,
    {
        let outcomes: Vec<CompletionOutcome> = ids
            .into_iter()
            .map(|id| CompletionOutcome {
                id,
                result: self.retire_one(id, now),
            })
            .collect();

        let report = CompletionReport {
            backfilled: self.fill_cooking_board(now),
            outcomes,
        };
        for (id, error) in report.failed() {
            warn!(order_id = id.0, %error, "order not completed");
        }
        info!(
            requested = report.outcomes.len(),
            completed = report.succeeded().count(),
            backfilled = report.backfilled.len(),
            "completion batch processed"
        );
        report
    }

    fn retire_one(&mut self, id: OrderId, now: DateTime<Utc>) -> Result<(), KitchenError> {
        match self.board.retire(id, now) {
            Ok(order) => {
                self.completed_index.insert(id, self.completed.len());
                self.completed.push(order);
                Ok(())
            }
            Err(KitchenError::NotFound(_)) => match self.find(id) {
                Some((order, _)) => Err(KitchenError::invalid_state(order, "complete")),
                None => Err(KitchenError::NotFound(id)),
            },
            Err(error) => Err(error),
        }
    }

    /// Looks an order up wherever it currently is.
    pub fn find(&self, id: OrderId) -> Option<(&Order, OrderLocation)> {
        if let Some(order) = self.board.get(id) {
            return Some((order, OrderLocation::Cooking));
        }
        if let Some(order) = self.queues.get(id) {
            return Some((order, OrderLocation::Queued));
        }
        self.completed_index
            .get(&id)
            .and_then(|&index| self.completed.get(index))
            .map(|order| (order, OrderLocation::Completed))
    }

    pub fn locate(&self, id: OrderId) -> Option<OrderLocation> {
        self.find(id).map(|(_, location)| location)
    }

    pub fn queues(&self) -> &OrderQueues {
        &self.queues
    }

    pub fn board(&self) -> &CookingBoard {
        &self.board
    }

    /// Completed orders, in completion order.
    pub fn completed(&self) -> &[Order] {
        &self.completed
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<dyn MenuCatalog> {
        &self.catalog
    }

    /// Point-in-time copy of the whole kitchen state.
    pub fn snapshot(&self) -> KitchenSnapshot {
        KitchenSnapshot::capture(self)
    }

    /// Service metrics over the completed log.
    pub fn kpi(&self) -> KitchenKpi {
        KitchenKpi::calculate(&self.completed)
    }
}

fn check_table(table_number: u32) -> Result<(), KitchenError> {
    if table_number == 0 {
        return Err(KitchenError::InvalidTable(table_number));
    }
    Ok(())
}

/// Intake checks shared by every submit path: a valid table and a dish
/// known to the catalog.
pub(crate) fn resolve_intake(
    catalog: &dyn MenuCatalog,
    table_number: u32,
    dish_name: &str,
) -> Result<Arc<Dish>, KitchenError> {
    check_table(table_number)?;
    catalog
        .find_dish(dish_name)
        .ok_or_else(|| KitchenError::UnknownDish(dish_name.to_string()))
}

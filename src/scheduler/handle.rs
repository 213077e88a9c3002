//! Shared, thread-safe access to one kitchen.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::kitchen::resolve_intake;
use super::{CompletionReport, KitchenKpi, KitchenScheduler, KitchenSnapshot};
use crate::catalog::MenuCatalog;
use crate::config::KitchenConfig;
use crate::error::{ConfigError, KitchenError};
use crate::models::OrderId;

/// Cloneable handle to a [`KitchenScheduler`].
///
/// Every request takes the scheduler lock once, so intake and completion
/// from different threads never interleave inside an operation. Dish
/// lookups go to the catalog before the lock is taken.
#[derive(Debug, Clone)]
pub struct KitchenHandle {
    scheduler: Arc<Mutex<KitchenScheduler>>,
    catalog: Arc<dyn MenuCatalog>,
}

impl KitchenHandle {
    /// Builds a scheduler and wraps it.
    pub fn new(catalog: Arc<dyn MenuCatalog>, config: KitchenConfig) -> Result<Self, ConfigError> {
        let scheduler = KitchenScheduler::new(Arc::clone(&catalog), config)?;
        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            catalog,
        })
    }

    /// Wraps an existing scheduler.
    pub fn from_scheduler(scheduler: KitchenScheduler) -> Self {
        let catalog = Arc::clone(scheduler.catalog());
        Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            catalog,
        }
    }

    /// See [`KitchenScheduler::submit`].
    pub fn submit(
        &self,
        table_number: u32,
        dish_name: &str,
        now: DateTime<Utc>,
    ) -> Result<OrderId, KitchenError> {
        let dish = resolve_intake(self.catalog.as_ref(), table_number, dish_name)?;
        self.scheduler.lock().enqueue_order(table_number, dish, now)
    }

    pub fn fill_cooking_board(&self, now: DateTime<Utc>) -> Vec<OrderId> {
        self.scheduler.lock().fill_cooking_board(now)
    }

    pub fn complete_orders<I>(&self, ids: I, now: DateTime<Utc>) -> CompletionReport
    where
        I: IntoIterator<Item = OrderId>,
    {
        self.scheduler.lock().complete_orders(ids, now)
    }

    pub fn snapshot(&self) -> KitchenSnapshot {
        self.scheduler.lock().snapshot()
    }

    pub fn kpi(&self) -> KitchenKpi {
        self.scheduler.lock().kpi()
    }

    /// Runs a read-only closure under the lock.
    pub fn with_scheduler<R>(&self, f: impl FnOnce(&KitchenScheduler) -> R) -> R {
        f(&*self.scheduler.lock())
    }

    pub fn catalog(&self) -> &Arc<dyn MenuCatalog> {
        &self.catalog
    }
}

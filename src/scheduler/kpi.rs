//! Kitchen service metrics (KPIs).
//!
//! Computed from the completed log.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completed | Orders retired, total and per category |
//! | Avg Queue Wait | Mean(started_at - created_at) |
//! | Avg Lead Time | Mean(completed_at - created_at) |
//! | On-Time Rate | Fraction retired no later than the estimate |
//! | Max Overrun | Largest (completed_at - estimated_completion) |
//!
//! All times are in minutes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{DishCategory, Order};

/// Service performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenKpi {
    pub completed: usize,
    pub completed_by_category: BTreeMap<DishCategory, usize>,
    /// Mean time from intake to admission (minutes).
    pub avg_queue_wait_minutes: f64,
    /// Mean time from intake to retirement (minutes).
    pub avg_lead_time_minutes: f64,
    /// Fraction of orders retired no later than their estimate (0.0..1.0).
    pub on_time_rate: f64,
    /// Largest overrun past an estimate (minutes, 0 if none overran).
    pub max_overrun_minutes: f64,
}

impl KitchenKpi {
    /// Computes KPIs from completed orders.
    ///
    /// Orders that are not completed are ignored.
    pub fn calculate<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut completed = 0usize;
        let mut by_category: BTreeMap<DishCategory, usize> = BTreeMap::new();
        let mut total_wait = 0.0;
        let mut total_lead = 0.0;
        let mut on_time = 0usize;
        let mut max_overrun = 0.0f64;

        for order in orders {
            let (Some(lead), Some(done), Some(eta)) = (
                order.lead_time(),
                order.completed_at(),
                order.estimated_completion(),
            ) else {
                continue;
            };
            completed += 1;
            *by_category.entry(order.category()).or_insert(0) += 1;

            total_lead += minutes(lead);
            total_wait += order.queue_wait().map(minutes).unwrap_or(0.0);

            if done <= eta {
                on_time += 1;
            } else {
                max_overrun = max_overrun.max(minutes(done - eta));
            }
        }

        let (avg_queue_wait_minutes, avg_lead_time_minutes, on_time_rate) = if completed == 0 {
            (0.0, 0.0, 1.0)
        } else {
            let n = completed as f64;
            (total_wait / n, total_lead / n, on_time as f64 / n)
        };

        Self {
            completed,
            completed_by_category: by_category,
            avg_queue_wait_minutes,
            avg_lead_time_minutes,
            on_time_rate,
            max_overrun_minutes: max_overrun,
        }
    }

    /// Whether service meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_overrun_minutes: f64, min_on_time_rate: f64) -> bool {
        self.max_overrun_minutes <= max_overrun_minutes && self.on_time_rate >= min_on_time_rate
    }
}

fn minutes(delta: chrono::TimeDelta) -> f64 {
    delta.num_seconds() as f64 / 60.0
}

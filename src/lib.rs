//! Kitchen order dispatch and cooking-slot scheduling.
//!
//! Orders arrive per table, wait in one of two backlogs according to the
//! dish category, and are admitted onto a bounded cooking board. Quick
//! dishes (tapas) are served first-in first-out; slow dishes (mains) are
//! started longest preparation first so they finish alongside the rest
//! of the table.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Dish`, `DishCategory`, `Order`, `OrderId`
//! - **`dispatching`**: Backlog ordering policies and the two order queues
//! - **`scheduler`**: Cooking board, `KitchenScheduler`, shared handle,
//!   snapshots and KPIs
//! - **`catalog`**: Menu catalog trait, in-memory menu, CSV menu files
//! - **`config`**: Slot quotas and scheduler settings (TOML)
//! - **`validation`**: Menu and quota integrity checks
//! - **`error`**: Error types
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod catalog;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

#[cfg(test)]
mod testing;

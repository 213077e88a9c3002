//! Kitchen scheduling: cooking board, scheduler, and reporting.
//!
//! # Flow
//!
//! ```text
//! submit ──> OrderQueues ──fill_cooking_board──> CookingBoard ──complete_orders──> completed log
//!            (quick: FIFO,                       (quota per category
//!             slow: longest prep first)           and in total)
//! ```
//!
//! `KitchenScheduler` owns all state and is mutated through `&mut self`;
//! `KitchenHandle` shares one scheduler across threads.
//!
//! # KPI
//!
//! `KitchenKpi` computes service metrics over the completed log: queue
//! wait, lead time, and on-time rate against the admission estimate.

mod board;
mod handle;
mod kitchen;
mod kpi;
mod report;

pub use board::CookingBoard;
pub use handle::KitchenHandle;
pub use kitchen::{CompletionOutcome, CompletionReport, KitchenScheduler, OrderLocation};
pub use kpi::KitchenKpi;
pub use report::KitchenSnapshot;

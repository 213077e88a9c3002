//! Kitchen domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Dish` | Immutable menu item (name, prep time, ingredients, category) |
//! | `DishCategory` | `Quick` (FIFO backlog) or `Slow` (longest prep first) |
//! | `Order` | One dish for one table, moving `Pending → Cooking → Completed` |
//! | `OrderId` | Intake-order identifier |

mod dish;
mod order;

pub use dish::{Dish, DishCategory, UnknownCategory};
pub use order::{Order, OrderId, OrderStatus};

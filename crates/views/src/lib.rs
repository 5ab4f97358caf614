//! Read-side views.
//!
//! Everything here is a cheap pure function over freshly read state:
//! projection structs per read use-case, the shopping list generator, the
//! activity timeline merger and the dashboard summary. Nothing mutates, and
//! nothing may be cached across a mutation.

pub mod dashboard;
pub mod projections;
pub mod shopping;
pub mod timeline;

pub use dashboard::{summarize, DashboardSummary};
pub use projections::{item_card, item_with_location, ItemCardView, ItemWithLocation};
pub use shopping::{shopping_list, ShoppingListEntry, ShoppingPriority, ShoppingReason};
pub use timeline::{merge_timeline, TimelineEntry, TimelineSource};

//! foodstock core library
//!
//! Food collection store, query engine, session and theme state for the
//! foodstock inventory manager.

pub mod models;
pub mod query;
pub mod seed;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod theme;
pub mod validation;

pub use models::{format_price, Appearance, AuthState, FoodDraft, FoodItem, FoodPatch, ThemeMode, User};
pub use query::{filter_foods, CategoryFilter, FoodFilters, QueryResult, DEFAULT_PAGE_SIZE};
pub use session::{default_users, AuthError, SessionStore};
pub use stats::DashboardStats;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError, StorageKey};
pub use store::{FoodStore, LoadOutcome, Lookup, SeedReason, SubscriptionId};
pub use theme::ThemeStore;
pub use validation::{FieldErrors, FoodForm, FormField, FOOD_CATEGORIES};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

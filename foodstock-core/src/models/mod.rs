mod food;
mod theme_mode;
mod user;

pub use food::{format_price, FoodDraft, FoodItem, FoodPatch};
pub use theme_mode::{Appearance, ThemeMode};
pub use user::{AuthState, User};

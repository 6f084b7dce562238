use serde::Serialize;
use std::collections::HashSet;

use crate::models::FoodItem;

/// How many of the latest items the dashboard shows.
pub const RECENT_LIMIT: usize = 3;

/// Summary numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_foods: usize,
    pub total_categories: usize,
    /// Mean price rounded to whole units; 0 for an empty collection.
    pub average_price: u64,
    /// Newest first.
    pub recent_foods: Vec<FoodItem>,
}

impl DashboardStats {
    pub fn compute(foods: &[FoodItem]) -> Self {
        let total_categories = foods
            .iter()
            .map(|food| food.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        let average_price = if foods.is_empty() {
            0
        } else {
            let sum: u128 = foods.iter().map(|food| u128::from(food.price)).sum();
            let count = foods.len() as u128;
            // round half up
            ((sum * 2 + count) / (count * 2)) as u64
        };

        let recent_foods = foods.iter().rev().take(RECENT_LIMIT).cloned().collect();

        Self {
            total_foods: foods.len(),
            total_categories,
            average_price,
            recent_foods,
        }
    }
}

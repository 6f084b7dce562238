//! Search, category filtering and pagination over the food collection.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::FoodItem;

/// Page size used by the food list.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Category selection. `All` is spelled `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// One query against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodFilters {
    pub search: String,
    pub category: CategoryFilter,
    /// 1-based; 0 is read as 1.
    pub page: usize,
    /// 0 is read as 1.
    pub limit: usize,
}

impl Default for FoodFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FoodFilters {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn matches(&self, food: &FoodItem, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || food.name.to_lowercase().contains(needle)
            || food.description.to_lowercase().contains(needle);

        text_match && self.category.matches(&food.category)
    }
}

/// A page of matching items plus counts over all matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<FoodItem>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub limit: usize,
}

impl QueryResult {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Applies `filters` to `foods`. Pure: same input, same output.
pub fn filter_foods(foods: &[FoodItem], filters: &FoodFilters) -> QueryResult {
    let needle = filters.search.to_lowercase();
    let page = filters.page.max(1);
    let limit = filters.limit.max(1);

    let matched: Vec<&FoodItem> = foods
        .iter()
        .filter(|food| filters.matches(food, &needle))
        .collect();

    let total = matched.len();
    let start = (page - 1).saturating_mul(limit);

    let items = matched
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();

    QueryResult {
        items,
        total,
        total_pages: total.div_ceil(limit),
        page,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodDraft;
    use crate::seed::seed_foods;
    use chrono::Utc;

    fn numbered(count: usize) -> Vec<FoodItem> {
        (1..=count)
            .map(|i| {
                let draft = FoodDraft::new(format!("Food {}", i), "Other", 1000)
                    .with_description("plain")
                    .with_image("https://example.com/x.jpg");
                FoodItem::from_draft(i.to_string(), draft, Utc::now())
            })
            .collect()
    }

    #[test]
    fn test_default_filters_return_everything() {
        let foods = seed_foods(Utc::now());
        let result = filter_foods(&foods, &FoodFilters::default());

        assert_eq!(result.total, foods.len());
        assert_eq!(result.items, foods);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let foods = seed_foods(Utc::now());
        let result = filter_foods(&foods, &FoodFilters::default().with_search("NASI"));

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Nasi Goreng Spesial");
    }

    #[test]
    fn test_search_matches_description() {
        let foods = seed_foods(Utc::now());
        // "udang" only appears in a description
        let result = filter_foods(&foods, &FoodFilters::default().with_search("udang"));

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Tom Yum Goong");
    }

    #[test]
    fn test_category_filter() {
        let foods = seed_foods(Utc::now());
        let result = filter_foods(&foods, &FoodFilters::default().with_category("Italian"));

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Spaghetti Carbonara");
    }

    #[test]
    fn test_category_is_exact_match() {
        let foods = seed_foods(Utc::now());
        let result = filter_foods(&foods, &FoodFilters::default().with_category("italian"));

        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_search_and_category_compose() {
        let foods = seed_foods(Utc::now());

        // "dengan" appears in every seed description
        let broad = filter_foods(&foods, &FoodFilters::default().with_search("dengan"));
        assert_eq!(broad.total, 5);

        let narrowed = filter_foods(
            &foods,
            &FoodFilters::default()
                .with_search("dengan")
                .with_category("Japanese"),
        );
        assert_eq!(narrowed.total, 1);
        assert_eq!(narrowed.items[0].name, "Sushi Salmon Roll");
    }

    #[test]
    fn test_pagination_windows() {
        let foods = numbered(14);
        let filters = FoodFilters::default().with_limit(6);

        let first = filter_foods(&foods, &filters.clone().with_page(1));
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.items[0].id, "1");
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = filter_foods(&foods, &filters.clone().with_page(3));
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].id, "13");
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let foods = numbered(5);
        let result = filter_foods(&foods, &FoodFilters::default().with_page(9));

        assert!(result.items.is_empty());
        assert_eq!(result.total, 5);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_page_and_limit_bounds_hold_for_all_combinations() {
        let foods = numbered(13);

        for limit in 1..=8 {
            for page in 1..=15 {
                let result =
                    filter_foods(&foods, &FoodFilters::default().with_page(page).with_limit(limit));
                assert!(result.items.len() <= limit);
                assert_eq!(result.total_pages, (result.total + limit - 1) / limit);
                if (page - 1) * limit >= result.total {
                    assert!(result.items.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_zero_page_and_limit_are_clamped() {
        let foods = numbered(3);
        let result = filter_foods(&foods, &FoodFilters::default().with_page(0).with_limit(0));

        assert_eq!(result.page, 1);
        assert_eq!(result.limit, 1);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_empty_collection() {
        let result = filter_foods(&[], &FoodFilters::default());
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(""), CategoryFilter::All);
        assert_eq!(
            "Thai".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("Thai".to_string())
        );
        assert_eq!(CategoryFilter::All.to_string(), "all");
    }
}

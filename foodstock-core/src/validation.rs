//! Validation of raw food form input.
//!
//! Errors are collected per field instead of stopping at the first one,
//! and nothing is written unless the whole form is valid.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{FoodDraft, FoodItem};

/// Categories offered when creating or editing a food.
pub const FOOD_CATEGORIES: [&str; 7] = [
    "Indonesian",
    "Italian",
    "American",
    "Japanese",
    "Thai",
    "Chinese",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Category,
    Price,
    Image,
    Description,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Category => write!(f, "category"),
            FormField::Price => write!(f, "price"),
            FormField::Image => write!(f, "image"),
            FormField::Description => write!(f, "description"),
        }
    }
}

/// Error messages keyed by field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw, untrimmed form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl FoodForm {
    /// Prefills a form for editing an existing item.
    pub fn from_item(food: &FoodItem) -> Self {
        Self {
            name: food.name.clone(),
            category: food.category.clone(),
            price: food.price.to_string(),
            description: food.description.clone(),
            image: food.image.clone(),
        }
    }

    /// Trims every field and checks it, returning a draft when all pass.
    pub fn validate(&self) -> Result<FoodDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Food name is required");
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.insert(FormField::Category, "Category is required");
        }

        let price = match parse_price(self.price.trim()) {
            Ok(price) => price,
            Err(message) => {
                errors.insert(FormField::Price, message);
                0
            }
        };

        let image = self.image.trim();
        if image.is_empty() {
            errors.insert(FormField::Image, "Image URL is required");
        } else if !looks_like_url(image) {
            errors.insert(FormField::Image, "Image URL must start with http://, https:// or /");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(FormField::Description, "Description is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(FoodDraft::new(name, category, price)
            .with_description(description)
            .with_image(image))
    }
}

fn parse_price(raw: &str) -> Result<u64, &'static str> {
    if raw.is_empty() {
        return Err("Price is required");
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 && value < u64::MAX as f64 => {
            Ok(value.round() as u64)
        }
        _ => Err("Price must be a valid positive number"),
    }
}

fn looks_like_url(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/')
}

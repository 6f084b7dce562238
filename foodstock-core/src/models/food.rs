use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// A food item in the collection.
///
/// Field names are serialized in camelCase so snapshots keep the
/// `{id, name, category, price, description, image, createdAt, updatedAt}`
/// layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: u64,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Builds an item from a draft with both timestamps set to `now`.
    pub fn from_draft(id: impl Into<String>, draft: FoodDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies every `Some` field of the patch. `id` and `created_at` are
    /// never touched; `updated_at` is left to the caller.
    pub fn apply(&mut self, patch: FoodPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Price: Rp {}", format_price(self.price))?;
        writeln!(f, "Image: {}", self.image)?;
        writeln!(f, "Created: {}", self.created_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "Updated: {}", self.updated_at.format("%Y-%m-%d %H:%M"))?;

        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }

        Ok(())
    }
}

/// A food item that has not been stored yet: no id, no timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodDraft {
    pub name: String,
    pub category: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

impl FoodDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            description: String::new(),
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Partial update for a stored item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl FoodPatch {
    pub fn price(price: u64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }
}

impl From<FoodDraft> for FoodPatch {
    fn from(draft: FoodDraft) -> Self {
        Self {
            name: Some(draft.name),
            category: Some(draft.category),
            price: Some(draft.price),
            description: Some(draft.description),
            image: Some(draft.image),
        }
    }
}

/// Reads any non-negative JSON number as a price, rounded to whole units.
fn deserialize_price<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(de::Error::custom(format!("invalid price: {}", value)));
    }
    Ok(value.round() as u64)
}

/// Formats a price with `.` thousands separators, e.g. `25000` -> `25.000`.
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

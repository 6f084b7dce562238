//! The food collection and its persisted snapshot.
//!
//! The whole collection is stored as one JSON array under the `foods` key.
//! Every mutation rewrites that array in a single write, and the in-memory
//! list only changes once the write succeeded.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::models::{FoodDraft, FoodItem, FoodPatch};
use crate::query::{filter_foods, FoodFilters, QueryResult};
use crate::seed::seed_foods;
use crate::storage::{KeyValueStore, StorageError, StorageKey};

/// Why the seed set was written during [`FoodStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// No snapshot was stored yet.
    Missing,
    /// The stored snapshot could not be parsed and was discarded.
    Corrupt,
}

/// Result of [`FoodStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// An existing snapshot with this many items was restored.
    Restored(usize),
    Seeded(SeedReason),
}

/// Result of a lookup that respects the loaded flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The collection has not been loaded; absence means nothing yet.
    Pending,
    Found(&'a FoodItem),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn found(self) -> Option<&'a FoodItem> {
        match self {
            Lookup::Found(food) => Some(food),
            _ => None,
        }
    }
}

/// What reading the snapshot produced, before any recovery.
enum SnapshotRead {
    Missing,
    Corrupt(serde_json::Error),
    Parsed(Vec<FoodItem>),
}

/// Handle returned by [`FoodStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut(&[FoodItem])>;

/// Owns the authoritative food collection.
pub struct FoodStore<S: KeyValueStore> {
    storage: S,
    foods: Vec<FoodItem>,
    loaded: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
}

impl<S: KeyValueStore> FoodStore<S> {
    /// Creates an unloaded store. Call [`FoodStore::load`] before trusting lookups.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            foods: Vec::new(),
            loaded: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a store and loads it.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The current collection in insertion order.
    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Reads the persisted snapshot, falling back to the seed set when it is
    /// missing or unparsable.
    pub fn load(&mut self) -> Result<LoadOutcome, StorageError> {
        let outcome = match self.read_snapshot()? {
            SnapshotRead::Parsed(foods) => {
                tracing::info!("Loaded {} food(s) from storage", foods.len());
                let count = foods.len();
                self.foods = foods;
                LoadOutcome::Restored(count)
            }
            SnapshotRead::Missing => {
                tracing::info!("No foods snapshot found, writing seed set");
                self.write_seed()?;
                LoadOutcome::Seeded(SeedReason::Missing)
            }
            SnapshotRead::Corrupt(e) => {
                tracing::warn!("Failed to parse foods snapshot, resetting: {}", e);
                self.write_seed()?;
                LoadOutcome::Seeded(SeedReason::Corrupt)
            }
        };

        self.loaded = true;
        self.notify();
        Ok(outcome)
    }

    fn read_snapshot(&self) -> Result<SnapshotRead, StorageError> {
        let Some(raw) = self.storage.get(StorageKey::Foods)? else {
            return Ok(SnapshotRead::Missing);
        };

        Ok(match serde_json::from_str::<Vec<FoodItem>>(&raw) {
            Ok(foods) => SnapshotRead::Parsed(foods),
            Err(e) => SnapshotRead::Corrupt(e),
        })
    }

    fn write_seed(&mut self) -> Result<(), StorageError> {
        let seed = seed_foods(Utc::now());
        self.persist(&seed)?;
        self.foods = seed;
        Ok(())
    }

    fn ensure_loaded(&mut self) -> Result<(), StorageError> {
        if !self.loaded {
            self.load()?;
        }
        Ok(())
    }

    /// Stores a new item built from `draft` and returns it.
    pub fn add(&mut self, draft: FoodDraft) -> Result<FoodItem, StorageError> {
        self.ensure_loaded()?;

        let now = Utc::now();
        let food = FoodItem::from_draft(self.next_id(now), draft, now);

        let mut next = self.foods.clone();
        next.push(food.clone());
        self.commit(next)?;

        tracing::debug!("Added food {} ({})", food.id, food.name);
        Ok(food)
    }

    /// Merges `patch` onto the item with `id` and returns the updated item.
    ///
    /// Unknown ids are a no-op: nothing is written and `Ok(None)` is returned.
    pub fn update(&mut self, id: &str, patch: FoodPatch) -> Result<Option<FoodItem>, StorageError> {
        self.ensure_loaded()?;

        let Some(index) = self.position(id) else {
            tracing::debug!("Update skipped, no food with id {}", id);
            return Ok(None);
        };

        let mut next = self.foods.clone();
        let food = &mut next[index];
        food.apply(patch);
        food.updated_at = Utc::now().max(food.updated_at);
        let updated = food.clone();

        self.commit(next)?;

        tracing::debug!("Updated food {}", id);
        Ok(Some(updated))
    }

    /// Removes the item with `id`. Returns whether an item was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        self.ensure_loaded()?;

        let Some(index) = self.position(id) else {
            tracing::debug!("Delete skipped, no food with id {}", id);
            return Ok(false);
        };

        let mut next = self.foods.clone();
        next.remove(index);
        self.commit(next)?;

        tracing::debug!("Deleted food {}", id);
        Ok(true)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.id == id)
    }

    /// Like [`FoodStore::get_by_id`], but reports [`Lookup::Pending`] until
    /// the collection has been loaded.
    pub fn lookup(&self, id: &str) -> Lookup<'_> {
        if !self.loaded {
            return Lookup::Pending;
        }
        match self.get_by_id(id) {
            Some(food) => Lookup::Found(food),
            None => Lookup::NotFound,
        }
    }

    /// Distinct categories in the order they first appear.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.foods
            .iter()
            .filter(|food| seen.insert(food.category.as_str()))
            .map(|food| food.category.clone())
            .collect()
    }

    pub fn query(&self, filters: &FoodFilters) -> QueryResult {
        filter_foods(&self.foods, filters)
    }

    /// Registers a listener called with the collection after load and after
    /// every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[FoodItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.foods.iter().position(|food| food.id == id)
    }

    /// Millisecond timestamp as a string, bumped past any id already taken.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        loop {
            let id = candidate.to_string();
            if self.get_by_id(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }

    fn persist(&self, foods: &[FoodItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(foods)
            .map_err(|e| StorageError::Serialize(StorageKey::Foods.name(), e))?;
        self.storage.set(StorageKey::Foods, &json)
    }

    fn commit(&mut self, foods: Vec<FoodItem>) -> Result<(), StorageError> {
        self.persist(&foods)?;
        self.foods = foods;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.foods);
        }
    }
}

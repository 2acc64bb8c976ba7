//! In-memory recipe table
//!
//! Single authoritative store shared by every request handler. Construct one
//! explicitly and hand it to consumers behind an `Arc`; there is no ambient
//! global. Single-key operations are linearizable, list and filter reads
//! observe a snapshot taken at some instant during the call.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::recipe::{Recipe, RecipeDto, RecipeId};

/// Errors produced by recipe store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No recipe with id {id}")]
    NotFound { id: RecipeId },

    #[error("Recipe id {id} is already in use")]
    IdCollision { id: RecipeId },
}

/// Concurrency-safe mapping from recipe id to recipe record.
///
/// Identifiers come from a monotonic counter that starts at 1 and is never
/// reset, so deleted ids are not reused and creation order is reflected in
/// id order even under concurrent callers.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: RwLock<HashMap<RecipeId, Recipe>>,
    next_id: AtomicU64,
}

impl RecipeStore {
    /// Creates an empty store with the id counter at its initial position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all current recipes in unspecified order.
    pub async fn all_recipes(&self) -> Vec<Recipe> {
        let recipes = self.recipes.read().await;
        recipes.values().cloned().collect()
    }

    /// Returns the number of stored recipes.
    pub async fn recipe_count(&self) -> usize {
        let recipes = self.recipes.read().await;
        recipes.len()
    }

    /// Inserts a new recipe built from `dto` under the next counter id.
    ///
    /// The payload's own id field is discarded. The occupied-entry check is
    /// defensive: a correct counter never hands out the same id twice, and a
    /// collision stores nothing.
    ///
    /// # Errors
    ///
    /// - `StoreError::IdCollision` - If the generated id is already present
    pub async fn create(&self, dto: RecipeDto) -> Result<Recipe, StoreError> {
        let id = RecipeId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let recipe = dto.into_recipe(id);

        let mut recipes = self.recipes.write().await;
        match recipes.entry(id) {
            Entry::Occupied(_) => Err(StoreError::IdCollision { id }),
            Entry::Vacant(slot) => Ok(slot.insert(recipe).clone()),
        }
    }

    /// Removes and returns the recipe stored under `id`.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` - If no recipe exists under `id`; the store
    ///   is left untouched
    pub async fn remove(&self, id: RecipeId) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.write().await;
        recipes.remove(&id).ok_or(StoreError::NotFound { id })
    }

    /// Replaces the recipe at `id` wholesale with one built from `dto`.
    ///
    /// The stored id wins over any id in the payload. Read-check-swap runs
    /// inside one write-lock critical section, so a concurrent delete or
    /// update cannot surface as a spurious miss: `NotFound` means the id was
    /// genuinely absent when the replacement ran.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` - If no recipe exists under `id`
    pub async fn replace(&self, id: RecipeId, dto: RecipeDto) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.write().await;
        match recipes.entry(id) {
            Entry::Occupied(mut slot) => {
                let recipe = dto.into_recipe(id);
                slot.insert(recipe.clone());
                Ok(recipe)
            }
            Entry::Vacant(_) => Err(StoreError::NotFound { id }),
        }
    }

    /// Returns all recipes whose title contains `filter` case-insensitively.
    ///
    /// Matching is byte-wise after lowercasing, not locale-aware collation.
    /// An empty filter matches every recipe.
    pub async fn filter_by_title(&self, filter: &str) -> Vec<Recipe> {
        let needle = filter.to_lowercase();
        let recipes = self.recipes.read().await;
        recipes
            .values()
            .filter(|recipe| recipe.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Returns all recipes with at least one ingredient whose name contains
    /// `ingredient` case-insensitively.
    pub async fn filter_by_ingredient(&self, ingredient: &str) -> Vec<Recipe> {
        let needle = ingredient.to_lowercase();
        let recipes = self.recipes.read().await;
        recipes
            .values()
            .filter(|recipe| {
                recipe
                    .ingredients
                    .iter()
                    .any(|item| item.name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::recipe::Ingredient;

    fn dto(title: &str, ingredients: &[(&str, &str, i64)]) -> RecipeDto {
        RecipeDto {
            id: None,
            title: title.to_string(),
            ingredients: ingredients
                .iter()
                .map(|(name, unit, quantity)| Ingredient {
                    name: (*name).to_string(),
                    unit: (*unit).to_string(),
                    quantity: *quantity,
                })
                .collect(),
            description: format!("{title} description"),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_from_one() {
        let store = RecipeStore::new();

        let first = store.create(dto("Pasta", &[])).await.unwrap();
        let second = store.create(dto("Soup", &[])).await.unwrap();

        assert_eq!(first.id, RecipeId::new(1));
        assert_eq!(second.id, RecipeId::new(2));
    }

    #[tokio::test]
    async fn test_create_ignores_client_supplied_id() {
        let store = RecipeStore::new();
        let mut payload = dto("Pasta", &[]);
        payload.id = Some(RecipeId::new(500));

        let recipe = store.create(payload).await.unwrap();
        assert_eq!(recipe.id, RecipeId::new(1));
    }

    #[tokio::test]
    async fn test_created_recipe_appears_in_listing() {
        let store = RecipeStore::new();
        let created = store
            .create(dto("Pasta", &[("Flour", "g", 200)]))
            .await
            .unwrap();

        let all = store.all_recipes().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn test_remove_succeeds_exactly_once() {
        let store = RecipeStore::new();
        let created = store.create(dto("Pasta", &[])).await.unwrap();

        let removed = store.remove(created.id).await.unwrap();
        assert_eq!(removed, created);

        let second = store.remove(created.id).await;
        assert!(matches!(second, Err(StoreError::NotFound { id }) if id == created.id));
        assert_eq!(store.recipe_count().await, 0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = RecipeStore::new();
        let first = store.create(dto("Pasta", &[])).await.unwrap();
        store.remove(first.id).await.unwrap();

        let second = store.create(dto("Soup", &[])).await.unwrap();
        assert_eq!(second.id, RecipeId::new(2));
    }

    #[tokio::test]
    async fn test_replace_swaps_every_field_except_id() {
        let store = RecipeStore::new();
        let created = store
            .create(dto("Pasta", &[("Flour", "g", 200)]))
            .await
            .unwrap();

        let mut payload = dto("Ravioli", &[("Egg", "pcs", 2)]);
        payload.id = Some(RecipeId::new(99));
        payload.image_url = Some("https://example.org/ravioli.jpg".to_string());

        let updated = store.replace(created.id, payload).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Ravioli");
        assert_eq!(updated.ingredients[0].name, "Egg");
        assert_eq!(
            updated.image_url.as_deref(),
            Some("https://example.org/ravioli.jpg")
        );

        let all = store.all_recipes().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], updated);
    }

    #[tokio::test]
    async fn test_replace_missing_id_reports_not_found() {
        let store = RecipeStore::new();
        let result = store.replace(RecipeId::new(3), dto("Ghost", &[])).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_filter_by_title_is_case_insensitive() {
        let store = RecipeStore::new();
        store.create(dto("Tomato Soup", &[])).await.unwrap();
        store.create(dto("Pasta", &[])).await.unwrap();

        let matches = store.filter_by_title("TOMATO").await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Tomato Soup");

        assert!(store.filter_by_title("curry").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_filter_matches_everything() {
        let store = RecipeStore::new();
        store.create(dto("Pasta", &[])).await.unwrap();
        store.create(dto("Soup", &[])).await.unwrap();

        assert_eq!(store.filter_by_title("").await.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_ingredient_matches_any_line() {
        let store = RecipeStore::new();
        store
            .create(dto("Pasta", &[("Flour", "g", 200), ("Egg", "pcs", 2)]))
            .await
            .unwrap();
        store
            .create(dto("Salad", &[("Lettuce", "g", 100)]))
            .await
            .unwrap();

        let matches = store.filter_by_ingredient("flour").await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Pasta");

        assert!(store.filter_by_ingredient("butter").await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_unique_increasing_ids() {
        let store = Arc::new(RecipeStore::new());

        let tasks: Vec<_> = (0..64)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(dto(&format!("Recipe {n}"), &[])).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id.as_u64());
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&64));
        assert_eq!(store.recipe_count().await, 64);
    }

    #[tokio::test]
    async fn test_concurrent_removes_hand_out_each_recipe_once() {
        let store = Arc::new(RecipeStore::new());
        let created = store.create(dto("Pasta", &[])).await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = created.id;
                tokio::spawn(async move { store.remove(id).await })
            })
            .collect();

        let mut wins = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }
}

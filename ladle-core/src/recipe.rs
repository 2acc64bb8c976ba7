//! Recipe domain model and wire types
//!
//! Defines the stored `Recipe` record, its embedded `Ingredient` entries,
//! and the `RecipeDto` input shape accepted on create and update.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a recipe.
///
/// Identifiers are allocated from a process-wide monotonic counter, are
/// strictly increasing, and are never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl RecipeId {
    /// Creates a RecipeId from a raw integer.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying identifier as u64.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single ingredient line embedded in a recipe.
///
/// Owned exclusively by its parent recipe and compared structurally;
/// ingredients are not independently addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Ingredient name, free text
    pub name: String,
    /// Measurement unit, free text ("g", "cup")
    pub unit: String,
    /// Amount in the given unit
    pub quantity: i64,
}

/// Stored recipe record.
///
/// The `id` is assigned by the store at creation time and immutable
/// thereafter; an update replaces every other field wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub description: String,
    pub image_url: Option<String>,
}

/// Client-supplied recipe payload for create and update requests.
///
/// Mirrors `Recipe` but the `id` field is ignored: the store assigns the
/// identifier on create and the path id wins on update. Missing fields bind
/// to their defaults rather than rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: Option<RecipeId>,
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub description: String,
    pub image_url: Option<String>,
}

impl RecipeDto {
    /// Builds a `Recipe` from this payload under a server-chosen id.
    ///
    /// Any id carried in the payload is discarded here; this is the single
    /// place where dto fields become a stored record.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dto() -> RecipeDto {
        RecipeDto {
            id: None,
            title: "Pasta".to_string(),
            ingredients: vec![Ingredient {
                name: "Flour".to_string(),
                unit: "g".to_string(),
                quantity: 200,
            }],
            description: "Simple pasta".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_into_recipe_assigns_server_id() {
        let mut dto = sample_dto();
        dto.id = Some(RecipeId::new(999));

        let recipe = dto.into_recipe(RecipeId::new(1));
        assert_eq!(recipe.id, RecipeId::new(1));
        assert_eq!(recipe.title, "Pasta");
        assert_eq!(recipe.ingredients.len(), 1);
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = sample_dto().into_recipe(RecipeId::new(7));
        let json = serde_json::to_value(&recipe).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Pasta");
        assert_eq!(json["ingredients"][0]["name"], "Flour");
        assert_eq!(json["ingredients"][0]["quantity"], 200);
        // Optional image serializes as an explicit null
        assert!(json["imageUrl"].is_null());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_dto_missing_fields_bind_to_defaults() {
        let dto: RecipeDto = serde_json::from_str(r#"{"title":"Toast"}"#).unwrap();
        assert_eq!(dto.title, "Toast");
        assert!(dto.ingredients.is_empty());
        assert_eq!(dto.description, "");
        assert!(dto.image_url.is_none());
        assert!(dto.id.is_none());
    }

    #[test]
    fn test_dto_accepts_and_carries_client_id() {
        let dto: RecipeDto =
            serde_json::from_str(r#"{"id":42,"title":"Toast","description":"x"}"#).unwrap();
        assert_eq!(dto.id, Some(RecipeId::new(42)));
    }

    #[test]
    fn test_recipe_id_display() {
        assert_eq!(RecipeId::new(15).to_string(), "15");
        assert_eq!(RecipeId::new(15).as_u64(), 15);
    }
}

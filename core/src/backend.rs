use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::models::{Calories, RecipeRecord};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/recipes/get-recipes";

/// Body of a successful `get-recipes` call: recipe name → recipe data, in the
/// order the backend produced them.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub recipes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SearchResponse {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.as_ref().is_none_or(serde_json::Map::is_empty)
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoteRecipe {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub calories: Option<Calories>,
    #[serde(default)]
    pub preparation: BTreeMap<String, String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// Body the backend sends with a 400 for ingredients it refuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Query sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: Vec<String>,
    pub portions: Option<String>,
}

impl SearchQuery {
    /// The `ingredients` parameter: comma-joined, encoding left to the HTTP client.
    #[must_use]
    pub fn ingredients_param(&self) -> String {
        self.ingredients.join(",")
    }
}

/// Normalize a backend response into records. Entries the backend sent
/// without an id are numbered by position, starting at 1. Entries that do
/// not have the expected shape are skipped.
#[must_use]
pub fn recipes_from_response(resp: SearchResponse) -> Vec<RecipeRecord> {
    let Some(recipes) = resp.recipes else {
        return Vec::new();
    };

    recipes
        .into_iter()
        .enumerate()
        .filter_map(|(index, (name, value))| {
            match serde_json::from_value::<RemoteRecipe>(value) {
                Ok(remote) => Some(RecipeRecord {
                    id: Some(remote.id.unwrap_or(index as u64 + 1)),
                    name,
                    calories: remote.calories,
                    preparation: remote.preparation,
                    ingredients: remote.ingredients,
                }),
                Err(e) => {
                    warn!(%name, "skipping malformed recipe: {e}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> SearchResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_recipes_numbered_in_backend_order() {
        let resp = parse(
            r#"{"recipes": {
                "Zucchini Fritters": {"calories": "220", "preparation": {"1": "Grate"}},
                "Apple Crumble": {"calories": 310, "preparation": {"2": "Bake", "1": "Chop"}}
            }}"#,
        );
        let records = recipes_from_response(resp);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Zucchini Fritters");
        assert_eq!(records[0].id, Some(1));
        assert_eq!(records[1].name, "Apple Crumble");
        assert_eq!(records[1].id, Some(2));
        assert_eq!(records[1].calories_label(), "310");
    }

    #[test]
    fn test_backend_id_kept() {
        let resp = parse(r#"{"recipes": {"Soup": {"id": 77, "preparation": {}}}}"#);
        let records = recipes_from_response(resp);
        assert_eq!(records[0].id, Some(77));
    }

    #[test]
    fn test_ingredients_optional() {
        let resp = parse(
            r#"{"recipes": {
                "Salad": {"preparation": {"1": "Toss"}, "ingredients": ["lettuce", "oil"]},
                "Toast": {"preparation": {"1": "Toast"}}
            }}"#,
        );
        let records = recipes_from_response(resp);
        assert_eq!(records[0].ingredients(), ["lettuce", "oil"]);
        assert!(records[1].ingredients.is_none());
        assert!(records[1].calories.is_none());
    }

    #[test]
    fn test_empty_and_missing_recipes() {
        assert!(parse(r#"{"recipes": {}}"#).is_empty());
        assert!(parse("{}").is_empty());
        assert!(recipes_from_response(parse("{}")).is_empty());
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let resp = parse(
            r#"{"recipes": {"Bad": "just a string", "Good": {"preparation": {"1": "Cook"}}}}"#,
        );
        let records = recipes_from_response(resp);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
        assert_eq!(records[0].id, Some(2));
    }

    #[test]
    fn test_ingredients_param() {
        let q = SearchQuery {
            ingredients: vec!["eggs".to_string(), "milk".to_string()],
            portions: None,
        };
        assert_eq!(q.ingredients_param(), "eggs,milk");
    }

    #[test]
    fn test_error_body() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": {"message": "rocks are not food"}}"#).unwrap();
        assert_eq!(body.error.unwrap().message, "rocks are not food");
    }
}

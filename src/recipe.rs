use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

use crate::config::RecipeConfig;
use crate::direction::DirectionEntry;
use crate::error::Result;
use crate::ingredient::{Ingredient, IngredientEntry, DEFAULT_UNIT};
use crate::schema::JsonRecipe;
use crate::source::Source;

/// A complete recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub ingredients: Vec<IngredientEntry>,
    pub directions: Vec<DirectionEntry>,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        source: Option<Source>,
        ingredients: Vec<IngredientEntry>,
        directions: Vec<DirectionEntry>,
    ) -> Self {
        Recipe {
            title: title.into(),
            source,
            ingredients,
            directions,
        }
    }

    /// Whether `value` is a valid recipe document.
    pub fn is_valid(value: &Value) -> bool {
        JsonRecipe::validate(value.clone()).is_ok()
    }

    /// Parses a recipe from JSON text.
    pub fn from_json_str(json: &str) -> Result<Recipe> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_json_str_with_config(json: &str, config: &RecipeConfig) -> Result<Recipe> {
        Self::from_value_with_config(serde_json::from_str(json)?, config)
    }

    /// Reads a JSON recipe document from `reader` to the end.
    pub fn from_reader_with_config(mut reader: impl Read, config: &RecipeConfig) -> Result<Recipe> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str_with_config(&json, config)
    }

    /// Builds a recipe from a JSON document, which must validate against the
    /// recipe schema.
    pub fn from_value(value: Value) -> Result<Recipe> {
        Self::assemble(value, DEFAULT_UNIT)
    }

    pub fn from_value_with_config(value: Value, config: &RecipeConfig) -> Result<Recipe> {
        Self::assemble(value, &config.default_unit)
    }

    fn assemble(value: Value, default_unit: &str) -> Result<Recipe> {
        let data = JsonRecipe::validate(value).map_err(|e| {
            warn!("Rejected recipe document: {}", e);
            e
        })?;

        let source = data.source.map(Source::from_schema).transpose()?;
        // One bad ingredient fails the whole recipe
        let ingredients = data
            .ingredients
            .into_iter()
            .map(|entry| IngredientEntry::from_schema(entry, default_unit))
            .collect::<Result<Vec<_>>>()?;
        let directions = data.directions.into_iter().map(DirectionEntry::from).collect();

        let recipe = Recipe::new(data.title, source, ingredients, directions);
        debug!(
            "Parsed recipe '{}' with {} ingredient entries and {} direction entries",
            recipe.title,
            recipe.ingredients.len(),
            recipe.directions.len()
        );
        Ok(recipe)
    }

    /// Every ingredient in the recipe, with groups flattened, in order.
    pub fn all_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().flat_map(IngredientEntry::ingredients)
    }

    /// Writes the recipe back out as a schema-shaped JSON document.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecipeError;
    use crate::fraction::Fraction;
    use serde_json::json;

    fn pancakes() -> Value {
        json!({
            "title": "Pancakes",
            "ingredients": [
                "1 1/2 cups flour",
                {"quantity": 2, "item": "eggs"},
                {"heading": "Topping", "ingredients": [
                    {"quantity": "1/4", "unit": "cup", "item": "maple syrup", "preparation": ["warmed"]}
                ]}
            ],
            "directions": ["Whisk.", "Fry."]
        })
    }

    #[test]
    fn test_from_value() {
        let recipe = Recipe::from_value(pancakes()).unwrap();
        assert_eq!(recipe.title, "Pancakes");
        assert!(recipe.source.is_none());
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.directions.len(), 2);

        let items: Vec<&str> = recipe.all_ingredients().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["flour", "eggs", "maple syrup"]);
        assert_eq!(
            recipe.all_ingredients().last().unwrap().quantity,
            Fraction::new(1, 4).unwrap()
        );
    }

    #[test]
    fn test_default_unit_from_config() {
        let config = RecipeConfig {
            default_unit: "whole".to_string(),
            ..RecipeConfig::default()
        };
        let recipe = Recipe::from_value_with_config(pancakes(), &config).unwrap();
        let eggs = recipe.all_ingredients().nth(1).unwrap();
        assert_eq!(eggs.unit, "whole");
    }

    #[test]
    fn test_bad_ingredient_fails_recipe() {
        let mut value = pancakes();
        value["ingredients"][0] = json!("a pinch of salt");
        assert!(matches!(
            Recipe::from_value(value),
            Err(RecipeError::Parse(_))
        ));
    }

    #[test]
    fn test_is_valid() {
        assert!(Recipe::is_valid(&pancakes()));
        assert!(!Recipe::is_valid(&json!({"title": "Nothing"})));
        assert!(!Recipe::is_valid(&json!([1, 2, 3])));
    }

    #[test]
    fn test_json_output_reads_back() {
        let recipe = Recipe::from_value(pancakes()).unwrap();
        let json = recipe.to_json(false).unwrap();
        assert_eq!(Recipe::from_json_str(&json).unwrap(), recipe);
    }

    #[test]
    fn test_from_reader() {
        let json = pancakes().to_string();
        let recipe = Recipe::from_reader_with_config(json.as_bytes(), &RecipeConfig::default()).unwrap();
        assert_eq!(recipe.title, "Pancakes");

        let not_utf8: &[u8] = &[0xff, 0xfe];
        assert!(matches!(
            Recipe::from_reader_with_config(not_utf8, &RecipeConfig::default()),
            Err(RecipeError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Recipe::from_json_str("{\"title\": "),
            Err(RecipeError::Json(_))
        ));
    }
}

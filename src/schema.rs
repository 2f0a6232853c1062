//! Serde mirror of the JSON recipe document.
//!
//! Deserializing into [`JsonRecipe`] is what validates a document: the
//! untagged enums accept exactly the alternative shapes the schema allows,
//! nested objects reject unknown keys, and [`JsonRecipe::validate`] adds the
//! checks serde cannot express (non-empty names).

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::{RecipeError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRecipe {
    pub title: String,
    #[serde(default)]
    pub source: Option<JsonSource>,
    pub ingredients: Vec<JsonIngredientOrGroup>,
    pub directions: Vec<JsonDirectionOrGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSource {
    pub author: String,
    #[serde(default)]
    pub location: Option<JsonWebLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonWebLocation {
    pub url: String,
    #[serde(rename = "retrievalDate", default)]
    pub retrieval_date: Option<String>,
}

/// An ingredient is either a human-readable description or a structured object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonIngredient {
    Text(String),
    Object(JsonIngredientObject),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonIngredientObject {
    pub quantity: JsonQuantity,
    #[serde(default)]
    pub unit: Option<String>,
    pub item: String,
    #[serde(default)]
    pub preparation: Option<JsonPreparation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonQuantity {
    Number(Number),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonPreparation {
    Single(String),
    Multiple(Vec<String>),
}

impl JsonPreparation {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            JsonPreparation::Single(step) => vec![step],
            JsonPreparation::Multiple(steps) => steps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonIngredientGroup {
    pub heading: String,
    pub ingredients: Vec<JsonIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonIngredientOrGroup {
    Group(JsonIngredientGroup),
    Single(JsonIngredient),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonDirectionGroup {
    pub heading: String,
    pub directions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonDirectionOrGroup {
    Group(JsonDirectionGroup),
    Single(String),
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecipeError::Schema(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

impl JsonIngredient {
    fn validate(&self) -> Result<()> {
        match self {
            JsonIngredient::Text(text) => require("ingredient", text),
            JsonIngredient::Object(obj) => {
                require("item", &obj.item)?;
                if let Some(unit) = &obj.unit {
                    require("unit", unit)?;
                }
                Ok(())
            }
        }
    }
}

impl JsonRecipe {
    /// Checks a JSON value against the recipe schema.
    pub fn validate(value: Value) -> Result<JsonRecipe> {
        let recipe: JsonRecipe =
            serde_json::from_value(value).map_err(|e| RecipeError::Schema(e.to_string()))?;
        require("title", &recipe.title)?;

        if let Some(source) = &recipe.source {
            require("author", &source.author)?;
            if let Some(location) = &source.location {
                require("url", &location.url)?;
            }
        }

        for entry in &recipe.ingredients {
            match entry {
                JsonIngredientOrGroup::Group(group) => {
                    require("heading", &group.heading)?;
                    group.ingredients.iter().try_for_each(JsonIngredient::validate)?;
                }
                JsonIngredientOrGroup::Single(ingredient) => ingredient.validate()?,
            }
        }

        for entry in &recipe.directions {
            match entry {
                JsonDirectionOrGroup::Group(group) => {
                    require("heading", &group.heading)?;
                    for direction in &group.directions {
                        require("direction", direction)?;
                    }
                }
                JsonDirectionOrGroup::Single(direction) => require("direction", direction)?,
            }
        }

        Ok(recipe)
    }
}

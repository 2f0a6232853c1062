//! Structured cooking recipes.
//!
//! A recipe moves between three forms: a JSON document checked against the
//! recipe schema, human-readable ingredient text such as
//! `"1 1/2 cups flour, sifted"`, and the typed values in this crate.
//! Quantities are exact [`Fraction`]s; no floating point is involved.

pub mod config;
pub mod direction;
pub mod error;
pub mod fraction;
pub mod ingredient;
pub mod recipe;
pub mod schema;
pub mod source;

mod scan;

pub use config::RecipeConfig;
pub use direction::{Direction, DirectionEntry, DirectionGroup};
pub use error::{RecipeError, Result};
pub use fraction::Fraction;
pub use ingredient::{Ingredient, IngredientEntry, IngredientGroup, DEFAULT_UNIT};
pub use recipe::Recipe;
pub use source::{Source, WebLocation};

/// Parse a JSON recipe document
pub fn parse_recipe(json: &str) -> Result<Recipe> {
    Recipe::from_json_str(json)
}

/// Parse a single ingredient description such as `"2 / 3 cup powdered sugar"`
pub fn parse_ingredient(description: &str) -> Result<Ingredient> {
    Ingredient::parse(description)
}

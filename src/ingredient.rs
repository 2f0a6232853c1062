use std::fmt;

use serde::Serialize;
use serde_json::Number;

use crate::error::{RecipeError, Result};
use crate::fraction::{take_mixed_number, Fraction};
use crate::scan::Cursor;
use crate::schema::{JsonIngredient, JsonIngredientObject, JsonIngredientOrGroup, JsonQuantity};

/// Unit assumed when a structured ingredient does not name one
pub const DEFAULT_UNIT: &str = "each";

/// A single ingredient in a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// Amount of the ingredient, relative to the unit
    pub quantity: Fraction,
    /// Unit in which the quantity is measured
    pub unit: String,
    /// What the ingredient is (e.g. "flour")
    pub item: String,
    /// Preparation instructions (e.g. "diced"), in the order given
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preparation: Vec<String>,
}

impl Ingredient {
    pub fn new(
        quantity: impl Into<Fraction>,
        unit: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Ingredient {
            quantity: quantity.into(),
            unit: unit.into(),
            item: item.into(),
            preparation: Vec::new(),
        }
    }

    pub fn with_preparation<I, S>(mut self, preparation: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preparation = preparation.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a human-readable description such as `"1 2/3 cups potatoes, diced, peeled"`.
    ///
    /// The description is read left to right:
    ///
    /// 1. The quantity: a whole number, a fraction, or both (`"1 1/2"`).
    /// 2. The unit, a single word. Use `each` for counted items.
    /// 3. The item, up to the first comma.
    /// 4. Zero or more preparation instructions, each introduced by a comma.
    ///
    /// Text after the last preparation instruction that does not fit the
    /// pattern is ignored.
    pub fn parse(description: &str) -> Result<Ingredient> {
        let mut cursor = Cursor::new(description);

        let quantity = take_mixed_number(&mut cursor)?
            .ok_or_else(|| RecipeError::parse("quantity not specified"))?;

        let unit = cursor
            .take_word()
            .ok_or_else(|| RecipeError::parse(format!("unit not specified in '{}'", description)))?;

        let item = cursor
            .take_until_comma()
            .ok_or_else(|| RecipeError::parse(format!("item not specified in '{}'", description)))?;

        let mut preparation = Vec::new();
        while let Some(step) = cursor.take_comma_field() {
            preparation.push(step.to_string());
        }

        Ok(Ingredient::new(quantity, unit, item).with_preparation(preparation))
    }

    /// Builds an ingredient from its schema form, defaulting the unit to `each`.
    pub fn from_schema(ingredient: JsonIngredient) -> Result<Ingredient> {
        Self::from_schema_with_unit(ingredient, DEFAULT_UNIT)
    }

    /// Builds an ingredient from its schema form.
    ///
    /// Text ingredients go through [`Ingredient::parse`]. Structured ones take
    /// their fields as given, using `default_unit` when no unit is present.
    pub fn from_schema_with_unit(
        ingredient: JsonIngredient,
        default_unit: &str,
    ) -> Result<Ingredient> {
        match ingredient {
            JsonIngredient::Text(description) => Ingredient::parse(&description),
            JsonIngredient::Object(JsonIngredientObject {
                quantity,
                unit,
                item,
                preparation,
            }) => {
                let quantity = match quantity {
                    JsonQuantity::Number(n) => quantity_from_number(&n)?,
                    JsonQuantity::Text(text) => Fraction::parse(&text)?,
                };
                let unit = unit.unwrap_or_else(|| default_unit.to_string());
                let preparation = preparation.map(|p| p.into_vec()).unwrap_or_default();
                Ok(Ingredient::new(quantity, unit, item).with_preparation(preparation))
            }
        }
    }
}

fn quantity_from_number(n: &Number) -> Result<Fraction> {
    if let Some(i) = n.as_i64() {
        return Ok(Fraction::from_integer(i));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(Fraction::from_integer(f as i64))
        }
        _ => Err(RecipeError::invalid(format!(
            "quantity must be an integer or a fraction string, got {}",
            n
        ))),
    }
}

/// Writes the description form that [`Ingredient::parse`] reads.
///
/// The text only reads back to the same ingredient when the unit is a single
/// word and the item contains no comma.
impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.item)?;
        for step in &self.preparation {
            write!(f, ", {}", step)?;
        }
        Ok(())
    }
}

/// A group of ingredients under a single heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientGroup {
    pub heading: String,
    pub ingredients: Vec<Ingredient>,
}

/// An entry in a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Single(Ingredient),
    Group(IngredientGroup),
}

impl IngredientEntry {
    pub fn from_schema(entry: JsonIngredientOrGroup, default_unit: &str) -> Result<IngredientEntry> {
        match entry {
            JsonIngredientOrGroup::Group(group) => {
                let ingredients = group
                    .ingredients
                    .into_iter()
                    .map(|i| Ingredient::from_schema_with_unit(i, default_unit))
                    .collect::<Result<Vec<_>>>()?;
                Ok(IngredientEntry::Group(IngredientGroup {
                    heading: group.heading,
                    ingredients,
                }))
            }
            JsonIngredientOrGroup::Single(ingredient) => Ok(IngredientEntry::Single(
                Ingredient::from_schema_with_unit(ingredient, default_unit)?,
            )),
        }
    }

    /// The ingredients in this entry, in order.
    pub fn ingredients(&self) -> &[Ingredient] {
        match self {
            IngredientEntry::Single(ingredient) => std::slice::from_ref(ingredient),
            IngredientEntry::Group(group) => &group.ingredients,
        }
    }
}

impl From<Ingredient> for IngredientEntry {
    fn from(ingredient: Ingredient) -> Self {
        IngredientEntry::Single(ingredient)
    }
}

impl From<IngredientGroup> for IngredientEntry {
    fn from(group: IngredientGroup) -> Self {
        IngredientEntry::Group(group)
    }
}

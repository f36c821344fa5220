//! Catalog records: recipes, ingredients, foods, products, and allergens.
//!
//! Every record carries a unique natural key (`nk`). Join records use a
//! composite key, e.g. `brownies$$flour` for the flour ingredient of the
//! brownies recipe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Separator for composite natural keys.
pub const NK_SEPARATOR: &str = "$$";

/// Compose a natural key for a join record, e.g. `{recipe}$${food}`.
pub fn composite_nk(left: &str, right: &str) -> String {
    format!("{left}{NK_SEPARATOR}{right}")
}

/// A set of instructions that describes how to prepare a culinary dish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub nk: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Recipe {
    pub fn new(nk: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            nk: nk.into(),
            title: title.into(),
            subtitle: None,
            desc: None,
            instructions: None,
        }
    }
}

/// A substance consumed to provide nutritional support for the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub nk: String,
    pub name: String,
}

impl Food {
    pub fn new(nk: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            nk: nk.into(),
            name: name.into(),
        }
    }
}

/// A food that forms part of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    /// Composite natural key, `{recipe}$${food}`.
    pub nk: String,
    pub recipe: String,
    pub food: String,
    pub desc: String,
    /// Amount of the food, 3 decimal places by convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Natural key of the measurement the amount is expressed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
    /// Display order within the recipe.
    pub rank: i32,
}

impl Ingredient {
    pub fn new(recipe: &str, food: &str, desc: impl Into<String>) -> Self {
        Self {
            nk: composite_nk(recipe, food),
            recipe: recipe.to_string(),
            food: food.to_string(),
            desc: desc.into(),
            amount: None,
            measurement: None,
            rank: 0,
        }
    }

    pub fn with_amount(mut self, amount: Decimal, measurement: impl Into<String>) -> Self {
        self.amount = Some(amount);
        self.measurement = Some(measurement.into());
        self
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }
}

/// A food item for sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub nk: String,
    pub food: String,
    pub name: String,
    /// Price, 2 decimal places by convention.
    pub price: Decimal,
    /// Amount of the food in the package, 3 decimal places by convention.
    pub amount: Decimal,
    /// Natural key of the measurement the amount is expressed in.
    pub measurement: String,
}

impl Product {
    /// Price per unit of measure, or `None` when the amount is zero.
    pub fn price_per_unit(&self) -> Option<Decimal> {
        if self.amount.is_zero() {
            None
        } else {
            Some(self.price / self.amount)
        }
    }
}

/// A food allergen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allergen {
    pub nk: String,
    pub name: String,
}

impl Allergen {
    pub fn new(nk: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            nk: nk.into(),
            name: name.into(),
        }
    }
}

/// Join record linking a food to an allergen it contains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodAllergen {
    /// Composite natural key, `{food}$${allergen}`.
    pub nk: String,
    pub food: String,
    pub allergen: String,
    /// Display order in the UI.
    pub rank: i32,
}

impl FoodAllergen {
    pub fn new(food: &str, allergen: &str) -> Self {
        Self {
            nk: composite_nk(food, allergen),
            food: food.to_string(),
            allergen: allergen.to_string(),
            rank: 0,
        }
    }
}

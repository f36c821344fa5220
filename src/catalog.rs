//! In-memory catalog keyed by natural key.
//!
//! The catalog owns every record type and enforces what the data layer is
//! responsible for: natural-key uniqueness, referential integrity on insert,
//! and the one-anchor-per-food precondition of conversion lookups.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::convert::{convert, FoodConversionAnchor};
use crate::error::CatalogError;
use crate::model::{Allergen, Food, FoodAllergen, Ingredient, Product, Recipe};
use crate::units::Measurement;

/// Insert into a natural-key map, rejecting duplicates.
fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    nk: String,
    value: T,
) -> Result<(), CatalogError> {
    if map.contains_key(&nk) {
        return Err(CatalogError::DuplicateKey(nk));
    }
    map.insert(nk, value);
    Ok(())
}

#[derive(Debug, Default)]
pub struct Catalog {
    measurements: BTreeMap<String, Measurement>,
    foods: BTreeMap<String, Food>,
    recipes: BTreeMap<String, Recipe>,
    ingredients: BTreeMap<String, Ingredient>,
    products: BTreeMap<String, Product>,
    allergens: BTreeMap<String, Allergen>,
    food_allergens: BTreeMap<String, FoodAllergen>,
    // One anchor per food is a convention, not a constraint; anchor_for
    // checks it at lookup time so the ambiguous case stays detectable.
    anchors: Vec<FoodConversionAnchor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Inserts
    // =========================================================================

    pub fn insert_measurement(&mut self, measurement: Measurement) -> Result<(), CatalogError> {
        insert_unique(&mut self.measurements, measurement.nk.clone(), measurement)
    }

    pub fn insert_food(&mut self, food: Food) -> Result<(), CatalogError> {
        insert_unique(&mut self.foods, food.nk.clone(), food)
    }

    pub fn insert_recipe(&mut self, recipe: Recipe) -> Result<(), CatalogError> {
        insert_unique(&mut self.recipes, recipe.nk.clone(), recipe)
    }

    pub fn insert_allergen(&mut self, allergen: Allergen) -> Result<(), CatalogError> {
        insert_unique(&mut self.allergens, allergen.nk.clone(), allergen)
    }

    pub fn insert_ingredient(&mut self, ingredient: Ingredient) -> Result<(), CatalogError> {
        self.require_recipe(&ingredient.recipe)?;
        self.require_food(&ingredient.food)?;
        if let Some(measurement) = &ingredient.measurement {
            self.require_measurement(measurement)?;
        }
        insert_unique(&mut self.ingredients, ingredient.nk.clone(), ingredient)
    }

    pub fn insert_product(&mut self, product: Product) -> Result<(), CatalogError> {
        self.require_food(&product.food)?;
        self.require_measurement(&product.measurement)?;
        insert_unique(&mut self.products, product.nk.clone(), product)
    }

    pub fn insert_food_allergen(&mut self, link: FoodAllergen) -> Result<(), CatalogError> {
        self.require_food(&link.food)?;
        if !self.allergens.contains_key(&link.allergen) {
            return Err(CatalogError::UnknownKey(link.allergen));
        }
        insert_unique(&mut self.food_allergens, link.nk.clone(), link)
    }

    pub fn insert_anchor(&mut self, anchor: FoodConversionAnchor) -> Result<(), CatalogError> {
        self.require_food(&anchor.food)?;
        if self.anchors.iter().any(|a| a.nk == anchor.nk) {
            return Err(CatalogError::DuplicateKey(anchor.nk));
        }
        self.anchors.push(anchor);
        Ok(())
    }

    fn require_recipe(&self, nk: &str) -> Result<(), CatalogError> {
        if self.recipes.contains_key(nk) {
            Ok(())
        } else {
            Err(CatalogError::UnknownKey(nk.to_string()))
        }
    }

    fn require_food(&self, nk: &str) -> Result<(), CatalogError> {
        if self.foods.contains_key(nk) {
            Ok(())
        } else {
            Err(CatalogError::UnknownKey(nk.to_string()))
        }
    }

    fn require_measurement(&self, nk: &str) -> Result<(), CatalogError> {
        if self.measurements.contains_key(nk) {
            Ok(())
        } else {
            Err(CatalogError::UnknownKey(nk.to_string()))
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn measurement(&self, nk: &str) -> Option<&Measurement> {
        self.measurements.get(nk)
    }

    pub fn food(&self, nk: &str) -> Option<&Food> {
        self.foods.get(nk)
    }

    pub fn recipe(&self, nk: &str) -> Option<&Recipe> {
        self.recipes.get(nk)
    }

    pub fn product(&self, nk: &str) -> Option<&Product> {
        self.products.get(nk)
    }

    pub fn allergen(&self, nk: &str) -> Option<&Allergen> {
        self.allergens.get(nk)
    }

    /// Ingredients of a recipe, ordered by rank then natural key.
    pub fn ingredients_for(&self, recipe: &str) -> Vec<&Ingredient> {
        let mut ingredients: Vec<&Ingredient> = self
            .ingredients
            .values()
            .filter(|i| i.recipe == recipe)
            .collect();
        ingredients.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.nk.cmp(&b.nk)));
        ingredients
    }

    /// The conversion anchor for a food. Exactly one must exist.
    pub fn anchor_for(&self, food: &str) -> Result<&FoodConversionAnchor, CatalogError> {
        let mut found = None;
        for anchor in self.anchors.iter().filter(|a| a.food == food) {
            if found.is_some() {
                return Err(CatalogError::AmbiguousAnchor(food.to_string()));
            }
            found = Some(anchor);
        }
        found.ok_or_else(|| CatalogError::MissingAnchor(food.to_string()))
    }

    /// Convert an amount between measurements for a specific food, using the
    /// food's conversion anchor for cross-family conversions.
    pub fn convert_for_food(
        &self,
        food: &str,
        amount: Decimal,
        from: &Measurement,
        to: &Measurement,
    ) -> Result<Decimal, CatalogError> {
        let anchor = self.anchor_for(food)?;
        debug!(food, from = %from.nk, to = %to.nk, "converting via anchor");
        Ok(convert(amount, from, to, anchor)?)
    }

    /// Recipes none of whose ingredients use a food linked to any of the
    /// given allergens. Ordered by natural key.
    pub fn recipes_excluding_allergens(&self, allergens: &[&str]) -> Vec<&Recipe> {
        let tainted_foods: BTreeSet<&str> = self
            .food_allergens
            .values()
            .filter(|link| allergens.contains(&link.allergen.as_str()))
            .map(|link| link.food.as_str())
            .collect();

        let tainted_recipes: BTreeSet<&str> = self
            .ingredients
            .values()
            .filter(|ingredient| tainted_foods.contains(ingredient.food.as_str()))
            .map(|ingredient| ingredient.recipe.as_str())
            .collect();

        self.recipes
            .values()
            .filter(|recipe| !tainted_recipes.contains(recipe.nk.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::units::{MeasurementType, Unit};

    fn seeded_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (nk, name, measurement_type, unit) in [
            ("cup", "Cup", MeasurementType::Volume, Unit::Cup),
            ("pound", "Pound", MeasurementType::Weight, Unit::Pound),
            ("ounce", "Ounce", MeasurementType::Weight, Unit::Ounce),
            ("each", "Each", MeasurementType::Quantity, Unit::Each),
        ] {
            catalog
                .insert_measurement(Measurement::new(nk, name, measurement_type, unit).unwrap())
                .unwrap();
        }
        catalog.insert_food(Food::new("flour", "Flour")).unwrap();
        catalog.insert_food(Food::new("eggs", "Eggs")).unwrap();
        catalog
    }

    fn flour_anchor() -> FoodConversionAnchor {
        FoodConversionAnchor {
            nk: "flour-anchor".to_string(),
            food: "flour".to_string(),
            weight: dec!(0.5),
            weight_measurement: Measurement::new(
                "pound",
                "Pound",
                MeasurementType::Weight,
                Unit::Pound,
            )
            .unwrap(),
            volume: dec!(1),
            volume_measurement: Measurement::new("cup", "Cup", MeasurementType::Volume, Unit::Cup)
                .unwrap(),
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut catalog = seeded_catalog();
        let err = catalog.insert_food(Food::new("flour", "Flour again")).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKey("flour".to_string()));
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let mut catalog = seeded_catalog();
        catalog
            .insert_recipe(Recipe::new("bread", "Bread"))
            .unwrap();

        let err = catalog
            .insert_ingredient(Ingredient::new("bread", "yeast", "1 packet yeast"))
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownKey("yeast".to_string()));

        let err = catalog
            .insert_ingredient(
                Ingredient::new("bread", "flour", "3 cups flour")
                    .with_amount(dec!(3), "liter"),
            )
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownKey("liter".to_string()));
    }

    #[test]
    fn test_anchor_missing_and_ambiguous() {
        let mut catalog = seeded_catalog();
        assert_eq!(
            catalog.anchor_for("flour").unwrap_err(),
            CatalogError::MissingAnchor("flour".to_string())
        );

        catalog.insert_anchor(flour_anchor()).unwrap();
        assert_eq!(catalog.anchor_for("flour").unwrap().nk, "flour-anchor");

        let second = FoodConversionAnchor {
            nk: "flour-anchor-2".to_string(),
            ..flour_anchor()
        };
        catalog.insert_anchor(second).unwrap();
        assert_eq!(
            catalog.anchor_for("flour").unwrap_err(),
            CatalogError::AmbiguousAnchor("flour".to_string())
        );
    }

    #[test]
    fn test_anchor_requires_known_food() {
        let mut catalog = Catalog::new();
        let err = catalog.insert_anchor(flour_anchor()).unwrap_err();
        assert_eq!(err, CatalogError::UnknownKey("flour".to_string()));
    }

    #[test]
    fn test_convert_for_food() {
        let mut catalog = seeded_catalog();
        catalog.insert_anchor(flour_anchor()).unwrap();

        let cup = catalog.measurement("cup").unwrap().clone();
        let pound = catalog.measurement("pound").unwrap().clone();
        assert_eq!(
            catalog.convert_for_food("flour", dec!(1), &cup, &pound),
            Ok(dec!(0.5))
        );

        // No anchor for eggs; cross-family conversion fails at lookup.
        assert_eq!(
            catalog.convert_for_food("eggs", dec!(1), &cup, &pound),
            Err(CatalogError::MissingAnchor("eggs".to_string()))
        );
    }

    #[test]
    fn test_ingredients_for_orders_by_rank() {
        let mut catalog = seeded_catalog();
        catalog
            .insert_recipe(Recipe::new("pasta", "Fresh Pasta"))
            .unwrap();
        catalog
            .insert_ingredient(
                Ingredient::new("pasta", "eggs", "3 eggs").with_rank(2),
            )
            .unwrap();
        catalog
            .insert_ingredient(
                Ingredient::new("pasta", "flour", "2 cups flour").with_rank(1),
            )
            .unwrap();

        let foods: Vec<&str> = catalog
            .ingredients_for("pasta")
            .iter()
            .map(|i| i.food.as_str())
            .collect();
        assert_eq!(foods, vec!["flour", "eggs"]);
    }

    #[test]
    fn test_recipes_excluding_allergens() {
        let mut catalog = seeded_catalog();
        catalog
            .insert_allergen(Allergen::new("gluten", "Gluten"))
            .unwrap();
        catalog
            .insert_food_allergen(FoodAllergen::new("flour", "gluten"))
            .unwrap();

        catalog
            .insert_recipe(Recipe::new("bread", "Bread"))
            .unwrap();
        catalog
            .insert_recipe(Recipe::new("omelette", "Omelette"))
            .unwrap();
        catalog
            .insert_ingredient(Ingredient::new("bread", "flour", "3 cups flour"))
            .unwrap();
        catalog
            .insert_ingredient(Ingredient::new("omelette", "eggs", "2 eggs"))
            .unwrap();

        let safe: Vec<&str> = catalog
            .recipes_excluding_allergens(&["gluten"])
            .iter()
            .map(|r| r.nk.as_str())
            .collect();
        assert_eq!(safe, vec!["omelette"]);

        // No allergens given: every recipe qualifies.
        assert_eq!(catalog.recipes_excluding_allergens(&[]).len(), 2);
    }
}

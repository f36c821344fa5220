//! Core data model for a recipe/food catalog: recipes, ingredients, foods,
//! retail products, units of measure, allergens, and food-specific
//! measurement conversion.
//!
//! Weight↔weight and volume↔volume conversions use static ratio tables.
//! Crossing between weight and volume depends on the food, so each food
//! carries a [`FoodConversionAnchor`] recording an equivalence like
//! "1 cup of flour = 0.5 pound". All amounts are fixed-point decimals.
//!
//! # Example
//!
//! ```
//! use foodie_core::{convert, FoodConversionAnchor, Measurement, MeasurementType, Unit};
//! use rust_decimal::Decimal;
//!
//! let cup = Measurement::new("cup", "Cup", MeasurementType::Volume, Unit::Cup)?;
//! let pound = Measurement::new("pound", "Pound", MeasurementType::Weight, Unit::Pound)?;
//!
//! // 1 cup of flour weighs half a pound.
//! let anchor = FoodConversionAnchor {
//!     nk: "flour-anchor".to_string(),
//!     food: "flour".to_string(),
//!     weight: Decimal::new(5, 1),
//!     weight_measurement: pound.clone(),
//!     volume: Decimal::ONE,
//!     volume_measurement: cup.clone(),
//! };
//!
//! let pounds_of_flour = convert(Decimal::from(2), &cup, &pound, &anchor)?;
//! assert_eq!(pounds_of_flour, Decimal::ONE);
//! # Ok::<(), foodie_core::CatalogError>(())
//! ```

pub mod catalog;
pub mod convert;
pub mod error;
pub mod model;
pub mod units;

pub use catalog::Catalog;
pub use convert::{convert, FoodConversionAnchor};
pub use error::{CatalogError, ConversionError};
pub use model::{
    composite_nk, Allergen, Food, FoodAllergen, Ingredient, Product, Recipe, NK_SEPARATOR,
};
pub use units::{Measurement, MeasurementType, Unit};

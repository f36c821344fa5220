//! Units of measure and the static conversion tables.
//!
//! Ratios are stored relative to a base unit within each family:
//! ounces for weight, teaspoons for volume. Quantity measurements are
//! dimensionless and have no conversion table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The family a unit of measure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementType {
    Quantity,
    Weight,
    Volume,
}

impl MeasurementType {
    pub const ALL: &'static [MeasurementType] = &[
        MeasurementType::Quantity,
        MeasurementType::Weight,
        MeasurementType::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Quantity => "QUANTITY",
            MeasurementType::Weight => "WEIGHT",
            MeasurementType::Volume => "VOLUME",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "QUANTITY" => Some(MeasurementType::Quantity),
            "WEIGHT" => Some(MeasurementType::Weight),
            "VOLUME" => Some(MeasurementType::Volume),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of measure. US customary units for weight and volume, plus a
/// dimensionless `Each` for counted ingredients ("2 eggs").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    // Volume
    Teaspoon,
    Tablespoon,
    Cup,
    Pint,
    Quart,
    Gallon,
    // Weight
    Ounce,
    Pound,
    // Count
    Each,
}

impl Unit {
    /// The family this unit belongs to.
    pub fn family(self) -> MeasurementType {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => MeasurementType::Volume,
            Unit::Ounce | Unit::Pound => MeasurementType::Weight,
            Unit::Each => MeasurementType::Quantity,
        }
    }

    /// Ratio of this unit to its family's base unit: ounces for weight
    /// (POUND → 16), teaspoons for volume (GALLON → 768, ..., TEASPOON → 1).
    /// `None` for dimensionless units, which have no conversion table.
    pub fn base_ratio(self) -> Option<Decimal> {
        let ratio = match self {
            // Weight table, in ounces
            Unit::Pound => 16,
            Unit::Ounce => 1,
            // Volume table, in teaspoons
            Unit::Gallon => 768,
            Unit::Quart => 192,
            Unit::Pint => 96,
            Unit::Cup => 48,
            Unit::Tablespoon => 3,
            Unit::Teaspoon => 1,
            Unit::Each => return None,
        };
        Some(Decimal::from(ratio))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Teaspoon => "TEASPOON",
            Unit::Tablespoon => "TABLESPOON",
            Unit::Cup => "CUP",
            Unit::Pint => "PINT",
            Unit::Quart => "QUART",
            Unit::Gallon => "GALLON",
            Unit::Ounce => "OUNCE",
            Unit::Pound => "POUND",
            Unit::Each => "EACH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TEASPOON" => Some(Unit::Teaspoon),
            "TABLESPOON" => Some(Unit::Tablespoon),
            "CUP" => Some(Unit::Cup),
            "PINT" => Some(Unit::Pint),
            "QUART" => Some(Unit::Quart),
            "GALLON" => Some(Unit::Gallon),
            "OUNCE" => Some(Unit::Ounce),
            "POUND" => Some(Unit::Pound),
            "EACH" => Some(Unit::Each),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of measure as presented to users: a named, optionally abbreviated
/// descriptor carrying its family and unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Unique natural key.
    pub nk: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(rename = "type")]
    pub measurement_type: MeasurementType,
    pub unit: Unit,
}

impl Measurement {
    /// Build a measurement, validating that a weight or volume unit belongs
    /// to the family implied by the type. Quantity measurements are
    /// dimensionless and accept any unit label.
    pub fn new(
        nk: impl Into<String>,
        name: impl Into<String>,
        measurement_type: MeasurementType,
        unit: Unit,
    ) -> Result<Self, CatalogError> {
        match measurement_type {
            MeasurementType::Weight | MeasurementType::Volume => {
                if unit.family() != measurement_type {
                    return Err(CatalogError::UnitFamilyMismatch {
                        measurement_type,
                        unit,
                    });
                }
            }
            MeasurementType::Quantity => {}
        }

        Ok(Self {
            nk: nk.into(),
            name: name.into(),
            abbreviation: None,
            measurement_type,
            unit,
        })
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_families() {
        assert_eq!(Unit::Teaspoon.family(), MeasurementType::Volume);
        assert_eq!(Unit::Gallon.family(), MeasurementType::Volume);
        assert_eq!(Unit::Ounce.family(), MeasurementType::Weight);
        assert_eq!(Unit::Pound.family(), MeasurementType::Weight);
        assert_eq!(Unit::Each.family(), MeasurementType::Quantity);
    }

    #[test]
    fn test_base_ratios() {
        assert_eq!(Unit::Pound.base_ratio(), Some(Decimal::from(16)));
        assert_eq!(Unit::Ounce.base_ratio(), Some(Decimal::ONE));
        assert_eq!(Unit::Gallon.base_ratio(), Some(Decimal::from(768)));
        assert_eq!(Unit::Quart.base_ratio(), Some(Decimal::from(192)));
        assert_eq!(Unit::Pint.base_ratio(), Some(Decimal::from(96)));
        assert_eq!(Unit::Cup.base_ratio(), Some(Decimal::from(48)));
        assert_eq!(Unit::Tablespoon.base_ratio(), Some(Decimal::from(3)));
        assert_eq!(Unit::Teaspoon.base_ratio(), Some(Decimal::ONE));
        assert_eq!(Unit::Each.base_ratio(), None);
    }

    #[test]
    fn test_str_round_trip() {
        for unit in [
            Unit::Teaspoon,
            Unit::Tablespoon,
            Unit::Cup,
            Unit::Pint,
            Unit::Quart,
            Unit::Gallon,
            Unit::Ounce,
            Unit::Pound,
            Unit::Each,
        ] {
            assert_eq!(Unit::from_str(unit.as_str()), Some(unit));
        }
        for measurement_type in MeasurementType::ALL {
            assert_eq!(
                MeasurementType::from_str(measurement_type.as_str()),
                Some(*measurement_type)
            );
        }
        assert_eq!(Unit::from_str("FIRKIN"), None);
    }

    #[test]
    fn test_measurement_family_invariant() {
        assert!(Measurement::new("cup", "Cup", MeasurementType::Volume, Unit::Cup).is_ok());
        assert!(Measurement::new("oz", "Ounce", MeasurementType::Weight, Unit::Ounce).is_ok());

        let err = Measurement::new("bad", "Bad", MeasurementType::Weight, Unit::Cup).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnitFamilyMismatch {
                measurement_type: MeasurementType::Weight,
                unit: Unit::Cup,
            }
        );
    }

    #[test]
    fn test_quantity_accepts_any_unit() {
        // Quantity is dimensionless; the unit is just a label.
        assert!(Measurement::new("each", "Each", MeasurementType::Quantity, Unit::Each).is_ok());
        assert!(Measurement::new("scoop", "Scoop", MeasurementType::Quantity, Unit::Cup).is_ok());
    }

    #[test]
    fn test_abbreviation() {
        let tbsp = Measurement::new(
            "tbsp",
            "Tablespoon",
            MeasurementType::Volume,
            Unit::Tablespoon,
        )
        .unwrap()
        .with_abbreviation("tbsp.");
        assert_eq!(tbsp.abbreviation.as_deref(), Some("tbsp."));
    }
}

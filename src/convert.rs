//! Food-specific measurement conversion.
//!
//! Weight↔weight and volume↔volume conversions use the static ratio tables
//! in [`crate::units`]. Crossing between weight and volume needs a per-food
//! equivalence (density), supplied by a [`FoodConversionAnchor`] such as
//! "1 cup of flour = 0.5 pound".

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::units::{Measurement, MeasurementType};

/// Decimal places kept in conversion results, matching the catalog's
/// 3-decimal-place amount fields.
const AMOUNT_SCALE: u32 = 3;

/// A food-specific weight↔volume equivalence: the stored weight amount and
/// the stored volume amount describe the same quantity of the food.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodConversionAnchor {
    /// Unique natural key.
    pub nk: String,
    /// Natural key of the food this anchor describes.
    pub food: String,
    pub weight: Decimal,
    pub weight_measurement: Measurement,
    pub volume: Decimal,
    pub volume_measurement: Measurement,
}

impl FoodConversionAnchor {
    /// The anchor's measurement for a family. Quantity has no anchor side.
    pub fn measurement_for(
        &self,
        measurement_type: MeasurementType,
    ) -> Result<&Measurement, ConversionError> {
        match measurement_type {
            MeasurementType::Weight => Ok(&self.weight_measurement),
            MeasurementType::Volume => Ok(&self.volume_measurement),
            MeasurementType::Quantity => {
                Err(ConversionError::UnsupportedType(measurement_type))
            }
        }
    }

    /// The anchor's stored amount for a family. Quantity has no anchor side.
    pub fn amount_for(
        &self,
        measurement_type: MeasurementType,
    ) -> Result<Decimal, ConversionError> {
        match measurement_type {
            MeasurementType::Weight => Ok(self.weight),
            MeasurementType::Volume => Ok(self.volume),
            MeasurementType::Quantity => {
                Err(ConversionError::UnsupportedType(measurement_type))
            }
        }
    }
}

/// Convert `amount` from one measurement to another for the food described
/// by `anchor`.
///
/// Same-unit conversions return the amount unchanged. Same-family
/// conversions rescale through the family's base unit. Cross-family
/// conversions go through the anchor in three steps: into the anchor's unit
/// on the `from` side, across via the ratio of the anchor's two amounts,
/// then out of the anchor's unit on the `to` side.
///
/// Arithmetic is exact internally; non-identity results are rounded
/// half-away-from-zero to 3 decimal places.
pub fn convert(
    amount: Decimal,
    from: &Measurement,
    to: &Measurement,
    anchor: &FoodConversionAnchor,
) -> Result<Decimal, ConversionError> {
    if from.unit == to.unit {
        return Ok(amount);
    }

    let result = if from.measurement_type == to.measurement_type {
        convert_same_type(amount, from, to)?
    } else {
        // Into the anchor's unit for the source family.
        let anchor_from = anchor.measurement_for(from.measurement_type)?;
        let anchor_to = anchor.measurement_for(to.measurement_type)?;
        let in_anchor_units = convert_same_type(amount, from, anchor_from)?;

        // Across families via the ratio of the anchor's two amounts.
        let divisor = anchor.amount_for(from.measurement_type)?;
        if divisor.is_zero() {
            return Err(ConversionError::DivisionByZero(from.measurement_type));
        }
        let crossed = in_anchor_units * anchor.amount_for(to.measurement_type)? / divisor;

        // Out of the anchor's unit into the target.
        convert_same_type(crossed, anchor_to, to)?
    };

    Ok(result.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Same-family conversion through the family's base unit:
/// `amount * table[from.unit] / table[to.unit]`.
fn convert_same_type(
    amount: Decimal,
    from: &Measurement,
    to: &Measurement,
) -> Result<Decimal, ConversionError> {
    if from.unit == to.unit {
        return Ok(amount);
    }
    let from_ratio = table_ratio(from)?;
    let to_ratio = table_ratio(to)?;
    Ok(amount * from_ratio / to_ratio)
}

/// Look up a measurement's ratio in the table selected by its type.
fn table_ratio(measurement: &Measurement) -> Result<Decimal, ConversionError> {
    if measurement.measurement_type == MeasurementType::Quantity {
        return Err(ConversionError::UnsupportedType(measurement.measurement_type));
    }
    measurement
        .unit
        .base_ratio()
        .ok_or(ConversionError::MissingTableEntry {
            family: measurement.measurement_type,
            unit: measurement.unit,
        })
}

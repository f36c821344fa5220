use thiserror::Error;

use crate::units::{MeasurementType, Unit};

/// Errors raised by the conversion algorithm. Conversion is a pure
/// computation, so every variant is a caller contract violation and is
/// raised immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{0} measurements have no conversion table or anchor quantity")]
    UnsupportedType(MeasurementType),

    #[error("no {family} conversion table entry for unit {unit}")]
    MissingTableEntry {
        family: MeasurementType,
        unit: Unit,
    },

    #[error("anchor quantity for {0} is zero")]
    DivisionByZero(MeasurementType),
}

/// Errors raised by the in-memory catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate natural key `{0}`")]
    DuplicateKey(String),

    #[error("unknown natural key `{0}`")]
    UnknownKey(String),

    #[error("no measurement conversion anchor for food `{0}`")]
    MissingAnchor(String),

    #[error("multiple measurement conversion anchors for food `{0}`")]
    AmbiguousAnchor(String),

    #[error("unit {unit} does not belong to the {measurement_type} family")]
    UnitFamilyMismatch {
        measurement_type: MeasurementType,
        unit: Unit,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

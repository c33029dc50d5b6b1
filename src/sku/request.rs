//! SKU Request
//!
//! Structured input as received from a form or JSON body. Options stay
//! textual until `validate()`, so every malformed value surfaces as a
//! `ResolverError::Validation` before any resolution work starts.

use serde::{Deserialize, Serialize};

use crate::error::ResolverError;
use crate::sizing::{CompressionClass, Measurements, Options};

/// Compression class as a number (1, 2) or a form label ("Class 1")
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ClassInput {
    Number(i64),
    Text(String),
}

impl ClassInput {
    fn parse(&self) -> Result<CompressionClass, ResolverError> {
        match self {
            ClassInput::Number(n) => CompressionClass::from_number(*n),
            ClassInput::Text(s) => s.parse(),
        }
    }
}

/// One SKU generation request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SkuRequest {
    /// knee | thigh (also knee_length | thigh_length)
    #[serde(alias = "length")]
    pub category: String,

    /// bronze | black
    pub color: String,

    /// open | closed
    pub toe: String,

    #[serde(alias = "classType", alias = "class")]
    pub compression_class: ClassInput,

    pub ankle: f64,

    pub calf: f64,

    #[serde(default)]
    pub thigh: Option<f64>,

    #[serde(alias = "legLength")]
    pub leg_length: f64,
}

impl SkuRequest {
    /// Parse options and check measurements
    pub fn validate(&self) -> Result<(Options, Measurements), ResolverError> {
        let options = Options {
            category: self.category.parse()?,
            color: self.color.parse()?,
            toe: self.toe.parse()?,
            compression_class: self.compression_class.parse()?,
        };

        let measurements = Measurements {
            ankle: self.ankle,
            calf: self.calf,
            thigh: self.thigh,
            leg_length: self.leg_length,
        };
        measurements.validate(options.category)?;

        Ok((options, measurements))
    }
}

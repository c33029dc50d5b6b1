//! Measurements and Product Options
//!
//! Typed inputs to the resolver. Options arrive as free text from forms and
//! JSON bodies, so every enum parses case-insensitively via `FromStr` and
//! rejects anything outside its domain with `ResolverError::Validation`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolverError;

/// Stocking length category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Knee,
    Thigh,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Knee => "knee",
            Category::Thigh => "thigh",
        }
    }

    /// Key used by the catalog JSON
    pub fn table_key(&self) -> &'static str {
        match self {
            Category::Knee => "knee_length",
            Category::Thigh => "thigh_length",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::Knee, Category::Thigh]
    }
}

impl FromStr for Category {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knee" | "knee_length" => Ok(Category::Knee),
            "thigh" | "thigh_length" => Ok(Category::Thigh),
            _ => Err(ResolverError::Validation("Invalid length specified.".to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Petite/normal sub-classification, derived from leg length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubLengthClass {
    Petite,
    Normal,
}

impl SubLengthClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubLengthClass::Petite => "petite",
            SubLengthClass::Normal => "normal",
        }
    }

    /// Key used by the catalog JSON
    pub fn table_key(&self) -> &'static str {
        match self {
            SubLengthClass::Petite => "Petite",
            SubLengthClass::Normal => "Normal",
        }
    }

    pub fn all() -> &'static [SubLengthClass] {
        &[SubLengthClass::Petite, SubLengthClass::Normal]
    }
}

impl FromStr for SubLengthClass {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petite" => Ok(SubLengthClass::Petite),
            "normal" => Ok(SubLengthClass::Normal),
            _ => Err(ResolverError::Validation(format!("Invalid leg length type: {}", s))),
        }
    }
}

impl fmt::Display for SubLengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Bronze,
    Black,
}

impl FromStr for Color {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Color::Bronze),
            "black" => Ok(Color::Black),
            _ => Err(ResolverError::Validation("Invalid color specified.".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toe {
    Open,
    Closed,
}

impl FromStr for Toe {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Toe::Open),
            "closed" => Ok(Toe::Closed),
            _ => Err(ResolverError::Validation("Invalid toe type specified.".to_string())),
        }
    }
}

/// Medical compression class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionClass {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl CompressionClass {
    pub fn from_number(n: i64) -> Result<Self, ResolverError> {
        match n {
            1 => Ok(CompressionClass::One),
            2 => Ok(CompressionClass::Two),
            _ => Err(ResolverError::Validation("Invalid class specified.".to_string())),
        }
    }
}

impl FromStr for CompressionClass {
    type Err = ResolverError;

    /// Accepts "1", "2" and the form labels "Class 1", "Class 2"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered.strip_prefix("class").unwrap_or(&lowered).trim();
        match digits {
            "1" => Ok(CompressionClass::One),
            "2" => Ok(CompressionClass::Two),
            _ => Err(ResolverError::Validation("Invalid class specified.".to_string())),
        }
    }
}

/// The four discrete product options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub category: Category,
    pub color: Color,
    pub toe: Toe,
    pub compression_class: CompressionClass,
}

/// Body measurements in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Narrowest part of the ankle
    pub ankle: f64,

    /// Widest part of the calf
    pub calf: f64,

    /// Widest part of the thigh, only required for thigh-length stockings
    pub thigh: Option<f64>,

    /// Floor to the desired stocking height
    pub leg_length: f64,
}

impl Measurements {
    /// Reject non-finite values and a missing thigh for the thigh category
    pub fn validate(&self, category: Category) -> Result<(), ResolverError> {
        let fields = [
            ("ankle", Some(self.ankle)),
            ("calf", Some(self.calf)),
            ("thigh", self.thigh),
            ("leg length", Some(self.leg_length)),
        ];

        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ResolverError::Validation(format!(
                        "Please enter a valid number for {}",
                        name
                    )));
                }
            }
        }

        if category == Category::Thigh && self.thigh.is_none() {
            return Err(ResolverError::Validation(
                "Thigh measurement is required for thigh-length stockings".to_string(),
            ));
        }

        Ok(())
    }
}

/// A measured body dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Ankle,
    Calf,
    Thigh,
    Length,
}

impl Dimension {
    /// Capitalized name used in guidance messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Ankle => "Ankle",
            Dimension::Calf => "Calf",
            Dimension::Thigh => "Thigh",
            Dimension::Length => "Length",
        }
    }

    /// How to take the measurement
    pub fn measuring_hint(&self) -> &'static str {
        match self {
            Dimension::Ankle => "Measure around the narrowest part of your ankle",
            Dimension::Calf => "Measure around the widest part of your calf muscle",
            Dimension::Thigh => "Measure around the widest part of your thigh",
            Dimension::Length => "Measure from the floor to the desired stocking height",
        }
    }

    pub fn all() -> &'static [Dimension] {
        &[Dimension::Ankle, Dimension::Calf, Dimension::Thigh, Dimension::Length]
    }
}

//! SKU Encoder
//!
//! SKU format `XXYYZWV`:
//! - `XX` class prefix: XA = class 1, XB = class 2
//! - `YY` style code by length, sub-length class and extension:
//!   thigh normal 69 (68 extended), thigh petite 59 (58 extended),
//!   knee normal 40, knee petite 47
//! - `Z` color: 6 = bronze, 5 = black
//! - `W` toe: 0 = open, 1 = closed
//! - `V` size 1..8

use crate::error::ResolverError;
use crate::sizing::{Category, Color, CompressionClass, Options, ResolutionResult, SubLengthClass, Toe};

/// Length of every valid SKU
pub const SKU_LENGTH: usize = 7;

pub fn class_prefix(class: CompressionClass) -> &'static str {
    match class {
        CompressionClass::One => "XA",
        CompressionClass::Two => "XB",
    }
}

/// Two-digit style code; the extension flag only affects thigh-length styles
pub fn style_code(category: Category, sub_class: SubLengthClass, extension: bool) -> &'static str {
    match (category, sub_class) {
        (Category::Thigh, SubLengthClass::Normal) => {
            if extension { "68" } else { "69" }
        }
        (Category::Thigh, SubLengthClass::Petite) => {
            if extension { "58" } else { "59" }
        }
        (Category::Knee, SubLengthClass::Normal) => "40",
        (Category::Knee, SubLengthClass::Petite) => "47",
    }
}

pub fn color_digit(color: Color) -> char {
    match color {
        Color::Bronze => '6',
        Color::Black => '5',
    }
}

pub fn toe_digit(toe: Toe) -> char {
    match toe {
        Toe::Open => '0',
        Toe::Closed => '1',
    }
}

/// Builds SKU strings from options and a resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct SkuEncoder;

impl SkuEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, options: &Options, resolution: &ResolutionResult) -> Result<String, ResolverError> {
        self.encode_parts(options, resolution.sub_class, resolution.extension_flag, resolution.size)
    }

    pub fn encode_parts(
        &self,
        options: &Options,
        sub_class: SubLengthClass,
        extension: bool,
        size: u8,
    ) -> Result<String, ResolverError> {
        if !(1..=8).contains(&size) {
            return Err(ResolverError::Validation(format!("Invalid size {}", size)));
        }

        let mut sku = String::with_capacity(SKU_LENGTH);
        sku.push_str(class_prefix(options.compression_class));
        sku.push_str(style_code(options.category, sub_class, extension));
        sku.push(color_digit(options.color));
        sku.push(toe_digit(options.toe));
        sku.push(char::from(b'0' + size));

        Ok(sku)
    }
}

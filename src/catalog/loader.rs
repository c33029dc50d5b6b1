//! Size Table Loading
//!
//! Parses the catalog JSON (legacy column naming: A = ankle, B = calf,
//! C = thigh, D = length, G = extension thigh) and validates it once, so the
//! resolver never sees a malformed record.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::size_table::{Range, SizeRecord, SizeTable, SIZES_PER_LIST};
use crate::error::TableError;
use crate::sizing::{Category, SubLengthClass};

/// Default catalog shipped with the crate
const BUILTIN_TABLE_JSON: &str = include_str!("../../data/size_table.json");

/// One record as stored in the catalog JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RawRecord {
    #[serde(rename = "Size")]
    size: u8,
    #[serde(rename = "A_min")]
    a_min: f64,
    #[serde(rename = "A_max")]
    a_max: f64,
    #[serde(rename = "B_min")]
    b_min: f64,
    #[serde(rename = "B_max")]
    b_max: f64,
    #[serde(rename = "C_min", default, skip_serializing_if = "Option::is_none")]
    c_min: Option<f64>,
    #[serde(rename = "C_max", default, skip_serializing_if = "Option::is_none")]
    c_max: Option<f64>,
    #[serde(rename = "D_min")]
    d_min: f64,
    #[serde(rename = "D_max")]
    d_max: f64,
    #[serde(rename = "G_min", default, skip_serializing_if = "Option::is_none")]
    g_min: Option<f64>,
    #[serde(rename = "G_max", default, skip_serializing_if = "Option::is_none")]
    g_max: Option<f64>,
}

/// category key -> sub-length key -> records
type RawTable = BTreeMap<String, BTreeMap<String, Vec<RawRecord>>>;

impl SizeTable {
    /// Parse the embedded default catalog
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_json_str(BUILTIN_TABLE_JSON)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_json_str(&contents)?;
        tracing::info!("Loaded size table from {:?} ({} lists)", path, table.len());
        Ok(table)
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        build_table(raw)
    }

    /// Export the table in the catalog JSON format
    pub fn to_json_value(&self) -> Value {
        let mut raw: RawTable = BTreeMap::new();
        for (category, sub_class) in self.list_keys() {
            let records = self
                .records(category, sub_class)
                .unwrap_or_default()
                .iter()
                .map(to_raw)
                .collect();
            raw.entry(category.table_key().to_string())
                .or_default()
                .insert(sub_class.table_key().to_string(), records);
        }
        serde_json::to_value(raw).unwrap_or(Value::Null)
    }
}

fn build_table(raw: RawTable) -> Result<SizeTable, TableError> {
    let mut lists = FxHashMap::default();

    for (category_key, sub_lists) in raw {
        let category: Category = category_key
            .parse()
            .map_err(|_| TableError::Invalid(format!("unknown category '{}'", category_key)))?;

        for (sub_key, records) in sub_lists {
            let sub_class: SubLengthClass = sub_key.parse().map_err(|_| {
                TableError::Invalid(format!("unknown sub-length class '{}'", sub_key))
            })?;

            let context = format!("{}/{}", category_key, sub_key);
            let records = validate_list(&context, category, records)?;
            lists.insert((category, sub_class), records);
        }
    }

    if lists.is_empty() {
        return Err(TableError::Invalid("table contains no size lists".to_string()));
    }

    Ok(SizeTable::from_lists(lists))
}

fn validate_list(
    context: &str,
    category: Category,
    records: Vec<RawRecord>,
) -> Result<Vec<SizeRecord>, TableError> {
    if records.len() != SIZES_PER_LIST {
        return Err(TableError::Invalid(format!(
            "{}: expected {} sizes, found {}",
            context,
            SIZES_PER_LIST,
            records.len()
        )));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let expected = (idx + 1) as u8;
            if raw.size != expected {
                return Err(TableError::Invalid(format!(
                    "{}: expected size {} at position {}, found {}",
                    context, expected, idx + 1, raw.size
                )));
            }
            to_record(context, category, raw)
        })
        .collect()
}

fn to_record(context: &str, category: Category, raw: RawRecord) -> Result<SizeRecord, TableError> {
    let ctx = format!("{} size {}", context, raw.size);

    let ankle = checked_range(&ctx, "A", raw.a_min, raw.a_max)?;
    let calf = checked_range(&ctx, "B", raw.b_min, raw.b_max)?;
    let length = checked_range(&ctx, "D", raw.d_min, raw.d_max)?;
    let thigh = optional_range(&ctx, "C", raw.c_min, raw.c_max)?;
    let extension_thigh = optional_range(&ctx, "G", raw.g_min, raw.g_max)?;

    if category == Category::Thigh && (thigh.is_none() || extension_thigh.is_none()) {
        return Err(TableError::Invalid(format!(
            "{}: thigh-length records need both C and G ranges",
            ctx
        )));
    }

    Ok(SizeRecord {
        size: raw.size,
        ankle,
        calf,
        thigh,
        length,
        extension_thigh,
    })
}

fn checked_range(ctx: &str, column: &str, min: f64, max: f64) -> Result<Range, TableError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(TableError::Invalid(format!(
            "{}: {} range {}-{} must satisfy min < max",
            ctx, column, min, max
        )));
    }
    Ok(Range::new(min, max))
}

fn optional_range(
    ctx: &str,
    column: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<Option<Range>, TableError> {
    match (min, max) {
        (Some(min), Some(max)) => checked_range(ctx, column, min, max).map(Some),
        (None, None) => Ok(None),
        _ => Err(TableError::Invalid(format!(
            "{}: {}_min and {}_max must be given together",
            ctx, column, column
        ))),
    }
}

fn to_raw(record: &SizeRecord) -> RawRecord {
    RawRecord {
        size: record.size,
        a_min: record.ankle.min,
        a_max: record.ankle.max,
        b_min: record.calf.min,
        b_max: record.calf.max,
        c_min: record.thigh.map(|r| r.min),
        c_max: record.thigh.map(|r| r.max),
        d_min: record.length.min,
        d_max: record.length.max,
        g_min: record.extension_thigh.map(|r| r.min),
        g_max: record.extension_thigh.map(|r| r.max),
    }
}

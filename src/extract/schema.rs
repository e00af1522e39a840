//! Fixed record schema
//!
//! The output table is fixed-width: every record carries every column, in a
//! canonical order built from six groups. Absent data is always the explicit
//! `"Null"` sentinel, never a blank or an omitted cell. The label-to-column
//! dictionaries that drive section extraction live here as static data so the
//! extractor stays free of inline tables.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The literal written for any column with no extracted data
pub const NULL_SENTINEL: &str = "Null";

/// Token prefix marking the foreign-denominated half of a combined price
pub const FOREIGN_PRICE_MARKER: &str = "US$";

/// Gallery slides beyond this slot are ignored
pub const MAX_IMAGE_SLOTS: usize = 75;

/// Identity and summary fields
pub const GENERAL_COLUMNS: [&str; 12] = [
    "id",
    "origin",
    "title",
    "location",
    "price_eu",
    "price_us",
    "Broker",
    "boat_type",
    "manufacturer",
    "boatmodel",
    "description",
    "other_details",
];

/// Mechanical summary fields from the details strip
pub const MECHANICAL_COLUMNS: [&str; 8] = [
    "engine",
    "power",
    "engine_hours",
    "class",
    "length",
    "year",
    "model",
    "capacity",
];

/// Equipment-category list columns; the category heading is the column name
pub const EQUIPMENT_CATEGORIES: [&str; 6] = [
    "Electrical Equipment",
    "Electronics",
    "Inside Equipment",
    "Outside Equipment",
    "Rigging",
    "Sails",
];

/// Propulsion sub-field columns
pub const PROPULSION_COLUMNS: [&str; 10] = [
    "Engine_Make",
    "Engine Model",
    "Engine Year",
    "Total Power",
    "Engine Hours",
    "Engine Type",
    "Drive Type",
    "Fuel Type",
    "Propeller Type",
    "Propeller Material",
];

/// Hull and performance specification columns; the label is the column name
pub const HULL_COLUMNS: [&str; 19] = [
    "Length Overall",
    "Max Draft",
    "Beam",
    "Length at Waterline",
    "Windlass",
    "Liferaft Capacity",
    "Electrical Circuit",
    "Hull Material",
    "Fresh Water Tank",
    "Fuel Tank",
    "Holding Tank",
    "Guest Cabins",
    "Guest Heads",
    "Cruising Speed",
    "Max Speed",
    "Range",
    "Gross Tonnage",
    "Crew Cabins",
    "Crew Heads",
];

/// Details-strip labels mapped to their mechanical summary columns
pub const DETAIL_LABELS: [(&str, &str); 8] = [
    ("Engine", "engine"),
    ("Total Power", "power"),
    ("Engine Hours", "engine_hours"),
    ("Class", "class"),
    ("Length", "length"),
    ("Year", "year"),
    ("Model", "model"),
    ("Capacity", "capacity"),
];

/// Propulsion-section labels mapped to their columns
pub const PROPULSION_LABELS: [(&str, &str); 10] = [
    ("Engine Make", "Engine_Make"),
    ("Engine Model", "Engine Model"),
    ("Engine Year", "Engine Year"),
    ("Total Power", "Total Power"),
    ("Engine Hours", "Engine Hours"),
    ("Engine Type", "Engine Type"),
    ("Drive Type", "Drive Type"),
    ("Fuel Type", "Fuel Type"),
    ("Propeller Type", "Propeller Type"),
    ("Propeller Material", "Propeller Material"),
];

/// Column name of the image source for a 1-indexed gallery slot
pub fn image_column(slot: usize) -> String {
    format!("IMAGE_{slot}")
}

/// Column name of the image alt text for a 1-indexed gallery slot
pub fn image_alt_column(slot: usize) -> String {
    format!("IMAGE_{slot}_ALT")
}

/// Canonical column order: the six groups concatenated
pub static ALL_COLUMNS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut columns: Vec<String> = Vec::new();
    columns.extend(GENERAL_COLUMNS.iter().map(|c| c.to_string()));
    columns.extend(MECHANICAL_COLUMNS.iter().map(|c| c.to_string()));
    columns.extend(EQUIPMENT_CATEGORIES.iter().map(|c| c.to_string()));
    columns.extend(PROPULSION_COLUMNS.iter().map(|c| c.to_string()));
    columns.extend(HULL_COLUMNS.iter().map(|c| c.to_string()));
    for slot in 1..=MAX_IMAGE_SLOTS {
        columns.push(image_column(slot));
        columns.push(image_alt_column(slot));
    }
    columns
});

static COLUMN_INDEX: LazyLock<HashMap<String, usize>> = LazyLock::new(|| {
    ALL_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| (column.clone(), index))
        .collect()
});

/// Looks up the schema column for a section label
pub fn column_for<'a>(labels: &[(&str, &'a str)], label: &str) -> Option<&'a str> {
    labels
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, column)| *column)
}

/// One fully-populated output row
///
/// A record always contains every schema column; construction pre-fills all
/// of them with the null sentinel, so schema completeness holds by
/// construction and `set` can only overwrite known columns.
#[derive(Debug, Clone)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    /// Creates a sentinel-filled record with the `origin` column set
    pub fn new(origin: &str) -> Self {
        let mut record = Self {
            values: vec![NULL_SENTINEL.to_string(); ALL_COLUMNS.len()],
        };
        record.set("origin", origin);
        record
    }

    /// Assigns a value to a schema column; unknown columns are ignored
    ///
    /// Returns whether the column was known.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match COLUMN_INDEX.get(column) {
            Some(&index) => {
                self.values[index] = value.into();
                true
            }
            None => false,
        }
    }

    /// Reads a column value; `None` only for columns outside the schema
    pub fn get(&self, column: &str) -> Option<&str> {
        COLUMN_INDEX
            .get(column)
            .map(|&index| self.values[index].as_str())
    }

    /// Values in canonical column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Number of columns (always the full schema width)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

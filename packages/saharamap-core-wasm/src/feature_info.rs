// Label/value rows for the floating feature information panel.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geojson::Feature;

// Property key and display label, in panel order
pub const DISPLAY_FIELDS: [(&str, &str); 5] = [
    ("NAME", "Name"),
    ("NAME_EN", "English Name"),
    ("REGION", "Region"),
    ("LABEL", "Label"),
    ("FEATURECLA", "Feature Class"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub label: String,
    pub value: String,
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn feature_info(feature: &Feature) -> Vec<InfoEntry> {
    DISPLAY_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let value = display_value(feature.property(key)?)?;
            Some(InfoEntry {
                label: label.to_string(),
                value,
            })
        })
        .collect()
}

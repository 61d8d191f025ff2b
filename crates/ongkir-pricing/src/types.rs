//! Pricing API request and response schemas.
//!
//! These mirror the JSON the backend emits. IDs and ETAs show up as either
//! strings or numbers depending on the upstream courier aggregator, so both
//! are accepted and kept as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /calculate-shipping-cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteQuery {
    pub origin: String,
    pub destination: String,
    /// Grams, always at least 1.
    pub weight: u32,
    pub courier: String,
}

// ---------------------------------------------------------------------------
// GET /provinces
// ---------------------------------------------------------------------------

/// Entry of the `provinces` array.
#[derive(Debug, Deserialize)]
pub struct WireProvince {
    #[serde(deserialize_with = "string_or_number")]
    pub province_id: String,
    pub province_name: String,
}

// ---------------------------------------------------------------------------
// GET /cities
// ---------------------------------------------------------------------------

/// Entry of the `cities` array.
#[derive(Debug, Deserialize)]
pub struct WireCity {
    #[serde(deserialize_with = "string_or_number")]
    pub city_id: String,
    /// `Kota` or `Kabupaten`.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub city_name: String,
}

// ---------------------------------------------------------------------------
// POST /calculate-shipping-cost
// ---------------------------------------------------------------------------

/// One courier block of the nested shape, used by both the `results` and
/// `costs` envelopes.
#[derive(Debug, Deserialize)]
pub struct WireCourier {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub costs: Vec<WireService>,
}

#[derive(Debug, Deserialize)]
pub struct WireService {
    pub service: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: Vec<WireCost>,
}

#[derive(Debug, Deserialize)]
pub struct WireCost {
    pub value: Decimal,
    #[serde(default, deserialize_with = "string_or_number")]
    pub etd: String,
}

/// One row of the flat `data` envelope.
#[derive(Debug, Deserialize)]
pub struct WireFlatCost {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub service: String,
    #[serde(default)]
    pub description: String,
    pub cost: Decimal,
    #[serde(default, deserialize_with = "string_or_number")]
    pub etd: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

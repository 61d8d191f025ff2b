//! Normalization of pricing API payloads into the shapes the quote
//! controller works with.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PricingError;
use crate::types::{WireCity, WireCourier, WireFlatCost, WireProvince};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: String,
    /// `Kota` or `Kabupaten`; may be empty.
    pub kind: String,
    pub name: String,
}

impl City {
    /// Display label, e.g. `Kabupaten Bandung`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.kind.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.kind, self.name)
        }
    }
}

/// A priced delivery service for one origin/destination/courier/weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingOption {
    /// Unique within one quote response: `code:service`, suffixed with `#n`
    /// when the courier lists the same service more than once.
    pub id: String,
    pub courier_code: String,
    pub courier_name: String,
    pub service: String,
    pub description: String,
    /// Estimated delivery in days as quoted, e.g. `1-2`. May be empty.
    pub etd: String,
    pub cost: Decimal,
}

#[must_use]
pub fn normalize_provinces(wire: Vec<WireProvince>) -> Vec<Province> {
    wire.into_iter()
        .map(|p| Province {
            id: p.province_id.trim().to_owned(),
            name: p.province_name.trim().to_owned(),
        })
        .filter(|p| !p.id.is_empty())
        .collect()
}

#[must_use]
pub fn normalize_cities(wire: Vec<WireCity>) -> Vec<City> {
    wire.into_iter()
        .map(|c| City {
            id: c.city_id.trim().to_owned(),
            kind: c.kind.trim().to_owned(),
            name: c.city_name.trim().to_owned(),
        })
        .filter(|c| !c.id.is_empty())
        .collect()
}

/// Extracts the best human-readable error explanation from a JSON body.
///
/// Checks, in order: `error`, `rajaongkir.status.description`, `message`,
/// `meta.message`. Blank strings are skipped.
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    let candidates = [
        body.get("error"),
        body.pointer("/rajaongkir/status/description"),
        body.get("message"),
        body.pointer("/meta/message"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Pulls a required array key out of a 2xx body and deserializes it.
///
/// A missing key is [`PricingError::Incomplete`], carrying whatever error the
/// backend embedded in the body.
pub(crate) fn take_array<T: DeserializeOwned>(
    body: &mut Value,
    key: &str,
    context: &str,
) -> Result<Vec<T>, PricingError> {
    match body.get_mut(key).map(Value::take) {
        Some(raw @ Value::Array(_)) => {
            serde_json::from_value(raw).map_err(|source| PricingError::Deserialize {
                context: context.to_owned(),
                source,
            })
        }
        _ => Err(incomplete(body, context)),
    }
}

fn incomplete(body: &Value, context: &str) -> PricingError {
    PricingError::Incomplete {
        context: context.to_owned(),
        message: error_message(body).unwrap_or_else(|| "Data tidak lengkap.".to_string()),
    }
}

/// Normalizes any of the known quote envelopes into a flat option list.
///
/// Accepted shapes, first match wins:
/// - `{ "results": [courier] }` (canonical)
/// - `{ "costs": [courier] }`
/// - `{ "data": [flat cost] }`
///
/// # Errors
///
/// [`PricingError::Incomplete`] if none of the keys hold an array,
/// [`PricingError::Deserialize`] if the array does not match its schema.
pub fn normalize_quote(mut body: Value, context: &str) -> Result<Vec<ShippingOption>, PricingError> {
    let shape = ["results", "costs", "data"]
        .into_iter()
        .find(|key| body.get(*key).is_some_and(Value::is_array));

    let options = match shape {
        Some("data") => {
            let rows: Vec<WireFlatCost> = take_array(&mut body, "data", context)?;
            rows.into_iter().map(flat_option).collect()
        }
        Some(key) => {
            let couriers: Vec<WireCourier> = take_array(&mut body, key, context)?;
            couriers.into_iter().flat_map(nested_options).collect()
        }
        None => return Err(incomplete(&body, context)),
    };

    Ok(assign_ids(options))
}

fn nested_options(courier: WireCourier) -> Vec<ShippingOption> {
    let code = courier.code.trim().to_lowercase();
    let name = courier.name.trim().to_owned();
    let mut out = Vec::new();
    for service in courier.costs {
        for cost in service.cost {
            out.push(ShippingOption {
                id: String::new(),
                courier_code: code.clone(),
                courier_name: name.clone(),
                service: service.service.trim().to_owned(),
                description: service.description.trim().to_owned(),
                etd: clean_etd(&cost.etd),
                cost: cost.value,
            });
        }
    }
    out
}

fn flat_option(row: WireFlatCost) -> ShippingOption {
    ShippingOption {
        id: String::new(),
        courier_code: row.code.trim().to_lowercase(),
        courier_name: row.name.trim().to_owned(),
        service: row.service.trim().to_owned(),
        description: row.description.trim().to_owned(),
        etd: clean_etd(&row.etd),
        cost: row.cost,
    }
}

fn assign_ids(mut options: Vec<ShippingOption>) -> Vec<ShippingOption> {
    let mut seen: Vec<String> = Vec::with_capacity(options.len());
    for option in &mut options {
        let base = format!("{}:{}", option.courier_code, option.service.to_lowercase());
        let repeats = seen.iter().filter(|s| **s == base).count();
        option.id = if repeats == 0 {
            base.clone()
        } else {
            format!("{base}#{}", repeats + 1)
        };
        seen.push(base);
    }
    options
}

/// Strips the unit some couriers append to the estimate (`2-3 HARI`).
fn clean_etd(raw: &str) -> String {
    let trimmed = raw.trim();
    for suffix in [" hari", " days", " day"] {
        let Some(split) = trimmed.len().checked_sub(suffix.len()) else {
            continue;
        };
        if let (Some(head), Some(tail)) = (trimmed.get(..split), trimmed.get(split..)) {
            if tail.eq_ignore_ascii_case(suffix) {
                return head.trim_end().to_owned();
            }
        }
    }
    trimmed.to_owned()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

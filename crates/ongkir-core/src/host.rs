//! Inputs supplied by the page hosting the shipping-quote widget.
//!
//! The storefront renders these as hidden form fields; they are read once when
//! the controller is built and never change for the lifetime of the page.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address the shopper picked on a previous visit, used to pre-seed the
/// province and city fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreselectedAddress {
    pub province_id: String,
    #[serde(default)]
    pub city_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInputs {
    /// Warehouse location the parcel ships from. Required by the pricing API.
    #[serde(default)]
    pub origin_id: Option<String>,
    #[serde(default)]
    pub cart_subtotal: Decimal,
    /// Total cart weight in grams as rendered by the page (not yet normalized).
    #[serde(default)]
    pub total_weight: i64,
    #[serde(default)]
    pub preselected: Option<PreselectedAddress>,
    /// Saved delivery address chosen on the page, if any. Checkout needs it.
    #[serde(default)]
    pub address_id: Option<String>,
}

impl HostInputs {
    /// Builds host inputs from the raw string values of the page's hidden
    /// fields. Unparsable subtotals count as zero and unparsable weights as
    /// one gram; a blank origin is treated as absent.
    #[must_use]
    pub fn from_raw(origin: Option<&str>, subtotal: Option<&str>, weight: Option<&str>) -> Self {
        let origin_id = origin
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let cart_subtotal = subtotal
            .and_then(|s| Decimal::from_str(s.trim()).ok())
            .unwrap_or(Decimal::ZERO);
        let total_weight = weight
            .and_then(|w| w.trim().parse::<i64>().ok())
            .unwrap_or(1);

        Self {
            origin_id,
            cart_subtotal,
            total_weight,
            preselected: None,
            address_id: None,
        }
    }

    #[must_use]
    pub fn with_preselected(mut self, address: PreselectedAddress) -> Self {
        self.preselected = Some(address);
        self
    }

    #[must_use]
    pub fn with_address(mut self, address_id: &str) -> Self {
        self.address_id = Some(address_id.to_owned());
        self
    }

    /// Origin id if it names a real location. `"0"` is what the backend
    /// renders when the store has no configured warehouse.
    #[must_use]
    pub fn valid_origin(&self) -> Option<&str> {
        self.origin_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.trim_start_matches('0').is_empty())
    }
}

/// Coerces a cart weight into something a courier can quote: anything at or
/// below zero becomes one gram.
#[must_use]
pub fn normalize_weight(raw_grams: i64) -> u32 {
    if raw_grams <= 0 {
        return 1;
    }
    u32::try_from(raw_grams).unwrap_or(u32::MAX)
}

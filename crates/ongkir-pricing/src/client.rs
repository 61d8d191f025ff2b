//! HTTP client for the storefront pricing API.
//!
//! Wraps `reqwest` with the backend's quirks: every endpoint must answer with
//! JSON (HTML login or error pages are rejected up front), non-2xx bodies are
//! mined for an explanation, and payloads are normalized before they leave
//! the crate.

use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde_json::Value;

use crate::error::PricingError;
use crate::normalize::{
    error_message, normalize_cities, normalize_provinces, normalize_quote, take_array, City,
    Province, ShippingOption,
};
use crate::types::{QuoteQuery, WireCity, WireProvince};

const CSRF_HEADER: &str = "X-CSRF-Token";
const GENERIC_FAILURE: &str = "Terjadi kesalahan pada server.";

/// Client for the pricing API.
///
/// Use [`PricingClient::new`] with the storefront's base URL; tests point it
/// at a wiremock server.
pub struct PricingClient {
    client: Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl PricingClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// `timeout_secs` bounds every request so a hung backend cannot leave a
    /// field loading forever.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PricingError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PricingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PricingError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            csrf_token: None,
        })
    }

    /// Attaches a CSRF token sent with quote requests.
    #[must_use]
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Lists the provinces a parcel can be sent to.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Http`] on network failure.
    /// - [`PricingError::NotJson`] / [`PricingError::Status`] for unusable responses.
    /// - [`PricingError::Incomplete`] if the body has no `provinces` array.
    /// - [`PricingError::Deserialize`] if the entries do not match the schema.
    pub async fn list_provinces(&self) -> Result<Vec<Province>, PricingError> {
        let url = self.endpoint("provinces", &[])?;
        tracing::debug!(%url, "fetching provinces");
        let response = self.client.get(url.clone()).send().await?;
        let mut body = read_json(response, &url).await?;
        let wire: Vec<WireProvince> = take_array(&mut body, "provinces", "provinces")?;
        Ok(normalize_provinces(wire))
    }

    /// Lists the cities of one province.
    ///
    /// # Errors
    ///
    /// Same as [`PricingClient::list_provinces`], with `cities` as the
    /// required key.
    pub async fn list_cities(&self, province_id: &str) -> Result<Vec<City>, PricingError> {
        let url = self.endpoint("cities", &[("province_id", province_id)])?;
        tracing::debug!(%url, province_id, "fetching cities");
        let response = self.client.get(url.clone()).send().await?;
        let mut body = read_json(response, &url).await?;
        let context = format!("cities(province_id={province_id})");
        let wire: Vec<WireCity> = take_array(&mut body, "cities", &context)?;
        Ok(normalize_cities(wire))
    }

    /// Quotes every service the courier offers for the route and weight.
    ///
    /// An empty list is a valid answer: the courier does not serve the route.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Http`] on network failure.
    /// - [`PricingError::NotJson`] / [`PricingError::Status`] for unusable responses.
    /// - [`PricingError::Incomplete`] if no known quote envelope is present.
    /// - [`PricingError::Deserialize`] if the envelope contents do not match.
    pub async fn calculate_shipping_cost(
        &self,
        query: &QuoteQuery,
    ) -> Result<Vec<ShippingOption>, PricingError> {
        let url = self.endpoint("calculate-shipping-cost", &[])?;
        tracing::debug!(
            %url,
            origin = %query.origin,
            destination = %query.destination,
            weight = query.weight,
            courier = %query.courier,
            "requesting shipping quote"
        );

        let mut request = self.client.post(url.clone()).json(query);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        let response = request.send().await?;
        let body = read_json(response, &url).await?;
        let context = format!(
            "calculate-shipping-cost({}->{} {}g {})",
            query.origin, query.destination, query.weight, query.courier
        );
        normalize_quote(body, &context)
    }

    /// Resolves `path` against the base URL and appends query parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, PricingError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PricingError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// Reads a response body as JSON.
///
/// The content type is checked before the status: an HTML error page is a
/// protocol failure whatever its status code. Non-2xx JSON bodies become
/// [`PricingError::Status`] with the most specific explanation available.
async fn read_json(response: Response, url: &Url) -> Result<Value, PricingError> {
    let status = response.status();
    let content_type = header_content_type(response.headers());
    let text = response.text().await?;

    if !content_type.as_deref().is_some_and(is_json) {
        let snippet: String = text.chars().take(100).collect();
        tracing::warn!(
            %url,
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            %snippet,
            "expected JSON response"
        );
        return Err(PricingError::NotJson {
            url: url.to_string(),
            content_type,
        });
    }

    if !status.is_success() {
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let message = error_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned());
        tracing::warn!(%url, status = status.as_u16(), %message, "pricing API returned error status");
        return Err(PricingError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|source| PricingError::Deserialize {
        context: url.to_string(),
        source,
    })
}

fn header_content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn is_json(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

//! Client for the storefront's shipping pricing API.
//!
//! The backend proxies a courier aggregator and has shipped several response
//! shapes over time. Everything leaving this crate is normalized into
//! [`Province`], [`City`] and [`ShippingOption`]; anything that does not fit
//! is rejected as a [`PricingError`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::PricingClient;
pub use error::PricingError;
pub use normalize::{City, Province, ShippingOption};
pub use types::QuoteQuery;

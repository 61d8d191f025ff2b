use ongkir_pricing::PricingError;
use thiserror::Error;

use crate::field::Field;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// The host page did not supply a usable binding (origin, couriers).
    /// Fatal for the whole widget.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required selection is missing or unknown. Recoverable by the user.
    #[error("{message}")]
    Validation { field: Field, message: String },

    /// Checkout was attempted before a saved delivery address was chosen.
    #[error("{0}")]
    MissingAddress(String),

    /// The pricing API could not be reached.
    #[error("network error: {0}")]
    Network(#[source] PricingError),

    /// The pricing API answered with something unusable.
    #[error("protocol error: {0}")]
    Protocol(#[source] PricingError),
}

impl QuoteError {
    pub(crate) fn validation(field: Field, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<PricingError> for QuoteError {
    fn from(err: PricingError) -> Self {
        if err.is_network() {
            Self::Network(err)
        } else {
            Self::Protocol(err)
        }
    }
}

use thiserror::Error;

/// Errors returned by the pricing API client.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The backend answered with something other than JSON (usually an HTML
    /// error or login page).
    #[error("expected JSON from {url}, got content type {content_type:?}")]
    NotJson {
        url: String,
        content_type: Option<String>,
    },

    /// Non-2xx status. `message` is the best explanation found in the body.
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// 2xx JSON that lacks the payload key the endpoint promises.
    #[error("incomplete response for {context}: {message}")]
    Incomplete { context: String, message: String },

    /// The payload key is present but its contents do not match the schema.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PricingError {
    /// True when the request never produced a usable HTTP response.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Shopper-facing explanation, in the storefront's language.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Http(_) => "Terjadi kesalahan jaringan.".to_string(),
            Self::InvalidBaseUrl { .. } => {
                "Alamat layanan ongkos kirim tidak valid.".to_string()
            }
            Self::NotJson { .. } => "Respons tidak valid atau bukan JSON.".to_string(),
            Self::Status { message, .. } | Self::Incomplete { message, .. } => message.clone(),
            Self::Deserialize { .. } => "Data tidak lengkap atau format tidak sesuai.".to_string(),
        }
    }
}

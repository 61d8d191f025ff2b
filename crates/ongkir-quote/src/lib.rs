//! Shipping quote controller.
//!
//! Owns the province → city → courier → shipping-option cascade, the derived
//! order totals and the checkout button's readiness. The controller itself
//! is synchronous: every network-backed step is split into a dispatch that
//! returns a request ticket and a completion that applies the response only
//! if the ticket is still current. [`QuoteSession`] drives those steps
//! against a live [`ongkir_pricing::PricingClient`].

pub mod controller;
pub mod error;
pub mod field;
pub mod session;
pub mod view;

pub use controller::{
    CheckoutSummary, CityRequest, Completion, OrderTotals, ProvinceRequest, QuoteRequest,
    SelectionState, ShippingController,
};
pub use error::QuoteError;
pub use field::{Courier, Field, FieldState};
pub use session::QuoteSession;
pub use view::{FieldView, Notice, NoticeLevel, OptionView, QuoteView};

//! Async driver pairing a [`ShippingController`] with a live
//! [`PricingClient`].
//!
//! Each method dispatches on the controller, awaits the request and hands
//! the response back, following any chained request (a pre-selected city,
//! a re-quote after a city change) until the cascade settles.

use ongkir_core::HostInputs;
use ongkir_pricing::PricingClient;

use crate::controller::{
    CheckoutSummary, CityRequest, Completion, QuoteRequest, ShippingController,
};
use crate::error::QuoteError;
use crate::view::QuoteView;

pub struct QuoteSession {
    controller: ShippingController,
    client: PricingClient,
}

impl QuoteSession {
    /// # Errors
    ///
    /// Returns [`QuoteError::Configuration`] if the host inputs or courier
    /// list are unusable.
    pub fn new(
        host: HostInputs,
        couriers: &[String],
        client: PricingClient,
    ) -> Result<Self, QuoteError> {
        Ok(Self {
            controller: ShippingController::new(host, couriers)?,
            client,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &ShippingController {
        &self.controller
    }

    #[must_use]
    pub fn view(&self) -> QuoteView {
        self.controller.view()
    }

    /// Fetches the province list, then any pre-selected city list.
    ///
    /// Fetch failures are reflected in the view, not returned.
    pub async fn load_provinces(&mut self) {
        let request = self.controller.begin_load_provinces();
        let result = self.client.list_provinces().await;
        if let Completion::Applied(Some(next)) = self.controller.finish_load_provinces(request, result) {
            self.run_cities(next).await;
        }
    }

    /// # Errors
    ///
    /// Validation errors from [`ShippingController::select_province`].
    pub async fn select_province(&mut self, province_id: Option<&str>) -> Result<(), QuoteError> {
        if let Some(request) = self.controller.select_province(province_id)? {
            self.run_cities(request).await;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Validation errors from [`ShippingController::select_city`].
    pub async fn select_city(&mut self, city_id: Option<&str>) -> Result<(), QuoteError> {
        if let Some(request) = self.controller.select_city(city_id)? {
            self.run_quote(request).await;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Validation errors from [`ShippingController::select_courier`].
    pub async fn select_courier(&mut self, code: Option<&str>) -> Result<(), QuoteError> {
        if let Some(request) = self.controller.select_courier(code)? {
            self.run_quote(request).await;
        }
        Ok(())
    }

    /// Re-runs the quote for the current selection.
    ///
    /// # Errors
    ///
    /// The unmet precondition, see [`ShippingController::quote_shipping`].
    pub async fn requote(&mut self) -> Result<(), QuoteError> {
        let request = self.controller.quote_shipping()?;
        self.run_quote(request).await;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`ShippingController::select_shipping_option`].
    pub fn select_shipping_option(&mut self, option_id: Option<&str>) -> Result<(), QuoteError> {
        self.controller.select_shipping_option(option_id)
    }

    pub fn select_address(&mut self, address_id: Option<&str>) {
        self.controller.select_address(address_id);
    }

    /// # Errors
    ///
    /// See [`ShippingController::attempt_checkout`].
    pub fn attempt_checkout(&mut self) -> Result<CheckoutSummary, QuoteError> {
        self.controller.attempt_checkout()
    }

    async fn run_cities(&mut self, request: CityRequest) {
        let result = self.client.list_cities(request.province_id()).await;
        if let Completion::Applied(Some(next)) = self.controller.finish_load_cities(request, result) {
            self.run_quote(next).await;
        }
    }

    async fn run_quote(&mut self, request: QuoteRequest) {
        let result = self.client.calculate_shipping_cost(request.query()).await;
        self.controller.finish_quote(request, result);
    }
}

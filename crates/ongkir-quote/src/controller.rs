//! The shipping quote cascade.
//!
//! `ShippingController` is the only owner of the selection and totals state.
//! Every mutation goes through one of its operations; front ends read the
//! result back through [`ShippingController::view`].

use ongkir_core::{
    format_rupiah, normalize_courier_codes, normalize_weight, HostInputs, PreselectedAddress,
};
use ongkir_pricing::{City, PricingError, Province, QuoteQuery, ShippingOption};
use rust_decimal::Decimal;

use crate::error::QuoteError;
use crate::field::{Choice, Courier, Field, FieldSlot, FieldState};
use crate::view::{
    placeholder, FieldView, Notice, NoticeLevel, OptionLabel, OptionView, QuoteView,
};

const ORIGIN_MISSING: &str =
    "Konfigurasi toko asal pengiriman tidak valid. Mohon hubungi admin.";
const ADDRESS_MISSING: &str = "Mohon pilih Alamat Pengiriman sebelum melanjutkan.";

/// Current value of every field in the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub province_id: Option<String>,
    pub city_id: Option<String>,
    pub courier: Option<String>,
    pub shipping_option_id: Option<String>,
}

impl SelectionState {
    /// Checkout may proceed once destination, courier and shipping option
    /// are all chosen.
    #[must_use]
    pub fn is_checkout_ready(&self) -> bool {
        self.city_id.is_some() && self.courier.is_some() && self.shipping_option_id.is_some()
    }

    /// First field of the chain without a value.
    #[must_use]
    pub fn first_missing(&self) -> Option<Field> {
        [
            (Field::Province, &self.province_id),
            (Field::City, &self.city_id),
            (Field::Courier, &self.courier),
            (Field::ShippingOption, &self.shipping_option_id),
        ]
        .into_iter()
        .find(|(_, value)| value.is_none())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub cart_subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub grand_total: Decimal,
}

impl OrderTotals {
    #[must_use]
    pub fn new(cart_subtotal: Decimal, shipping_cost: Decimal) -> Self {
        Self {
            cart_subtotal,
            shipping_cost,
            grand_total: cart_subtotal + shipping_cost,
        }
    }
}

/// Values the checkout form submits once the chain is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub address_id: String,
    pub province_id: String,
    pub destination_id: String,
    pub courier: String,
    pub shipping_option_id: String,
    /// Courier code reported by the pricing API for the chosen option.
    pub service_code: String,
    pub service_name: String,
    pub weight: u32,
    pub shipping_cost: Decimal,
    pub grand_total: Decimal,
}

/// Ticket for an in-flight province list request.
#[must_use = "the request must be completed with finish_load_provinces"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceRequest {
    generation: u64,
}

/// Ticket for an in-flight city list request.
#[must_use = "the request must be completed with finish_load_cities"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRequest {
    generation: u64,
    province_id: String,
}

impl CityRequest {
    #[must_use]
    pub fn province_id(&self) -> &str {
        &self.province_id
    }
}

/// Ticket for an in-flight shipping quote.
#[must_use = "the request must be completed with finish_quote"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    generation: u64,
    query: QuoteQuery,
}

impl QuoteRequest {
    #[must_use]
    pub fn query(&self) -> &QuoteQuery {
        &self.query
    }
}

/// Result of handing a response back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    /// The response matched the current selection and was applied. Carries
    /// any follow-up request the new state calls for.
    Applied(T),
    /// The selection changed after the request was sent; nothing changed.
    Superseded,
}

impl<T> Completion<T> {
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    pub fn into_applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

pub struct ShippingController {
    origin_id: String,
    weight: u32,
    cart_subtotal: Decimal,
    preselected: Option<PreselectedAddress>,
    address_id: Option<String>,
    courier_catalog: Vec<Courier>,
    provinces: FieldSlot<Province>,
    cities: FieldSlot<City>,
    couriers: FieldSlot<Courier>,
    options: FieldSlot<ShippingOption>,
    shipping_cost: Decimal,
    notice: Option<Notice>,
    last_failure: Option<QuoteError>,
}

impl ShippingController {
    /// Builds a controller from the host page bindings.
    ///
    /// Weight is normalized here, once: anything at or below zero is quoted
    /// as one gram.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Configuration`] if the origin location is
    /// missing or zero, or if no courier codes are offered.
    pub fn new(host: HostInputs, couriers: &[String]) -> Result<Self, QuoteError> {
        let Some(origin_id) = host.valid_origin().map(str::to_owned) else {
            tracing::error!(origin = ?host.origin_id, "origin location missing from host page");
            return Err(QuoteError::Configuration(ORIGIN_MISSING.to_string()));
        };

        let courier_catalog: Vec<Courier> =
            normalize_courier_codes(couriers.iter().map(String::as_str))
                .into_iter()
                .map(|code| Courier { code })
                .collect();
        if courier_catalog.is_empty() {
            return Err(QuoteError::Configuration(
                "no courier codes configured".to_string(),
            ));
        }

        let weight = normalize_weight(host.total_weight);
        if i64::from(weight) != host.total_weight {
            tracing::debug!(raw = host.total_weight, weight, "normalized cart weight");
        }

        Ok(Self {
            origin_id,
            weight,
            cart_subtotal: host.cart_subtotal,
            preselected: host.preselected,
            address_id: host
                .address_id
                .map(|id| id.trim().to_owned())
                .filter(|id| !id.is_empty()),
            courier_catalog,
            provinces: FieldSlot::disabled(),
            cities: FieldSlot::disabled(),
            couriers: FieldSlot::disabled(),
            options: FieldSlot::disabled(),
            shipping_cost: Decimal::ZERO,
            notice: None,
            last_failure: None,
        })
    }

    #[must_use]
    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    #[must_use]
    pub fn address_id(&self) -> Option<&str> {
        self.address_id.as_deref()
    }

    /// Cart weight in grams as sent to the pricing API.
    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    // -----------------------------------------------------------------------
    // Province
    // -----------------------------------------------------------------------

    pub fn begin_load_provinces(&mut self) -> ProvinceRequest {
        let generation = self.provinces.begin_loading();
        self.reset_downstream(Field::Province);
        self.notice = None;
        tracing::debug!(generation, "loading provinces");
        ProvinceRequest { generation }
    }

    /// Applies a province list. When the host pre-selected an address whose
    /// province is listed, that province is selected and the returned
    /// follow-up loads its cities.
    pub fn finish_load_provinces(
        &mut self,
        request: ProvinceRequest,
        result: Result<Vec<Province>, PricingError>,
    ) -> Completion<Option<CityRequest>> {
        if !self.provinces.is_current(request.generation) {
            tracing::warn!(generation = request.generation, "discarding superseded province list");
            return Completion::Superseded;
        }

        match result {
            Ok(provinces) => {
                tracing::info!(count = provinces.len(), "provinces loaded");
                self.provinces.populate(provinces);
                if self.provinces.state() == FieldState::Empty {
                    self.notify(NoticeLevel::Warning, "Data provinsi tidak tersedia.");
                    return Completion::Applied(None);
                }

                let preselected = self
                    .preselected
                    .as_ref()
                    .map(|p| p.province_id.clone())
                    .filter(|id| self.provinces.find(id).is_some());
                if let Some(id) = preselected {
                    return Completion::Applied(Some(self.apply_province(&id)));
                }
                self.notify(
                    NoticeLevel::Warning,
                    "Pilih Provinsi, Kota, dan Kurir untuk menghitung ongkir.",
                );
                Completion::Applied(None)
            }
            Err(err) => {
                self.provinces.fail();
                self.record_failure(Field::Province, err, "memuat provinsi");
                Completion::Applied(None)
            }
        }
    }

    /// Changes the province. Clearing it disables every later field; setting
    /// it starts loading that province's cities.
    ///
    /// When the province list was never fetched (the host rendered it
    /// server-side) any id is accepted.
    ///
    /// # Errors
    ///
    /// [`QuoteError::Validation`] if the province list is still loading or
    /// does not contain `province_id`. State is left untouched.
    pub fn select_province(
        &mut self,
        province_id: Option<&str>,
    ) -> Result<Option<CityRequest>, QuoteError> {
        if self.provinces.state() == FieldState::Loading {
            return Err(QuoteError::validation(
                Field::Province,
                "Daftar provinsi masih dimuat.",
            ));
        }

        let Some(id) = province_id.map(str::trim).filter(|s| !s.is_empty()) else {
            self.provinces.clear_selection();
            self.reset_downstream(Field::Province);
            self.preselected = None;
            self.notify(
                NoticeLevel::Warning,
                "Mohon pilih Provinsi terlebih dahulu untuk melihat opsi pengiriman.",
            );
            return Ok(None);
        };

        if !self.provinces.options().is_empty() && self.provinces.find(id).is_none() {
            return Err(QuoteError::validation(
                Field::Province,
                format!("Provinsi tidak dikenal: {id}"),
            ));
        }
        if self.preselected.as_ref().is_some_and(|p| p.province_id != id) {
            self.preselected = None;
        }
        Ok(Some(self.apply_province(id)))
    }

    fn apply_province(&mut self, id: &str) -> CityRequest {
        self.provinces.select(id);
        self.reset_downstream(Field::Province);
        let generation = self.cities.begin_loading();
        self.notice = None;
        self.last_failure = None;
        tracing::debug!(province_id = id, generation, "loading cities");
        CityRequest {
            generation,
            province_id: id.to_owned(),
        }
    }

    // -----------------------------------------------------------------------
    // City
    // -----------------------------------------------------------------------

    /// Applies a city list for the province named in `request`.
    ///
    /// A pending pre-selected city is chosen automatically if listed; the
    /// follow-up is a quote request when a courier is already chosen.
    pub fn finish_load_cities(
        &mut self,
        request: CityRequest,
        result: Result<Vec<City>, PricingError>,
    ) -> Completion<Option<QuoteRequest>> {
        let still_selected = self.provinces.selected_id() == Some(request.province_id.as_str());
        if !still_selected || !self.cities.is_current(request.generation) {
            tracing::warn!(
                province_id = %request.province_id,
                generation = request.generation,
                "discarding superseded city list"
            );
            return Completion::Superseded;
        }

        match result {
            Ok(cities) => {
                tracing::info!(
                    province_id = %request.province_id,
                    count = cities.len(),
                    "cities loaded"
                );
                self.cities.populate(cities);
                if self.cities.state() == FieldState::Empty {
                    self.notify(
                        NoticeLevel::Warning,
                        "Tidak ada Kota/Kabupaten untuk provinsi ini.",
                    );
                    return Completion::Applied(None);
                }
                self.notice = None;

                let pending = self
                    .preselected
                    .take()
                    .and_then(|p| p.city_id)
                    .filter(|id| self.cities.find(id).is_some());
                match pending {
                    Some(id) => Completion::Applied(self.apply_city(&id)),
                    None => Completion::Applied(None),
                }
            }
            Err(err) => {
                self.cities.fail();
                self.record_failure(Field::City, err, "memuat kota");
                Completion::Applied(None)
            }
        }
    }

    /// Changes the destination city.
    ///
    /// Clearing it disables the courier and shipping fields. Setting it
    /// enables the courier field, drops any previous quote, and re-quotes if
    /// a courier is already chosen.
    ///
    /// # Errors
    ///
    /// [`QuoteError::Validation`] if no city list is available or `city_id`
    /// is not in it.
    pub fn select_city(&mut self, city_id: Option<&str>) -> Result<Option<QuoteRequest>, QuoteError> {
        if !self.cities.has_choices() {
            let message = if self.provinces.selected_id().is_none() {
                "Mohon pilih Provinsi terlebih dahulu."
            } else {
                "Daftar Kota/Kabupaten belum tersedia."
            };
            return Err(QuoteError::validation(Field::City, message));
        }

        let Some(id) = city_id.map(str::trim).filter(|s| !s.is_empty()) else {
            self.cities.clear_selection();
            self.reset_downstream(Field::City);
            self.notify(NoticeLevel::Warning, "Mohon pilih Kota/Kabupaten.");
            return Ok(None);
        };

        if self.cities.find(id).is_none() {
            return Err(QuoteError::validation(
                Field::City,
                format!("Kota/Kabupaten tidak dikenal: {id}"),
            ));
        }
        Ok(self.apply_city(id))
    }

    fn apply_city(&mut self, id: &str) -> Option<QuoteRequest> {
        self.cities.select(id);
        self.reset_downstream(Field::Courier);
        if self.couriers.state() == FieldState::Disabled {
            self.couriers.populate(self.courier_catalog.clone());
        }
        tracing::debug!(city_id = id, "destination selected");

        if self.couriers.selected_id().is_some() {
            self.quote_shipping().ok()
        } else {
            self.notify(NoticeLevel::Warning, "Mohon pilih Kurir.");
            None
        }
    }

    // -----------------------------------------------------------------------
    // Courier
    // -----------------------------------------------------------------------

    /// Changes the courier and, with a value, requests a quote.
    ///
    /// # Errors
    ///
    /// [`QuoteError::Validation`] if the courier field is not enabled yet
    /// (no city) or `code` is not an offered courier.
    pub fn select_courier(&mut self, code: Option<&str>) -> Result<Option<QuoteRequest>, QuoteError> {
        if !self.couriers.has_choices() {
            return Err(QuoteError::validation(
                Field::Courier,
                "Mohon pilih Kota/Kabupaten terlebih dahulu.",
            ));
        }

        let Some(code) = code.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty()) else {
            self.couriers.clear_selection();
            self.reset_downstream(Field::Courier);
            self.notify(NoticeLevel::Warning, "Mohon pilih Kurir.");
            return Ok(None);
        };

        if self.couriers.find(&code).is_none() {
            return Err(QuoteError::validation(
                Field::Courier,
                format!("Kurir tidak dikenal: {code}"),
            ));
        }
        self.couriers.select(&code);
        self.quote_shipping().map(Some)
    }

    // -----------------------------------------------------------------------
    // Shipping quote
    // -----------------------------------------------------------------------

    /// Requests a quote for the current origin, destination, weight and
    /// courier. Any previous quote and selected option are dropped first.
    ///
    /// Calling it again with an unchanged selection is how a failed quote is
    /// retried.
    ///
    /// # Errors
    ///
    /// A failed precondition sets a field-specific notice and returns
    /// [`QuoteError::Configuration`] (origin) or [`QuoteError::Validation`]
    /// without issuing a request.
    pub fn quote_shipping(&mut self) -> Result<QuoteRequest, QuoteError> {
        self.reset_downstream(Field::Courier);

        if self.origin_id.is_empty() {
            self.notify(NoticeLevel::Error, "Kota asal pengiriman belum ditentukan.");
            return Err(QuoteError::Configuration(ORIGIN_MISSING.to_string()));
        }
        if self.weight == 0 {
            let message = "Berat total produk harus lebih dari 0.";
            self.notify(NoticeLevel::Error, message);
            return Err(QuoteError::validation(Field::ShippingOption, message));
        }
        let Some(destination) = self.cities.selected_id().map(str::to_owned) else {
            let message = "Mohon pilih Kota/Kabupaten.";
            self.notify(NoticeLevel::Warning, message);
            return Err(QuoteError::validation(Field::City, message));
        };
        let Some(courier) = self.couriers.selected_id().map(str::to_owned) else {
            let message = "Mohon pilih Kurir.";
            self.notify(NoticeLevel::Warning, message);
            return Err(QuoteError::validation(Field::Courier, message));
        };

        let query = QuoteQuery {
            origin: self.origin_id.clone(),
            destination,
            weight: self.weight,
            courier,
        };
        let generation = self.options.begin_loading();
        self.last_failure = None;
        self.notify(NoticeLevel::Info, "Memuat opsi pengiriman...");
        tracing::debug!(
            origin = %query.origin,
            destination = %query.destination,
            weight = query.weight,
            courier = %query.courier,
            generation,
            "requesting shipping quote"
        );
        Ok(QuoteRequest { generation, query })
    }

    /// Applies a quote response if it still matches the current selection.
    pub fn finish_quote(
        &mut self,
        request: QuoteRequest,
        result: Result<Vec<ShippingOption>, PricingError>,
    ) -> Completion<()> {
        let query = &request.query;
        let still_selected = self.cities.selected_id() == Some(query.destination.as_str())
            && self.couriers.selected_id() == Some(query.courier.as_str());
        if !still_selected || !self.options.is_current(request.generation) {
            tracing::warn!(
                destination = %query.destination,
                courier = %query.courier,
                generation = request.generation,
                "discarding superseded shipping quote"
            );
            return Completion::Superseded;
        }

        match result {
            Ok(options) => {
                tracing::info!(
                    destination = %query.destination,
                    courier = %query.courier,
                    count = options.len(),
                    "shipping options loaded"
                );
                self.options.populate(options);
                if self.options.state() == FieldState::Empty {
                    self.notify(
                        NoticeLevel::Warning,
                        "Tidak ada opsi pengiriman tersedia untuk rute ini atau kurir yang dipilih.",
                    );
                } else {
                    self.notify(NoticeLevel::Success, "Pilih opsi pengiriman.");
                }
            }
            Err(err) => {
                self.options.fail();
                self.record_failure(Field::ShippingOption, err, "menghitung ongkir");
            }
        }
        Completion::Applied(())
    }

    /// Chooses (or clears) a shipping option and updates the totals.
    ///
    /// # Errors
    ///
    /// [`QuoteError::Validation`] if no options are listed or `option_id`
    /// is not one of them.
    pub fn select_shipping_option(&mut self, option_id: Option<&str>) -> Result<(), QuoteError> {
        if !self.options.has_choices() {
            return Err(QuoteError::validation(
                Field::ShippingOption,
                "Opsi pengiriman belum tersedia.",
            ));
        }

        let Some(id) = option_id.map(str::trim).filter(|s| !s.is_empty()) else {
            self.options.clear_selection();
            self.shipping_cost = Decimal::ZERO;
            self.notify(NoticeLevel::Warning, "Silakan pilih opsi pengiriman.");
            return Ok(());
        };

        let Some(cost) = self.options.find(id).map(|o| o.cost) else {
            return Err(QuoteError::validation(
                Field::ShippingOption,
                format!("Opsi pengiriman tidak dikenal: {id}"),
            ));
        };
        self.options.select(id);
        self.shipping_cost = cost;
        self.notify(
            NoticeLevel::Success,
            format!("Opsi pengiriman dipilih: {}", format_rupiah(cost)),
        );
        Ok(())
    }

    /// Clears and disables every field after `from`, drops the shipping
    /// cost when the shipping option is among them, and invalidates their
    /// in-flight requests. Idempotent.
    pub fn reset_downstream(&mut self, from: Field) {
        for field in from.downstream() {
            match field {
                Field::Province => self.provinces.reset(),
                Field::City => self.cities.reset(),
                Field::Courier => self.couriers.reset(),
                Field::ShippingOption => self.options.reset(),
            }
        }
        if from < Field::ShippingOption {
            self.shipping_cost = Decimal::ZERO;
        }
    }

    // -----------------------------------------------------------------------
    // Delivery address
    // -----------------------------------------------------------------------

    /// Records the saved delivery address. The address sits outside the
    /// province chain, so nothing downstream is reset.
    pub fn select_address(&mut self, address_id: Option<&str>) {
        self.address_id = address_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        match &self.address_id {
            Some(id) => {
                tracing::debug!(address = %id, "delivery address selected");
                self.notice = None;
            }
            None => self.notify(
                NoticeLevel::Warning,
                "Pilih alamat pengiriman untuk melihat opsi ongkir.",
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Checkout
    // -----------------------------------------------------------------------

    /// Revalidates the delivery address and the whole chain before leaving
    /// the page.
    ///
    /// # Errors
    ///
    /// [`QuoteError::MissingAddress`] when no delivery address is chosen,
    /// otherwise [`QuoteError::Validation`] naming the first missing field.
    pub fn attempt_checkout(&mut self) -> Result<CheckoutSummary, QuoteError> {
        let Some(address_id) = self.address_id.clone() else {
            tracing::warn!("checkout blocked without a delivery address");
            self.notify(NoticeLevel::Error, ADDRESS_MISSING);
            return Err(QuoteError::MissingAddress(ADDRESS_MISSING.to_string()));
        };

        let selection = self.selection();
        let missing = selection.first_missing().or_else(|| {
            self.options
                .selected()
                .is_none()
                .then_some(Field::ShippingOption)
        });
        if let Some(field) = missing {
            let message = format!("Mohon pilih {} sebelum melanjutkan.", field.label());
            tracing::warn!(%field, "checkout blocked by incomplete selection");
            self.notify(NoticeLevel::Error, message.clone());
            return Err(QuoteError::validation(field, message));
        }

        let (Some(province_id), Some(destination_id), Some(courier), Some(option)) = (
            selection.province_id,
            selection.city_id,
            selection.courier,
            self.options.selected(),
        ) else {
            return Err(QuoteError::validation(
                Field::ShippingOption,
                "Mohon lengkapi semua opsi pengiriman sebelum melanjutkan.",
            ));
        };

        let totals = self.totals();
        let service_name = if option.courier_name.is_empty() {
            format!("{} - {}", option.courier_code.to_uppercase(), option.service)
        } else {
            format!("{} - {}", option.courier_name, option.service)
        };
        let summary = CheckoutSummary {
            address_id,
            province_id,
            destination_id,
            courier,
            shipping_option_id: option.id.clone(),
            service_code: option.courier_code.clone(),
            service_name,
            weight: self.weight,
            shipping_cost: totals.shipping_cost,
            grand_total: totals.grand_total,
        };
        tracing::info!(
            address = %summary.address_id,
            destination = %summary.destination_id,
            service = %summary.service_code,
            grand_total = %summary.grand_total,
            "checkout ready"
        );
        self.notify(NoticeLevel::Success, "Semua siap untuk checkout!");
        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Derived state
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        SelectionState {
            province_id: self.provinces.selected_id().map(str::to_owned),
            city_id: self.cities.selected_id().map(str::to_owned),
            courier: self.couriers.selected_id().map(str::to_owned),
            shipping_option_id: self.options.selected_id().map(str::to_owned),
        }
    }

    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::new(self.cart_subtotal, self.shipping_cost)
    }

    #[must_use]
    pub fn checkout_ready(&self) -> bool {
        self.selection().is_checkout_ready()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Error behind the most recent failed fetch, cleared by the next
    /// request.
    #[must_use]
    pub fn last_failure(&self) -> Option<&QuoteError> {
        self.last_failure.as_ref()
    }

    #[must_use]
    pub fn field_view(&self, field: Field) -> FieldView {
        match field {
            Field::Province => slot_view(field, &self.provinces),
            Field::City => slot_view(field, &self.cities),
            Field::Courier => slot_view(field, &self.couriers),
            Field::ShippingOption => slot_view(field, &self.options),
        }
    }

    #[must_use]
    pub fn view(&self) -> QuoteView {
        let totals = self.totals();
        QuoteView {
            province: self.field_view(Field::Province),
            city: self.field_view(Field::City),
            courier: self.field_view(Field::Courier),
            shipping_option: self.field_view(Field::ShippingOption),
            notice: self.notice.clone(),
            shipping_fee_display: format_rupiah(totals.shipping_cost),
            grand_total_display: format_rupiah(totals.grand_total),
            checkout_enabled: self.checkout_ready(),
        }
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice::new(level, text));
    }

    fn record_failure(&mut self, field: Field, err: PricingError, action: &str) {
        let text = if err.is_network() {
            format!("Terjadi kesalahan jaringan saat {action}.")
        } else {
            format!("Gagal {action}: {}", err.detail())
        };
        tracing::warn!(%field, error = %err, "failed to load options");
        self.notify(NoticeLevel::Error, text);
        self.last_failure = Some(QuoteError::from(err));
    }
}

fn slot_view<T: Choice + OptionLabel>(field: Field, slot: &FieldSlot<T>) -> FieldView {
    let state = slot.state();
    // The province field has no parent: it stays usable unless loading.
    let enabled = if field == Field::Province {
        state != FieldState::Loading
    } else {
        slot.has_choices()
    };
    FieldView {
        field,
        state,
        enabled,
        placeholder: placeholder(field, state),
        options: slot
            .options()
            .iter()
            .map(|o| OptionView {
                id: o.id().to_owned(),
                label: o.option_label(),
            })
            .collect(),
        selected: slot.selected_id().map(str::to_owned),
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

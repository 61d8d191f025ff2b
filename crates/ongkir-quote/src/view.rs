//! Render-ready snapshot of the controller for whatever front end hosts it.

use ongkir_core::format_rupiah;
use ongkir_pricing::{City, Province, ShippingOption};

use crate::field::{Courier, Field, FieldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// The single message line under the shipping form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub(crate) fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub state: FieldState,
    pub enabled: bool,
    /// Text of the leading empty option, which doubles as the status line
    /// of the field (`--Memuat ...--`, `--Gagal Memuat--`, ...).
    pub placeholder: &'static str,
    pub options: Vec<OptionView>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub province: FieldView,
    pub city: FieldView,
    pub courier: FieldView,
    pub shipping_option: FieldView,
    pub notice: Option<Notice>,
    pub shipping_fee_display: String,
    pub grand_total_display: String,
    pub checkout_enabled: bool,
}

pub(crate) const LOAD_FAILED: &str = "--Gagal Memuat--";

/// Placeholder label for a field in a given state.
#[must_use]
pub fn placeholder(field: Field, state: FieldState) -> &'static str {
    match (field, state) {
        (_, FieldState::Failed) => LOAD_FAILED,
        (Field::Province, FieldState::Loading) => "--Memuat Provinsi--",
        (Field::City, FieldState::Loading) => "--Memuat Kota/Kabupaten--",
        (Field::ShippingOption, FieldState::Loading) => "--Memuat Opsi Pengiriman--",
        (Field::Province | Field::City, FieldState::Empty) => "--Tidak Ada Data--",
        (Field::ShippingOption, FieldState::Empty) => "--Tidak Tersedia--",
        (Field::Province, _) => "--Pilih Provinsi--",
        (Field::City, _) => "--Pilih Kota/Kabupaten--",
        (Field::Courier, _) => "--Pilih Kurir--",
        (Field::ShippingOption, _) => "--Pilih Opsi Pengiriman--",
    }
}

/// Label text for one entry of a select field.
pub trait OptionLabel {
    fn option_label(&self) -> String;
}

impl OptionLabel for Province {
    fn option_label(&self) -> String {
        self.name.clone()
    }
}

impl OptionLabel for City {
    fn option_label(&self) -> String {
        self.label()
    }
}

impl OptionLabel for Courier {
    fn option_label(&self) -> String {
        self.code.to_uppercase()
    }
}

impl OptionLabel for ShippingOption {
    /// `JNE - REG (1-2 hari): Rp 15.000`
    fn option_label(&self) -> String {
        let eta = if self.etd.is_empty() {
            String::new()
        } else {
            format!(" ({} hari)", self.etd)
        };
        format!(
            "{} - {}{eta}: {}",
            self.courier_code.to_uppercase(),
            self.service,
            format_rupiah(self.cost)
        )
    }
}

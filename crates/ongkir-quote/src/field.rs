//! One dependent select field of the cascade.

use ongkir_pricing::{City, Province, ShippingOption};

/// Fields of the cascade, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Province,
    City,
    Courier,
    ShippingOption,
}

impl Field {
    pub const CHAIN: [Field; 4] = [
        Field::Province,
        Field::City,
        Field::Courier,
        Field::ShippingOption,
    ];

    /// Fields that depend on `self`, nearest first.
    pub fn downstream(self) -> impl Iterator<Item = Field> {
        Self::CHAIN.into_iter().filter(move |f| *f > self)
    }

    /// Name shown to shoppers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Province => "Provinsi",
            Field::City => "Kota/Kabupaten",
            Field::Courier => "Kurir",
            Field::ShippingOption => "Opsi Pengiriman",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldState {
    /// Parent not selected; no options.
    Disabled,
    /// Options requested, waiting for the response.
    Loading,
    /// Options available, none chosen.
    Populated,
    /// Options available and one chosen.
    Selected,
    /// The backend answered with zero options.
    Empty,
    /// The options could not be loaded.
    Failed,
}

/// Something a select field can list.
pub trait Choice {
    fn id(&self) -> &str;
}

impl Choice for Province {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Choice for City {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Choice for ShippingOption {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A courier code offered in the courier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Courier {
    pub code: String,
}

impl Choice for Courier {
    fn id(&self) -> &str {
        &self.code
    }
}

/// State of one select field plus its request generation.
///
/// The generation increases every time the field starts loading or is reset,
/// so a response can be matched against the request that asked for it.
#[derive(Debug, Clone)]
pub(crate) struct FieldSlot<T> {
    state: FieldState,
    options: Vec<T>,
    selected: Option<String>,
    generation: u64,
}

impl<T: Choice> FieldSlot<T> {
    pub(crate) fn disabled() -> Self {
        Self {
            state: FieldState::Disabled,
            options: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    pub(crate) fn state(&self) -> FieldState {
        self.state
    }

    pub(crate) fn options(&self) -> &[T] {
        &self.options
    }

    pub(crate) fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(crate) fn selected(&self) -> Option<&T> {
        let id = self.selected.as_deref()?;
        self.find(id)
    }

    pub(crate) fn find(&self, id: &str) -> Option<&T> {
        self.options.iter().find(|o| o.id() == id)
    }

    /// True when the field lists options the user can pick from.
    pub(crate) fn has_choices(&self) -> bool {
        matches!(self.state, FieldState::Populated | FieldState::Selected)
    }

    pub(crate) fn begin_loading(&mut self) -> u64 {
        self.generation += 1;
        self.state = FieldState::Loading;
        self.options.clear();
        self.selected = None;
        self.generation
    }

    /// Whether a response for `generation` may still be applied.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.state == FieldState::Loading
    }

    pub(crate) fn populate(&mut self, options: Vec<T>) {
        self.state = if options.is_empty() {
            FieldState::Empty
        } else {
            FieldState::Populated
        };
        self.options = options;
        self.selected = None;
    }

    pub(crate) fn fail(&mut self) {
        self.state = FieldState::Failed;
        self.options.clear();
        self.selected = None;
    }

    /// Clears and disables the field, invalidating any in-flight request.
    pub(crate) fn reset(&mut self) {
        self.generation += 1;
        self.state = FieldState::Disabled;
        self.options.clear();
        self.selected = None;
    }

    /// Marks `id` as chosen. The caller has checked it is acceptable.
    pub(crate) fn select(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
        self.state = FieldState::Selected;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        if self.state == FieldState::Selected {
            self.state = FieldState::Populated;
        }
    }
}

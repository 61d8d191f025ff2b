use ongkir_core::{HostInputs, PreselectedAddress};
use ongkir_pricing::{City, PricingError, Province, ShippingOption};
use rust_decimal::Decimal;

use super::*;
use crate::view::NoticeLevel;

fn host(subtotal: i64, weight: i64) -> HostInputs {
    HostInputs {
        origin_id: Some("501".to_owned()),
        cart_subtotal: Decimal::from(subtotal),
        total_weight: weight,
        preselected: None,
        address_id: Some("77".to_owned()),
    }
}

fn couriers() -> Vec<String> {
    vec!["jne".to_owned(), "pos".to_owned(), "tiki".to_owned()]
}

fn controller() -> ShippingController {
    ShippingController::new(host(100_000, 1200), &couriers()).expect("valid host inputs")
}

fn provinces() -> Vec<Province> {
    vec![
        Province {
            id: "9".to_owned(),
            name: "Jawa Barat".to_owned(),
        },
        Province {
            id: "11".to_owned(),
            name: "Jawa Timur".to_owned(),
        },
    ]
}

fn city(id: &str, name: &str) -> City {
    City {
        id: id.to_owned(),
        kind: "Kota".to_owned(),
        name: name.to_owned(),
    }
}

fn option(courier: &str, service: &str, cost: i64) -> ShippingOption {
    ShippingOption {
        id: format!("{courier}:{}", service.to_lowercase()),
        courier_code: courier.to_owned(),
        courier_name: courier.to_uppercase(),
        service: service.to_owned(),
        description: String::new(),
        etd: "1-2".to_owned(),
        cost: Decimal::from(cost),
    }
}

fn not_json() -> PricingError {
    PricingError::NotJson {
        url: "http://shop.test/cities?province_id=9".to_owned(),
        content_type: Some("text/html".to_owned()),
    }
}

/// Loads provinces, picks province 9 and city 23 (Bandung).
fn with_city() -> ShippingController {
    let mut ctl = controller();
    let req = ctl.begin_load_provinces();
    assert!(!ctl.finish_load_provinces(req, Ok(provinces())).is_superseded());
    let req = ctl
        .select_province(Some("9"))
        .unwrap()
        .expect("province starts a city request");
    ctl.finish_load_cities(req, Ok(vec![city("23", "Bandung"), city("24", "Bekasi")]));
    assert!(ctl.select_city(Some("23")).unwrap().is_none());
    ctl
}

/// `with_city` plus courier jne and a loaded quote.
fn with_quote(options: Vec<ShippingOption>) -> ShippingController {
    let mut ctl = with_city();
    let req = ctl
        .select_courier(Some("jne"))
        .unwrap()
        .expect("courier starts a quote");
    assert_eq!(ctl.finish_quote(req, Ok(options)), Completion::Applied(()));
    ctl
}

// ---------------------------------------------------------------------------
// construction
// ---------------------------------------------------------------------------

#[test]
fn missing_origin_is_configuration_error() {
    for origin in [None, Some(""), Some("0"), Some("000")] {
        let inputs = HostInputs {
            origin_id: origin.map(str::to_owned),
            ..host(0, 1)
        };
        let err = ShippingController::new(inputs, &couriers())
            .err()
            .expect("origin must be rejected");
        assert!(matches!(err, QuoteError::Configuration(_)), "got {err:?}");
    }
}

#[test]
fn empty_courier_list_is_configuration_error() {
    let err = ShippingController::new(host(0, 1), &[" ".to_owned()])
        .err()
        .expect("no couriers");
    assert!(matches!(err, QuoteError::Configuration(_)));
}

#[test]
fn courier_codes_are_normalized_once() {
    let codes = vec![" JNE".to_owned(), "jne".to_owned(), String::new(), "Pos".to_owned()];
    let mut ctl = ShippingController::new(host(0, 1), &codes).unwrap();
    let req = ctl.begin_load_provinces();
    ctl.finish_load_provinces(req, Ok(provinces()));
    let req = ctl.select_province(Some("9")).unwrap().unwrap();
    ctl.finish_load_cities(req, Ok(vec![city("23", "Bandung")]));
    let _ = ctl.select_city(Some("23")).unwrap();

    let ids: Vec<String> = ctl
        .field_view(Field::Courier)
        .options
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["jne", "pos"]);
}

#[test]
fn nonpositive_weight_is_quoted_as_one_gram() {
    for raw in [0, -250] {
        let mut ctl = ShippingController::new(host(0, raw), &couriers()).unwrap();
        assert_eq!(ctl.weight(), 1);

        let req = ctl.begin_load_provinces();
        ctl.finish_load_provinces(req, Ok(provinces()));
        let req = ctl.select_province(Some("9")).unwrap().unwrap();
        ctl.finish_load_cities(req, Ok(vec![city("23", "Bandung")]));
        let _ = ctl.select_city(Some("23")).unwrap();
        let quote = ctl.select_courier(Some("pos")).unwrap().unwrap();
        assert_eq!(quote.query().weight, 1);
        assert_eq!(quote.query().origin, "501");
    }
}

#[test]
fn initial_view_has_everything_downstream_disabled() {
    let view = controller().view();
    assert!(view.province.enabled);
    for field in [&view.city, &view.courier, &view.shipping_option] {
        assert_eq!(field.state, FieldState::Disabled);
        assert!(!field.enabled);
        assert!(field.options.is_empty());
    }
    assert_eq!(view.shipping_fee_display, "Rp 0");
    assert_eq!(view.grand_total_display, "Rp 100.000");
    assert!(!view.checkout_enabled);
}

// ---------------------------------------------------------------------------
// cascade
// ---------------------------------------------------------------------------

#[test]
fn province_loading_shows_placeholder_and_disables_field() {
    let mut ctl = controller();
    let _req = ctl.begin_load_provinces();
    let view = ctl.field_view(Field::Province);
    assert_eq!(view.state, FieldState::Loading);
    assert_eq!(view.placeholder, "--Memuat Provinsi--");
    assert!(!view.enabled);
}

#[test]
fn selecting_province_loads_its_cities() {
    let mut ctl = controller();
    let req = ctl.begin_load_provinces();
    ctl.finish_load_provinces(req, Ok(provinces()));
    assert_eq!(
        ctl.notice().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );

    let req = ctl.select_province(Some("9")).unwrap().unwrap();
    assert_eq!(req.province_id(), "9");
    let city_view = ctl.field_view(Field::City);
    assert_eq!(city_view.state, FieldState::Loading);
    assert_eq!(city_view.placeholder, "--Memuat Kota/Kabupaten--");

    let done = ctl.finish_load_cities(req, Ok(vec![city("23", "Bandung")]));
    assert_eq!(done, Completion::Applied(None));
    let city_view = ctl.field_view(Field::City);
    assert_eq!(city_view.state, FieldState::Populated);
    assert!(city_view.enabled);
    assert_eq!(city_view.options[0].label, "Kota Bandung");
}

#[test]
fn province_selectable_without_loaded_list() {
    let mut ctl = controller();
    let req = ctl.select_province(Some("31")).unwrap();
    assert_eq!(req.map(|r| r.province_id().to_owned()), Some("31".to_owned()));
}

#[test]
fn unknown_ids_are_rejected_without_state_change() {
    let mut ctl = with_city();
    let before = ctl.view();

    let err = ctl.select_province(Some("99")).unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::Province, .. }));
    let err = ctl.select_city(Some("999")).unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::City, .. }));
    let err = ctl.select_courier(Some("dhl")).unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::Courier, .. }));

    assert_eq!(ctl.view(), before);
}

#[test]
fn courier_requires_city() {
    let mut ctl = controller();
    let err = ctl.select_courier(Some("jne")).unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::Courier, .. }));
}

#[test]
fn empty_city_list_is_empty_state() {
    let mut ctl = controller();
    let req = ctl.select_province(Some("9")).unwrap().unwrap();
    ctl.finish_load_cities(req, Ok(Vec::new()));
    let view = ctl.field_view(Field::City);
    assert_eq!(view.state, FieldState::Empty);
    assert_eq!(view.placeholder, "--Tidak Ada Data--");
    assert!(!view.enabled);
}

#[test]
fn city_failure_marks_failed_and_keeps_downstream_disabled() {
    let mut ctl = controller();
    let req = ctl.select_province(Some("9")).unwrap().unwrap();
    ctl.finish_load_cities(req, Err(not_json()));

    let view = ctl.view();
    assert_eq!(view.city.state, FieldState::Failed);
    assert_eq!(view.city.placeholder, "--Gagal Memuat--");
    assert!(!view.courier.enabled);
    assert!(!view.shipping_option.enabled);
    let notice = view.notice.expect("error notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(
        notice.text,
        "Gagal memuat kota: Respons tidak valid atau bukan JSON."
    );
    assert!(matches!(ctl.last_failure(), Some(QuoteError::Protocol(_))));
}

#[test]
fn selecting_city_enables_static_couriers() {
    let ctl = with_city();
    let view = ctl.field_view(Field::Courier);
    assert!(view.enabled);
    let labels: Vec<&str> = view.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["JNE", "POS", "TIKI"]);
    assert_eq!(ctl.notice().map(|n| n.text.as_str()), Some("Mohon pilih Kurir."));
}

#[test]
fn changing_city_keeps_courier_and_requotes() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    ctl.select_shipping_option(Some("jne:reg")).unwrap();

    let req = ctl
        .select_city(Some("24"))
        .unwrap()
        .expect("courier already chosen");
    assert_eq!(req.query().destination, "24");
    assert_eq!(req.query().courier, "jne");
    assert_eq!(ctl.selection().shipping_option_id, None);
    assert_eq!(ctl.totals().shipping_cost, Decimal::ZERO);
    assert_eq!(ctl.field_view(Field::Courier).selected.as_deref(), Some("jne"));
}

#[test]
fn clearing_city_disables_courier_and_shipping() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    assert!(ctl.select_city(None).unwrap().is_none());

    let view = ctl.view();
    assert_eq!(view.city.state, FieldState::Populated);
    assert_eq!(view.courier.state, FieldState::Disabled);
    assert_eq!(view.shipping_option.state, FieldState::Disabled);
    assert_eq!(
        view.notice.map(|n| n.text),
        Some("Mohon pilih Kota/Kabupaten.".to_owned())
    );
}

// ---------------------------------------------------------------------------
// quoting and totals
// ---------------------------------------------------------------------------

#[test]
fn selected_option_updates_totals_and_enables_checkout() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000), option("jne", "YES", 28_000)]);
    assert_eq!(
        ctl.field_view(Field::ShippingOption).options[0].label,
        "JNE - REG (1-2 hari): Rp 15.000"
    );
    assert!(!ctl.checkout_ready());

    ctl.select_shipping_option(Some("jne:reg")).unwrap();

    let view = ctl.view();
    assert_eq!(view.shipping_option.state, FieldState::Selected);
    assert_eq!(view.shipping_fee_display, "Rp 15.000");
    assert_eq!(view.grand_total_display, "Rp 115.000");
    assert!(view.checkout_enabled);
    assert_eq!(
        view.notice.map(|n| n.text),
        Some("Opsi pengiriman dipilih: Rp 15.000".to_owned())
    );

    let totals = ctl.totals();
    assert_eq!(totals.grand_total, totals.cart_subtotal + totals.shipping_cost);
}

#[test]
fn zero_results_show_unavailable_and_block_checkout() {
    let ctl = with_quote(Vec::new());
    let view = ctl.view();
    assert_eq!(view.shipping_option.state, FieldState::Empty);
    assert_eq!(view.shipping_option.placeholder, "--Tidak Tersedia--");
    assert!(!view.checkout_enabled);
    let notice = view.notice.expect("warning notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(
        notice.text,
        "Tidak ada opsi pengiriman tersedia untuk rute ini atau kurir yang dipilih."
    );
}

#[test]
fn quote_failure_reports_detail() {
    let mut ctl = with_city();
    let req = ctl.select_courier(Some("tiki")).unwrap().unwrap();
    let err = PricingError::Status {
        status: 400,
        url: "http://shop.test/calculate-shipping-cost".to_owned(),
        message: "Kurir tidak didukung".to_owned(),
    };
    ctl.finish_quote(req, Err(err));

    let view = ctl.field_view(Field::ShippingOption);
    assert_eq!(view.state, FieldState::Failed);
    assert_eq!(view.placeholder, "--Gagal Memuat--");
    assert_eq!(
        ctl.notice().map(|n| n.text.as_str()),
        Some("Gagal menghitung ongkir: Kurir tidak didukung")
    );
}

#[test]
fn quote_preconditions_fail_without_request() {
    let mut ctl = controller();
    let err = ctl.quote_shipping().unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::City, .. }));
    assert_eq!(
        ctl.notice().map(|n| n.text.as_str()),
        Some("Mohon pilih Kota/Kabupaten.")
    );
    assert_eq!(ctl.field_view(Field::ShippingOption).state, FieldState::Disabled);

    let mut ctl = with_city();
    let err = ctl.quote_shipping().unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::Courier, .. }));
    assert_eq!(ctl.notice().map(|n| n.text.as_str()), Some("Mohon pilih Kurir."));
}

#[test]
fn clearing_option_drops_cost() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    ctl.select_shipping_option(Some("jne:reg")).unwrap();
    ctl.select_shipping_option(None).unwrap();
    assert_eq!(ctl.totals().shipping_cost, Decimal::ZERO);
    assert_eq!(ctl.field_view(Field::ShippingOption).state, FieldState::Populated);
    assert!(!ctl.checkout_ready());
}

// ---------------------------------------------------------------------------
// superseded responses
// ---------------------------------------------------------------------------

#[test]
fn late_city_response_for_previous_province_is_discarded() {
    let mut ctl = controller();
    let req = ctl.begin_load_provinces();
    ctl.finish_load_provinces(req, Ok(provinces()));

    let first = ctl.select_province(Some("9")).unwrap().unwrap();
    let second = ctl.select_province(Some("11")).unwrap().unwrap();

    let done = ctl.finish_load_cities(second, Ok(vec![city("444", "Surabaya")]));
    assert!(!done.is_superseded());
    let done = ctl.finish_load_cities(first, Ok(vec![city("23", "Bandung")]));
    assert!(done.is_superseded());

    let ids: Vec<String> = ctl
        .field_view(Field::City)
        .options
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["444"]);
}

#[test]
fn stale_city_response_arriving_first_is_discarded() {
    let mut ctl = controller();
    let first = ctl.select_province(Some("9")).unwrap().unwrap();
    let second = ctl.select_province(Some("11")).unwrap().unwrap();

    assert!(ctl
        .finish_load_cities(first, Ok(vec![city("23", "Bandung")]))
        .is_superseded());
    assert_eq!(ctl.field_view(Field::City).state, FieldState::Loading);

    ctl.finish_load_cities(second, Ok(vec![city("444", "Surabaya")]));
    assert_eq!(ctl.field_view(Field::City).options.len(), 1);
}

#[test]
fn late_quote_for_previous_courier_is_discarded() {
    let mut ctl = with_city();
    let jne = ctl.select_courier(Some("jne")).unwrap().unwrap();
    let pos = ctl.select_courier(Some("pos")).unwrap().unwrap();

    ctl.finish_quote(pos, Ok(vec![option("pos", "Kilat", 12_000)]));
    let done = ctl.finish_quote(jne, Ok(vec![option("jne", "REG", 15_000)]));
    assert!(done.is_superseded());

    let ids: Vec<String> = ctl
        .field_view(Field::ShippingOption)
        .options
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["pos:kilat"]);
}

#[test]
fn clearing_province_supersedes_in_flight_quote() {
    let mut ctl = with_city();
    let req = ctl.select_courier(Some("jne")).unwrap().unwrap();
    let _ = ctl.select_province(None).unwrap();

    let before = ctl.view();
    assert!(ctl
        .finish_quote(req, Ok(vec![option("jne", "REG", 15_000)]))
        .is_superseded());
    assert_eq!(ctl.view(), before);
    assert_eq!(before.shipping_option.state, FieldState::Disabled);
}

#[test]
fn failed_quote_can_be_retried() {
    let mut ctl = with_city();
    let req = ctl.select_courier(Some("jne")).unwrap().unwrap();
    ctl.finish_quote(req, Err(not_json()));
    assert!(ctl.last_failure().is_some());

    let retry = ctl.quote_shipping().expect("selection unchanged");
    assert!(ctl.last_failure().is_none());
    ctl.finish_quote(retry, Ok(vec![option("jne", "REG", 15_000)]));
    assert_eq!(ctl.field_view(Field::ShippingOption).state, FieldState::Populated);
}

// ---------------------------------------------------------------------------
// reset
// ---------------------------------------------------------------------------

#[test]
fn reset_downstream_disables_later_fields() {
    for from in Field::CHAIN {
        let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
        ctl.select_shipping_option(Some("jne:reg")).unwrap();
        ctl.reset_downstream(from);

        for field in from.downstream() {
            let view = ctl.field_view(field);
            assert_eq!(view.state, FieldState::Disabled, "{field} after reset from {from}");
            assert!(view.options.is_empty());
            assert!(view.selected.is_none());
        }
        if from == Field::ShippingOption {
            assert!(ctl.checkout_ready());
        } else {
            assert_eq!(ctl.totals().shipping_cost, Decimal::ZERO);
            assert!(!ctl.checkout_ready());
        }
    }
}

#[test]
fn reset_downstream_is_idempotent() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    ctl.reset_downstream(Field::City);
    let once = ctl.view();
    ctl.reset_downstream(Field::City);
    assert_eq!(ctl.view(), once);
}

// ---------------------------------------------------------------------------
// readiness and checkout
// ---------------------------------------------------------------------------

#[test]
fn checkout_readiness_requires_city_courier_and_option() {
    for mask in 0u8..8 {
        let pick = |bit: u8, value: &str| (mask & bit != 0).then(|| value.to_owned());
        let selection = SelectionState {
            province_id: Some("9".to_owned()),
            city_id: pick(1, "23"),
            courier: pick(2, "jne"),
            shipping_option_id: pick(4, "jne:reg"),
        };
        assert_eq!(selection.is_checkout_ready(), mask == 7, "mask {mask:03b}");
    }
}

#[test]
fn first_missing_follows_chain_order() {
    let mut selection = SelectionState::default();
    assert_eq!(selection.first_missing(), Some(Field::Province));
    selection.province_id = Some("9".to_owned());
    selection.courier = Some("jne".to_owned());
    assert_eq!(selection.first_missing(), Some(Field::City));
}

#[test]
fn checkout_blocked_names_missing_field() {
    let mut ctl = with_city();
    let err = ctl.attempt_checkout().unwrap_err();
    assert!(matches!(err, QuoteError::Validation { field: Field::Courier, .. }));
    let notice = ctl.notice().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Mohon pilih Kurir sebelum melanjutkan.");
}

#[test]
fn checkout_returns_summary_when_ready() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    ctl.select_shipping_option(Some("jne:reg")).unwrap();

    let summary = ctl.attempt_checkout().expect("ready");
    assert_eq!(summary.address_id, "77");
    assert_eq!(summary.province_id, "9");
    assert_eq!(summary.destination_id, "23");
    assert_eq!(summary.courier, "jne");
    assert_eq!(summary.shipping_option_id, "jne:reg");
    assert_eq!(summary.service_code, "jne");
    assert_eq!(summary.service_name, "JNE - REG");
    assert_eq!(summary.weight, 1200);
    assert_eq!(summary.shipping_cost, Decimal::from(15_000));
    assert_eq!(summary.grand_total, Decimal::from(115_000));
    assert_eq!(
        ctl.notice().map(|n| n.text.as_str()),
        Some("Semua siap untuk checkout!")
    );
}

#[test]
fn checkout_without_address_is_blocked_first() {
    let inputs = HostInputs {
        address_id: None,
        ..host(100_000, 1200)
    };
    let mut ctl = ShippingController::new(inputs, &couriers()).unwrap();
    let err = ctl.attempt_checkout().unwrap_err();
    assert!(matches!(err, QuoteError::MissingAddress(_)), "got {err:?}");
    assert_eq!(
        ctl.notice().map(|n| (n.level, n.text.as_str())),
        Some((
            NoticeLevel::Error,
            "Mohon pilih Alamat Pengiriman sebelum melanjutkan."
        ))
    );
}

#[test]
fn address_selection_does_not_touch_the_chain() {
    let mut ctl = with_quote(vec![option("jne", "REG", 15_000)]);
    ctl.select_shipping_option(Some("jne:reg")).unwrap();

    ctl.select_address(Some("  "));
    assert_eq!(ctl.address_id(), None);
    assert_eq!(
        ctl.notice().map(|n| (n.level, n.text.as_str())),
        Some((
            NoticeLevel::Warning,
            "Pilih alamat pengiriman untuk melihat opsi ongkir."
        ))
    );
    assert!(ctl.checkout_ready());
    assert_eq!(ctl.totals().shipping_cost, Decimal::from(15_000));
    assert!(matches!(
        ctl.attempt_checkout(),
        Err(QuoteError::MissingAddress(_))
    ));

    ctl.select_address(Some("81"));
    assert_eq!(ctl.address_id(), Some("81"));
    let summary = ctl.attempt_checkout().expect("ready");
    assert_eq!(summary.address_id, "81");
    assert_eq!(summary.service_code, "jne");
}

// ---------------------------------------------------------------------------
// pre-selected address
// ---------------------------------------------------------------------------

#[test]
fn preselected_address_is_applied_after_loads() {
    let inputs = host(50_000, 800).with_preselected(PreselectedAddress {
        province_id: "9".to_owned(),
        city_id: Some("24".to_owned()),
    });
    let mut ctl = ShippingController::new(inputs, &couriers()).unwrap();

    let req = ctl.begin_load_provinces();
    let cities_req = ctl
        .finish_load_provinces(req, Ok(provinces()))
        .into_applied()
        .flatten()
        .expect("preselected province loads cities");
    assert_eq!(cities_req.province_id(), "9");

    let done = ctl.finish_load_cities(cities_req, Ok(vec![city("23", "Bandung"), city("24", "Bekasi")]));
    assert_eq!(done, Completion::Applied(None));
    assert_eq!(ctl.selection().city_id.as_deref(), Some("24"));
    assert!(ctl.field_view(Field::Courier).enabled);
}

#[test]
fn choosing_other_province_drops_preselection() {
    let inputs = host(0, 1).with_preselected(PreselectedAddress {
        province_id: "9".to_owned(),
        city_id: Some("24".to_owned()),
    });
    let mut ctl = ShippingController::new(inputs, &couriers()).unwrap();
    let req = ctl.select_province(Some("11")).unwrap().unwrap();
    ctl.finish_load_cities(req, Ok(vec![city("24", "Kediri")]));
    assert_eq!(ctl.selection().city_id, None);
}

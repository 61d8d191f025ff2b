//! Quote and checkout commands.
//!
//! `checkout` drives a [`QuoteSession`] exactly as a shopper would: load
//! provinces, pick each field in turn, choose a shipping option by its
//! position in the list, then attempt checkout.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use ongkir_core::{format_rupiah, normalize_weight, AppConfig, HostInputs};
use ongkir_pricing::{PricingClient, QuoteQuery};
use ongkir_quote::{FieldView, NoticeLevel, QuoteSession, QuoteView};

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// JSON file with the host page inputs (origin, subtotal, weight,
    /// pre-selected and saved address); overrides the individual flags
    #[arg(long)]
    pub host: Option<PathBuf>,
    /// Origin location id
    #[arg(long, env = "ONGKIR_ORIGIN_ID")]
    pub origin: Option<String>,
    /// Cart subtotal in rupiah
    #[arg(long, env = "ONGKIR_CART_SUBTOTAL")]
    pub subtotal: Option<String>,
    /// Total cart weight in grams
    #[arg(long, env = "ONGKIR_TOTAL_WEIGHT", allow_negative_numbers = true)]
    pub weight: Option<String>,
    /// Saved delivery address id
    #[arg(long, env = "ONGKIR_ADDRESS_ID")]
    pub address: Option<String>,
    /// Province id
    #[arg(long)]
    pub province: Option<String>,
    /// City id
    #[arg(long)]
    pub city: Option<String>,
    /// Courier code
    #[arg(long)]
    pub courier: Option<String>,
    /// 1-based position of the shipping option to choose
    #[arg(long)]
    pub option: Option<usize>,
}

/// Quotes one courier for a route without the cascade.
///
/// # Errors
///
/// Returns an error if the pricing API request fails.
pub(crate) async fn run_quote(
    client: &PricingClient,
    origin: &str,
    destination: &str,
    courier: &str,
    weight: i64,
) -> anyhow::Result<()> {
    let query = QuoteQuery {
        origin: origin.to_owned(),
        destination: destination.to_owned(),
        weight: normalize_weight(weight),
        courier: courier.trim().to_lowercase(),
    };
    let options = client.calculate_shipping_cost(&query).await?;
    if options.is_empty() {
        println!(
            "no shipping options for {} -> {} ({}g, {})",
            query.origin, query.destination, query.weight, query.courier
        );
        return Ok(());
    }

    println!("{:<16}{:<10}{:<8}{:>14}  DESCRIPTION", "ID", "SERVICE", "ETD", "COST");
    for option in &options {
        println!(
            "{:<16}{:<10}{:<8}{:>14}  {}",
            option.id,
            option.service,
            option.etd,
            format_rupiah(option.cost),
            option.description
        );
    }
    Ok(())
}

/// Runs the whole cascade and prints the resulting view.
///
/// # Errors
///
/// Returns an error for unusable host inputs, selections the controller
/// rejects, or a checkout that is not ready.
pub(crate) async fn run_checkout(
    config: &AppConfig,
    client: PricingClient,
    args: &CheckoutArgs,
) -> anyhow::Result<()> {
    let host = host_inputs(args)?;
    let mut session = QuoteSession::new(host, &config.couriers, client)?;

    session.load_provinces().await;
    if let Some(address) = args.address.as_deref() {
        session.select_address(Some(address));
    }
    if let Some(province) = args.province.as_deref() {
        session.select_province(Some(province)).await?;
    }
    if let Some(city) = args.city.as_deref() {
        session.select_city(Some(city)).await?;
    }
    if let Some(courier) = args.courier.as_deref() {
        session.select_courier(Some(courier)).await?;
    }
    if let Some(position) = args.option {
        let id = option_at(&session.view().shipping_option, position)?;
        session.select_shipping_option(Some(&id))?;
    }

    print_view(&session.view());

    let summary = session.attempt_checkout()?;
    println!();
    println!("Address:     {}", summary.address_id);
    println!("Destination: {}", summary.destination_id);
    println!("Service:     {} ({})", summary.service_name, summary.service_code);
    println!("Weight:      {}g", summary.weight);
    println!("Ongkir:      {}", format_rupiah(summary.shipping_cost));
    println!("Total:       {}", format_rupiah(summary.grand_total));
    Ok(())
}

fn host_inputs(args: &CheckoutArgs) -> anyhow::Result<HostInputs> {
    if let Some(path) = &args.host {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read host inputs from {}", path.display()))?;
        let host: HostInputs = serde_json::from_str(&raw)
            .with_context(|| format!("invalid host inputs in {}", path.display()))?;
        return Ok(host);
    }
    Ok(HostInputs::from_raw(
        args.origin.as_deref(),
        args.subtotal.as_deref(),
        args.weight.as_deref(),
    ))
}

/// Id of the option at 1-based `position`.
fn option_at(field: &FieldView, position: usize) -> anyhow::Result<String> {
    position
        .checked_sub(1)
        .and_then(|index| field.options.get(index))
        .map(|option| option.id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no shipping option #{position}; {} available",
                field.options.len()
            )
        })
}

fn print_view(view: &QuoteView) {
    for field in [
        &view.province,
        &view.city,
        &view.courier,
        &view.shipping_option,
    ] {
        let shown = field
            .selected
            .as_deref()
            .and_then(|id| field.options.iter().find(|o| o.id == id))
            .map_or(field.placeholder, |o| o.label.as_str());
        let state = format!("{:?}", field.state);
        println!("{:<18}{:<11}{}", field.field.label(), state, shown);
    }
    println!("{:<18}{}", "Ongkos kirim", view.shipping_fee_display);
    println!("{:<18}{}", "Total", view.grand_total_display);

    if let Some(notice) = &view.notice {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        println!("[{tag}] {}", notice.text);
    }
}

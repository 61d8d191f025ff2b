//! Province and city listings.

use ongkir_pricing::PricingClient;

/// # Errors
///
/// Returns an error if the pricing API cannot be reached or answers with
/// something other than a province list.
pub(crate) async fn run_provinces(client: &PricingClient) -> anyhow::Result<()> {
    let provinces = client.list_provinces().await?;
    if provinces.is_empty() {
        println!("no provinces returned");
        return Ok(());
    }

    println!("{:<8}NAME", "ID");
    for province in &provinces {
        println!("{:<8}{}", province.id, province.name);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the pricing API cannot be reached or answers with
/// something other than a city list.
pub(crate) async fn run_cities(client: &PricingClient, province_id: &str) -> anyhow::Result<()> {
    let cities = client.list_cities(province_id).await?;
    if cities.is_empty() {
        println!("no cities for province {province_id}");
        return Ok(());
    }

    println!("{:<8}CITY", "ID");
    for city in &cities {
        println!("{:<8}{}", city.id, city.label());
    }
    Ok(())
}

mod geo;
mod quote;

use clap::{Parser, Subcommand};
use ongkir_core::AppConfig;
use ongkir_pricing::PricingClient;
use tracing_subscriber::EnvFilter;

use crate::quote::CheckoutArgs;

#[derive(Debug, Parser)]
#[command(name = "ongkir")]
#[command(about = "Shipping cost quotes against the storefront pricing API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List destination provinces
    Provinces,
    /// List the cities of one province
    Cities {
        /// Province id
        #[arg(long)]
        province: String,
    },
    /// Quote every service of one courier for a route
    Quote {
        /// Origin location id
        #[arg(long, env = "ONGKIR_ORIGIN_ID")]
        origin: String,
        /// Destination city id
        #[arg(long)]
        destination: String,
        /// Courier code (e.g. jne)
        #[arg(long)]
        courier: String,
        /// Parcel weight in grams; values at or below zero are sent as 1
        #[arg(long, default_value = "1000", allow_negative_numbers = true)]
        weight: i64,
    },
    /// Walk the whole province, city, courier and option cascade
    Checkout(CheckoutArgs),
}

fn pricing_client(config: &AppConfig) -> anyhow::Result<PricingClient> {
    let client = PricingClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    Ok(client.with_csrf_token(config.csrf_token.clone()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("no command given; run `ongkir --help`");
        return Ok(());
    };

    let config = ongkir_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "configuration loaded");

    let client = pricing_client(&config)?;
    match command {
        Commands::Provinces => geo::run_provinces(&client).await,
        Commands::Cities { province } => geo::run_cities(&client, &province).await,
        Commands::Quote {
            origin,
            destination,
            courier,
            weight,
        } => quote::run_quote(&client, &origin, &destination, &courier, weight).await,
        Commands::Checkout(args) => quote::run_checkout(&config, client, &args).await,
    }
}

//! rate-split - split offer commission rates into user, partner token and FP shares
//!
//! Reads boost tier configuration and catalog offers from disk and prints the user facing
//! rate details as RON.

mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ron::ser::{to_string_pretty, PrettyConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fiber_core::{
    calculate_rate_split, rates, Offer, Rates, Standing, StaticTiers, TierConfig, TierId,
    TierSelector,
};

#[derive(Parser)]
#[command(name = "rate-split")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Boost tier configuration (RON), the seed tiers when omitted
    #[arg(short, long, global = true, env = "FIBER_TIERS")]
    tiers: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the commission rates of catalog offers
    Split {
        /// Offers file, JSON when the extension is `.json`, RON otherwise
        #[arg(short, long)]
        offers: PathBuf,

        /// Partner token the user is paid in
        #[arg(short, long, default_value = "BONK")]
        label: String,

        #[command(flatten)]
        tier: TierArgs,
    },

    /// Print the configured boost tiers
    Tiers,

    /// Split a total three ways, rounding each share to one decimal
    FixedSplit {
        #[arg(allow_negative_numbers = true)]
        total: f64,
        #[arg(allow_negative_numbers = true)]
        payout: f64,
        #[arg(allow_negative_numbers = true)]
        platform: f64,
        #[arg(allow_negative_numbers = true)]
        fee: f64,
    },
}

#[derive(Args)]
struct TierArgs {
    /// Boost tier id, bypassing eligibility
    #[arg(long, conflicts_with_all = ["staked", "purchases"])]
    tier: Option<String>,

    /// Platform tokens staked by the user
    #[arg(long)]
    staked: Option<f64>,

    /// Monthly average purchases of the user
    #[arg(long)]
    purchases: Option<f64>,
}

impl From<TierArgs> for TierSelector {
    fn from(value: TierArgs) -> Self {
        match value.tier {
            Some(id) => TierSelector::Id(id.into()),
            None => TierSelector::Standing(Standing {
                platform_token_staked_amount: value.staked.unwrap_or_default(),
                monthly_average_purchases_amount: value.purchases.unwrap_or_default(),
            }),
        }
    }
}

fn render(value: &impl Serialize) -> Result<String> {
    to_string_pretty(value, PrettyConfig::new().indentor("  ".to_owned()))
        .context("rendering output")
}

fn load_tiers(path: Option<&PathBuf>) -> Result<TierConfig> {
    match path {
        Some(path) => input::read_tiers(path),
        None => {
            tracing::debug!("using seed boost tiers");
            Ok(TierConfig::seed())
        }
    }
}

/// One rendered line per offer, offers without an advertised rate get a comment line
fn split_offers(
    rates: &dyn Rates,
    offers: &[Offer],
    tier: &TierId,
    label: &str,
) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(offers.len());
    let mut unsplit = 0;

    for (index, offer) in offers.iter().enumerate() {
        match rates.user_rate_details(offer, tier.clone().into(), label)? {
            Some(details) => lines.push(render(&details)?),
            None => {
                unsplit += 1;
                lines.push(format!("// offer {index}: no rate split"));
            }
        }
    }

    if unsplit > 0 {
        tracing::info!(unsplit, "some offers carry no advertised rate");
    }

    Ok(lines)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Split {
            offers,
            label,
            tier,
        } => {
            let repository = StaticTiers::from(load_tiers(cli.tiers.as_ref())?);

            let offers = input::read_offers(&offers)?;

            let rates = rates(&repository);

            let tier = rates.boost_tier(tier.into())?;

            tracing::info!(tier = %tier.id, offers = offers.len(), "splitting offers");

            for line in split_offers(&rates, &offers, &tier.id, &label)? {
                println!("{line}");
            }
        }

        Commands::Tiers => {
            let config = load_tiers(cli.tiers.as_ref())?;

            println!("{}", config.to_ron()?);
        }

        Commands::FixedSplit {
            total,
            payout,
            platform,
            fee,
        } => {
            println!(
                "{}",
                render(&calculate_rate_split(total, payout, platform, fee))?
            );
        }
    }

    Ok(())
}

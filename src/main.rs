//! nft-market command line
//!
//! Builds marketplace payloads, reads fullnode views and indexer projections,
//! and waits on submitted transactions. Signing happens in the wallet, so no
//! command here submits anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nft_market_client::chain::MarketplaceViews;
use nft_market_client::config::{Config, Network};
use nft_market_client::indexer::{ImageResolver, IndexerClient};
use nft_market_client::payload::{signatures, Address, PayloadRequest, SIGNATURES};
use nft_market_client::{RestClient, TransactionRunner};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "nft-market", author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "nft-market.toml")]
    config: PathBuf,

    /// Network to use instead of the configured one
    #[arg(short, long)]
    network: Option<Network>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a payload from a JSON request (file or stdin)
    Build {
        /// Request file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the entry-function signature table
    Signatures {
        /// Only the signature for `module::function`
        name: Option<String>,
    },
    /// Read on-chain listing and fee schedule state
    View {
        #[command(subcommand)]
        view: ViewCommand,
    },
    /// Active fixed-price listings
    Listings {
        /// Defaults to the configured fee schedule
        #[arg(long)]
        fee_schedule: Option<Address>,
    },
    /// Active auctions
    Auctions {
        #[arg(long)]
        fee_schedule: Option<Address>,
    },
    /// Active offers on a token
    TokenOffers { token: Address },
    /// Active offers on a collection
    CollectionOffers { collection: Address },
    /// Collection metadata
    Collection { collection: Address },
    /// Listing detail, including sold or cancelled listings
    Listing { listing: Address },
    /// Cheapest active listings in a collection
    Floor {
        collection: Address,
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Collections ranked by active listing volume
    TopCollections {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Resolve token URIs to image URLs
    Image {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Wait for a submitted transaction to reach finality
    Wait { hash: String },
}

#[derive(Subcommand, Debug)]
enum ViewCommand {
    Seller { listing: Address },
    ListedObject { listing: Address },
    Price { listing: Address },
    CurrentAmount { listing: Address },
    CurrentBidder { listing: Address },
    AuctionEndTime { listing: Address },
    Commission { fee_schedule: Address, price: u64 },
    ListingFee { fee_schedule: Address, base: u64 },
    BiddingFee { fee_schedule: Address, bid: u64 },
    FeeAddress { fee_schedule: Address },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    let mut config = load_config(&args.config)?;
    if let Some(network) = args.network {
        config = config.with_network(network);
        config.validate().context("Invalid configuration for network override")?;
    }
    info!(
        network = %config.network.name,
        contract = %config.marketplace.contract_address,
        "Configuration loaded"
    );

    run(args.command, &config).await
}

/// Initialize logging infrastructure
fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        "nft_market_client=debug,nft_market=debug,info"
    } else {
        "nft_market_client=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}

/// Load configuration from file, falling back to the environment
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file_with_env(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        warn!(
            "Config file '{}' not found, reading NFT_MARKET_* variables",
            path.display()
        );
        Config::from_env().context("Failed to build config from environment")
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fee_schedule_or_config(explicit: Option<Address>, config: &Config) -> Result<Address> {
    match explicit {
        Some(fs) => Ok(fs),
        None => config
            .fee_schedule()?
            .context("No fee schedule given and none configured"),
    }
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Build { file } => build(file, config),
        Command::Signatures { name } => match name {
            Some(name) => {
                let signature = signatures::lookup(&name)
                    .with_context(|| format!("No entry function named {}", name))?;
                print_json(signature)
            }
            None => print_json(&SIGNATURES),
        },
        Command::View { view } => run_view(view, config).await,
        Command::Wait { hash } => wait(&hash, config).await,
        Command::Image { uris } => {
            let resolver = ImageResolver::new(
                &config.media.ipfs_gateway,
                &config.media.placeholder_image,
                config.request_timeout(),
            )?;
            let images = futures::future::join_all(
                uris.iter().map(|uri| resolver.resolve_token_image(uri)),
            )
            .await;
            let resolved: Vec<_> = uris
                .iter()
                .zip(images)
                .map(|(uri, image)| json!({ "uri": uri, "image": image }))
                .collect();
            print_json(&resolved)
        }
        indexer_command => run_indexer(indexer_command, config).await,
    }
}

fn build(file: Option<PathBuf>, config: &Config) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    let request: PayloadRequest =
        serde_json::from_str(&raw).context("Malformed payload request")?;
    let descriptor = request.build(&config.payloads()?)?;

    match signatures::signature_for(&descriptor) {
        Some(signature) if signature.matches(&descriptor) => {}
        _ => warn!(
            function = %descriptor.function(),
            "Payload does not match a known entry-function signature"
        ),
    }
    print_json(&descriptor.to_payload_json())
}

async fn run_view(view: ViewCommand, config: &Config) -> Result<()> {
    let client = RestClient::new(config.node_url()?, config.request_timeout())?;
    let views = MarketplaceViews::new(config.contract()?, config.coin_type()?);

    let value = match view {
        ViewCommand::Seller { listing } => json!(views.seller(&client, &listing).await?),
        ViewCommand::ListedObject { listing } => {
            json!(views.listed_object(&client, &listing).await?)
        }
        ViewCommand::Price { listing } => json!(views.price(&client, &listing).await?),
        ViewCommand::CurrentAmount { listing } => {
            json!(views.current_amount(&client, &listing).await?)
        }
        ViewCommand::CurrentBidder { listing } => {
            json!(views.current_bidder(&client, &listing).await?)
        }
        ViewCommand::AuctionEndTime { listing } => {
            let secs = views.auction_end_time(&client, &listing).await?;
            let at = i64::try_from(secs)
                .ok()
                .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
                .map(|t| t.to_rfc3339());
            json!({ "end_time": secs, "at": at })
        }
        ViewCommand::Commission { fee_schedule, price } => {
            json!(views.commission(&client, &fee_schedule, price).await?)
        }
        ViewCommand::ListingFee { fee_schedule, base } => {
            json!(views.listing_fee(&client, &fee_schedule, base).await?)
        }
        ViewCommand::BiddingFee { fee_schedule, bid } => {
            json!(views.bidding_fee(&client, &fee_schedule, bid).await?)
        }
        ViewCommand::FeeAddress { fee_schedule } => {
            json!(views.fee_address(&client, &fee_schedule).await?)
        }
    };
    print_json(&value)
}

async fn run_indexer(command: Command, config: &Config) -> Result<()> {
    let indexer = IndexerClient::new(config.indexer_url()?, config.request_timeout())?;
    let contract = config.contract()?;

    match command {
        Command::Listings { fee_schedule } => {
            let fs = fee_schedule_or_config(fee_schedule, config)?;
            print_json(&indexer.listings(&contract, &fs).await?)
        }
        Command::Auctions { fee_schedule } => {
            let fs = fee_schedule_or_config(fee_schedule, config)?;
            print_json(&indexer.auctions(&contract, &fs).await?)
        }
        Command::TokenOffers { token } => print_json(&indexer.token_offers(&token).await?),
        Command::CollectionOffers { collection } => {
            print_json(&indexer.collection_offers(&collection).await?)
        }
        Command::Collection { collection } => {
            let metadata = indexer
                .collection(&collection)
                .await?
                .with_context(|| format!("Collection {} not found", collection))?;
            print_json(&metadata)
        }
        Command::Listing { listing } => {
            let row = indexer
                .listing(&listing)
                .await?
                .with_context(|| format!("Listing {} not found", listing))?;
            print_json(&row)
        }
        Command::Floor { collection, limit } => {
            print_json(&indexer.floor_listings(&collection, limit).await?)
        }
        Command::TopCollections { limit } => {
            print_json(&indexer.top_collections(&contract, limit).await?)
        }
        other => anyhow::bail!("Not an indexer command: {:?}", other),
    }
}

async fn wait(hash: &str, config: &Config) -> Result<()> {
    let client = RestClient::new(config.node_url()?, config.request_timeout())?;
    let runner = TransactionRunner::new(client, config.runner_config());

    match runner.await_confirmation(hash).await {
        Ok(result) => print_json(&result),
        Err(failure) => {
            print_json(&failure)?;
            anyhow::bail!("Transaction {} did not confirm: {}", hash, failure)
        }
    }
}

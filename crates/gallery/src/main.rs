use anyhow::Result;
use chain::{Erc1155Client, EvmProvider};
use gallery::{
    render_state, AddressStore, CollectionFetcher, GalleryController, HttpMetadataClient,
};
use shared::config::Config;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gallery=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ERC-1155 collection gallery");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize the chain read path
    let provider = Arc::new(EvmProvider::new(config.rpc.url.clone()));
    let contract_client = Arc::new(Erc1155Client::new(provider));
    tracing::info!("ERC-1155 read client initialized");

    // Initialize the metadata client
    let metadata_client = Arc::new(HttpMetadataClient::new());
    tracing::info!("Metadata client initialized");

    let fetcher = CollectionFetcher::new(
        contract_client,
        metadata_client,
        config.gateway.base_url.clone(),
    );

    // Open the address store
    let store_path = config
        .store
        .path
        .clone()
        .unwrap_or_else(AddressStore::default_path);
    let store = AddressStore::new(store_path);
    tracing::info!("Address store at {}", store.path().display());

    let mut controller = GalleryController::new(fetcher, store);

    println!("ERC-1155 collection gallery");
    println!("Press Enter to keep the shown value, type 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wallet = match prompt(&mut lines, "Wallet address", controller.wallet_input()).await? {
            Some(line) => line,
            None => break,
        };
        if wallet == "quit" {
            break;
        }
        if !wallet.is_empty() {
            controller.set_wallet(&wallet);
        }

        let contract =
            match prompt(&mut lines, "Contract address", controller.contract_input()).await? {
                Some(line) => line,
                None => break,
            };
        if contract == "quit" {
            break;
        }
        if !contract.is_empty() {
            controller.set_contract(&contract);
        }

        if controller.valid_addresses().is_some() {
            println!("Loading collection...");
            controller.refresh().await;
            println!("{}", render_state(controller.state()));
        } else {
            println!("Waiting for two well-formed addresses; nothing fetched.");
        }
        println!();
    }

    tracing::info!("Exiting");
    Ok(())
}

/// Prompt for one line, showing the current value. Returns `None` on EOF.
async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
    current: &str,
) -> Result<Option<String>> {
    print!("{} [{}]: ", label, current);
    std::io::stdout().flush()?;

    Ok(lines
        .next_line()
        .await?
        .map(|line| line.trim().to_string()))
}

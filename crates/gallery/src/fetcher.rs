use alloy_primitives::{Address, U256};
use chain::CollectionContract;
use shared::models::CollectionItem;
use shared::{Error, Result, TokenMetadata};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::metadata::MetadataClient;

/// Number of token ids probed per fetch; the batched balance query always
/// covers ids `0..KNOWN_TOKEN_IDS`.
pub const KNOWN_TOKEN_IDS: u64 = 10;

const DEFAULT_NAME: &str = "No name";
const DEFAULT_DESCRIPTION: &str = "No description";

/// Rewrite an `ipfs://` URI to its HTTP gateway form. Other URIs, including
/// the empty string, pass through unchanged.
pub fn ipfs_to_http(uri: &str, gateway: &str) -> String {
    uri.replacen("ipfs://", gateway, 1)
}

/// Substitute the literal `{id}` placeholder with the decimal token id.
/// Only the first occurrence is replaced; templates without the placeholder
/// come back unchanged.
pub fn substitute_token_id(template: &str, token_id: u64) -> String {
    template.replacen("{id}", &token_id.to_string(), 1)
}

/// Assembles gallery items for one wallet/contract pair: a single batched
/// balance query over the known token ids, then one uri lookup and one
/// metadata document per held token.
pub struct CollectionFetcher {
    contract: Arc<dyn CollectionContract>,
    metadata: Arc<dyn MetadataClient>,
    gateway: String,
}

impl CollectionFetcher {
    pub fn new(
        contract: Arc<dyn CollectionContract>,
        metadata: Arc<dyn MetadataClient>,
        gateway: String,
    ) -> Self {
        Self {
            contract,
            metadata,
            gateway,
        }
    }

    /// Fetch display items for every token id in `0..KNOWN_TOKEN_IDS` that
    /// `wallet` holds a positive balance of, in ascending id order.
    ///
    /// A failed balance query or uri lookup aborts the whole fetch. A failed
    /// metadata document only downgrades that item to its default name and
    /// description.
    pub async fn fetch_collection(
        &self,
        wallet: Address,
        contract: Address,
    ) -> Result<Vec<CollectionItem>> {
        let ids: Vec<U256> = (0..KNOWN_TOKEN_IDS).map(U256::from).collect();
        // balanceOfBatch wants one account per id, even for a single wallet
        let accounts = vec![wallet; ids.len()];

        debug!(
            "Querying balances for {} token ids on contract {}",
            ids.len(),
            contract
        );

        let balances = self
            .contract
            .balance_of_batch(contract, &accounts, &ids)
            .await?;

        if balances.len() != ids.len() {
            return Err(Error::ContractCall(format!(
                "balanceOfBatch returned {} balances for {} ids",
                balances.len(),
                ids.len()
            )));
        }

        let mut items = Vec::new();

        for (index, balance) in balances.into_iter().enumerate() {
            if balance.is_zero() {
                continue;
            }

            let token_id = index as u64;
            let template = self.contract.uri(contract, U256::from(token_id)).await?;
            let url = ipfs_to_http(&substitute_token_id(&template, token_id), &self.gateway);

            let document = match self.metadata.fetch_document(&url).await {
                Ok(document) => document,
                Err(e) => {
                    warn!("Failed to fetch metadata for token {}: {}", token_id, e);
                    TokenMetadata::default()
                }
            };

            items.push(CollectionItem {
                token_id,
                name: document.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
                image: ipfs_to_http(&document.image.unwrap_or_default(), &self.gateway),
                description: document
                    .description
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                balance,
            });
        }

        info!("Assembled {} gallery items for wallet {}", items.len(), wallet);

        Ok(items)
    }
}

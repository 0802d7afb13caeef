use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::debug;

use crate::provider::EvmProvider;

sol! {
    function uri(uint256 tokenId) external view returns (string memory);
    function balanceOfBatch(address[] accounts, uint256[] ids) external view returns (uint256[] memory);
}

/// Read-only view of an ERC-1155 collection contract.
///
/// [`Erc1155Client`] is the RPC-backed implementation; tests substitute
/// scripted ones.
#[async_trait]
pub trait CollectionContract: Send + Sync {
    /// Balances for the `(accounts[i], ids[i])` pairs, index-aligned with `ids`.
    async fn balance_of_batch(
        &self,
        contract: Address,
        accounts: &[Address],
        ids: &[U256],
    ) -> Result<Vec<U256>>;

    /// Metadata URI template for one token id, as stored on the contract.
    async fn uri(&self, contract: Address, token_id: U256) -> Result<String>;
}

/// ERC-1155 read client speaking ABI-encoded `eth_call` through an
/// [`EvmProvider`].
pub struct Erc1155Client {
    provider: Arc<EvmProvider>,
}

impl Erc1155Client {
    pub fn new(provider: Arc<EvmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CollectionContract for Erc1155Client {
    async fn balance_of_batch(
        &self,
        contract: Address,
        accounts: &[Address],
        ids: &[U256],
    ) -> Result<Vec<U256>> {
        let call = balanceOfBatchCall {
            accounts: accounts.to_vec(),
            ids: ids.to_vec(),
        };

        let data = self.provider.eth_call(contract, call.abi_encode()).await?;

        let decoded = balanceOfBatchCall::abi_decode_returns(&data, true).map_err(|e| {
            Error::ContractCall(format!("Failed to decode balanceOfBatch return: {}", e))
        })?;

        debug!(
            "balanceOfBatch on {} returned {} balances",
            contract,
            decoded._0.len()
        );

        Ok(decoded._0)
    }

    async fn uri(&self, contract: Address, token_id: U256) -> Result<String> {
        let call = uriCall { tokenId: token_id };

        let data = self.provider.eth_call(contract, call.abi_encode()).await?;

        let decoded = uriCall::abi_decode_returns(&data, true)
            .map_err(|e| Error::ContractCall(format!("Failed to decode uri return: {}", e)))?;

        Ok(decoded._0)
    }
}

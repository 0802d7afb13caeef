use alloy_primitives::Address;
use chain::parse_address;
use chrono::Utc;
use shared::models::{AddressPair, Collection, CollectionItem};
use shared::Result;
use tracing::{debug, error, info};

use crate::fetcher::CollectionFetcher;
use crate::store::AddressStore;

/// Lifecycle of the gallery view.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryState {
    /// No fetch has been attempted yet.
    Idle,
    /// A fetch stamped with `generation` is in flight.
    Loading { generation: u64 },
    /// The most recent fetch committed its items.
    Ready(Collection),
    /// The most recent fetch failed; `message` is shown to the user.
    Failed { message: String },
}

/// One gated fetch: the parsed pair plus the generation it was stamped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub wallet: Address,
    pub contract: Address,
}

/// Owns the address inputs, the gallery state machine, and the fetch
/// generation counter.
///
/// Every started fetch gets a fresh generation stamp. Only the result
/// carrying the newest stamp may commit, so a slow superseded fetch can
/// never overwrite the state of the one that replaced it.
pub struct GalleryController {
    fetcher: CollectionFetcher,
    store: AddressStore,
    wallet_input: String,
    contract_input: String,
    state: GalleryState,
    generation: u64,
}

impl GalleryController {
    /// Restore persisted inputs and start idle. Nothing is fetched until
    /// [`Self::refresh`] runs with two well-formed addresses.
    pub fn new(fetcher: CollectionFetcher, store: AddressStore) -> Self {
        let pair = store.load();

        Self {
            fetcher,
            store,
            wallet_input: pair.wallet,
            contract_input: pair.contract,
            state: GalleryState::Idle,
            generation: 0,
        }
    }

    pub fn wallet_input(&self) -> &str {
        &self.wallet_input
    }

    pub fn contract_input(&self) -> &str {
        &self.contract_input
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn set_wallet(&mut self, value: &str) {
        self.wallet_input = value.to_string();
    }

    pub fn set_contract(&mut self, value: &str) {
        self.contract_input = value.to_string();
    }

    /// Both inputs parsed, when both are well-formed.
    pub fn valid_addresses(&self) -> Option<(Address, Address)> {
        let wallet = parse_address(&self.wallet_input).ok()?;
        let contract = parse_address(&self.contract_input).ok()?;
        Some((wallet, contract))
    }

    /// Gate a fetch on the current inputs.
    ///
    /// With both addresses well-formed this persists the pair, bumps the
    /// generation counter, and moves to `Loading`. Otherwise it is a no-op
    /// and the previous state stands.
    pub fn begin_fetch(&mut self) -> Option<FetchRequest> {
        let (wallet, contract) = self.valid_addresses()?;

        self.store.save(&AddressPair {
            wallet: self.wallet_input.clone(),
            contract: self.contract_input.clone(),
        });

        self.generation += 1;
        self.state = GalleryState::Loading {
            generation: self.generation,
        };

        info!(
            "Starting fetch generation {} for wallet {} on contract {}",
            self.generation, wallet, contract
        );

        Some(FetchRequest {
            generation: self.generation,
            wallet,
            contract,
        })
    }

    /// Commit a finished fetch.
    ///
    /// A result stamped with anything but the newest generation is discarded,
    /// whether it succeeded or failed.
    pub fn complete_fetch(&mut self, generation: u64, result: Result<Vec<CollectionItem>>) {
        if generation != self.generation {
            debug!(
                "Discarding stale fetch generation {} (current is {})",
                generation, self.generation
            );
            return;
        }

        match result {
            Ok(items) => {
                info!(
                    "Fetch generation {} committed {} items",
                    generation,
                    items.len()
                );
                self.state = GalleryState::Ready(Collection {
                    items,
                    last_updated: Utc::now(),
                });
            }
            Err(e) => {
                error!("Fetch generation {} failed: {}", generation, e);
                self.state = GalleryState::Failed {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Run one gated fetch to completion, if the inputs allow it.
    pub async fn refresh(&mut self) {
        let request = match self.begin_fetch() {
            Some(request) => request,
            None => return,
        };

        let result = self
            .fetcher
            .fetch_collection(request.wallet, request.contract)
            .await;

        self.complete_fetch(request.generation, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataClient;
    use alloy_primitives::U256;
    use async_trait::async_trait;
    use chain::CollectionContract;
    use shared::{Error, TokenMetadata};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const WALLET: &str = "0x1111111111111111111111111111111111111111";
    const CONTRACT: &str = "0x2222222222222222222222222222222222222222";

    static NEXT_STORE: AtomicU32 = AtomicU32::new(0);

    struct EmptyContract;

    #[async_trait]
    impl CollectionContract for EmptyContract {
        async fn balance_of_batch(
            &self,
            _contract: Address,
            _accounts: &[Address],
            ids: &[U256],
        ) -> shared::Result<Vec<U256>> {
            Ok(vec![U256::ZERO; ids.len()])
        }

        async fn uri(&self, _contract: Address, _token_id: U256) -> shared::Result<String> {
            Ok("ipfs://meta/{id}.json".to_string())
        }
    }

    struct NoMetadata;

    #[async_trait]
    impl MetadataClient for NoMetadata {
        async fn fetch_document(&self, url: &str) -> shared::Result<TokenMetadata> {
            Err(Error::MetadataFetch(format!("no document at {}", url)))
        }
    }

    fn temp_store() -> AddressStore {
        let path = std::env::temp_dir().join(format!(
            "gallery-controller-test-{}-{}.json",
            std::process::id(),
            NEXT_STORE.fetch_add(1, Ordering::Relaxed)
        ));
        AddressStore::new(path)
    }

    fn controller_with_store(store: AddressStore) -> GalleryController {
        let fetcher = CollectionFetcher::new(
            Arc::new(EmptyContract),
            Arc::new(NoMetadata),
            "https://ipfs.io/ipfs/".to_string(),
        );
        GalleryController::new(fetcher, store)
    }

    fn cleanup(path: &std::path::Path) {
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_new_restores_persisted_inputs() {
        let store = temp_store();
        store.save(&AddressPair {
            wallet: WALLET.to_string(),
            contract: CONTRACT.to_string(),
        });
        let path = store.path().to_path_buf();

        let controller = controller_with_store(store);
        assert_eq!(controller.wallet_input(), WALLET);
        assert_eq!(controller.contract_input(), CONTRACT);
        assert_eq!(*controller.state(), GalleryState::Idle);

        cleanup(&path);
    }

    #[test]
    fn test_begin_fetch_requires_valid_inputs() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet("not an address");
        controller.set_contract(CONTRACT);

        assert!(controller.begin_fetch().is_none());
        assert_eq!(*controller.state(), GalleryState::Idle);
        // Nothing persisted on a gated-out fetch
        assert!(!path.exists());
    }

    #[test]
    fn test_begin_fetch_persists_pair_and_enters_loading() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet(WALLET);
        controller.set_contract(CONTRACT);

        let request = controller.begin_fetch().unwrap();
        assert_eq!(request.generation, 1);
        assert_eq!(
            *controller.state(),
            GalleryState::Loading { generation: 1 }
        );

        let reopened = AddressStore::new(path.clone());
        let persisted = reopened.load();
        assert_eq!(persisted.wallet, WALLET);
        assert_eq!(persisted.contract, CONTRACT);

        cleanup(&path);
    }

    #[test]
    fn test_chain_failure_lands_in_failed_state() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet(WALLET);
        controller.set_contract(CONTRACT);

        let request = controller.begin_fetch().unwrap();
        controller.complete_fetch(
            request.generation,
            Err(Error::EvmRpc("connection refused".to_string())),
        );

        match controller.state() {
            GalleryState::Failed { message } => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected Failed state, got {:?}", other),
        }

        cleanup(&path);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet(WALLET);
        controller.set_contract(CONTRACT);

        let first = controller.begin_fetch().unwrap();
        let second = controller.begin_fetch().unwrap();
        assert!(second.generation > first.generation);

        // The superseded fetch finishes late; its items must not commit
        controller.complete_fetch(
            first.generation,
            Ok(vec![CollectionItem {
                token_id: 0,
                name: "stale".to_string(),
                image: String::new(),
                description: String::new(),
                balance: U256::from(1),
            }]),
        );
        assert_eq!(
            *controller.state(),
            GalleryState::Loading {
                generation: second.generation
            }
        );

        controller.complete_fetch(second.generation, Ok(Vec::new()));
        match controller.state() {
            GalleryState::Ready(collection) => assert!(collection.items.is_empty()),
            other => panic!("expected Ready state, got {:?}", other),
        }

        cleanup(&path);
    }

    #[test]
    fn test_stale_failure_cannot_clobber_newer_fetch() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet(WALLET);
        controller.set_contract(CONTRACT);

        let first = controller.begin_fetch().unwrap();
        let second = controller.begin_fetch().unwrap();

        controller.complete_fetch(second.generation, Ok(Vec::new()));
        controller.complete_fetch(
            first.generation,
            Err(Error::EvmRpc("late failure".to_string())),
        );

        assert!(matches!(controller.state(), GalleryState::Ready(_)));

        cleanup(&path);
    }

    #[tokio::test]
    async fn test_refresh_with_empty_collection_lands_ready() {
        let store = temp_store();
        let path = store.path().to_path_buf();
        let mut controller = controller_with_store(store);

        controller.set_wallet(WALLET);
        controller.set_contract(CONTRACT);

        controller.refresh().await;

        match controller.state() {
            GalleryState::Ready(collection) => assert!(collection.items.is_empty()),
            other => panic!("expected Ready state, got {:?}", other),
        }

        cleanup(&path);
    }

    #[tokio::test]
    async fn test_refresh_without_valid_inputs_is_a_no_op() {
        let store = temp_store();
        let mut controller = controller_with_store(store);

        controller.refresh().await;
        assert_eq!(*controller.state(), GalleryState::Idle);
    }
}

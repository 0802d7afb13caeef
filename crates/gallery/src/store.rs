use shared::AddressPair;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable store for the last-used wallet and contract address inputs.
///
/// Backed by one JSON document with the fixed keys `walletAddress` and
/// `contractAddress`. Loading never fails: an absent, unreadable, or corrupt
/// file reads as an empty pair. Save failures are logged and swallowed.
pub struct AddressStore {
    path: PathBuf,
}

impl AddressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store location under the platform data directory, used when no
    /// override is configured.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("erc1155-gallery")
            .join("addresses.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted pair. Missing keys deserialize as empty strings.
    pub fn load(&self) -> AddressPair {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(pair) => {
                    debug!("Loaded address pair from {}", self.path.display());
                    pair
                }
                Err(e) => {
                    warn!(
                        "Ignoring unreadable address store {}: {}",
                        self.path.display(),
                        e
                    );
                    AddressPair::default()
                }
            },
            Err(_) => AddressPair::default(),
        }
    }

    /// Persist both values, overwriting whatever was stored before.
    pub fn save(&self, pair: &AddressPair) {
        if let Err(e) = self.try_save(pair) {
            warn!(
                "Failed to persist address pair to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn try_save(&self, pair: &AddressPair) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(pair)?;
        fs::write(&self.path, contents)
    }
}

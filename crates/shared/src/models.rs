use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Address input models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPair {
    #[serde(rename = "walletAddress", default)]
    pub wallet: String,
    #[serde(rename = "contractAddress", default)]
    pub contract: String,
}

// Token metadata models
/// Off-chain metadata document for a single token, as served from the
/// collection's metadata endpoint. Every field is optional and unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

// Gallery models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub token_id: u64,
    pub name: String,
    pub image: String,
    pub description: String,
    pub balance: U256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub items: Vec<CollectionItem>,
    pub last_updated: DateTime<Utc>,
}

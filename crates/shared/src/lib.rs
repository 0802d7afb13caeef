pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{AddressPair, Collection, CollectionItem, TokenMetadata};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("EVM RPC error: {0}")]
    EvmRpc(String),

    #[error("Contract call error: {0}")]
    ContractCall(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Metadata fetch error: {0}")]
    MetadataFetch(String),
}

pub type Result<T> = std::result::Result<T, Error>;

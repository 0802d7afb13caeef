pub mod address;
pub mod erc1155;
pub mod provider;

pub use address::{is_address, parse_address};
pub use erc1155::{CollectionContract, Erc1155Client};
pub use provider::EvmProvider;

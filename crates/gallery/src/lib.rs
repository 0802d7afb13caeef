pub mod controller;
pub mod fetcher;
pub mod metadata;
pub mod render;
pub mod store;

pub use controller::{FetchRequest, GalleryController, GalleryState};
pub use fetcher::{CollectionFetcher, KNOWN_TOKEN_IDS};
pub use metadata::{HttpMetadataClient, MetadataClient};
pub use render::render_state;
pub use store::AddressStore;

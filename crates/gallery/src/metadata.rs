use async_trait::async_trait;
use shared::{Error, Result, TokenMetadata};
use tracing::debug;

/// Source of off-chain token metadata documents.
///
/// [`HttpMetadataClient`] is the production implementation; tests substitute
/// scripted documents and failures.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// GET `url` and deserialize the body as a metadata document.
    async fn fetch_document(&self, url: &str) -> Result<TokenMetadata>;
}

/// Plain HTTP metadata client. Requests are sent once, with no retry and no
/// timeout beyond what the transport imposes.
pub struct HttpMetadataClient {
    client: reqwest::Client,
}

impl HttpMetadataClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpMetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    async fn fetch_document(&self, url: &str) -> Result<TokenMetadata> {
        debug!("Fetching metadata document from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::MetadataFetch(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::MetadataFetch(format!(
                "Request to {} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::MetadataFetch(format!("Malformed metadata from {}: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use shared::TokenMetadata;

    #[test]
    fn test_document_fields_are_optional() {
        let document: TokenMetadata = serde_json::from_str(r#"{"name": "Ticket"}"#).unwrap();

        assert_eq!(document.name.as_deref(), Some("Ticket"));
        assert!(document.image.is_none());
        assert!(document.description.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let document: TokenMetadata = serde_json::from_str(
            r#"{
                "name": "Ticket",
                "image": "ipfs://bafy/ticket.png",
                "description": "VIP",
                "attributes": [{"trait_type": "tier", "value": "vip"}],
                "external_url": "https://example.com"
            }"#,
        )
        .unwrap();

        assert_eq!(document.name.as_deref(), Some("Ticket"));
        assert_eq!(document.image.as_deref(), Some("ipfs://bafy/ticket.png"));
        assert_eq!(document.description.as_deref(), Some("VIP"));
    }

    #[test]
    fn test_empty_document_is_all_none() {
        let document: TokenMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(document, TokenMetadata::default());
    }
}

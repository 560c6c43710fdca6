//! Metadata storage: IPFS pinning with inline data-URI fallback

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::IpfsConfig;
use crate::error::{Error, Result};
use crate::metadata::{from_data_uri, to_data_uri, VaultMetadata, DATA_URI_PREFIX};

/// Stores vault metadata and returns the URI to put on-chain
#[derive(Clone)]
pub struct MetadataStore {
    config: IpfsConfig,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl MetadataStore {
    pub fn new(config: IpfsConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Upload metadata, returning an `ipfs://` URI, or an inline data URI
    /// when no pinning credentials are configured
    ///
    /// Validation runs first; invalid input never reaches the network.
    pub async fn store(&self, metadata: &VaultMetadata) -> Result<String> {
        metadata.validate()?;

        if self.config.is_configured() {
            let jwt = self.config.jwt.clone().unwrap_or_default();
            self.pin(metadata, &jwt).await
        } else {
            debug!("no IPFS credentials configured, using data URI fallback");
            to_data_uri(metadata)
        }
    }

    async fn pin(&self, metadata: &VaultMetadata, jwt: &str) -> Result<String> {
        let endpoint = format!(
            "{}/pinning/pinJSONToIPFS",
            self.config.api_url.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "pinataContent": metadata,
            "pinataMetadata": { "name": metadata.name },
        });

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(jwt)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Ipfs(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Ipfs(format!(
                "pin request failed with {status}: {text}"
            )));
        }

        let pin: PinResponse = response.json().await.map_err(|e| Error::Ipfs(e.to_string()))?;
        info!(cid = %pin.ipfs_hash, "metadata pinned");
        Ok(format!("ipfs://{}", pin.ipfs_hash))
    }

    /// Fetchable gateway URL for an `ipfs://` URI
    pub fn resolve_url(&self, uri: &str) -> Option<String> {
        uri.strip_prefix("ipfs://")
            .map(|cid| format!("{}/{}", self.config.gateway.trim_end_matches('/'), cid))
    }

    /// Load metadata back out of a stored URI
    ///
    /// Data URIs decode locally; `ipfs://` URIs are fetched through the
    /// configured gateway.
    pub async fn load(&self, uri: &str) -> Result<VaultMetadata> {
        if uri.starts_with(DATA_URI_PREFIX) {
            return from_data_uri(uri);
        }

        let target = self
            .resolve_url(uri)
            .ok_or_else(|| Error::InvalidMetadataUri(format!("unsupported metadata URI: {uri}")))?;
        let response = self
            .http
            .get(&target)
            .send()
            .await
            .map_err(|e| Error::Ipfs(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| Error::Ipfs(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_without_credentials() -> MetadataStore {
        MetadataStore::new(IpfsConfig::default())
    }

    #[tokio::test]
    async fn test_store_falls_back_to_data_uri() {
        let store = store_without_credentials();
        let metadata = VaultMetadata::new("Fallback Vault", "No pinning configured.");

        let uri = store.store(&metadata).await.unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));

        let loaded = store.load(&uri).await.unwrap();
        assert_eq!(loaded, metadata);
    }

    #[tokio::test]
    async fn test_store_validates_before_any_network_use() {
        let store = store_without_credentials();
        let metadata = VaultMetadata::new("x".repeat(101), "Too long a name.");

        let err = store.store(&metadata).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn test_resolve_url() {
        let store = store_without_credentials();
        assert_eq!(
            store.resolve_url("ipfs://QmExample").unwrap(),
            "https://gateway.pinata.cloud/ipfs/QmExample"
        );
        assert_eq!(store.resolve_url("https://example.org"), None);
    }
}

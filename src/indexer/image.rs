//! Token image resolution
//!
//! A token URI either points at an image directly or at a metadata JSON
//! document with an `image` field. Anything that goes wrong resolves to the
//! placeholder. Results are not cached and failed fetches are not retried.

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";
pub const DEFAULT_PLACEHOLDER: &str = "/images/placeholder.png";

#[derive(Debug, Deserialize)]
struct TokenMetadata {
    #[serde(default)]
    image: Option<String>,
}

/// Whether the URI's path ends in a known image extension
pub fn has_image_extension(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    path.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolves token URIs to displayable image URLs
#[derive(Debug, Clone)]
pub struct ImageResolver {
    http: reqwest::Client,
    ipfs_gateway: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(
        ipfs_gateway: &str,
        placeholder: &str,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(http, ipfs_gateway, placeholder))
    }

    pub fn with_client(http: reqwest::Client, ipfs_gateway: &str, placeholder: &str) -> Self {
        let mut gateway = ipfs_gateway.to_string();
        if !gateway.ends_with('/') {
            gateway.push('/');
        }
        Self {
            http,
            ipfs_gateway: gateway,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Rewrite `ipfs://` URIs onto the HTTP gateway
    pub fn gateway_url(&self, uri: &str) -> String {
        match uri.trim().strip_prefix("ipfs://") {
            Some(rest) => format!(
                "{}{}",
                self.ipfs_gateway,
                rest.trim_start_matches("ipfs/")
            ),
            None => uri.trim().to_string(),
        }
    }

    /// Direct image URL, then metadata `image` field, then placeholder
    pub async fn resolve_token_image(&self, uri: &str) -> String {
        if uri.trim().is_empty() {
            return self.placeholder.clone();
        }
        let url = self.gateway_url(uri);
        if has_image_extension(&url) {
            return url;
        }

        match self.fetch_metadata(&url).await {
            Ok(Some(image)) if !image.trim().is_empty() => {
                debug!(uri = %uri, image = %image, "Resolved image from metadata");
                self.gateway_url(&image)
            }
            Ok(_) => {
                debug!(uri = %uri, "Metadata has no image field");
                self.placeholder.clone()
            }
            Err(e) => {
                warn!(uri = %uri, error = %e, "Failed to fetch token metadata");
                self.placeholder.clone()
            }
        }
    }

    async fn fetch_metadata(&self, url: &str) -> Result<Option<String>, reqwest::Error> {
        let metadata: TokenMetadata = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(metadata.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ImageResolver {
        ImageResolver::with_client(
            reqwest::Client::new(),
            "https://gateway.example/ipfs",
            "/placeholder.png",
        )
    }

    #[test]
    fn test_image_extensions() {
        assert!(has_image_extension("https://x/y.PNG"));
        assert!(has_image_extension("https://x/y.webp?size=2"));
        assert!(!has_image_extension("https://x/y.json"));
        assert!(!has_image_extension("https://x/metadata"));
    }

    #[test]
    fn test_gateway_rewrite() {
        let r = resolver();
        assert_eq!(
            r.gateway_url("ipfs://bafy/1.png"),
            "https://gateway.example/ipfs/bafy/1.png"
        );
        assert_eq!(
            r.gateway_url("ipfs://ipfs/bafy/1.png"),
            "https://gateway.example/ipfs/bafy/1.png"
        );
        assert_eq!(r.gateway_url("https://a/b"), "https://a/b");
    }

    #[tokio::test]
    async fn test_direct_image_and_empty_uri_need_no_fetch() {
        let r = resolver();
        assert_eq!(
            r.resolve_token_image("ipfs://bafy/1.gif").await,
            "https://gateway.example/ipfs/bafy/1.gif"
        );
        assert_eq!(r.resolve_token_image("  ").await, "/placeholder.png");
    }
}

//! `reqwest` implementation of [`ChainClient`]

use super::{ChainClient, ChainError, ViewRequest};
use crate::types::{
    de_opt_u64, ChainEvent, ExecutionStatus, StateChange, TransactionResult, TransactionStatus,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Transaction as returned by `GET /transactions/by_hash/{hash}`
#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(rename = "type")]
    kind: String,
    hash: String,
    #[serde(default, deserialize_with = "de_opt_u64")]
    version: Option<u64>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    vm_status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    gas_used: Option<u64>,
    #[serde(default)]
    events: Vec<ChainEvent>,
    #[serde(default)]
    changes: Vec<StateChange>,
}

impl RawTransaction {
    fn is_pending(&self) -> bool {
        self.kind == "pending_transaction"
    }

    fn status(&self) -> TransactionStatus {
        if self.is_pending() {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Committed {
                success: self.success.unwrap_or(false),
                vm_status: self.vm_status.clone().unwrap_or_default(),
            }
        }
    }

    fn into_result(self) -> Result<TransactionResult, ChainError> {
        let version = self.version.ok_or_else(|| {
            ChainError::Decode(format!("committed transaction {} has no version", self.hash))
        })?;
        let status = if self.success.unwrap_or(false) {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failure
        };
        Ok(TransactionResult {
            hash: self.hash,
            status,
            vm_status: self.vm_status.unwrap_or_default(),
            version,
            gas_used: self.gas_used.unwrap_or(0),
            events: self.events,
            changes: self.changes,
        })
    }
}

/// Error body the node returns on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Fullnode REST client
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for `base_url` (e.g. `https://fullnode.testnet.aptoslabs.com/v1`)
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ChainError::from_reqwest(e, base_url))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Reuse an existing connection pool
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_transaction(&self, hash: &str) -> Result<RawTransaction, ChainError> {
        let url = format!("{}/transactions/by_hash/{}", self.base_url, hash);
        debug!(endpoint = %url, hash = %hash, "Fetching transaction");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ChainError::from_reqwest(e, &url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound {
                what: format!("transaction {}", hash),
            });
        }
        let body = Self::check_status(response, &url).await?;
        serde_json::from_value(body).map_err(|e| ChainError::Decode(e.to_string()))
    }

    /// Turn a non-success status into `ChainError::Response`, else parse the body
    async fn check_status(response: reqwest::Response, url: &str) -> Result<Value, ChainError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| ChainError::from_reqwest(e, url));
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&text)
            .map(|e| e.message)
            .unwrap_or(text);
        Err(ChainError::Response {
            endpoint: url.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ChainClient for RestClient {
    async fn transaction_status(&self, hash: &str) -> Result<TransactionStatus, ChainError> {
        Ok(self.fetch_transaction(hash).await?.status())
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<TransactionResult, ChainError> {
        let raw = self.fetch_transaction(hash).await?;
        if raw.is_pending() {
            return Err(ChainError::NotFound {
                what: format!("committed transaction {}", hash),
            });
        }
        raw.into_result()
    }

    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, ChainError> {
        let url = format!("{}/view", self.base_url);
        debug!(endpoint = %url, function = %request.function, "Calling view function");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChainError::from_reqwest(e, &url))?;

        let body = Self::check_status(response, &url).await?;
        match body {
            Value::Array(values) => Ok(values),
            other => Err(ChainError::Decode(format!(
                "expected a JSON array from view, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_pending_transaction() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "type": "pending_transaction",
            "hash": "0xabc",
        }))
        .unwrap();
        assert_eq!(raw.status(), TransactionStatus::Pending);
    }

    #[test]
    fn test_raw_committed_transaction() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "type": "user_transaction",
            "hash": "0xabc",
            "version": "12345",
            "success": false,
            "vm_status": "Move abort in 0xCC::coin_listing: ENO_LISTING(0x60001)",
            "gas_used": "7",
            "events": [],
            "changes": [],
        }))
        .unwrap();
        assert!(matches!(
            raw.status(),
            TransactionStatus::Committed { success: false, .. }
        ));
        let result = raw.into_result().unwrap();
        assert_eq!(result.version, 12345);
        assert_eq!(result.gas_used, 7);
        assert_eq!(result.status, ExecutionStatus::Failure);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = RestClient::with_client(reqwest::Client::new(), "http://node/v1/");
        assert_eq!(client.base_url(), "http://node/v1");
    }
}

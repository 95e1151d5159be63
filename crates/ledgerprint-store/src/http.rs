//! HTTP client for the ledger node service.
//!
//! The node service fronts the ledger program and answers in the uniform
//! envelope `{ success, code, message, data?, error? }`. Requests are made
//! once; failures are surfaced, never retried.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ledgerprint_core::{validate_submission, Fingerprint, Record, RecordAddress};

use crate::error::{Result, StoreError};
use crate::traits::{Anchored, LedgerHealth, RecordLookup, RecordStore};

/// Per-request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerTimeouts {
    pub submit: Duration,
    pub lookup: Duration,
    pub health: Duration,
}

impl Default for LedgerTimeouts {
    fn default() -> Self {
        Self {
            submit: Duration::from_secs(30),
            lookup: Duration::from_secs(10),
            health: Duration::from_secs(5),
        }
    }
}

/// Record store backed by a ledger node service.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    client: Client,
    base_url: String,
    base: Url,
    timeouts: LedgerTimeouts,
}

/// Envelope used by the node service.
#[derive(Debug, Deserialize)]
struct NodeEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct NodeStoreRequest {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeStored {
    signature: String,
    record_address: String,
    #[serde(default)]
    cost_lamports: Option<u64>,
    #[serde(default)]
    cost_sol: Option<f64>,
    #[serde(default)]
    transaction_signature: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    exists: bool,
    original_string: Option<String>,
    signature: Option<String>,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    cost_lamports: u64,
}

/// Answer to `GET /api/query/<text>`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeQuery {
    exists: bool,
    original_string: Option<String>,
    signature: Option<String>,
    #[serde(default)]
    record: Option<NodeQueryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeQueryRecord {
    #[serde(alias = "address")]
    record_address: Option<String>,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    cost_lamports: u64,
}

impl HttpLedger {
    /// Create a client for the node service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(base_url, LedgerTimeouts::default())
    }

    pub fn with_timeouts(base_url: impl Into<String>, timeouts: LedgerTimeouts) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid node URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "node URL {base_url:?} cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            base_url,
            base,
            timeouts,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL under the node base, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl RecordLookup for HttpLedger {
    async fn lookup(&self, address: &RecordAddress) -> Result<Option<Record>> {
        let url = self.url(&["api", "record", address.as_str()]);
        debug!(%url, "looking up record");

        let response = self
            .client
            .get(url)
            .timeout(self.timeouts.lookup)
            .send()
            .await
            .map_err(transport_error)?;

        let node: NodeRecord = unwrap_envelope(response).await?;
        if !node.exists {
            return Ok(None);
        }

        let record = stored_record(
            node.original_string,
            node.signature,
            address.clone(),
            node.owner,
            node.timestamp,
            node.cost_lamports,
        )?;
        Ok(Some(record))
    }
}

#[async_trait]
impl RecordStore for HttpLedger {
    async fn submit(&self, text: &str) -> Result<Anchored> {
        validate_submission(text)?;

        let request = NodeStoreRequest {
            data: STANDARD.encode(text),
        };

        let response = self
            .client
            .post(self.url(&["api", "store"]))
            .timeout(self.timeouts.submit)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let stored: NodeStored = unwrap_envelope(response).await?;
        let fingerprint = Fingerprint::from_hex(&stored.signature)
            .map_err(|e| StoreError::InvalidData(format!("stored signature: {e}")))?;

        let cost_lamports = stored
            .cost_lamports
            .or_else(|| stored.cost_sol.map(sol_to_lamports))
            .unwrap_or_default();

        let anchored = Anchored {
            address: RecordAddress(stored.record_address),
            fingerprint,
            cost_lamports,
            transaction_signature: stored.transaction_signature,
        };
        info!(address = %anchored.address, fingerprint = %anchored.fingerprint, "anchored text");
        Ok(anchored)
    }

    async fn find_by_text(&self, text: &str) -> Result<Option<Record>> {
        let url = self.url(&["api", "query", text]);
        debug!(%url, "querying record by text");

        let response = self
            .client
            .get(url)
            .timeout(self.timeouts.lookup)
            .send()
            .await
            .map_err(transport_error)?;

        let node: NodeQuery = unwrap_envelope(response).await?;
        if !node.exists {
            return Ok(None);
        }

        let details = node
            .record
            .ok_or_else(|| StoreError::InvalidData("query result has no record".to_string()))?;
        let address = details
            .record_address
            .ok_or_else(|| StoreError::InvalidData("query result has no record address".to_string()))?;

        let record = stored_record(
            node.original_string,
            node.signature,
            RecordAddress(address),
            details.owner,
            details.timestamp,
            details.cost_lamports,
        )?;
        Ok(Some(record))
    }

    async fn health(&self) -> Result<LedgerHealth> {
        let response = self
            .client
            .get(self.url(&["api", "health"]))
            .timeout(self.timeouts.health)
            .send()
            .await
            .map_err(transport_error)?;

        unwrap_envelope(response).await
    }
}

/// Decode the node envelope, turning `success: false` into a verbatim rejection.
async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    let envelope: NodeEnvelope<T> = match response.json().await {
        Ok(envelope) => envelope,
        Err(e) if status.is_server_error() => {
            return Err(StoreError::Unavailable(format!("node returned {status}: {e}")));
        }
        Err(e) => return Err(StoreError::InvalidData(e.to_string())),
    };

    if !envelope.success {
        let reason = envelope
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or(envelope.message);
        warn!(%status, %reason, "node refused request");
        return Err(StoreError::Rejected(reason));
    }

    envelope
        .data
        .ok_or_else(|| StoreError::InvalidData("envelope has no data".to_string()))
}

/// Assemble a record from node fields, rejecting missing text or a bad fingerprint.
fn stored_record(
    original_string: Option<String>,
    signature: Option<String>,
    address: RecordAddress,
    owner: String,
    timestamp: i64,
    cost_lamports: u64,
) -> Result<Record> {
    let original_text = original_string
        .ok_or_else(|| StoreError::InvalidData("record has no originalString".to_string()))?;
    let signature =
        signature.ok_or_else(|| StoreError::InvalidData("record has no signature".to_string()))?;
    let fingerprint = Fingerprint::from_hex(&signature)
        .map_err(|e| StoreError::InvalidData(format!("record signature: {e}")))?;

    Ok(Record {
        original_text,
        fingerprint,
        address,
        owner,
        timestamp,
        cost_lamports,
    })
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_decode() {
        StoreError::InvalidData(e.to_string())
    } else {
        StoreError::Unavailable(e.to_string())
    }
}

fn sol_to_lamports(sol: f64) -> u64 {
    (sol * ledgerprint_core::record::LAMPORTS_PER_SOL as f64).round() as u64
}

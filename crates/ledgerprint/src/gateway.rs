//! The gateway: request handlers for the public HTTP surface.
//!
//! Handlers are framework-agnostic. Each takes a decoded request and returns
//! a [`Reply`] (status + envelope) for whatever server hosts the gateway:
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /api/store` | [`Gateway::store`] |
//! | `GET /api/record/<address>` | [`Gateway::record`] |
//! | `POST /api/verify` | [`Gateway::verify`] |
//! | `GET /api/query/<text>` | [`Gateway::query`] |
//! | `GET /api/health` | [`Gateway::health`] |
//! | `GET /api/networks` | [`Gateway::networks`] |
//!
//! [`Gateway::dispatch`] maps a raw method and request target onto these,
//! answering 404 for unknown paths and 405 for known paths under the wrong
//! method.
//!
//! Error taxonomy: malformed input is a 400 and nothing is fingerprinted; a
//! missing record is a successful `exists: false`; an unreachable store is a
//! 503 with the cause in `error`; a refused submission is a 400 carrying the
//! store's message verbatim.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use ledgerprint_core::{fingerprint, validate_submission, Fingerprint, Record, RecordAddress};
use ledgerprint_store::{HttpLedger, LedgerHealth, RecordStore, StoreError};

use crate::config::{GatewayConfig, Network};
use crate::envelope::{status, Reply};
use crate::error::{LedgerprintError, Result};
use crate::verifier::{ClaimOutcome, Verifier};

/// Body of `POST /api/store`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    /// Base64-encoded UTF-8 text.
    pub data: String,
    #[serde(default)]
    pub network: Option<String>,
}

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Claimed original text (plain, not encoded).
    pub data: String,
    #[serde(default)]
    pub record_address: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredData {
    signature: Fingerprint,
    record_address: RecordAddress,
    cost_lamports: u64,
    cost_sol: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_signature: Option<String>,
    original_string: String,
    expected_hash: Fingerprint,
    verified: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MissingRecordData {
    exists: bool,
    record_address: RecordAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryData {
    exists: bool,
    original_string: String,
    signature: Fingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Record>,
}

#[derive(Debug, Serialize)]
struct UnaddressedData {
    signature: Fingerprint,
    hint: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthData {
    status: &'static str,
    network: Network,
    rpc_url: String,
    node: LedgerHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkEntry {
    name: Network,
    description: String,
    rpc_url: String,
}

#[derive(Debug, Serialize)]
struct NetworksData {
    networks: Vec<NetworkEntry>,
    default: Network,
}

const UNADDRESSED_HINT: &str =
    "supply recordAddress to check existence, or query /api/query/<text>";

/// A matched route, with its path parameter still percent-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Store,
    Verify,
    Record(&'a str),
    Query(&'a str),
    Health,
    Networks,
}

impl<'a> Route<'a> {
    fn match_path(path: &'a str) -> Option<Self> {
        let route = match path {
            "/api/store" => Route::Store,
            "/api/verify" => Route::Verify,
            "/api/health" => Route::Health,
            "/api/networks" => Route::Networks,
            _ => {
                if let Some(address) = path.strip_prefix("/api/record/") {
                    if address.is_empty() || address.contains('/') {
                        return None;
                    }
                    Route::Record(address)
                } else if let Some(text) = path.strip_prefix("/api/query/") {
                    Route::Query(text)
                } else {
                    return None;
                }
            }
        };
        Some(route)
    }

    fn method(self) -> &'static str {
        match self {
            Route::Store | Route::Verify => "POST",
            _ => "GET",
        }
    }
}

/// The gateway: one record store per configured network.
pub struct Gateway<S: RecordStore> {
    config: GatewayConfig,
    ledgers: BTreeMap<Network, Arc<S>>,
}

impl Gateway<HttpLedger> {
    /// Build a gateway with an [`HttpLedger`] for every configured network.
    pub fn connect(config: GatewayConfig) -> Result<Self> {
        let mut ledgers = BTreeMap::new();
        for (network, net) in &config.networks {
            ledgers.insert(*network, Arc::new(HttpLedger::new(net.node_url.clone())?));
        }
        Ok(Self { config, ledgers })
    }
}

impl<S: RecordStore> Gateway<S> {
    /// Create a gateway with no stores attached.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            ledgers: BTreeMap::new(),
        }
    }

    /// Attach the store serving `network`.
    pub fn with_ledger(mut self, network: Network, store: S) -> Self {
        self.ledgers.insert(network, Arc::new(store));
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Verification service for `network`.
    pub fn verifier(&self, network: Network) -> Result<Verifier<Arc<S>>> {
        let ledger = self.ledger(network)?;
        Ok(Verifier::new(ledger, self.config.verification))
    }

    fn ledger(&self, network: Network) -> Result<Arc<S>> {
        self.ledgers
            .get(&network)
            .cloned()
            .ok_or(LedgerprintError::NetworkNotConfigured(network))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// `POST /api/store`: decode, validate and anchor a string.
    pub async fn store(&self, request: StoreRequest) -> Reply {
        let network = self.config.resolve(request.network.as_deref());

        let text = match decode_payload(&request.data) {
            Ok(text) => text,
            Err(e) => return Reply::error(status::BAD_REQUEST, "invalid data encoding", e.to_string()),
        };
        if let Err(e) = validate_submission(&text) {
            return Reply::error(status::BAD_REQUEST, "invalid submission", e.to_string());
        }

        let ledger = match self.ledger(network) {
            Ok(ledger) => ledger,
            Err(e) => return failure_reply(e),
        };

        let expected = fingerprint(&text);
        match ledger.submit(&text).await {
            Ok(anchored) => {
                let verified = anchored.fingerprint == expected;
                if !verified {
                    warn!(
                        address = %anchored.address,
                        stored = %anchored.fingerprint,
                        %expected,
                        "ledger stored a different fingerprint than computed locally"
                    );
                }
                info!(%network, address = %anchored.address, "stored string");

                let data = StoredData {
                    signature: anchored.fingerprint,
                    record_address: anchored.address,
                    cost_lamports: anchored.cost_lamports,
                    cost_sol: lamports_to_sol(anchored.cost_lamports),
                    transaction_signature: anchored.transaction_signature,
                    original_string: text,
                    expected_hash: expected,
                    verified,
                };
                Reply::ok("stored on ledger", &data)
            }
            Err(e) => failure_reply(e.into()),
        }
    }

    /// `GET /api/record/<address>`: fetch a record and check it against itself.
    pub async fn record(&self, address: &str, network: Option<&str>) -> Reply {
        let network = self.config.resolve(network);
        let address = RecordAddress::new(address);

        let verifier = match self.verifier(network) {
            Ok(verifier) => verifier,
            Err(e) => return failure_reply(e),
        };

        match verifier.inspect(&address).await {
            Ok(Some(inspection)) => {
                #[derive(Serialize)]
                struct Found<'a> {
                    exists: bool,
                    #[serde(flatten)]
                    inspection: &'a crate::verifier::RecordInspection,
                }
                Reply::ok(
                    "record found",
                    &Found {
                        exists: true,
                        inspection: &inspection,
                    },
                )
            }
            Ok(None) => Reply::ok(
                "record not found",
                &MissingRecordData {
                    exists: false,
                    record_address: address,
                },
            ),
            Err(e) => failure_reply(e),
        }
    }

    /// `POST /api/verify`: check a claimed original.
    pub async fn verify(&self, request: VerifyRequest) -> Reply {
        let network = self.config.resolve(request.network.as_deref());
        let address = request
            .record_address
            .filter(|a| !a.is_empty())
            .map(RecordAddress::from);

        let verifier = match self.verifier(network) {
            Ok(verifier) => verifier,
            Err(e) => return failure_reply(e),
        };

        match verifier.verify_claim(&request.data, address.as_ref()).await {
            Ok(ClaimOutcome::Addressed(outcome)) => {
                let message = if outcome.exists {
                    "verification complete"
                } else {
                    "no record found"
                };
                Reply::ok(message, &outcome)
            }
            Ok(ClaimOutcome::Unaddressed { fingerprint }) => Reply::ok(
                "supply a record address to verify",
                &UnaddressedData {
                    signature: fingerprint,
                    hint: UNADDRESSED_HINT,
                },
            ),
            Err(e) => failure_reply(e),
        }
    }

    /// `GET /api/query/<text>`: look a record up by its exact text.
    ///
    /// The existence check for callers without an address. A miss reports
    /// the fingerprint the text would be stored under.
    pub async fn query(&self, text: &str, network: Option<&str>) -> Reply {
        if text.is_empty() {
            return Reply::error(status::BAD_REQUEST, "invalid request", "query text must not be empty");
        }
        let network = self.config.resolve(network);

        let ledger = match self.ledger(network) {
            Ok(ledger) => ledger,
            Err(e) => return failure_reply(e),
        };

        match ledger.find_by_text(text).await {
            Ok(Some(record)) => {
                let verified = fingerprint(text) == record.fingerprint;
                info!(%network, address = %record.address, verified, "text query hit");
                Reply::ok(
                    "record found",
                    &QueryData {
                        exists: true,
                        original_string: record.original_text.clone(),
                        signature: record.fingerprint,
                        verified: Some(verified),
                        record: Some(record),
                    },
                )
            }
            Ok(None) => Reply::ok(
                "no record found",
                &QueryData {
                    exists: false,
                    original_string: text.to_string(),
                    signature: fingerprint(text),
                    verified: None,
                    record: None,
                },
            ),
            Err(e) => failure_reply(e.into()),
        }
    }

    /// `GET /api/health`: probe the store behind `network`.
    pub async fn health(&self, network: Option<&str>) -> Reply {
        let network = self.config.resolve(network);

        let ledger = match self.ledger(network) {
            Ok(ledger) => ledger,
            Err(e) => return failure_reply(e),
        };

        match ledger.health().await {
            Ok(node) => Reply::ok(
                "service healthy",
                &HealthData {
                    status: "healthy",
                    network,
                    rpc_url: self
                        .config
                        .network(network)
                        .map(|n| n.rpc_url.clone())
                        .unwrap_or_default(),
                    node,
                },
            ),
            Err(e) => {
                warn!(%network, error = %e, "health probe failed");
                Reply::error(status::SERVICE_UNAVAILABLE, "record store unavailable", e.to_string())
            }
        }
    }

    /// `GET /api/networks`: list configured networks.
    pub fn networks(&self) -> Reply {
        let networks = self
            .config
            .networks
            .iter()
            .map(|(name, net)| NetworkEntry {
                name: *name,
                description: net.description.clone(),
                rpc_url: net.rpc_url.clone(),
            })
            .collect();

        Reply::ok(
            "supported networks",
            &NetworksData {
                networks,
                default: self.config.default_network,
            },
        )
    }

    /// Route a raw request to its handler.
    ///
    /// `target` is the request path with an optional query string; the only
    /// query parameter read is `network`.
    pub async fn dispatch(&self, method: &str, target: &str, body: &[u8]) -> Reply {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        let Some(route) = Route::match_path(path) else {
            debug!(%method, %path, "no route");
            return Reply::not_found(path);
        };
        if !method.eq_ignore_ascii_case(route.method()) {
            return Reply::method_not_allowed(method, path);
        }

        let network = match query_param(query, "network") {
            Ok(network) => network,
            Err(reply) => return reply,
        };
        let network = network.as_deref();

        match route {
            Route::Store => match parse_body::<StoreRequest>(body) {
                Ok(request) => self.store(request).await,
                Err(reply) => reply,
            },
            Route::Verify => match parse_body::<VerifyRequest>(body) {
                Ok(request) => self.verify(request).await,
                Err(reply) => reply,
            },
            Route::Record(address) => match decode_segment(address) {
                Ok(address) => self.record(&address, network).await,
                Err(reply) => reply,
            },
            Route::Query(text) => match decode_segment(text) {
                Ok(text) => self.query(&text, network).await,
                Err(reply) => reply,
            },
            Route::Health => self.health(network).await,
            Route::Networks => self.networks(),
        }
    }
}

/// Percent-decode one path parameter.
fn decode_segment(raw: &str) -> std::result::Result<String, Reply> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            Reply::error(
                status::BAD_REQUEST,
                "invalid request",
                format!("path parameter must be percent-encoded UTF-8: {e}"),
            )
        })
}

/// Value of `name` in a `k=v&k=v` query string, decoded.
fn query_param(query: &str, name: &str) -> std::result::Result<Option<String>, Reply> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_segment(&value.replace('+', " ")))
        .transpose()
}

/// Parse a JSON request body, answering 400 when it does not fit.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> std::result::Result<T, Reply> {
    serde_json::from_slice(body).map_err(|e| {
        Reply::error(
            status::BAD_REQUEST,
            "invalid request",
            format!("request body must be a JSON object with a string data field: {e}"),
        )
    })
}

/// Decode a base64 payload into UTF-8 text.
fn decode_payload(data: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| LedgerprintError::InvalidEncoding(format!("data must be valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| LedgerprintError::InvalidEncoding(format!("data must decode to UTF-8: {e}")))
}

fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / ledgerprint_core::record::LAMPORTS_PER_SOL as f64
}

/// Map a failure onto the error taxonomy.
fn failure_reply(e: LedgerprintError) -> Reply {
    match &e {
        LedgerprintError::Core(_) | LedgerprintError::InvalidEncoding(_) => {
            Reply::error(status::BAD_REQUEST, "invalid request", e.to_string())
        }
        LedgerprintError::Store(store) => match store {
            StoreError::Validation(inner) => {
                Reply::error(status::BAD_REQUEST, "invalid submission", inner.to_string())
            }
            StoreError::AlreadyExists { .. } | StoreError::Rejected(_) => {
                warn!(reason = %store, "record store refused request");
                Reply::error(status::BAD_REQUEST, "rejected by record store", store.to_string())
            }
            StoreError::Unavailable(_) => {
                error!(error = %store, "record store unavailable");
                Reply::error(status::SERVICE_UNAVAILABLE, "record store unavailable", store.to_string())
            }
            StoreError::InvalidData(_) => {
                error!(error = %store, "record store returned invalid data");
                Reply::error(status::INTERNAL_SERVER_ERROR, "internal server error", store.to_string())
            }
        },
        LedgerprintError::NetworkNotConfigured(_) | LedgerprintError::UnknownNetwork(_) => {
            error!(error = %e, "no record store for network");
            Reply::error(status::SERVICE_UNAVAILABLE, "network unavailable", e.to_string())
        }
    }
}

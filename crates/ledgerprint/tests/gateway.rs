//! Gateway handlers over in-memory and scripted record stores.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;

use ledgerprint::envelope::status;
use ledgerprint::gateway::parse_body;
use ledgerprint::store::{
    Anchored, LedgerHealth, MemoryLedger, RecordLookup, RecordStore, StoreError,
};
use ledgerprint::{
    Gateway, GatewayConfig, Network, Record, RecordAddress, StoreRequest, VerificationPolicy,
    VerifyRequest,
};

fn gateway() -> Gateway<MemoryLedger> {
    Gateway::new(GatewayConfig::default())
        .with_ledger(Network::Localnet, MemoryLedger::new())
        .with_ledger(Network::Devnet, MemoryLedger::new())
}

fn store_request(text: &str) -> StoreRequest {
    StoreRequest {
        data: STANDARD.encode(text),
        network: None,
    }
}

fn verify_request(text: &str, address: Option<&str>) -> VerifyRequest {
    VerifyRequest {
        data: text.to_string(),
        record_address: address.map(str::to_string),
        network: None,
    }
}

/// A store that refuses every submission with a fixed message and counts calls.
struct RefusingStore {
    message: &'static str,
    submissions: AtomicUsize,
}

#[async_trait]
impl RecordLookup for RefusingStore {
    async fn lookup(&self, _address: &RecordAddress) -> ledgerprint::store::Result<Option<Record>> {
        Err(StoreError::InvalidData("signature is not 32 hex characters".to_string()))
    }
}

#[async_trait]
impl RecordStore for RefusingStore {
    async fn submit(&self, _text: &str) -> ledgerprint::store::Result<Anchored> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Rejected(self.message.to_string()))
    }

    async fn find_by_text(&self, _text: &str) -> ledgerprint::store::Result<Option<Record>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health(&self) -> ledgerprint::store::Result<LedgerHealth> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn refusing(message: &'static str) -> Gateway<RefusingStore> {
    Gateway::new(GatewayConfig::default()).with_ledger(
        Network::Localnet,
        RefusingStore {
            message,
            submissions: AtomicUsize::new(0),
        },
    )
}

#[tokio::test]
async fn test_store_then_fetch_then_verify() {
    let gateway = gateway();

    let stored = gateway.store(store_request("Hello Devnet")).await;
    assert_eq!(stored.status, status::OK);
    assert_eq!(stored.body.code, 0);
    let data = stored.data();
    assert_eq!(data["signature"], "8ecb599e2d753b61a9a2da481cd999e1");
    assert_eq!(data["expectedHash"], data["signature"]);
    assert_eq!(data["verified"], true);
    assert_eq!(data["originalString"], "Hello Devnet");
    assert_eq!(data["costLamports"], 2_816_840);
    assert_eq!(data["costSol"], 0.00281684);
    let address = data["recordAddress"].as_str().unwrap().to_string();

    let fetched = gateway.record(&address, None).await;
    assert_eq!(fetched.status, status::OK);
    assert_eq!(fetched.data()["exists"], true);
    assert_eq!(fetched.data()["verified"], true);
    assert_eq!(fetched.data()["originalString"], "Hello Devnet");
    assert_eq!(fetched.data()["recordAddress"], address.as_str());

    let genuine = gateway.verify(verify_request("Hello Devnet", Some(&address))).await;
    assert_eq!(genuine.status, status::OK);
    assert_eq!(
        genuine.data(),
        &json!({
            "exists": true,
            "verified": true,
            "signature": "8ecb599e2d753b61a9a2da481cd999e1",
            "recordAddress": address,
        })
    );

    let altered = gateway.verify(verify_request("Hello devnet", Some(&address))).await;
    assert_eq!(altered.data()["exists"], true);
    assert_eq!(altered.data()["verified"], false);
    assert_eq!(altered.data()["signature"], "57a7592a57c61361bcd9f003aed999f1");
}

#[tokio::test]
async fn test_networks_are_independent() {
    let gateway = gateway();

    let stored = gateway
        .store(StoreRequest {
            data: STANDARD.encode("only on devnet"),
            network: Some("devnet".to_string()),
        })
        .await;
    let address = stored.data()["recordAddress"].as_str().unwrap().to_string();

    let on_devnet = gateway.record(&address, Some("devnet")).await;
    assert_eq!(on_devnet.data()["exists"], true);

    let on_localnet = gateway.record(&address, Some("localnet")).await;
    assert_eq!(on_localnet.status, status::OK);
    assert_eq!(on_localnet.data()["exists"], false);
}

#[tokio::test]
async fn test_unknown_network_falls_back_to_default() {
    let gateway = gateway();

    let stored = gateway
        .store(StoreRequest {
            data: STANDARD.encode("fallback"),
            network: Some("mainnet".to_string()),
        })
        .await;
    assert_eq!(stored.status, status::OK);
    let address = stored.data()["recordAddress"].as_str().unwrap().to_string();

    assert_eq!(gateway.record(&address, None).await.data()["exists"], true);
}

#[tokio::test]
async fn test_missing_record_is_success() {
    let gateway = gateway();

    let reply = gateway.record("nowhere", None).await;
    assert_eq!(reply.status, status::OK);
    assert!(reply.is_success());
    assert_eq!(reply.data(), &json!({ "exists": false, "recordAddress": "nowhere" }));

    let verify = gateway.verify(verify_request("Hello Devnet", Some("nowhere"))).await;
    assert_eq!(verify.status, status::OK);
    assert_eq!(verify.data()["exists"], false);
    assert_eq!(verify.data()["verified"], false);
}

#[tokio::test]
async fn test_unaddressed_verify_returns_fingerprint_only() {
    let gateway = gateway();

    for address in [None, Some("")] {
        let reply = gateway.verify(verify_request("Hello Devnet", address)).await;
        assert_eq!(reply.status, status::OK);
        assert_eq!(reply.data()["signature"], "8ecb599e2d753b61a9a2da481cd999e1");
        assert!(reply.data().get("exists").is_none());
        assert!(reply.data()["hint"].is_string());
    }
}

#[tokio::test]
async fn test_duplicate_submission_is_refused() {
    let gateway = gateway();

    assert!(gateway.store(store_request("once")).await.is_success());
    let again = gateway.store(store_request("once")).await;

    assert_eq!(again.status, status::BAD_REQUEST);
    assert!(!again.is_success());
    assert_eq!(again.body.code, status::BAD_REQUEST);
    assert!(again.body.error.as_deref().unwrap().contains("already anchored"));
}

#[tokio::test]
async fn test_store_refusal_is_relayed_verbatim() {
    let message = "Transaction simulation failed: account already in use";
    let gateway = refusing(message);

    let reply = gateway.store(store_request("Hello Devnet")).await;
    assert_eq!(reply.status, status::BAD_REQUEST);
    assert_eq!(reply.body.error.as_deref(), Some(message));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_store() {
    let gateway = refusing("unreachable");

    let not_base64 = gateway
        .store(StoreRequest {
            data: "***".to_string(),
            network: None,
        })
        .await;
    assert_eq!(not_base64.status, status::BAD_REQUEST);

    let empty = gateway.store(store_request("")).await;
    assert_eq!(empty.status, status::BAD_REQUEST);

    let too_long = gateway.store(store_request(&"x".repeat(201))).await;
    assert_eq!(too_long.status, status::BAD_REQUEST);
    assert!(too_long.body.error.as_deref().unwrap().contains("201"));

    let ledger = gateway.verifier(Network::Localnet).unwrap();
    assert_eq!(ledger.lookup().submissions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_stored_record_is_internal_error() {
    let gateway = refusing("unused");

    let reply = gateway.record("anything", None).await;
    assert_eq!(reply.status, status::INTERNAL_SERVER_ERROR);
    assert!(reply.body.error.is_some());
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let ledger = MemoryLedger::new();
    ledger.set_offline(true);
    let gateway = Gateway::new(GatewayConfig::default()).with_ledger(Network::Localnet, ledger);

    let reply = gateway.health(None).await;
    assert_eq!(reply.status, status::SERVICE_UNAVAILABLE);
    assert!(reply.body.error.as_deref().unwrap().contains("offline"));

    let refused = refusing("unused").health(None).await;
    assert_eq!(refused.status, status::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_when_reachable() {
    let reply = gateway().health(Some("devnet")).await;

    assert_eq!(reply.status, status::OK);
    assert_eq!(reply.data()["status"], "healthy");
    assert_eq!(reply.data()["network"], "devnet");
    assert_eq!(reply.data()["rpcUrl"], "https://api.devnet.solana.com");
}

#[tokio::test]
async fn test_unconfigured_network_is_unavailable() {
    let gateway =
        Gateway::new(GatewayConfig::default()).with_ledger(Network::Localnet, MemoryLedger::new());

    let reply = gateway
        .verify(VerifyRequest {
            data: "x".to_string(),
            record_address: Some("somewhere".to_string()),
            network: Some("devnet".to_string()),
        })
        .await;
    assert_eq!(reply.status, status::SERVICE_UNAVAILABLE);
}

/// Ledger holding text "A" under the fingerprint of "B".
fn colliding_ledger() -> MemoryLedger {
    let ledger = MemoryLedger::new();
    ledger
        .insert_record(Record {
            original_text: "A".to_string(),
            fingerprint: ledgerprint::fingerprint("B"),
            address: RecordAddress::new("collision"),
            owner: "forger".to_string(),
            timestamp: 0,
            cost_lamports: 0,
        })
        .unwrap();
    ledger
}

#[tokio::test]
async fn test_verification_policy_is_configurable() {
    let strict = Gateway::new(GatewayConfig::default())
        .with_ledger(Network::Localnet, colliding_ledger());
    let reply = strict.verify(verify_request("B", Some("collision"))).await;
    assert_eq!(reply.data()["exists"], true);
    assert_eq!(reply.data()["verified"], false);

    let relaxed = Gateway::new(
        GatewayConfig::default().with_verification(VerificationPolicy::FINGERPRINT_ONLY),
    )
    .with_ledger(Network::Localnet, colliding_ledger());
    let reply = relaxed.verify(verify_request("B", Some("collision"))).await;
    assert_eq!(reply.data()["verified"], true);
}

#[test]
fn test_parse_body() {
    let ok: VerifyRequest =
        parse_body(br#"{"data":"Hello Devnet","recordAddress":"abc"}"#).unwrap();
    assert_eq!(ok.record_address.as_deref(), Some("abc"));

    let missing = parse_body::<StoreRequest>(br#"{"network":"devnet"}"#).unwrap_err();
    assert_eq!(missing.status, status::BAD_REQUEST);

    let not_string = parse_body::<StoreRequest>(br#"{"data":42}"#).unwrap_err();
    assert_eq!(not_string.status, status::BAD_REQUEST);
}

#[test]
fn test_policy_defaults_to_strict() {
    assert_eq!(GatewayConfig::default().verification, VerificationPolicy::STRICT);
}

#[tokio::test]
async fn test_query_by_text() {
    let gateway = gateway();
    let stored = gateway.store(store_request("Hello Devnet")).await;
    let address = stored.data()["recordAddress"].clone();

    let hit = gateway.query("Hello Devnet", None).await;
    assert_eq!(hit.status, status::OK);
    assert_eq!(hit.data()["exists"], true);
    assert_eq!(hit.data()["originalString"], "Hello Devnet");
    assert_eq!(hit.data()["signature"], "8ecb599e2d753b61a9a2da481cd999e1");
    assert_eq!(hit.data()["verified"], true);
    assert_eq!(hit.data()["record"]["recordAddress"], address);

    let miss = gateway.query("Hello devnet", None).await;
    assert_eq!(miss.status, status::OK);
    assert_eq!(
        miss.data(),
        &json!({
            "exists": false,
            "originalString": "Hello devnet",
            "signature": "57a7592a57c61361bcd9f003aed999f1",
        })
    );
}

#[tokio::test]
async fn test_query_rejects_empty_text() {
    let reply = gateway().query("", None).await;
    assert_eq!(reply.status, status::BAD_REQUEST);
    assert!(reply.body.error.is_some());
}

#[tokio::test]
async fn test_query_reports_unreachable_store() {
    let reply = refusing("unused").query("anything", None).await;
    assert_eq!(reply.status, status::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_query_flags_tampered_record() {
    let ledger = MemoryLedger::new();
    ledger
        .insert_record(Record {
            original_text: "Hello devnet".to_string(),
            fingerprint: ledgerprint::fingerprint("Hello Devnet"),
            address: RecordAddress::new("tampered"),
            owner: "forger".to_string(),
            timestamp: 0,
            cost_lamports: 0,
        })
        .unwrap();
    let gateway = Gateway::new(GatewayConfig::default()).with_ledger(Network::Localnet, ledger);

    let reply = gateway.query("Hello devnet", None).await;
    assert_eq!(reply.data()["exists"], true);
    assert_eq!(reply.data()["verified"], false);
}

#[tokio::test]
async fn test_dispatch_routes_requests() {
    let gateway = gateway();

    let body = json!({ "data": STANDARD.encode("Hello Devnet") }).to_string();
    let stored = gateway.dispatch("POST", "/api/store", body.as_bytes()).await;
    assert_eq!(stored.status, status::OK);
    let address = stored.data()["recordAddress"].as_str().unwrap().to_string();

    let fetched = gateway
        .dispatch("GET", &format!("/api/record/{address}"), b"")
        .await;
    assert_eq!(fetched.data()["exists"], true);

    let queried = gateway.dispatch("GET", "/api/query/Hello%20Devnet", b"").await;
    assert_eq!(queried.data()["exists"], true);
    assert_eq!(queried.data()["record"]["recordAddress"], address.as_str());

    let body = json!({ "data": "Hello Devnet", "recordAddress": address }).to_string();
    let verified = gateway.dispatch("post", "/api/verify", body.as_bytes()).await;
    assert_eq!(verified.data()["verified"], true);

    let networks = gateway.dispatch("GET", "/api/networks", b"").await;
    assert_eq!(networks.data()["default"], "localnet");
}

#[tokio::test]
async fn test_dispatch_reads_network_parameter() {
    let gateway = gateway();
    let body = json!({ "data": STANDARD.encode("devnet only"), "network": "devnet" }).to_string();
    let stored = gateway.dispatch("POST", "/api/store", body.as_bytes()).await;
    let address = stored.data()["recordAddress"].as_str().unwrap().to_string();

    let on_devnet = gateway
        .dispatch("GET", &format!("/api/record/{address}?network=devnet"), b"")
        .await;
    assert_eq!(on_devnet.data()["exists"], true);

    let on_default = gateway
        .dispatch("GET", &format!("/api/record/{address}"), b"")
        .await;
    assert_eq!(on_default.data()["exists"], false);

    let health = gateway.dispatch("GET", "/api/health?network=devnet", b"").await;
    assert_eq!(health.data()["network"], "devnet");
}

#[tokio::test]
async fn test_dispatch_decodes_path_parameters() {
    let gateway = gateway();
    assert!(gateway.store(store_request("a/b?c#d")).await.is_success());

    let reply = gateway.dispatch("GET", "/api/query/a%2Fb%3Fc%23d", b"").await;
    assert_eq!(reply.data()["exists"], true);
    assert_eq!(reply.data()["originalString"], "a/b?c#d");

    let bad_utf8 = gateway.dispatch("GET", "/api/query/%FF", b"").await;
    assert_eq!(bad_utf8.status, status::BAD_REQUEST);
}

#[tokio::test]
async fn test_dispatch_unknown_route_and_wrong_method() {
    let gateway = gateway();

    let missing = gateway.dispatch("GET", "/api/nothing", b"").await;
    assert_eq!(missing.status, status::NOT_FOUND);
    assert_eq!(missing.body.code, 404);

    let no_address = gateway.dispatch("GET", "/api/record/", b"").await;
    assert_eq!(no_address.status, status::NOT_FOUND);

    let wrong_method = gateway.dispatch("GET", "/api/store", b"").await;
    assert_eq!(wrong_method.status, status::METHOD_NOT_ALLOWED);
    assert_eq!(wrong_method.body.code, 405);

    let post_health = gateway.dispatch("POST", "/api/health", b"{}").await;
    assert_eq!(post_health.status, status::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_dispatch_rejects_malformed_body() {
    let reply = gateway().dispatch("POST", "/api/verify", b"not json").await;
    assert_eq!(reply.status, status::BAD_REQUEST);
}

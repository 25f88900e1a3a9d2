//! Fullnode REST client and view helpers against a mock node

use mockito::Matcher;
use nft_market_client::chain::{ChainClient, ChainError, MarketplaceViews, RestClient};
use nft_market_client::payload::{Address, CoinType};
use nft_market_client::types::TransactionStatus;
use nft_market_client::{FailureKind, RunnerConfig, TransactionRunner};
use serde_json::json;
use std::time::Duration;

fn client(server: &mockito::ServerGuard) -> RestClient {
    RestClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

fn committed_body(success: bool) -> String {
    let vm_status = if success {
        "Executed successfully"
    } else {
        "Move abort: ENOT_OWNER"
    };
    json!({
        "type": "user_transaction",
        "hash": "0xabc",
        "version": "1234",
        "success": success,
        "vm_status": vm_status,
        "gas_used": "15",
        "events": [
            {
                "type": "0xcc::events::ListingPlaced",
                "sequence_number": "0",
                "data": { "price": "100000000" }
            }
        ],
        "changes": []
    })
    .to_string()
}

#[tokio::test]
async fn test_committed_transaction_is_decoded() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/transactions/by_hash/0xabc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(committed_body(true))
        .expect(2)
        .create_async()
        .await;
    let client = client(&server);

    assert_eq!(
        client.transaction_status("0xabc").await.unwrap(),
        TransactionStatus::Committed {
            success: true,
            vm_status: "Executed successfully".to_string()
        }
    );
    let result = client.transaction_by_hash("0xabc").await.unwrap();
    assert_eq!(result.version, 1234);
    assert_eq!(result.gas_used, 15);
    assert_eq!(result.events_of("ListingPlaced").count(), 1);
}

#[tokio::test]
async fn test_pending_and_missing_transactions() {
    let mut server = mockito::Server::new_async().await;
    let _pending = server
        .mock("GET", "/transactions/by_hash/0x1")
        .with_status(200)
        .with_body(json!({ "type": "pending_transaction", "hash": "0x1" }).to_string())
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/transactions/by_hash/0x2")
        .with_status(404)
        .with_body(json!({ "message": "Transaction not found" }).to_string())
        .create_async()
        .await;
    let client = client(&server);

    assert_eq!(
        client.transaction_status("0x1").await.unwrap(),
        TransactionStatus::Pending
    );
    assert!(client.transaction_by_hash("0x1").await.unwrap_err().is_not_found());
    assert!(client.transaction_status("0x2").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_server_error_is_query_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/transactions/by_hash/0x3")
        .with_status(500)
        .with_body(json!({ "message": "internal error" }).to_string())
        .create_async()
        .await;

    let err = client(&server).transaction_status("0x3").await.unwrap_err();
    match &err {
        ChainError::Response {
            status, message, ..
        } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.kind(), FailureKind::QueryFailed);
}

#[tokio::test]
async fn test_view_price_posts_coin_type_and_listing() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/view")
        .match_body(Matcher::Json(json!({
            "function": "0xCC::coin_listing::price",
            "type_arguments": ["0x1::aptos_coin::AptosCoin"],
            "arguments": ["0xAA"],
        })))
        .with_status(200)
        .with_body(r#"[{"vec":["100000000"]}]"#)
        .create_async()
        .await;
    let views = MarketplaceViews::new(addr("0xCC"), CoinType::aptos_coin());

    let price = views.price(&client(&server), &addr("0xAA")).await.unwrap();

    assert_eq!(price, Some(100_000_000));
}

#[tokio::test]
async fn test_view_decodes_objects_and_empty_options() {
    let mut server = mockito::Server::new_async().await;
    let _object = server
        .mock("POST", "/view")
        .match_body(Matcher::PartialJson(json!({ "function": "0xCC::listing::listed_object" })))
        .with_status(200)
        .with_body(r#"[{"inner":"0xdd"}]"#)
        .create_async()
        .await;
    let _bidder = server
        .mock("POST", "/view")
        .match_body(Matcher::PartialJson(
            json!({ "function": "0xCC::coin_listing::current_bidder" }),
        ))
        .with_status(200)
        .with_body(r#"[{"vec":[]}]"#)
        .create_async()
        .await;
    let _fee = server
        .mock("POST", "/view")
        .match_body(Matcher::PartialJson(json!({
            "function": "0xCC::fee_schedule::commission",
            "arguments": ["0xEE", "1000"],
        })))
        .with_status(200)
        .with_body(r#"["25"]"#)
        .create_async()
        .await;
    let views = MarketplaceViews::new(addr("0xCC"), CoinType::aptos_coin());
    let client = client(&server);

    let object = views.listed_object(&client, &addr("0xAA")).await.unwrap();
    assert_eq!(object, addr("0xdd"));
    assert_eq!(views.current_bidder(&client, &addr("0xAA")).await.unwrap(), None);
    assert_eq!(
        views.commission(&client, &addr("0xEE"), 1000).await.unwrap(),
        25
    );
}

#[tokio::test]
async fn test_view_rejects_non_array_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/view")
        .with_status(200)
        .with_body(r#"{"unexpected":true}"#)
        .create_async()
        .await;
    let views = MarketplaceViews::new(addr("0xCC"), CoinType::aptos_coin());

    let err = views
        .fee_address(&client(&server), &addr("0xEE"))
        .await
        .unwrap_err();
    assert!(matches!(err, ChainError::Decode(_)));
}

#[tokio::test]
async fn test_runner_confirms_against_rest_node() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/transactions/by_hash/0xabc")
        .with_status(200)
        .with_body(committed_body(false))
        .create_async()
        .await;
    let runner = TransactionRunner::new(
        client(&server),
        RunnerConfig {
            poll_interval: Duration::from_millis(10),
            confirmation_timeout: Duration::from_secs(5),
        },
    );

    let failure = runner.await_confirmation("0xabc").await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::ExecutionFailed);
    assert_eq!(failure.message, "Move abort: ENOT_OWNER");
}

#[tokio::test]
async fn test_unreachable_node_is_network_failure() {
    let client = RestClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = client.transaction_status("0xabc").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);
}

//! `ApiClient` over real HTTP against a mock server.

#![cfg(not(target_arch = "wasm32"))]

use std::sync::Arc;
use std::time::Duration;

use institutions_business::table::RowId;
use institutions_business::{ApiClient, ApiError, ApiEvent, BusinessConfig, EhttpFetcher, fixtures};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> (ApiClient, flume::Receiver<ApiEvent>) {
    let _ = env_logger::builder().is_test(true).try_init();
    ApiClient::new(BusinessConfig::new(server.uri()), Arc::new(EhttpFetcher))
}

async fn next_event(events: &flume::Receiver<ApiEvent>) -> ApiEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv_async())
        .await
        .expect("answer within five seconds")
        .expect("channel open")
}

#[tokio::test]
async fn test_search_sends_encoded_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/institution"))
        .and(query_param("id", "LL GI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![fixtures().remove(5)]))
        .expect(1)
        .mount(&server)
        .await;

    let (client, events) = client(&server).await;
    client.list(" LL GI ");

    match next_event(&events).await {
        ApiEvent::Listed { query, result } => {
            assert_eq!(query, "LL GI");
            assert_eq!(result.unwrap()[0].id, RowId::from("LLGGI"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_find_keeps_exact_code_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/institution"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, events) = client(&server).await;
    client.find(&RowId::Number(3));

    match next_event(&events).await {
        ApiEvent::Found { id, result } => {
            assert_eq!(id, RowId::Number(3));
            assert_eq!(result.unwrap().unwrap().address.street, "csdf");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_create_with_empty_created_body_echoes_record() {
    let server = MockServer::start().await;
    let institution = fixtures().remove(0);
    Mock::given(method("POST"))
        .and(path("/institution"))
        .and(body_json(&institution))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, events) = client(&server).await;
    client.create(&institution);

    assert_eq!(
        next_event(&events).await,
        ApiEvent::Created(Ok(institution))
    );
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let server = MockServer::start().await;
    let (client, events) = client(&server).await;
    drop(server);

    client.list("");

    assert!(matches!(
        next_event(&events).await,
        ApiEvent::Listed {
            result: Err(ApiError::Transport(_)),
            ..
        }
    ));
}

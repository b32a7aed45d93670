//! Events API client tests using wiremock and the reqwest adapter.

mod common;

use common::{page_body, reqwest_events_client, TEST_API_KEY};
use gigdeck::api::{FetchError, FetchEventsParams};
use gigdeck::traits::HttpError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sends_paging_filter_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("page[size]", "12"))
        .and(query_param("page[number]", "2"))
        .and(query_param("filter[venues][]", "Test Venue"))
        .and(header("x-api-key", TEST_API_KEY))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("p2", 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), Some(TEST_API_KEY));
    let params = FetchEventsParams::new()
        .with_venue("Test Venue")
        .with_page_size(12)
        .with_page(2);

    let page = client.fetch_events(&params).await.expect("page");
    assert_eq!(page.len(), 3);
    assert_eq!(page.data[0].id, "p2-0");
    assert_eq!(page.data[0].venue.as_deref(), Some("Test Venue"));
}

#[tokio::test]
async fn test_fetch_without_venue_omits_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("any", 1)))
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), Some(TEST_API_KEY));
    client
        .fetch_events(&FetchEventsParams::new())
        .await
        .expect("page");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or("");
    assert!(!query.contains("filter"), "unexpected filter in {}", query);
}

#[tokio::test]
async fn test_server_error_with_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
        )
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), Some(TEST_API_KEY));
    let err = client
        .fetch_events(&FetchEventsParams::new().with_venue("Test Venue"))
        .await
        .unwrap_err();

    match &err {
        FetchError::Api {
            status,
            status_text,
            body,
        } => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, &serde_json::json!({"error": "boom"}));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains(r#"{"error":"boom"}"#));
}

#[tokio::test]
async fn test_server_error_with_html_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), Some(TEST_API_KEY));
    let err = client
        .fetch_events(&FetchEventsParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    match err {
        FetchError::Api { body, .. } => assert!(body.is_null()),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_key_never_hits_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("x", 1)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), None);
    let err = client
        .fetch_events(&FetchEventsParams::new().with_venue("Test Venue"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::MissingApiKey);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a server so the port is closed
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = reqwest_events_client(&uri, Some(TEST_API_KEY));
    let err = client
        .fetch_events(&FetchEventsParams::new())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            FetchError::Transport(HttpError::ConnectionFailed(_))
                | FetchError::Transport(HttpError::Other(_))
        ),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_loosely_shaped_event_keeps_its_page() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {"id": "1", "name": "Fine"},
            {
                "id": 2,
                "name": null,
                "apple_music_tracks": [{"id": "am-1", "preview": "https://clip"}],
                "lineup": [{"details": null}],
                "ticket_types": [
                    {"id": "ga", "name": "GA", "price": {"total": 2500.0, "fees": 250.5}}
                ]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = reqwest_events_client(&mock_server.uri(), Some(TEST_API_KEY));
    let page = client
        .fetch_events(&FetchEventsParams::new().with_venue("Test Venue"))
        .await
        .expect("page with odd event still decodes");

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0].name, "Fine");
    let odd = &page.data[1];
    assert_eq!(odd.id, "2");
    assert_eq!(odd.name, "");
    assert!(gigdeck::format::has_audio_clips(odd));
    let tier = &odd.ticket_types.as_ref().unwrap()[0];
    assert_eq!(tier.price.total, 2500);
    assert_eq!(tier.price.fees, 251);
}

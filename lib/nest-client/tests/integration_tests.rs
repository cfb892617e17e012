//! Integration tests for `HyperClient` as a transport, using wiremock.

use std::collections::HashMap;
use std::time::Duration;

use nest_client::{
    Error, HyperClient, Method, Request, RequestSpec, Transport, has_response_data,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, header_exists, method, path},
};

fn spec(server: &MockServer, method: Method, path: &str) -> RequestSpec {
    RequestSpec::new(method, format!("{}{path}", server.uri()))
}

#[tokio::test]
async fn test_exchange_returns_raw_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .and(header("X-HTTP-Method-Override", "GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "2")
                .set_body_string(r#"[{"name":"Tripel"},{"name":"Dubbel"}]"#),
        )
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = spec(&mock_server, Method::Get, "/beers")
        .build()
        .expect("request");

    let response = client.exchange(request).await.expect("response");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("x-total-count"), Some("2"));
    assert_eq!(response.text(), r#"[{"name":"Tripel"},{"name":"Dubbel"}]"#);
}

#[tokio::test]
async fn test_exchange_sends_body_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/beers"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-HTTP-Method-Override", "POST"))
        .and(body_string("{ \"name\" : \"Tripel\" }"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = RequestSpec::with_body(
        Method::Post,
        format!("{}/beers", mock_server.uri()),
        nest_client::Body::raw_json("{ \"name\" : \"Tripel\" }"),
    )
    .build()
    .expect("request");

    let response = client.exchange(request).await.expect("response");

    assert_eq!(response.status(), 201);
    assert!(!has_response_data(&response.text()));
}

#[tokio::test]
async fn test_error_status_is_not_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/beers/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"msg":"not found"}"#))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = spec(&mock_server, Method::Delete, "/beers/1")
        .build()
        .expect("request");

    let response = client.exchange(request).await.expect("response");

    assert_eq!(response.status(), 404);
    assert!(response.has_error());
    assert_eq!(response.text(), r#"{"msg":"not found"}"#);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .and(header("User-Agent", "beer-app/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().user_agent("beer-app/1.0").build();
    let request = spec(&mock_server, Method::Get, "/beers")
        .build()
        .expect("request");

    let response = client.exchange(request).await.expect("response");
    assert!(response.is_success());
}

#[tokio::test]
async fn test_default_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("User-Agent"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = spec(&mock_server, Method::Get, "/").build().expect("request");

    let response = client.exchange(request).await.expect("response");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let request = spec(&mock_server, Method::Get, "/slow")
        .build()
        .expect("request");

    let err = client.exchange(request).await.expect_err("timeout");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener to get a port nobody listens on.
    let address = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port");

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("http://{address}/beers")).expect("url");
    let request = Request::from_parts(Method::Get, url, HashMap::new(), None);

    let err = client.exchange(request).await.expect_err("connection error");
    assert!(matches!(err, Error::Connection(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_client_is_shared_across_tasks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        let request = spec(&mock_server, Method::Get, "/beers")
            .build()
            .expect("request");
        handles.push(tokio::spawn(async move { client.exchange(request).await }));
    }

    for handle in handles {
        let response = handle.await.expect("join").expect("response");
        assert_eq!(response.status(), 200);
    }
}

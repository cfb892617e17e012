//! End-to-end tests for `CrudService` over `HyperClient`, using wiremock.

use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use nest_client::{
    CrudService, Error, Header, HyperClient, MatchingOptions, Middleware, Misuse,
    RequestException, SortOrder,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Beer {
    #[serde(rename = "_id", default)]
    id: String,
    name: String,
    #[serde(default)]
    abv: f32,
}

fn beer(id: &str, name: &str) -> Beer {
    Beer {
        id: id.to_string(),
        name: name.to_string(),
        abv: 8.5,
    }
}

fn beers(server: &MockServer) -> CrudService<Beer, HyperClient> {
    CrudService::builder(server.address().to_string(), "beers")
        .insecure(true)
        .build(HyperClient::new())
}

#[derive(Default)]
struct Recorder {
    caught: Mutex<Vec<RequestException>>,
}

impl Recorder {
    fn caught(&self) -> Vec<RequestException> {
        self.caught.lock().expect("lock").clone()
    }
}

impl Middleware for Recorder {
    fn headers(&self) -> Vec<Header> {
        vec![Header::new("Authorization", "Bearer beer-token")]
    }

    fn on_request_did_catch(&self, exception: &RequestException) {
        self.caught.lock().expect("lock").push(exception.clone());
    }
}

fn beers_with(server: &MockServer, recorder: &Arc<Recorder>) -> CrudService<Beer, HyperClient> {
    CrudService::builder(server.address().to_string(), "beers")
        .insecure(true)
        .middleware(recorder.clone())
        .build(HyperClient::new())
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_read_collection() {
    let mock_server = MockServer::start().await;
    let expected = vec![beer("1", "Tripel"), beer("2", "Dubbel")];

    Mock::given(method("GET"))
        .and(path("/beers"))
        .and(header("X-HTTP-Method-Override", "GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&mock_server)
        .await;

    let found = beers(&mock_server).read().fetch().await.expect("fetch");
    check!(found == expected);
}

#[tokio::test]
async fn test_query_string_reaches_backend_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .and(|request: &wiremock::Request| {
            request.url.query()
                == Some(
                    "populate[]=brewers&sort[]=-name&match[name][$options]=im\
                     &match[name][$regex]=^Du%20vel&offset=5&limit=10",
                )
        })
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let found = beers(&mock_server)
        .read()
        .populate(["brewers"])
        .sort_by("name", SortOrder::Descending)
        .match_regex_with(
            "name",
            "^Du vel",
            MatchingOptions::MULTI_LINE | MatchingOptions::CASE_INSENSITIVE,
        )
        .offset(5)
        .limit(10)
        .fetch()
        .await
        .expect("fetch");

    check!(found.is_empty());
}

#[tokio::test]
async fn test_query_values_are_decoded_by_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .and(query_param("match[brewery]", "Smith & Sons"))
        .and(query_param("select[]", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    beers(&mock_server)
        .read()
        .match_exact("brewery", "Smith & Sons")
        .select(["name"])
        .fetch()
        .await
        .expect("fetch");
}

#[tokio::test]
async fn test_read_one_and_many() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(beer("1", "Tripel")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/beers/1,2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vec![beer("1", "Tripel"), beer("2", "Dubbel")]),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = beers(&mock_server);
    let one = service.read_one("1").fetch().await.expect("read one");
    check!(one.name == "Tripel");

    let many = service.read_many(["1", "2"]).fetch().await.expect("read many");
    check!(many.len() == 2);
}

#[tokio::test]
async fn test_send_keeps_raw_response() {
    let mock_server = MockServer::start().await;
    let raw = r#"[{"_id":"1","name":"Tripel","abv":8.5}]"#;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw))
        .mount(&mock_server)
        .await;

    let mut request = beers(&mock_server).read();
    let found = request.send().await.expect("send");
    check!(found.len() == 1);
    check!(request.raw_response().expect("raw") == raw);
    check!(request.outcome().is_some_and(|outcome| outcome.has_response_data()));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_posts_json() {
    let mock_server = MockServer::start().await;
    let input = beer("", "Quadrupel");
    let created = beer("3", "Quadrupel");

    Mock::given(method("POST"))
        .and(path("/beers"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-HTTP-Method-Override", "POST"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = beers(&mock_server)
        .create(&input)
        .expect("serialize")
        .fetch()
        .await
        .expect("fetch");
    check!(result == created);
}

#[tokio::test]
async fn test_update_puts_to_collection() {
    let mock_server = MockServer::start().await;
    let updated = beer("3", "Quad");

    Mock::given(method("PUT"))
        .and(path("/beers"))
        .and(header("X-HTTP-Method-Override", "PUT"))
        .and(body_json(&updated))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = beers(&mock_server)
        .update(&updated)
        .expect("serialize")
        .fetch()
        .await
        .expect("fetch");
    check!(result == updated);
}

#[tokio::test]
async fn test_delete_with_empty_body_yields_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/beers/3"))
        .and(header("X-HTTP-Method-Override", "DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let deleted = beers(&mock_server).delete(3).fetch().await.expect("fetch");
    check!(deleted == Beer::default());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_not_found_reaches_middleware_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers/404"))
        .and(header("Authorization", "Bearer beer-token"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"msg":"not found"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let err = beers_with(&mock_server, &recorder)
        .read_one("404")
        .fetch()
        .await
        .expect_err("not found");

    check!(err.is_not_found());
    check!(err.raw_response_data() == Some(r#"{"msg":"not found"}"#));

    let caught = recorder.caught();
    let_assert!([exception] = caught.as_slice());
    check!(exception.status_code() == 404);
    check!(exception.url().ends_with("/beers/404"));
}

#[tokio::test]
async fn test_retried_server_error_is_reported_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let service = CrudService::<Beer, _>::builder(mock_server.address().to_string(), "beers")
        .insecure(true)
        .middleware(recorder.clone())
        .build(HyperClient::builder().with_retry(2).build());

    let err = service.read().fetch().await.expect_err("server error");
    check!(err.status() == Some(503));
    check!(recorder.caught().len() == 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_status_zero() {
    let address = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port");

    let recorder = Arc::new(Recorder::default());
    let service = CrudService::<Beer, _>::builder(address.to_string(), "beers")
        .insecure(true)
        .middleware(recorder.clone())
        .build(HyperClient::new());

    let err = service.read().fetch().await.expect_err("unreachable");
    check!(err.is_transport_failure());
    check!(err.status() == Some(0));

    let caught = recorder.caught();
    let_assert!([exception] = caught.as_slice());
    check!(exception.raw_response_data().is_empty());
    check!(exception.message().is_some_and(|message| message.starts_with("connection error")));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let mut request = beers_with(&mock_server, &recorder).read_one("1");

    let_assert!(Err(Error::Decode(error)) = request.send().await);
    check!(error.raw_response_data() == "not json");
    check!(recorder.caught().is_empty());
    check!(request.raw_response().expect("raw") == "not json");
}

#[tokio::test]
async fn test_second_send_does_not_hit_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut request = beers(&mock_server).read();
    request.send().await.expect("first send");

    let_assert!(Err(Error::Misuse(Misuse::AlreadySent)) = request.send().await);
}

//! Fetch-loop tests against mock HTTP servers
//!
//! Real sleeps are replaced by a recording sleeper, so these tests assert on
//! the requested delays instead of waiting them out.

use crate::common::RecordingSleep;
use std::sync::Arc;
use std::time::Duration;
use windward::fetch::{FetchCompletion, Fetcher};
use windward::identity::IdentityPool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(max_attempts: u32) -> (Fetcher<RecordingSleep>, RecordingSleep) {
    let pool = Arc::new(IdentityPool::new(2).unwrap());
    let sleeper = RecordingSleep::new();
    (
        Fetcher::with_sleeper(pool, max_attempts, sleeper.clone()),
        sleeper,
    )
}

fn secs(delay: Duration) -> f64 {
    delay.as_secs_f64()
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>listing</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let (fetcher, sleeper) = fetcher(8);
    let completion = fetcher.fetch(&format!("{}/boat", server.uri())).await.unwrap();

    match completion {
        FetchCompletion::Fetched(page) => {
            assert!(page.body.contains("listing"));
            assert!(page.url.ends_with("/boat"));
        }
        other => panic!("expected a fetched page, got {other:?}"),
    }

    // Exactly one courtesy delay, inside its attempt-0 bounds
    let delays = sleeper.delays();
    assert_eq!(delays.len(), 1);
    assert!(secs(delays[0]) >= 1.0 && secs(delays[0]) <= 15.0);
}

#[tokio::test]
async fn test_not_found_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (fetcher, sleeper) = fetcher(8);
    let completion = fetcher.fetch(&format!("{}/gone", server.uri())).await.unwrap();

    assert!(matches!(completion, FetchCompletion::NotFound));
    // No backoff was scheduled after the terminal 404
    assert_eq!(sleeper.delays().len(), 1);
}

#[tokio::test]
async fn test_service_unavailable_backs_off_then_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boat"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let (fetcher, sleeper) = fetcher(8);
    let completion = fetcher.fetch(&format!("{}/boat", server.uri())).await.unwrap();

    assert!(matches!(completion, FetchCompletion::Fetched(_)));

    // courtesy(0), 503 backoff, courtesy(1)
    let delays = sleeper.delays();
    assert_eq!(delays.len(), 3);
    assert!(
        secs(delays[1]) >= 60.0 && secs(delays[1]) <= 120.0,
        "503 backoff out of bounds: {:?}",
        delays[1]
    );
}

#[tokio::test]
async fn test_blocked_backoff_escalates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boat"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let (fetcher, sleeper) = fetcher(8);
    let completion = fetcher.fetch(&format!("{}/boat", server.uri())).await.unwrap();

    assert!(matches!(completion, FetchCompletion::Fetched(_)));

    // courtesy(0), block backoff(0), courtesy(1), block backoff(1), courtesy(2)
    let delays = sleeper.delays();
    assert_eq!(delays.len(), 5);
    assert!(secs(delays[1]) >= 30.0 && secs(delays[1]) <= 60.0);
    assert!(secs(delays[3]) >= 60.0 && secs(delays[3]) <= 120.0);
    assert!(secs(delays[3]) >= secs(delays[1]));
}

#[tokio::test]
async fn test_retries_exhausted_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let (fetcher, _sleeper) = fetcher(3);
    let completion = fetcher.fetch(&format!("{}/flaky", server.uri())).await.unwrap();

    assert!(matches!(completion, FetchCompletion::RetriesExhausted));
}

#[tokio::test]
async fn test_resolved_redirect_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&server)
        .await;

    let (fetcher, _sleeper) = fetcher(8);
    let completion = fetcher.fetch(&format!("{}/old", server.uri())).await.unwrap();

    match completion {
        FetchCompletion::Fetched(page) => assert!(page.body.contains("moved here")),
        other => panic!("expected the redirect target, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_error_retries_with_backoff() {
    // Grab a port, then shut the server down so connections are refused
    let server = MockServer::start().await;
    let dead_url = format!("{}/boat", server.uri());
    drop(server);

    let (fetcher, sleeper) = fetcher(2);
    let completion = fetcher.fetch(&dead_url).await.unwrap();

    assert!(matches!(completion, FetchCompletion::RetriesExhausted));

    // courtesy(0), backoff(0), courtesy(1), backoff(1)
    let delays = sleeper.delays();
    assert_eq!(delays.len(), 4);
    assert!(secs(delays[1]) >= 20.0 && secs(delays[1]) <= 40.0);
    assert!(secs(delays[3]) >= 40.0 && secs(delays[3]) <= 80.0);
}

#[tokio::test]
async fn test_late_attempts_insert_cooling_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stubborn"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (fetcher, sleeper) = fetcher(5);
    let completion = fetcher
        .fetch(&format!("{}/stubborn", server.uri()))
        .await
        .unwrap();

    assert!(matches!(completion, FetchCompletion::RetriesExhausted));

    // Attempts 0..=3: courtesy + backoff each; attempt 4 adds the cooling
    // delay between its courtesy delay and the request
    let delays = sleeper.delays();
    assert_eq!(delays.len(), 11);
    let cooling = secs(delays[9]);
    assert!(
        (10.0..=25.0).contains(&cooling),
        "cooling delay out of bounds: {cooling}"
    );
}

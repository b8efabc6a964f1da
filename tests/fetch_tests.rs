mod common;

use common::{StubResponse, StubServer};
use mapview::{LatLng, MapError, MapFetcher, NavigationModel, ViewerConfig};
use std::time::Duration;

fn fetcher_for(server: &StubServer) -> MapFetcher {
    let config = ViewerConfig::new("test-key").with_base_url(server.base_url());
    MapFetcher::new(&config).unwrap()
}

fn moscow_request() -> mapview::RequestDescriptor {
    let mut nav = NavigationModel::new();
    nav.set_center(NavigationModel::validate_coordinate(55.751244, 37.618423).unwrap());
    nav.set_zoom_direct(10);
    nav.build_request("test-key", 600, 450).unwrap()
}

#[test]
fn test_fetch_success_returns_raw_bytes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = StubServer::start(vec![StubResponse::ok(b"PNGDATA".to_vec())]);

    let bytes = fetcher_for(&server).fetch(&moscow_request()).unwrap();
    assert_eq!(bytes, b"PNGDATA");

    let requests = server.join();
    assert_eq!(
        requests,
        vec!["/v1?apikey=test-key&ll=37.618423,55.751244&z=10&size=600,450&l=map".to_string()]
    );
}

#[test]
fn test_fetch_not_found_carries_status_and_url() {
    let server = StubServer::start(vec![StubResponse::status(404, "Not Found")]);

    let err = fetcher_for(&server).fetch(&moscow_request()).unwrap_err();
    assert_eq!(err.status(), Some(404));
    match &err {
        MapError::Transport { url, status, .. } => {
            assert_eq!(*status, Some(404));
            assert!(url.starts_with(&server.base_url()));
            assert!(url.contains("ll=37.618423,55.751244"));
            assert!(!url.contains("test-key"));
            assert!(url.contains("apikey=REDACTED&"));
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert!(err.to_string().contains("HTTP 404"));
    assert!(!err.is_fatal());
    server.join();
}

#[test]
fn test_fetch_server_error() {
    let server = StubServer::start(vec![StubResponse::status(500, "Internal Server Error")]);
    let err = fetcher_for(&server).fetch(&moscow_request()).unwrap_err();
    assert_eq!(err.status(), Some(500));
    server.join();
}

#[test]
fn test_fetch_empty_body_is_decode_failure() {
    let server = StubServer::start(vec![StubResponse::ok(Vec::new())]);
    let err = fetcher_for(&server).fetch(&moscow_request()).unwrap_err();
    assert!(matches!(err, MapError::Decode(_)));
    server.join();
}

#[test]
fn test_fetch_connection_refused() {
    // Bind and drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ViewerConfig::new("k")
        .with_base_url(format!("http://{addr}/v1"))
        .with_timeout(Duration::from_secs(2));
    let fetcher = MapFetcher::new(&config).unwrap();

    let err = fetcher.fetch(&moscow_request()).unwrap_err();
    assert!(matches!(err, MapError::Transport { status: None, .. }));
}

#[test]
fn test_repeated_requests_hit_the_network() {
    let server = StubServer::start(vec![
        StubResponse::ok(b"first".to_vec()),
        StubResponse::ok(b"second".to_vec()),
    ]);
    let fetcher = fetcher_for(&server);
    let request = moscow_request();

    assert_eq!(fetcher.fetch(&request).unwrap(), b"first");
    assert_eq!(fetcher.fetch(&request).unwrap(), b"second");
    assert_eq!(server.join().len(), 2);
}

#[test]
fn test_center_round_trips_into_request() {
    let center = LatLng::new(55.75, 37.61);
    let mut nav = NavigationModel::new();
    nav.set_center(center);
    let request = nav.build_request("k", 600, 450).unwrap();
    assert_eq!(request.center, center);
}

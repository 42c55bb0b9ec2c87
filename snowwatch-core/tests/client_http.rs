//! HTTP-level tests for the weather client against a mock server, plus
//! store-level flows that run real fetches through the reducer.

use std::net::TcpListener;
use std::time::Duration;

use snowwatch_core::{
    reduce, Action, AppState, Effect, FetchErrorKind, OpenWeatherClient, Verdict, WeatherConfig,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A current-conditions body in the shape the service actually returns;
/// only `weather[0].main` matters to the client.
fn conditions_body(main: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -122.6784, "lat": 45.5152 },
        "weather": [
            { "id": 600, "main": main, "description": "light snow", "icon": "13d" }
        ],
        "base": "stations",
        "main": { "temp": 271.3, "humidity": 93 },
        "name": "Portland",
        "cod": 200
    })
}

fn test_client(mock_server: &MockServer) -> OpenWeatherClient {
    let mut config = WeatherConfig::new("test-key");
    config.api_base = mock_server.uri();
    config.timeout = Duration::from_millis(250);
    OpenWeatherClient::new(config).expect("client should build")
}

async fn mount_conditions(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

/// Run one fetch for the state's current effect and dispatch the outcome,
/// the same translation the runtime performs.
async fn run_effect(state: &mut AppState, client: &OpenWeatherClient, effect: &Effect) {
    let Effect::FetchWeather { city, tag } = effect;
    let action = match client.fetch_classification(city.lat, city.lon).await {
        Ok(classification) => Action::WeatherDidLoad {
            tag: *tag,
            classification,
        },
        Err(e) => Action::WeatherDidError {
            tag: *tag,
            failure: e.to_failure(),
        },
    };
    reduce(state, action);
}

// ============================================================================
// Client behavior
// ============================================================================

#[tokio::test]
async fn test_snow_body_parses_to_snow_classification() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(conditions_body("Snow")),
    )
    .await;

    let client = test_client(&mock_server);
    let classification = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect("fetch should succeed");

    assert_eq!(classification.as_str(), "Snow");
    assert!(classification.is_snow());
}

#[tokio::test]
async fn test_request_carries_coordinates_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "45.5152"))
        .and(query_param("lon", "-122.6784"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(conditions_body("Clear")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let classification = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect("fetch should succeed");

    assert!(!classification.is_snow());
}

#[tokio::test]
async fn test_empty_weather_array_is_empty_report() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "weather": [], "cod": 200 })),
    )
    .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("empty report should be an error");

    assert_eq!(err.kind(), FetchErrorKind::EmptyReport);
}

#[tokio::test]
async fn test_missing_weather_field_is_empty_report() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": 200 })),
    )
    .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("missing field should be an error");

    assert_eq!(err.kind(), FetchErrorKind::EmptyReport);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("malformed body should be an error");

    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[tokio::test]
async fn test_non_2xx_status_is_http_error() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("500 should be an error");

    assert_eq!(err.kind(), FetchErrorKind::Http);
    assert!(err.to_failure().message.contains("500"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind a port, capture the address, then release it so nothing listens
    // there. Dropping a pooled `MockServer` would leave its listener bound.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let uri = format!("http://{}", listener.local_addr().expect("bound address"));
    drop(listener);

    let mut config = WeatherConfig::new("test-key");
    config.api_base = uri;
    config.timeout = Duration::from_millis(250);
    let client = OpenWeatherClient::new(config).expect("client should build");

    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("connection should fail");

    assert_eq!(err.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(conditions_body("Snow"))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("timeout should fail the fetch");

    assert_eq!(err.kind(), FetchErrorKind::Network);
    assert!(!err.to_failure().message.contains("test-key"));
}

#[tokio::test]
async fn test_network_failure_message_never_carries_the_key() {
    // Same unreachable-address setup as above: a freed port, not a dropped
    // pooled server.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let uri = format!("http://{}", listener.local_addr().expect("bound address"));
    drop(listener);

    let mut config = WeatherConfig::new("s3cr3t");
    config.api_base = uri;
    config.timeout = Duration::from_millis(250);
    let client = OpenWeatherClient::new(config).expect("client should build");

    let err = client
        .fetch_classification(45.5152, -122.6784)
        .await
        .expect_err("connection should fail");

    // Transport errors embed the request URL unless stripped, and the URL
    // carries the appid parameter. Neither the key nor the URL may reach
    // the status line or the log file.
    let failure = err.to_failure();
    assert_eq!(failure.kind, FetchErrorKind::Network);
    assert!(failure.message.contains("network failure"));
    assert!(
        !failure.message.contains("s3cr3t"),
        "API key leaked into the failure message: {:?}",
        failure.message
    );
    assert!(
        !failure.message.contains("appid"),
        "request URL leaked into the failure message: {:?}",
        failure.message
    );
}

// ============================================================================
// Store flows over a real client
// ============================================================================

#[tokio::test]
async fn test_startup_fetch_snowing_in_portland() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(conditions_body("Snow")),
    )
    .await;
    let client = test_client(&mock_server);

    let mut state = AppState::default();
    assert_eq!(state.selected_city().name, "Portland, OR");
    assert_eq!(state.verdict(), Verdict::NotSnowing);

    let result = reduce(&mut state, Action::WeatherFetch);
    run_effect(&mut state, &client, &result.effects[0]).await;

    assert_eq!(state.verdict(), Verdict::Snowing);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_reads_not_snowing_with_failure_kind() {
    let mock_server = MockServer::start().await;
    mount_conditions(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("maintenance"),
    )
    .await;
    let client = test_client(&mock_server);

    let mut state = AppState::default();
    let result = reduce(&mut state, Action::WeatherFetch);
    run_effect(&mut state, &client, &result.effects[0]).await;

    assert_eq!(state.verdict(), Verdict::NotSnowing);
    assert_eq!(
        state.last_failure.as_ref().map(|f| f.kind),
        Some(FetchErrorKind::Http)
    );
}

#[tokio::test]
async fn test_late_response_for_previous_city_is_discarded() {
    let mock_server = MockServer::start().await;

    // Portland answers Snow, LA answers Clear.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "45.5152"))
        .respond_with(ResponseTemplate::new(200).set_body_json(conditions_body("Snow")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "34.0522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(conditions_body("Clear")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut state = AppState::default();

    // Select Portland, then LA before Portland's fetch resolves.
    let portland = reduce(&mut state, Action::CitySelect(0));
    let los_angeles = reduce(&mut state, Action::CitySelect(2));

    // LA resolves first; Portland's Snow answer trails in last.
    run_effect(&mut state, &client, &los_angeles.effects[0]).await;
    run_effect(&mut state, &client, &portland.effects[0]).await;

    assert_eq!(state.selected, 2);
    assert_eq!(state.verdict(), Verdict::NotSnowing);
    assert_eq!(
        state.classification.as_ref().map(|c| c.as_str()),
        Some("Clear")
    );
}

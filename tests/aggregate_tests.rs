mod common;

use std::time::Duration;
use tft_stats::{matches_in_set, Context, TftError};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LEAGUE_PATH: &str = "/na1/tft/league/v1/entries/by-summoner/summoner-1";
const IDS_PATH: &str = "/americas/tft/match/v1/matches/by-puuid/puuid-1/ids";

fn match_path(id: &str) -> String {
    format!("/americas/tft/match/v1/matches/{}", id)
}

async fn mount_league(server: &MockServer, wins: u32, losses: u32) {
    Mock::given(method("GET"))
        .and(path(LEAGUE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::league_json(wins, losses)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_ids(server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .and(query_param("count", ids.len().to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(ids)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_match(server: &MockServer, id: &str, set: i32, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(match_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::match_json(id, set)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn ids_of(result: &tft_stats::SetMatches) -> Vec<&str> {
    result
        .matches
        .iter()
        .map(|m| m.metadata.id.as_str())
        .collect()
}

#[tokio::test]
async fn test_scan_stops_at_first_match_outside_set() {
    let server = MockServer::start().await;
    mount_league(&server, 1, 3).await;
    mount_ids(&server, &["m1", "m2", "m3", "m4"]).await;
    mount_match(&server, "m1", 5, 1).await;
    mount_match(&server, "m2", 5, 1).await;
    mount_match(&server, "m3", 4, 1).await;
    mount_match(&server, "m4", 5, 0).await;

    let client = common::client_for(&server);
    let result = matches_in_set(&Context::background(), &client, &common::summoner(), 5)
        .await
        .unwrap();

    assert_eq!(ids_of(&result), vec!["m1", "m2"]);
    assert!(result.is_complete());
}

#[tokio::test]
async fn test_failed_match_is_recorded_and_scan_continues() {
    let server = MockServer::start().await;
    mount_league(&server, 1, 2).await;
    mount_ids(&server, &["m1", "m2", "m3"]).await;
    mount_match(&server, "m1", 5, 1).await;
    Mock::given(method("GET"))
        .and(path(match_path("m2")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_match(&server, "m3", 5, 1).await;

    let client = common::client_for(&server);
    let result = matches_in_set(&Context::background(), &client, &common::summoner(), 5)
        .await
        .unwrap();

    assert_eq!(ids_of(&result), vec!["m1", "m3"]);

    let failures = result.failures.as_ref().unwrap();
    assert_eq!(failures.match_ids().collect::<Vec<_>>(), vec!["m2"]);
    assert_eq!(failures.get("m2").and_then(|e| e.status()), Some(500));
    assert!(!failures.was_cancelled());
}

#[tokio::test]
async fn test_league_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LEAGUE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["m1"])))
        .expect(0)
        .mount(&server)
        .await;
    mount_match(&server, "m1", 5, 0).await;

    let client = common::client_for(&server);
    let err = matches_in_set(&Context::background(), &client, &common::summoner(), 5)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(matches!(
        err,
        TftError::Operation {
            operation: "league",
            ..
        }
    ));
}

#[tokio::test]
async fn test_match_ids_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_league(&server, 0, 2).await;
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = matches_in_set(&Context::background(), &client, &common::summoner(), 5)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert!(matches!(
        err,
        TftError::Operation {
            operation: "matches",
            ..
        }
    ));
}

#[tokio::test]
async fn test_no_ranked_games_makes_no_history_calls() {
    let server = MockServer::start().await;
    mount_league(&server, 0, 0).await;
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let result = matches_in_set(&Context::background(), &client, &common::summoner(), 5)
        .await
        .unwrap();

    assert!(result.matches.is_empty());
    assert!(result.is_complete());
}

#[tokio::test]
async fn test_cancellation_ends_scan_with_partial_result() {
    let server = MockServer::start().await;
    mount_league(&server, 1, 2).await;
    mount_ids(&server, &["m1", "m2", "m3"]).await;
    mount_match(&server, "m1", 5, 1).await;
    Mock::given(method("GET"))
        .and(path(match_path("m2")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::match_json("m2", 5))
                .set_delay(Duration::from_secs(4)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_match(&server, "m3", 5, 0).await;

    let client = common::client_for(&server);
    let ctx = Context::background().with_timeout(Duration::from_secs(1));
    let result = matches_in_set(&ctx, &client, &common::summoner(), 5)
        .await
        .unwrap();

    assert_eq!(ids_of(&result), vec!["m1"]);

    let failures = result.failures.unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures.was_cancelled());
    assert!(matches!(
        failures.get("m2"),
        Some(TftError::RequestCancelled { .. })
    ));
}

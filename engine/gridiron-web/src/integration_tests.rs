//! End-to-end tests through the warp routes with a canned upstream

use serde_json::json;
use std::sync::Arc;
use warp::http::StatusCode;

use crate::config::PagesConfig;
use crate::routes::create_routes;
use crate::test_support::{sample_adp, sample_teams, FakeUpstream};
use crate::AppState;

fn create_test_state(upstream: Arc<FakeUpstream>) -> Arc<AppState> {
    let pages = PagesConfig { season: "2025".to_string(), ..PagesConfig::default() };
    Arc::new(AppState::new(upstream, pages))
}

/// Upstream answering every endpoint the pages use with empty lists
fn empty_upstream() -> FakeUpstream {
    FakeUpstream::new()
        .with("getNFLADP", json!({ "body": { "adpList": [] } }))
        .with("getNFLTeams", json!({ "body": { "teams": [] } }))
        .with("getNFLGamesForWeek", json!({ "body": { "games": [] } }))
        .with("getNFLProjections", json!({ "body": { "playerProjections": {} } }))
        .with("getNFLNews", json!({ "body": [] }))
        .with("getNFLPlayerInfo", json!({ "body": [] }))
        .with("getNFLBettingOdds", json!({ "body": [] }))
}

async fn get(upstream: FakeUpstream, path: &str) -> (StatusCode, String) {
    let routes = create_routes(create_test_state(Arc::new(upstream)));
    let res = warp::test::request().method("GET").path(path).reply(&routes).await;
    (res.status(), String::from_utf8_lossy(res.body()).into_owned())
}

#[tokio::test]
async fn test_home_renders_navigation() {
    let (status, html) = get(empty_upstream(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(">Home</a>"));
    assert!(html.contains("Projections"));
}

#[tokio::test]
async fn test_projections_reflect_query() {
    let (status, html) = get(empty_upstream(), "/projections?teams=8&slot=2&week=4&scoring=PPR").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Week 4 \u{2014} Projections"));
    assert!(html.contains("Team 2 Roster Total"));

    let (status, html) = get(empty_upstream(), "/projections?teams=10&slot=3&week=1&scoring=standard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Week 1 \u{2014} Projections"));
    assert!(html.contains("Team 3 Roster Total"));
}

#[tokio::test]
async fn test_projections_with_data() {
    let upstream = FakeUpstream::new()
        .with("getNFLADP", sample_adp())
        .with("getNFLTeams", sample_teams());
    let (status, html) = get(upstream, "/?teams=2&slot=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Christian McCaffrey"));
    assert!(html.contains("Ja&#39;Marr Chase"));
    assert!(html.contains("Team 1 Starters Total"));
}

#[tokio::test]
async fn test_injuries_page() {
    let (status, html) = get(empty_upstream(), "/injuries").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Injury Report"));
    assert!(html.contains("No injury descriptions found"));
}

#[tokio::test]
async fn test_injuries_unknown_player_is_still_ok() {
    let (status, html) = get(empty_upstream(), "/injuries?player=Nobody%20Special").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("couldn&#39;t find"));
    assert!(html.contains("Nobody Special"));
}

#[tokio::test]
async fn test_schedule_example_week() {
    let upstream = FakeUpstream::new()
        .with(
            "getNFLGamesForWeek",
            json!({ "body": [{ "gameID": 1, "week": 1, "home": "LA", "away": "SF" }] }),
        )
        .with("getNFLBettingOdds", json!({ "body": [] }));
    let (status, html) = get(upstream, "/schedule?week=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>SF</td><td>LAR</td>"));
    assert!(html.contains("Betting odds not yet released."));
}

#[tokio::test]
async fn test_schedule_without_games() {
    let (status, html) = get(empty_upstream(), "/schedule?week=banana").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Week 1"));
    assert!(html.contains("No games found for that week."));
}

#[tokio::test]
async fn test_news_search() {
    let upstream = FakeUpstream::new().with(
        "getNFLNews",
        json!({ "body": [
            { "title": "Chiefs activate Kelce", "link": "https://www.nfl.com/news/kelce" },
            { "title": "Bills extend Allen", "link": "https://espn.com/nfl/story/allen" }
        ]}),
    );
    let (status, html) = get(upstream, "/news?q=kelce").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Chiefs activate Kelce"));
    assert!(!html.contains("Bills extend Allen"));
    assert!(html.contains("nfl.com"));

    let (status, html) = get(empty_upstream(), "/news?q=Brady").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("couldn&#39;t find \u{201c}Brady\u{201d}"));
}

#[tokio::test]
async fn test_rate_limit_surfaces_as_error_page() {
    for (endpoint, path) in [
        ("getNFLADP", "/projections"),
        ("getNFLADP", "/injuries"),
        ("getNFLGamesForWeek", "/schedule"),
        ("getNFLNews", "/news"),
    ] {
        let upstream = FakeUpstream::new().failing(endpoint, 429);
        let (status, html) = get(upstream, path).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "{path}");
        assert!(html.contains("HTTP 429"), "{path}");
        assert!(html.contains("reduce request volume"), "{path}");
    }
}

#[tokio::test]
async fn test_server_keeps_serving_after_upstream_failure() {
    let upstream = Arc::new(FakeUpstream::new().failing("getNFLNews", 429));
    let routes = create_routes(create_test_state(upstream.clone()));

    let first = warp::test::request().path("/news").reply(&routes).await;
    assert_eq!(first.status(), StatusCode::BAD_GATEWAY);

    let second = warp::test::request().path("/health").reply(&routes).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(upstream.calls_to("getNFLNews"), 1);
}

#[tokio::test]
async fn test_no_cache_headers_on_every_response() {
    for path in ["/", "/news", "/health", "/missing"] {
        let routes = create_routes(create_test_state(Arc::new(empty_upstream())));
        let res = warp::test::request().path(path).reply(&routes).await;
        let headers = res.headers();
        assert_eq!(
            headers.get("cache-control").and_then(|v| v.to_str().ok()),
            Some("no-store, no-cache, must-revalidate, max-age=0"),
            "{path}"
        );
        assert_eq!(headers.get("pragma").and_then(|v| v.to_str().ok()), Some("no-cache"));
        assert_eq!(headers.get("expires").and_then(|v| v.to_str().ok()), Some("0"));
    }
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let routes = create_routes(create_test_state(Arc::new(FakeUpstream::new())));

    let res = warp::test::request().path("/health").reply(&routes).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["status"], "healthy");

    let res = warp::test::request().path("/nope").reply(&routes).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = warp::test::request().method("POST").path("/news").reply(&routes).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

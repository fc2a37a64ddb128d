//! HTTP routes
//!
//! Every page is a GET with optional query parameters. Responses carry
//! no-cache headers so browsers always refetch live upstream data.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, warn};
use warp::http::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::error::PageResult;
use crate::pages::{self, projections::ProjectionsQuery, Query};
use crate::{render, AppState};

/// Headers attached to every response
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

/// Create all page routes
pub fn create_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let state_filter = warp::any().map(move || state.clone());
    let query = warp::query::<HashMap<String, String>>();

    // Home shows the projections page
    let home = warp::path::end()
        .and(warp::get())
        .and(query.clone())
        .and(state_filter.clone())
        .and_then(|params: Query, state: Arc<AppState>| async move {
            projections_page(params, state, "/").await
        });

    let projections = warp::path("projections")
        .and(warp::path::end())
        .and(warp::get())
        .and(query.clone())
        .and(state_filter.clone())
        .and_then(|params: Query, state: Arc<AppState>| async move {
            projections_page(params, state, "/projections").await
        });

    let injuries = warp::path("injuries")
        .and(warp::path::end())
        .and(warp::get())
        .and(query.clone())
        .and(state_filter.clone())
        .and_then(injuries_page);

    let schedule = warp::path("schedule")
        .and(warp::path::end())
        .and(warp::get())
        .and(query.clone())
        .and(state_filter.clone())
        .and_then(schedule_page);

    let news = warp::path("news")
        .and(warp::path::end())
        .and(warp::get())
        .and(query)
        .and(state_filter)
        .and_then(news_page);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "service": "gridiron-web",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    home.or(projections)
        .or(injuries)
        .or(schedule)
        .or(news)
        .or(health)
        .recover(handle_rejection)
        .with(warp::reply::with::headers(no_cache_headers()))
        .with(warp::trace::request())
}

async fn projections_page(
    params: Query,
    state: Arc<AppState>,
    active: &'static str,
) -> Result<Response, Rejection> {
    let query = ProjectionsQuery::from_query(&params);
    let result = pages::projections::build(state.upstream.as_ref(), &state.pages, &query).await;
    Ok(respond("Projections", active, result.map(|view| render::projections::page(&view, active))))
}

async fn injuries_page(params: Query, state: Arc<AppState>) -> Result<Response, Rejection> {
    let result = pages::injuries::build(state.upstream.as_ref(), &state.pages, &params).await;
    Ok(respond("Injuries", "/injuries", result.map(|view| render::injuries::page(&view))))
}

async fn schedule_page(params: Query, state: Arc<AppState>) -> Result<Response, Rejection> {
    let week = pages::schedule::week_from_query(&params);
    let result = pages::schedule::build(state.upstream.as_ref(), &state.pages, week).await;
    Ok(respond("Schedule", "/schedule", result.map(|view| render::schedule::page(&view))))
}

async fn news_page(params: Query, state: Arc<AppState>) -> Result<Response, Rejection> {
    let result = pages::news::build(state.upstream.as_ref(), &state.pages, &params).await;
    Ok(respond("News", "/news", result.map(|view| render::news::page(&view))))
}

/// Rendered page, or the error page with the error's status
fn respond(title: &str, active: &str, result: PageResult<String>) -> Response {
    match result {
        Ok(html) => warp::reply::html(html).into_response(),
        Err(e) => {
            warn!("{} page failed: {}", title, e);
            let status = e.status_code();
            let html = render::error_page(title, active, status, &e.user_message());
            warp::reply::with_status(warp::reply::html(html), status).into_response()
        }
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, html) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, render::not_found_page())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        (status, render::error_page("Method not allowed", "", status, "Only GET requests are served."))
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        let status = StatusCode::BAD_REQUEST;
        (status, render::error_page("Bad request", "", status, "The query string could not be read."))
    } else {
        error!("Unhandled rejection: {:?}", err);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, render::error_page("Error", "", status, "Something went wrong."))
    };

    Ok(warp::reply::with_status(warp::reply::html(html), status))
}

use std::path::PathBuf;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, Request, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info_span};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::pipeline::{self, TargetLanguage};
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let static_dir = PathBuf::from(&state.config.system_config.static_dir);

    Router::new()
        .route("/describe_image", post(describe_image))
        .route("/find_celebrity", post(find_celebrity))
        // Static pages
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/main", ServeFile::new(static_dir.join("main.html")))
}

/// Full application: routes plus the middleware every response goes through.
pub fn create_app(state: AppState) -> Router {
    let body_limit = match state.config.system_config.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    create_routes(&state)
        .layer(body_limit)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DescribeParams {
    lang: Option<String>,
}

async fn describe_image(
    State(state): State<AppState>,
    Query(params): Query<DescribeParams>,
    image: Bytes,
) -> AppResult<Response> {
    let lang = TargetLanguage::from_query(params.lang.as_deref())?;
    debug!(%lang, bytes = image.len(), "describe_image");

    let result = pipeline::describe_image(
        state.vision.as_ref(),
        state.translator.as_ref(),
        &image,
        &lang,
        state.translation_fallback(),
    )
    .await
    .map_err(AppError::DescribeFailed)?;

    Ok(json_response(result))
}

async fn find_celebrity(State(state): State<AppState>, image: Bytes) -> AppResult<Response> {
    debug!(bytes = image.len(), "find_celebrity");

    let result = pipeline::find_celebrity(state.vision.as_ref(), &image)
        .await
        .map_err(AppError::CelebrityNotFound)?;

    Ok(json_response(result))
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

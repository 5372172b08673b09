use std::env;
use std::net::SocketAddr;

use axum::extract::{Path as AxumPath, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod n2yo;

use n2yo::{failure_response, N2yoClient};

const DEFAULT_UPSTREAM: &str = "https://api.n2yo.com/rest/v1/satellite";

#[derive(Clone)]
struct AppState {
    n2yo: N2yoClient,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = env::var("N2YO_API_KEY").expect("N2YO_API_KEY must be set");
    let base_url = env::var("N2YO_BASE_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());
    let addr: SocketAddr = env::var("PROXY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("invalid PROXY_ADDR");

    let state = AppState {
        n2yo: N2yoClient::new(reqwest::Client::new(), base_url, api_key),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(
            "/satellite/position/:lon/:lat/:alt/:count/:norad_id",
            get(get_position),
        )
        .route(
            "/satellite/above/:lat/:lon/:alt/:radius_deg/:category_id",
            get(get_above),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("satellite proxy listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

async fn root() -> Response {
    Json(json!({
        "message": "satellite proxy is running",
        "routes": {
            "health": "/healthz",
            "position": "/satellite/position/:lon/:lat/:alt/:count/:norad_id",
            "above": "/satellite/above/:lat/:lon/:alt/:radius_deg/:category_id",
        },
    }))
    .into_response()
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_position(
    State(state): State<AppState>,
    AxumPath((lon, lat, alt, count, norad_id)): AxumPath<(f64, f64, f64, u32, u32)>,
) -> Response {
    let url = state.n2yo.positions_url(norad_id, lat, lon, alt, count);
    proxy_fetch(&state.n2yo, &url).await
}

async fn get_above(
    State(state): State<AppState>,
    AxumPath((lat, lon, alt, radius_deg, category_id)): AxumPath<(f64, f64, f64, f64, u32)>,
) -> Response {
    let url = state.n2yo.above_url(lat, lon, alt, radius_deg, category_id);
    proxy_fetch(&state.n2yo, &url).await
}

async fn proxy_fetch(client: &N2yoClient, url: &str) -> Response {
    info!("fetching from {}", client.redact(url));
    match client.fetch_json(url).await {
        Ok(body) => Json(body).into_response(),
        Err(failure) => {
            warn!("upstream request failed: {}", client.redact(&failure.to_string()));
            let (status, body) = failure_response(&failure);
            (status, Json(body)).into_response()
        }
    }
}

// Crypto Bubbles - Web Server
// Serves the rendered chart and its layout as JSON

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use crypto_bubbles::{
    compute_layout, init_logging, load_csv, render_html, render_svg, BubbleLayout, CategorySector,
    ChartConfig, ChartLayout, YearRing,
};

/// Shared application state: the layout is computed once at startup
#[derive(Clone)]
struct AppState {
    layout: Arc<ChartLayout>,
    fingerprint: Arc<String>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/layout - Full chart layout
async fn get_layout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::ETAG, format!("\"{}\"", state.fingerprint))],
        Json(ApiResponse::ok(state.layout.as_ref().clone())),
    )
}

/// GET /api/bubbles/:code - One currency's geometry and text
async fn get_bubble(State(state): State<AppState>, Path(code): Path<String>) -> impl IntoResponse {
    let bubble = state
        .layout
        .bubble(&code)
        .or_else(|| state.layout.bubble(&code.to_uppercase()));

    match bubble {
        Some(bubble) => (StatusCode::OK, Json(ApiResponse::ok(bubble.clone()))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<BubbleLayout>::err(format!("Unknown currency: {}", code))),
        )
            .into_response(),
    }
}

/// GET /api/sectors - Category sectors in drawing order
async fn get_sectors(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::<Vec<CategorySector>>::ok(state.layout.sectors.clone()))
}

/// GET /api/years - Year rings, oldest first
async fn get_years(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::<Vec<YearRing>>::ok(state.layout.rings.clone()))
}

/// GET /chart.svg - Standalone SVG
async fn serve_svg(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_svg(&state.layout),
    )
}

/// GET / - HTML page with the chart inline
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_html(&state.layout, "Crypto Bubbles"))
}

// ============================================================================
// Main Server
// ============================================================================

fn load_state() -> anyhow::Result<AppState> {
    let data_path = std::env::var("BUBBLES_DATA").unwrap_or_else(|_| "data.csv".to_string());
    let config = match std::env::var("BUBBLES_CONFIG") {
        Ok(path) => ChartConfig::from_file(&path)?,
        Err(_) => ChartConfig::default(),
    };

    let records = load_csv(std::path::Path::new(&data_path))?;
    let layout = compute_layout(records, &config)?;
    info!(data = %data_path, currencies = layout.bubbles.len(), "layout ready");

    Ok(AppState {
        fingerprint: Arc::new(layout.fingerprint()),
        layout: Arc::new(layout),
    })
}

fn router(state: AppState) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/layout", get(get_layout))
        .route("/bubbles/:code", get(get_bubble))
        .route("/sectors", get(get_sectors))
        .route("/years", get(get_years))
        .with_state(state.clone());

    // Build main router
    Router::new()
        .route("/", get(serve_index))
        .route("/chart.svg", get(serve_svg))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    init_logging();

    println!("🌐 Crypto Bubbles - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = match load_state() {
        Ok(state) => state,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ Could not build the chart layout");
            eprintln!("   Set BUBBLES_DATA to the currency CSV (default: data.csv)");
            std::process::exit(1);
        }
    };

    let app = router(state);

    // Start server
    let addr = std::env::var("BUBBLES_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API:   http://{}/api/layout", addr);
    println!("   Chart: http://{}/chart.svg", addr);
    println!("\n   Press Ctrl+C to stop\n");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {}", e);
        std::process::exit(1);
    }
}

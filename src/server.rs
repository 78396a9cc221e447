use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hyper::Server;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::catalog::{CalculatorDescriptor, Catalog, Category};
use crate::metrics;
use crate::seo::{structured_data, CategoryMetadata, MetaTag, SeoMetadata};
use crate::sitemap;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
struct SeoResponse {
    metadata: SeoMetadata,
    meta_tags: Vec<MetaTag>,
    structured_data: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct CategorySummary {
    name: Category,
    slug: String,
    url: String,
    calculator_count: usize,
}

#[derive(Debug, Serialize)]
struct CategoryPage {
    metadata: CategoryMetadata,
    calculators: Vec<CalculatorDescriptor>,
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "calc-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "calculators": state.catalog.registry().len()
    }))
}

async fn sitemap_xml(State(state): State<AppState>) -> Response {
    metrics::record_http_request("/sitemap.xml");
    let catalog = &state.catalog;
    let entries = sitemap::generate_now(catalog.registry(), &catalog.site().base_url);
    match sitemap::render_xml(&entries) {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => {
            error!("Sitemap rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn robots_txt(State(state): State<AppState>) -> Response {
    metrics::record_http_request("/robots.txt");
    let body = sitemap::robots_txt(&state.catalog.site().base_url);
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

async fn list_calculators(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    metrics::record_http_request("/api/calculators");
    let query = params.q.unwrap_or_default();
    let calculators: Vec<CalculatorDescriptor> = state
        .catalog
        .registry()
        .search(&query)
        .into_iter()
        .cloned()
        .collect();
    Json(calculators)
}

async fn get_calculator(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    metrics::record_http_request("/api/calculators/:id");
    match state.catalog.registry().find_by_id(&id) {
        Some(calc) => Json(calc.clone()).into_response(),
        None => not_found(format!("calculator '{}' not found", id)),
    }
}

async fn get_calculator_seo(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    metrics::record_http_request("/api/calculators/:id/seo");
    let catalog = &state.catalog;
    let (Some(calc), Some(metadata)) = (catalog.registry().find_by_id(&id), catalog.seo().derive(&id))
    else {
        return not_found(format!("calculator '{}' not found", id));
    };

    let response = SeoResponse {
        meta_tags: metadata.meta_tags(),
        structured_data: structured_data::for_calculator(&metadata, calc),
        metadata,
    };
    Json(response).into_response()
}

async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    metrics::record_http_request("/api/categories");
    let catalog = &state.catalog;
    let summaries: Vec<CategorySummary> = catalog
        .registry()
        .category_groups()
        .into_iter()
        .map(|group| CategorySummary {
            name: group.category,
            url: catalog.seo().derive_category(group.category).canonical_url,
            slug: group.slug,
            calculator_count: group.calculators.len(),
        })
        .collect();
    Json(summaries)
}

async fn get_category(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    metrics::record_http_request("/api/categories/:slug");
    let catalog = &state.catalog;
    let Some(category) = catalog.registry().find_category_by_slug(&slug) else {
        return not_found(format!("category '{}' not found", slug));
    };

    let page = CategoryPage {
        metadata: catalog.seo().derive_category(category),
        calculators: catalog
            .registry()
            .filter_by_category(category)
            .into_iter()
            .cloned()
            .collect(),
    };
    Json(page).into_response()
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

/// Create the HTTP router with all routes.
pub fn create_server(catalog: Arc<Catalog>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/api/calculators", get(list_calculators))
        .route("/api/calculators/:id", get(get_calculator))
        .route("/api/calculators/:id/seo", get(get_calculator_seo))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug", get(get_category))
        .with_state(AppState { catalog })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Serve until Ctrl-C.
pub async fn start_server(catalog: Arc<Catalog>, addr: SocketAddr) -> anyhow::Result<()> {
    let base_url = catalog.site().base_url.clone();
    let app = create_server(catalog);

    info!("HTTP server listening on http://{}", addr);
    info!("Sitemap: {}/sitemap.xml", base_url);

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

//! Routes and request handlers of the HTTP API.

use crate::app_state::SharedAppState;
use crate::cli::CommandLineArgs;
use crate::error::RegistryError;
use crate::metrics;
use crate::models;
use crate::query::QueryEngine;
use crate::validated_json::ValidatedJson;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::{Layer, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Service type produced by [service].
pub type Service = NormalizePath<Router>;

impl<T: Serialize> IntoResponse for models::ListResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> IntoResponse for models::ItemResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Returns a [axum::Router] for the registry API.
///
/// # Arguments
///
/// * `state`: Shared application state
/// * `public_dir`: Optional directory of static assets served for unmatched paths
pub fn router(state: SharedAppState, public_dir: Option<&str>) -> Router {
    fn api() -> Router<SharedAppState> {
        Router::new()
            .route("/clients", get(list_clients))
            .route("/clients/:id", get(get_client))
            .route("/search", get(search))
            .route("/search/advanced", post(advanced_search))
            .route("/stats", get(stats))
    }

    let mut router: Router<SharedAppState> = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api", api());
    if let Some(public_dir) = public_dir {
        router = router.fallback_service(ServeDir::new(public_dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .on_request(metrics::request_counter)
                        .on_response(metrics::record_response_metrics),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Returns a [Service] for the registry API, tolerant of trailing slashes.
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `state`: Shared application state
pub fn service(args: &CommandLineArgs, state: SharedAppState) -> Service {
    let router = router(state, args.public_dir.as_deref());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn list_clients(State(state): State<SharedAppState>) -> Response {
    let clients = QueryEngine::new(&state.store).all();
    models::ListResponse::new(clients).into_response()
}

async fn get_client(
    State(state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Response, RegistryError> {
    let client = QueryEngine::new(&state.store)
        .find_by_id(&id)
        .ok_or(RegistryError::ClientNotFound)?;
    Ok(models::ItemResponse::new(client).into_response())
}

async fn search(
    State(state): State<SharedAppState>,
    params: Result<Query<models::SearchParams>, QueryRejection>,
) -> Result<Response, RegistryError> {
    let Query(params) = params?;
    let query = params
        .query
        .as_deref()
        .filter(|query| !query.is_empty())
        .ok_or(RegistryError::MissingQuery)?;
    let results = QueryEngine::new(&state.store).search(query, params.field.as_deref());
    tracing::debug!(query, field = ?params.field, count = results.len(), "Simple search");
    Ok(models::ListResponse::new(results).into_response())
}

async fn advanced_search(
    State(state): State<SharedAppState>,
    ValidatedJson(criteria): ValidatedJson<models::AdvancedSearchCriteria>,
) -> Result<Response, RegistryError> {
    if criteria.is_empty() {
        return Err(RegistryError::MissingCriteria);
    }
    let results = QueryEngine::new(&state.store).advanced_search(&criteria);
    tracing::debug!(?criteria, count = results.len(), "Advanced search");
    Ok(models::ListResponse::new(results).into_response())
}

async fn stats(State(state): State<SharedAppState>) -> models::ItemResponse<models::Stats> {
    models::ItemResponse::new(QueryEngine::new(&state.store).compute_stats())
}

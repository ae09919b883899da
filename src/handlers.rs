use crate::config::Config;
use crate::email_generator::EmailGenerator;
use crate::errors::{AppError, ResultExt};
use crate::export::{self, ResultRow, CSV_FILE_NAME};
use crate::lead_store::LeadStore;
use crate::models::{FilterForm, GenerateResponse, Lead};
use crate::pages;
use crate::pipeline::{run_pipeline, run_pipeline_with_id};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Immutable lead dataset.
    pub store: LeadStore,
    /// LLM-or-template email generator.
    pub emails: EmailGenerator,
}

impl AppState {
    pub fn new(config: Config, store: LeadStore) -> Self {
        let emails = EmailGenerator::from_config(&config);
        Self {
            config,
            store,
            emails,
        }
    }
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-leadgen-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Filter form, key status and the seed companies.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::render_index(
        &FilterForm::default(),
        state.emails.has_llm(),
        state.store.all_leads(),
    ))
}

/// Reads filter input from the query string. Input that cannot be read at all
/// falls back to an unfiltered form.
fn query_form(query: Result<Query<Value>, QueryRejection>) -> FilterForm {
    match query {
        Ok(Query(raw)) => FilterForm::from(&raw),
        Err(e) => {
            tracing::warn!("Ignoring unreadable query string: {}", e.body_text());
            FilterForm::default()
        }
    }
}

/// GET /results
///
/// Runs the pipeline for the submitted form and renders the results table.
pub async fn results_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Value>, QueryRejection>,
) -> Html<String> {
    let form = query_form(query);
    tracing::info!("GET /results - form: {:?}", form);

    let enriched = run_pipeline(&state.store, &form.clone().into_criteria(), &state.emails).await;
    let rows = export::to_rows(&enriched);
    let sample = export::sample_json(&rows);

    Html(pages::render_results(
        &form,
        state.emails.has_llm(),
        state.store.all_leads(),
        &rows,
        sample.as_ref(),
    ))
}

/// GET /api/v1/leads/export.csv
///
/// Runs the pipeline and returns the results as a CSV download.
#[utoipa::path(
    get,
    path = "/api/v1/leads/export.csv",
    params(
        ("industry" = Option<String>, Query, description = "Industry contains"),
        ("location" = Option<String>, Query, description = "Location contains"),
        ("size_min" = Option<u32>, Query, description = "Minimum employees, inclusive"),
        ("size_max" = Option<u32>, Query, description = "Maximum employees, inclusive"),
    ),
    responses((status = 200, description = "CSV export", content_type = "text/csv"))
)]
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Value>, QueryRejection>,
) -> Result<Response, AppError> {
    let form = query_form(query);
    tracing::info!("GET /api/v1/leads/export.csv - form: {:?}", form);

    let enriched = run_pipeline(&state.store, &form.into_criteria(), &state.emails).await;
    let csv = export::to_csv(&export::to_rows(&enriched)).context("Exporting leads")?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}

/// POST /api/v1/leads/generate
///
/// JSON counterpart of the results page, shaped like a webhook response.
#[utoipa::path(
    post,
    path = "/api/v1/leads/generate",
    request_body = FilterForm,
    responses(
        (status = 200, description = "Enriched leads", body = GenerateResponse),
        (status = 400, description = "Body is not JSON")
    )
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(raw) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let form = FilterForm::from(&raw);
    tracing::info!("POST /api/v1/leads/generate - form: {:?}", form);

    let run_id = Uuid::new_v4();
    let enriched =
        run_pipeline_with_id(run_id, &state.store, &form.into_criteria(), &state.emails).await;
    let results: Vec<ResultRow> = export::to_rows(&enriched);
    let sample = export::sample_json(&results);

    Ok(Json(GenerateResponse {
        run_id,
        count: results.len(),
        results,
        sample,
    }))
}

/// GET /api/v1/leads/seed
///
/// The seed companies with camelCase field names.
#[utoipa::path(
    get,
    path = "/api/v1/leads/seed",
    responses((status = 200, description = "Seed companies", body = [Lead]))
)]
pub async fn seed_leads(State(state): State<Arc<AppState>>) -> Json<Vec<Lead>> {
    Json(state.store.all_leads().to_vec())
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

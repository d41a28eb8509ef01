use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

use crate::convert::DEFAULT_MAX_LENGTH;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub question: String,
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub question: String,
    pub sql: String,
    pub cached: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub question: String,
    pub sql: String,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
    pub mode: String,
    pub query_count: u64,
    pub table_count: usize,
}

// Single-question conversion, answered from the cache when the exact
// question has been seen before.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConvertRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Question must not be empty".into()));
    }

    debug!("Convert request: {}", question);

    if let Some(sql) = state.query_cache.read().await.get(&question) {
        debug!("Cache hit for question: {}", question);
        return Ok(Json(ConvertResponse {
            question,
            sql: sql.clone(),
            cached: true,
            timestamp: chrono::Utc::now(),
        }));
    }

    let max_length = payload.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
    let sql = state.converter.convert(&question, max_length).await;
    state.query_count.fetch_add(1, Ordering::Relaxed);

    info!("Converted question to SQL: {}", sql);

    state
        .query_cache
        .write()
        .await
        .insert(question.clone(), sql.clone());

    Ok(Json(ConvertResponse {
        question,
        sql,
        cached: false,
        timestamp: chrono::Utc::now(),
    }))
}

// Batch conversion: one result per question, in request order.
pub async fn batch_convert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BatchRequest>,
) -> impl IntoResponse {
    info!("Batch convert request with {} questions", payload.questions.len());

    let results = state.converter.batch_convert(&payload.questions).await;
    state
        .query_count
        .fetch_add(results.len() as u64, Ordering::Relaxed);

    let items: Vec<BatchItem> = results
        .into_iter()
        .map(|(question, sql)| BatchItem { question, sql })
        .collect();

    Json(items)
}

pub async fn get_schema(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.converter.schema().clone())
}

pub async fn system_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (chrono::Utc::now() - state.startup_time).num_seconds(),
        mode: state.converter.mode_name().to_string(),
        query_count: state.query_count.load(Ordering::Relaxed),
        table_count: state.converter.schema().tables.len(),
    };

    Json(status)
}

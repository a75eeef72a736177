//! Axum route handlers for the matching API.
//!
//! Handlers stay thin: deserialize, call the engine, wrap in the response
//! envelope. There are no emptiness checks on document text; thin input
//! degrades the score, it does not 400.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ats::AtsResult;
use crate::errors::AppError;
use crate::matching::engine::{MatchResult, RankedMatch};
use crate::parsing::ParsedDocument;
use crate::state::AppState;

/// Most postings a single batch call will rank.
pub const MAX_BATCH_JOBS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_text: String,
    /// Opt-in: score without the semantic dimension if the embedding
    /// backend is down, instead of failing the request.
    #[serde(default)]
    pub allow_semantic_fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub result: MatchResult,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub resume_text: String,
    pub job_texts: Vec<String>,
    #[serde(default)]
    pub allow_semantic_fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchMatchResponse {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ranked: Vec<RankedMatch>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub document: ParsedDocument,
}

#[derive(Debug, Deserialize)]
pub struct AtsCheckRequest {
    pub resume_text: String,
    /// Optional posting; enables the keyword-density rule.
    #[serde(default)]
    pub job_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AtsCheckResponse {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ats: AtsResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores one resume against one posting and returns the full report.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let result = state
        .engine
        .evaluate(
            &request.resume_text,
            &request.job_text,
            request.allow_semantic_fallback,
        )
        .await?;

    Ok(Json(MatchResponse {
        analysis_id: Uuid::new_v4(),
        created_at: Utc::now(),
        result,
    }))
}

/// POST /api/v1/match/batch
///
/// Scores one resume against up to [`MAX_BATCH_JOBS`] postings, parsing the
/// resume once, and returns results best-first.
pub async fn handle_match_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchMatchRequest>,
) -> Result<Json<BatchMatchResponse>, AppError> {
    if request.job_texts.is_empty() {
        return Err(AppError::Validation("job_texts cannot be empty".to_string()));
    }
    if request.job_texts.len() > MAX_BATCH_JOBS {
        return Err(AppError::Validation(format!(
            "job_texts exceeds the batch limit of {MAX_BATCH_JOBS}"
        )));
    }

    let ranked = state
        .engine
        .evaluate_batch(
            &request.resume_text,
            &request.job_texts,
            request.allow_semantic_fallback,
        )
        .await?;

    Ok(Json(BatchMatchResponse {
        analysis_id: Uuid::new_v4(),
        created_at: Utc::now(),
        ranked,
    }))
}

/// POST /api/v1/parse/resume
///
/// Parse preview: the structured document the matcher would score, without
/// scoring it.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let document = state.engine.parser().parse_resume(&request.text);
    Ok(Json(ParseResponse { document }))
}

/// POST /api/v1/parse/job
pub async fn handle_parse_job(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let document = state.engine.parser().parse_job(&request.text);
    Ok(Json(ParseResponse { document }))
}

/// POST /api/v1/ats
///
/// Standalone ATS audit, with or without a posting for keyword density.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let ats = state
        .engine
        .audit(&request.resume_text, request.job_text.as_deref());

    Ok(Json(AtsCheckResponse {
        analysis_id: Uuid::new_v4(),
        created_at: Utc::now(),
        ats,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Axum route handlers for the assistant API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agents::graph::{clear_session, load_history, TurnRequest};
use crate::agents::prompts::{
    career_guidance_request, content_enhancement_request, job_fit_request,
    ANALYZE_PROFILE_REQUEST,
};
use crate::errors::AppError;
use crate::session::{session_id_for_profile_url, HistoryEntry, ProfileData};
use crate::state::AppState;

const DEFAULT_SESSION_ID: &str = "default";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    pub profile_data: ProfileData,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    pub target_role: Option<String>,
    pub profile_data: Option<ProfileData>,
    pub api_key: Option<String>,
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Body shared by the profile-URL driven endpoints.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub profile_url: String,
    pub target_role: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeProfileResponse {
    pub success: bool,
    pub session_id: String,
    pub profile_data: ProfileData,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct JobFitResponse {
    pub success: bool,
    pub session_id: String,
    pub target_role: String,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct ContentEnhancementResponse {
    pub success: bool,
    pub session_id: String,
    pub enhanced_content: String,
}

#[derive(Debug, Serialize)]
pub struct CareerGuidanceResponse {
    pub success: bool,
    pub session_id: String,
    pub guidance: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<HistoryEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /scrape-linkedin
pub async fn handle_scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, AppError> {
    let profile_url = require_field(&request.profile_url, "profile_url")?;

    let profile_data = state.profiles.fetch(profile_url).await?.ok_or_else(|| {
        AppError::NotFound(
            "Could not scrape profile. Please check the URL and try again.".to_string(),
        )
    })?;

    Ok(Json(ScrapeResponse {
        success: true,
        message: "Profile scraped successfully".to_string(),
        profile_data,
    }))
}

/// POST /chat
///
/// One conversational turn. Profile data and target role in the body are
/// merged into the session before routing.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    require_field(&request.message, "message")?;
    let assistant = state.agents.get_or_create(request.api_key.as_deref())?;

    let response = assistant
        .chat(TurnRequest {
            session_id: request.session_id.clone(),
            message: request.message,
            profile_data: request.profile_data,
            target_role: request.target_role,
        })
        .await?;

    Ok(Json(ChatResponse {
        response,
        session_id: request.session_id,
    }))
}

/// POST /analyze-profile
pub async fn handle_analyze_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<AnalyzeProfileResponse>, AppError> {
    let profile_url = require_field(&request.profile_url, "profile_url")?;
    let assistant = state.agents.get_or_create(request.api_key.as_deref())?;

    let profile_data = scrape_profile(&state, profile_url).await?;
    let session_id = session_id_for_profile_url(profile_url);
    info!("Analyzing profile for session {session_id}");

    let analysis = assistant
        .chat(TurnRequest {
            session_id: session_id.clone(),
            message: ANALYZE_PROFILE_REQUEST.to_string(),
            profile_data: Some(profile_data.clone()),
            target_role: None,
        })
        .await?;

    Ok(Json(AnalyzeProfileResponse {
        success: true,
        session_id,
        profile_data,
        analysis,
    }))
}

/// POST /job-fit-analysis
pub async fn handle_job_fit(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<JobFitResponse>, AppError> {
    let profile_url = require_field(&request.profile_url, "profile_url")?;
    let target_role = require_field(
        request.target_role.as_deref().unwrap_or_default(),
        "target_role",
    )?
    .to_string();
    let assistant = state.agents.get_or_create(request.api_key.as_deref())?;

    let profile_data = scrape_profile(&state, profile_url).await?;
    let session_id = session_id_for_profile_url(profile_url);

    let analysis = assistant
        .chat(TurnRequest {
            session_id: session_id.clone(),
            message: job_fit_request(&target_role),
            profile_data: Some(profile_data),
            target_role: Some(target_role.clone()),
        })
        .await?;

    Ok(Json(JobFitResponse {
        success: true,
        session_id,
        target_role,
        analysis,
    }))
}

/// POST /content-enhancement
pub async fn handle_content_enhancement(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ContentEnhancementResponse>, AppError> {
    let profile_url = require_field(&request.profile_url, "profile_url")?;
    let target_role = optional_field(request.target_role);
    let assistant = state.agents.get_or_create(request.api_key.as_deref())?;

    let session_id = session_id_for_profile_url(profile_url);
    let profile_data = session_or_scraped_profile(&state, &session_id, profile_url).await?;

    let enhanced_content = assistant
        .chat(TurnRequest {
            session_id: session_id.clone(),
            message: content_enhancement_request(target_role.as_deref()),
            profile_data: Some(profile_data),
            target_role,
        })
        .await?;

    Ok(Json(ContentEnhancementResponse {
        success: true,
        session_id,
        enhanced_content,
    }))
}

/// POST /career-guidance
pub async fn handle_career_guidance(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<CareerGuidanceResponse>, AppError> {
    let profile_url = require_field(&request.profile_url, "profile_url")?;
    let target_role = optional_field(request.target_role);
    let assistant = state.agents.get_or_create(request.api_key.as_deref())?;

    let session_id = session_id_for_profile_url(profile_url);
    let profile_data = session_or_scraped_profile(&state, &session_id, profile_url).await?;

    let guidance = assistant
        .chat(TurnRequest {
            session_id: session_id.clone(),
            message: career_guidance_request(target_role.as_deref()),
            profile_data: Some(profile_data),
            target_role,
        })
        .await?;

    Ok(Json(CareerGuidanceResponse {
        success: true,
        session_id,
        guidance,
    }))
}

/// GET /sessions/:session_id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let messages = load_history(state.sessions.as_ref(), &session_id).await?;
    Ok(Json(HistoryResponse {
        session_id,
        messages,
    }))
}

/// DELETE /sessions/:session_id
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    clear_session(state.sessions.as_ref(), &session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn scrape_profile(state: &AppState, profile_url: &str) -> Result<ProfileData, AppError> {
    state
        .profiles
        .fetch(profile_url)
        .await?
        .ok_or_else(|| AppError::NotFound("Could not scrape profile".to_string()))
}

/// Profile already attached to the session, else a fresh scrape.
async fn session_or_scraped_profile(
    state: &AppState,
    session_id: &str,
    profile_url: &str,
) -> Result<ProfileData, AppError> {
    let stored = state
        .sessions
        .load(session_id)
        .await?
        .and_then(|session| session.profile().cloned());

    match stored {
        Some(profile) => Ok(profile),
        None => scrape_profile(state, profile_url).await,
    }
}

//! HTTP request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parley_agent::{AgentError, AskOptions};
use parley_session::SessionHistory;
use serde_json::{json, Value};

use crate::models::*;
use crate::state::AppState;

/// Service information
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "Parley API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "LLM-powered Q&A service with tool calling",
        "model": state.model,
        "endpoints": {
            "health": "/health",
            "ask": "/api/v1/ask",
            "history": "/api/v1/sessions/{session_id}/history",
            "sessions": "/api/v1/sessions",
            "clear": "/api/v1/sessions/{session_id}",
            "tools": "/api/v1/tools",
        }
    }))
}

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model,
    })
}

/// Ask a question, optionally continuing an existing session
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    if req.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "question must not be empty".to_string()));
    }

    if let Some(temperature) = req.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err((
                StatusCode::BAD_REQUEST,
                "temperature must be within 0.0..=2.0".to_string(),
            ));
        }
    }

    if req.max_tokens == Some(0) {
        return Err((StatusCode::BAD_REQUEST, "max_tokens must be positive".to_string()));
    }

    let options = AskOptions {
        session_id: req.session_id,
        temperature: req.temperature,
        max_tokens: req.max_tokens,
        system_prompt: req.system_prompt,
        enable_tools: req.enable_tools,
        tool_names: req.tool_names,
    };

    let outcome = state
        .orchestrator
        .ask(&req.question, options)
        .await
        .map_err(|e| {
            let status = match &e {
                AgentError::Model(_) => StatusCode::BAD_GATEWAY,
                AgentError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })?;

    Ok(Json(AskResponse {
        answer: outcome.answer,
        session_id: outcome.session_id,
        model: state.model,
        usage: outcome.usage,
        tool_calls: outcome.tool_calls,
        timestamp: chrono::Utc::now(),
    }))
}

/// Full conversation history for one session
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionHistory>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Session {} not found", session_id)))?;

    let history = session.lock().await.to_history_view();
    Ok(Json(history))
}

/// All active session ids
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.sessions.list_ids())
}

/// Delete one session's history
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearResponse>, (StatusCode, String)> {
    if !state.sessions.clear(&session_id) {
        return Err((StatusCode::NOT_FOUND, format!("Session {} not found", session_id)));
    }

    Ok(Json(ClearResponse {
        message: format!("Session {} cleared successfully", session_id),
        session_id,
    }))
}

/// All tools the agent can call
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsListResponse> {
    let tools: Vec<ToolInfo> = state
        .tools
        .names()
        .iter()
        .filter_map(|name| state.tools.get(name))
        .map(|tool| ToolInfo {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            schema: tool.schema().to_function(tool.name(), tool.description()),
        })
        .collect();

    let count = tools.len();
    Json(ToolsListResponse { tools, count })
}

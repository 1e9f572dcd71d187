//! Text, chapter, and quote management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/texts
pub async fn list(State(state): State<AppState>) -> Result<Json<TextListResponse>> {
    Ok(Json(TextListResponse { texts: state.db.list_texts() }))
}

/// POST /api/texts
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateTextRequest>,
) -> Result<(StatusCode, Json<Text>)> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("text name must not be empty".into()));
    }
    let text = state.db.create_text(request.name.trim());
    tracing::info!(text_id = %text.id, "created text");
    Ok((StatusCode::CREATED, Json(text)))
}

/// GET /api/texts/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Text>> {
    let text = state
        .db
        .get_text(&id)
        .ok_or_else(|| ApiError::NotFound(format!("text {id}")))?;
    Ok(Json(text))
}

/// PUT /api/texts/:id
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RenameTextRequest>,
) -> Result<Json<Text>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("text name must not be empty".into()));
    }
    let text = state
        .db
        .rename_text(&id, request.name.trim())
        .ok_or_else(|| ApiError::NotFound(format!("text {id}")))?;
    Ok(Json(text))
}

/// DELETE /api/texts/:id
///
/// Also drops the text's attempt history.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.db.delete_text(&id) {
        return Err(ApiError::NotFound(format!("text {id}")));
    }
    tracing::info!(text_id = %id, "deleted text and its attempts");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/texts/:id/chapters
pub async fn create_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateChapterRequest>,
) -> Result<(StatusCode, Json<Chapter>)> {
    let chapter = state
        .db
        .add_chapter(&id, &request.name)
        .ok_or_else(|| ApiError::NotFound(format!("text {id}")))?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// DELETE /api/texts/:id/chapters/:cid
pub async fn delete_chapter(
    State(state): State<AppState>,
    Path((id, cid)): Path<(String, String)>,
) -> Result<StatusCode> {
    if !state.db.delete_chapter(&id, &cid) {
        return Err(ApiError::NotFound(format!("chapter {cid} in text {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/texts/:id/chapters/:cid/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    Path((id, cid)): Path<(String, String)>,
    Json(request): Json<QuoteTextRequest>,
) -> Result<(StatusCode, Json<Quote>)> {
    let quote = state
        .db
        .add_quote(&id, &cid, &request.text)
        .ok_or_else(|| ApiError::NotFound(format!("chapter {cid} in text {id}")))?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// PUT /api/texts/:id/chapters/:cid/quotes/:qid
pub async fn update_quote(
    State(state): State<AppState>,
    Path((id, cid, qid)): Path<(String, String, String)>,
    Json(request): Json<QuoteTextRequest>,
) -> Result<Json<Quote>> {
    let quote = state
        .db
        .update_quote(&id, &cid, &qid, &request.text)
        .ok_or_else(|| ApiError::NotFound(format!("quote {qid}")))?;
    Ok(Json(quote))
}

/// DELETE /api/texts/:id/chapters/:cid/quotes/:qid
pub async fn delete_quote(
    State(state): State<AppState>,
    Path((id, cid, qid)): Path<(String, String, String)>,
) -> Result<StatusCode> {
    if !state.db.delete_quote(&id, &cid, &qid) {
        return Err(ApiError::NotFound(format!("quote {qid}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

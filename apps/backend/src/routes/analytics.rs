//! Analytics endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use quotedrill_core::analytics::text_analytics;

use crate::error::{ApiError, Result};
use crate::models::TextAnalytics;
use crate::AppState;

/// GET /api/texts/:id/analytics
pub async fn for_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TextAnalytics>> {
    let texts = state.db.list_texts();
    let attempts = state.db.attempts();

    let analytics = text_analytics(&id, &texts, &attempts)
        .ok_or_else(|| ApiError::NotFound(format!("text {id}")))?;

    Ok(Json(analytics))
}

//! Practice session endpoints.
//!
//! Sessions are held server-side in a uuid-keyed map; every endpoint is a
//! synchronous step of the session state machine. Abandoning a session
//! does not roll back attempts already written.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use quotedrill_core::session::SessionEngine;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let text = state
        .db
        .get_text(&request.text_id)
        .ok_or_else(|| ApiError::NotFound(format!("text {}", request.text_id)))?;

    let engine = SessionEngine::start(&text, request.settings, &mut rand::thread_rng())?;

    let session_id = Uuid::new_v4().to_string();
    let view = SessionView::from_engine(&session_id, &engine);

    state
        .sessions
        .write()
        .expect("sessions lock")
        .insert(session_id.clone(), engine);
    tracing::info!(%session_id, text_id = %request.text_id, "started practice session");

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    let sessions = state.sessions.read().expect("sessions lock");
    let engine = sessions
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    Ok(Json(SessionView::from_engine(&id, engine)))
}

/// POST /api/sessions/:id/inputs
pub async fn set_input(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<InputRequest>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| {
        engine.set_input(request.index, request.value.clone())?;
        Ok(())
    })
}

/// POST /api/sessions/:id/flip
pub async fn flip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| Ok(engine.flip()?))
}

/// POST /api/sessions/:id/conceal
pub async fn conceal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| Ok(engine.conceal()?))
}

/// POST /api/sessions/:id/tick
pub async fn tick(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| {
        engine.tick();
        Ok(())
    })
}

/// POST /api/sessions/:id/mark
pub async fn mark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkResponse>> {
    let mut sessions = state.sessions.write().expect("sessions lock");
    let engine = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;

    let outcome = {
        let mut store = state.db.store_mut();
        engine.mark(&mut *store)?
    };

    Ok(Json(MarkResponse {
        perfect: outcome.perfect,
        session: SessionView::from_engine(&id, engine),
    }))
}

/// POST /api/sessions/:id/next
pub async fn next(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| {
        engine.next()?;
        Ok(())
    })
}

/// POST /api/sessions/:id/revise
pub async fn revise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    with_session(&state, &id, |engine| {
        engine.revise_later()?;
        Ok(())
    })
}

/// POST /api/sessions/:id/skip
pub async fn skip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SkipResponse>> {
    let mut sessions = state.sessions.write().expect("sessions lock");
    let engine = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;

    let outcome = engine.skip()?;

    Ok(Json(SkipResponse {
        outcome,
        session: SessionView::from_engine(&id, engine),
    }))
}

/// DELETE /api/sessions/:id
///
/// Abandon the session. Already-saved attempts stand.
pub async fn abandon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let removed = state
        .sessions
        .write()
        .expect("sessions lock")
        .remove(&id)
        .is_some();
    if !removed {
        return Err(ApiError::NotFound(format!("session {id}")));
    }
    tracing::info!(session_id = %id, "abandoned practice session");
    Ok(StatusCode::NO_CONTENT)
}

/// Run one state-machine step against a stored session, then return the
/// refreshed view.
fn with_session<F>(state: &AppState, id: &str, step: F) -> Result<Json<SessionView>>
where
    F: FnOnce(&mut SessionEngine) -> Result<()>,
{
    let mut sessions = state.sessions.write().expect("sessions lock");
    let engine = sessions
        .get_mut(id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    step(engine)?;
    Ok(Json(SessionView::from_engine(id, engine)))
}

use crate::completion::complete;
use crate::errors::AppError;
use crate::history::{history, HISTORY_DAYS};
use crate::models::{HistoryResponse, TodayResponse};
use crate::provision::{ensure_record_for_date, ensure_user_and_habit};
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Local;
use tracing::error;

pub const ALREADY_COMPLETED_MESSAGE: &str = "today's habit is already completed";

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let (habit, record) = state
        .transact(|data| {
            let (_, habit) = ensure_user_and_habit(data);
            let record = ensure_record_for_date(data, habit.id, &Local::now());
            Ok((habit, record))
        })
        .await
        .map_err(|err| {
            error!("[GET /today] {err}");
            AppError::internal("failed to load today's record")
        })?;

    Ok(Json(TodayResponse {
        habit: (&habit).into(),
        record: (&record).into(),
        message: None,
    }))
}

pub async fn post_complete(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let completion = state
        .transact(|data| {
            let (_, habit) = ensure_user_and_habit(data);
            complete(data, habit.id)
        })
        .await
        .map_err(|err| {
            error!("[POST /complete] {err}");
            AppError::internal("completion failed")
        })?;

    Ok(Json(TodayResponse {
        habit: (&completion.habit).into(),
        record: (&completion.record).into(),
        message: completion
            .already_completed
            .then(|| ALREADY_COMPLETED_MESSAGE.to_string()),
    }))
}

pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let response = state
        .transact(|data| {
            let (_, habit) = ensure_user_and_habit(data);
            history(data, habit.id, HISTORY_DAYS)
        })
        .await
        .map_err(|err| {
            error!("[GET /history] {err}");
            AppError::internal("failed to load history")
        })?;

    Ok(Json(response))
}

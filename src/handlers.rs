use crate::calendar::{MonthView, YearMonth};
use crate::errors::AppError;
use crate::models::{
    CalendarQuery, CalendarResponse, EntrySavedResponse, NewEntry, PermissionUpdate,
    StreakResponse, TimelineResponse,
};
use crate::reminder::Reminder;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let journal = state.journal.lock().await;
    let streak = journal.streak();
    Html(render_index(today, streak))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<TimelineResponse> {
    let journal = state.journal.lock().await;
    Json(TimelineResponse {
        entries: journal.entries().to_vec(),
        streak: journal.streak(),
    })
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(draft): Json<NewEntry>,
) -> Result<(StatusCode, Json<EntrySavedResponse>), AppError> {
    let mut journal = state.journal.lock().await;
    let entry = journal.create(draft, Utc::now()).await?;
    let streak = journal.streak();

    Ok((StatusCode::CREATED, Json(EntrySavedResponse { entry, streak })))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StreakResponse>, AppError> {
    let mut journal = state.journal.lock().await;
    journal.delete(&id).await?;

    Ok(Json(StreakResponse {
        streak: journal.streak(),
    }))
}

pub async fn get_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let journal = state.journal.lock().await;
    Json(StreakResponse {
        streak: journal.streak(),
    })
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = today();
    let current = YearMonth::containing(today);
    let month = YearMonth::new(
        query.year.unwrap_or(current.year()),
        query.month.unwrap_or(current.month()),
    )
    .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))?;

    let journal = state.journal.lock().await;
    let view = MonthView::build(journal.entries(), month, today, &Local);

    Ok(Json(CalendarResponse {
        year: month.year(),
        month: month.month(),
        label: month.label(),
        days_in_month: month.days_in_month(),
        leading_blanks: month.leading_blanks(),
        previous: month.previous(),
        next: month.next(),
        cells: view.cells,
    }))
}

pub async fn set_notification_permission(
    State(state): State<AppState>,
    Json(update): Json<PermissionUpdate>,
) -> Json<PermissionUpdate> {
    state.reminders.set_permission(update.permission).await;
    info!(permission = ?update.permission, "notification permission updated");
    Json(update)
}

pub async fn take_reminder(State(state): State<AppState>) -> Json<Option<Reminder>> {
    let journal = state.journal.lock().await;
    Json(
        state
            .reminders
            .take_due(journal.entries(), today(), &Local)
            .await,
    )
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

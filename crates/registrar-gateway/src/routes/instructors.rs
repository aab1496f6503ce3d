//! Instructor summary endpoints.

use axum::{extract::State, response::Html, routing::get, Json, Router};
use registrar_core::{InstructorSummary, Store};

use crate::error::AppError;
use crate::html;
use crate::json::SuccessResponse;
use crate::AppState;

const PAGE_TITLE: &str = "Instructors Summary";
const TABLE_TITLE: &str = "Number of students by class and instructor";

/// Instructor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/instructors", get(instructors_page))
        .route("/api/instructors", get(instructors_json))
}

/// Render the summary as an HTML table.
async fn instructors_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rows = state.with_store(Store::instructor_summary).await?;
    Ok(Html(html::instructor_page(PAGE_TITLE, TABLE_TITLE, &rows)))
}

async fn instructors_json(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<Vec<InstructorSummary>>>, AppError> {
    let rows = state.with_store(Store::instructor_summary).await?;
    Ok(Json(SuccessResponse::new(rows)))
}

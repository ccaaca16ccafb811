//! Quiz endpoints: saved setups and question generation

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use hexquiz_common::models::{QuizQuestion, QuizSetup};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::AppState;

/// Body of a save request
#[derive(Debug, Deserialize)]
pub struct SaveQuizRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "families")]
    pub taxa: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveQuizResponse {
    pub success: bool,
    pub message: String,
    /// Sanitized key the quiz was stored under
    pub stored_as: String,
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizSetup>,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuizResponse {
    pub success: bool,
    pub message: String,
}

/// Body of a question request
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default, alias = "families")]
    pub taxa: Vec<String>,
}

/// POST /api/quiz/save
pub async fn save_quiz_setup(
    State(state): State<AppState>,
    payload: Result<Json<SaveQuizRequest>, JsonRejection>,
) -> ApiResult<Json<SaveQuizResponse>> {
    let Json(request) = payload?;
    let saved = state.store.save(&request.name, &request.taxa).await?;
    Ok(Json(SaveQuizResponse {
        success: true,
        message: format!("Quiz \"{}\" saved successfully", saved.setup.name),
        stored_as: saved.key,
    }))
}

/// GET /api/quiz/list
pub async fn list_saved_quizzes(State(state): State<AppState>) -> ApiResult<Json<QuizListResponse>> {
    let quizzes = state.store.list().await?;
    Ok(Json(QuizListResponse { quizzes }))
}

/// DELETE /api/quiz/delete/:name
pub async fn delete_quiz_setup(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DeleteQuizResponse>> {
    state.store.delete(&name).await?;
    Ok(Json(DeleteQuizResponse {
        success: true,
        message: format!("Quiz \"{}\" deleted successfully", name),
    }))
}

/// POST /api/quiz/question
pub async fn get_quiz_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> ApiResult<Json<QuizQuestion>> {
    let Json(request) = payload?;
    let question = state.picker.pick(&request.taxa).await?;
    Ok(Json(question))
}

/// Build quiz routes
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/save", post(save_quiz_setup))
        .route("/api/quiz/list", get(list_saved_quizzes))
        .route("/api/quiz/delete/:name", delete(delete_quiz_setup))
        .route("/api/quiz/question", post(get_quiz_question))
}

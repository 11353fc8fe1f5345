use std::collections::HashSet;

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_all_questions, Question},
    selection::select_quiz_question,
    server::{
        app::AppState,
        deserializers::{deserialize_present, FormNumber},
        error::ApiError,
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{success, ApiResponse};

#[derive(Debug, Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

// the frontend sends {id: 0, type: "click"} for "all categories";
// a missing id is an error, a null one is not
#[derive(Debug, Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_present")]
    id: Option<Option<FormNumber>>,
}

#[derive(Debug, Serialize)]
struct NextQuestion {
    question: Option<Question>,
}

#[tracing::instrument(skip_all)]
async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<NextQuestion> {
    let quiz_category = request
        .quiz_category
        .ok_or_else(|| ApiError::Unprocessable("quiz_category is required".to_owned()))?;
    let category_id = quiz_category
        .id
        .ok_or_else(|| ApiError::Unprocessable("quiz_category.id is required".to_owned()))?
        .and_then(FormNumber::value)
        .filter(|id| *id != 0);
    let previous: HashSet<i64> = request
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .collect();

    let questions = get_all_questions(&pool).await?;
    let question = select_quiz_question(questions, &previous, category_id, &mut rand::thread_rng());

    match &question {
        Some(q) => {
            let label = category_id.map_or_else(|| "all".to_owned(), |id| id.to_string());
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
            tracing::debug!(question_id = q.id, seen = previous.len(), "quiz question selected");
        }
        None => tracing::debug!(seen = previous.len(), "quiz exhausted"),
    }
    success(NextQuestion { question })
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}

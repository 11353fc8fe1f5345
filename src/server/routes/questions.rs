use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::get_all_categories,
        questions::{self, get_all_questions, get_question},
    },
    selection::search_questions,
    server::{
        app::AppState, deserializers::FormNumber, error::ApiError, extract::ApiJson,
        extract::ApiPath,
    },
    telemetry::QUESTIONS_CREATED,
    telemetry::QUESTIONS_DELETED,
};

use super::{categories_by_id, success, ApiResponse, PageQuery, QuestionsBody};

// a missing or null field counts as empty
#[derive(Debug, Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<FormNumber>,
    difficulty: Option<FormNumber>,
}

struct ValidQuestion {
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

impl NewQuestion {
    fn validate(self) -> Result<ValidQuestion, ApiError> {
        fn text(value: Option<String>, field: &str) -> Result<String, ApiError> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::BadRequest(format!("{field} must not be empty")))
        }
        fn number(value: Option<FormNumber>, field: &str) -> Result<i64, ApiError> {
            value
                .and_then(FormNumber::value)
                .ok_or_else(|| ApiError::BadRequest(format!("{field} must not be empty")))
        }

        Ok(ValidQuestion {
            question: text(self.question, "question")?,
            answer: text(self.answer, "answer")?,
            category: number(self.category, "category")?,
            difficulty: number(self.difficulty, "difficulty")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Debug, Serialize)]
struct Created {
    created: i64,
}

#[derive(Debug, Serialize)]
struct Deleted {
    deleted: i64,
}

#[tracing::instrument(skip_all, fields(page = query.page))]
async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionsBody> {
    let questions = get_all_questions(&pool).await?;
    let page = query.window(&questions);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!(
            "page {} of {} questions is empty",
            query.page,
            questions.len()
        )));
    }
    let categories = get_all_categories(&pool).await?;

    success(QuestionsBody {
        questions: page.to_vec(),
        total_questions: questions.len(),
        current_category: None,
        categories: Some(categories_by_id(categories)),
    })
}

#[tracing::instrument(skip_all)]
async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Created> {
    let new_question = new_question.validate()?;
    let id = questions::create_question(
        &pool,
        &new_question.question,
        &new_question.answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;

    QUESTIONS_CREATED.inc();
    tracing::info!(id, category = new_question.category, "question created");
    success(Created { created: id })
}

#[tracing::instrument(skip_all, fields(question_id = id))]
async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Deleted> {
    if get_question(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("question {id} does not exist")));
    }
    // removed concurrently since the lookup
    if questions::delete_question(&pool, id).await? == 0 {
        return Err(ApiError::NotFound(format!("question {id} does not exist")));
    }

    QUESTIONS_DELETED.inc();
    tracing::info!(id, "question deleted");
    success(Deleted { deleted: id })
}

#[tracing::instrument(skip_all)]
async fn search(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> ApiResponse<QuestionsBody> {
    let term = request
        .search_term
        .ok_or_else(|| ApiError::BadRequest("searchTerm is required".to_owned()))?;
    let questions = get_all_questions(&pool).await?;
    // total_questions reports the table size, not the number of matches
    let total_questions = questions.len();
    let found = search_questions(questions, &term);
    if found.is_empty() {
        return Err(ApiError::NotFound(format!("no question matches {term:?}")));
    }

    success(QuestionsBody {
        questions: query.window(&found).to_vec(),
        total_questions,
        current_category: None,
        categories: None,
    })
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}

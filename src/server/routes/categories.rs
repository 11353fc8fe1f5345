use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories::get_all_categories, questions::get_questions_for_category},
    server::{app::AppState, error::ApiError, extract::ApiPath},
};

use super::{categories_by_id, success, ApiResponse, PageQuery, QuestionsBody};

#[derive(Debug, Serialize)]
struct CategoriesBody {
    categories: BTreeMap<i64, String>,
}

#[tracing::instrument(skip_all)]
async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories exist".to_owned()));
    }
    success(CategoriesBody {
        categories: categories_by_id(categories),
    })
}

#[tracing::instrument(skip_all, fields(category_id = id))]
async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionsBody> {
    let questions = get_questions_for_category(&pool, id).await?;
    // an empty category is reported as missing, same as an unknown one
    if questions.is_empty() {
        return Err(ApiError::NotFound(format!("category {id} has no questions")));
    }
    success(QuestionsBody {
        questions: query.window(&questions).to_vec(),
        total_questions: questions.len(),
        current_category: Some(id),
        categories: None,
    })
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}

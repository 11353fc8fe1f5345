mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::{Category, Question};
use crate::pagination::{paginate, QUESTIONS_PER_PAGE};

use super::deserializers::{deserialize_page, first_page};
use super::error::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// Successful bodies carry `"success": true` next to the payload fields.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub type ApiResponse<T> = Result<Json<Envelope<T>>, ApiError>;

fn success<T>(body: T) -> ApiResponse<T> {
    Ok(Json(Envelope {
        success: true,
        body,
    }))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: usize,
}

impl PageQuery {
    fn window<'a>(&self, questions: &'a [Question]) -> &'a [Question] {
        paginate(questions, self.page, QUESTIONS_PER_PAGE)
    }
}

#[derive(Debug, Serialize)]
struct QuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<BTreeMap<i64, String>>,
}

/// `{id: type}`; serde_json writes the integer keys as strings.
fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

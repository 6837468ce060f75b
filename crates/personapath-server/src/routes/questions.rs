use axum::Json;

use personapath_core::models::question::Question;
use personapath_quiz::question_bank;

pub async fn list_questions() -> Json<Vec<Question>> {
    Json(question_bank().to_vec())
}

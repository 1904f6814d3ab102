use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::model::ContentType;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
}

fn json_error(code: StatusCode, message: &str) -> Response {
    (code, Json(json!({ "error": message }))).into_response()
}

/// `GET /api/content?type=projects|notes|artwork|photos` returns every entry
/// of the collection as a JSON array.
#[instrument(skip(state))]
pub async fn content(State(state): State<AppState>, Query(query): Query<ContentQuery>) -> Response {
    let content_type = match query.content_type.as_deref().map(str::parse::<ContentType>) {
        Some(Ok(ct)) => ct,
        _ => return json_error(StatusCode::BAD_REQUEST, "Invalid content type"),
    };

    match state.local(move |store| store.to_json(content_type)).await {
        Ok(Ok(value)) => Json(value).into_response(),
        Ok(Err(err)) => {
            error!("Error fetching content: {err}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch content")
        }
        Err(err) => {
            error!("Error fetching content: {:?}", err);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch content")
        }
    }
}

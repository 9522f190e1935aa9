use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use quip_service::{RankedGif, ServiceError, SuggestionResult};

use crate::{relay, state::AppState};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/suggest", post(suggest))
		.route("/v1/search", post(search))
		.route("/ws", get(ws))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
	pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
	pub gifs: Vec<RankedGif>,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn suggest(
	State(state): State<AppState>,
	Json(payload): Json<MessageRequest>,
) -> Result<Json<SuggestionResult>, ApiError> {
	let response = state.service.suggest(&payload.text).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<MessageRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let gifs = state.service.search_direct(&payload.text).await?;

	Ok(Json(SearchResponse { gifs }))
}

async fn ws(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
	upgrade.on_upgrade(move |socket| relay::handle_socket(socket, state.relay))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => {
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::util::ServiceExt;

use quip_api::{routes, state::AppState};
use quip_config::{
	EmbeddingProviderConfig, GifProviderConfig, LlmProviderConfig, ProviderConfig,
};
use quip_domain::SentimentLabel;
use quip_providers::GifRecord;
use quip_service::{
	BoxFuture, EmbeddingProvider, GenerativeProvider, GifSearchProvider, Providers,
	SentimentProvider, SuggestService,
};
use quip_testkit::{gif, hash_embedding, test_config};

/// One happy-path provider set: upbeat sentiment, deterministic embeddings,
/// two canned replies, and a fixed page of GIF hits.
struct SunnyProviders;

impl SentimentProvider for SunnyProviders {
	fn classify<'a>(
		&'a self,
		_cfg: &'a ProviderConfig,
		_text: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<SentimentLabel>> {
		Box::pin(async move { Ok(SentimentLabel::Positive) })
	}
}

impl EmbeddingProvider for SunnyProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, quip_providers::Result<Vec<Vec<f32>>>> {
		let vectors = texts
			.iter()
			.map(|text| hash_embedding(text, cfg.dimensions as usize))
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(vectors) })
	}
}

impl GenerativeProvider for SunnyProviders {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<String>> {
		let text = if prompt.contains("JSON array") {
			"[\"Sure! When?\", \"Sounds fun!\"]".to_string()
		} else {
			"{\"context_words\": [\"pizza\"], \"mood_words\": [\"excited\"]}".to_string()
		};

		Box::pin(async move { Ok(text) })
	}
}

impl GifSearchProvider for SunnyProviders {
	fn search<'a>(
		&'a self,
		_cfg: &'a GifProviderConfig,
		_query: &'a str,
		_limit: u32,
	) -> BoxFuture<'a, quip_providers::Result<Vec<GifRecord>>> {
		let hits = (0..8)
			.map(|idx| gif(&format!("g{idx}"), &format!("reaction {idx}")))
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(hits) })
	}
}

fn test_app() -> axum::Router {
	let provider = Arc::new(SunnyProviders);
	let providers =
		Providers::new(provider.clone(), provider.clone(), provider.clone(), provider);
	let service = SuggestService::with_providers(test_config(), providers);

	routes::router(AppState::with_service(service))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read body.");

	serde_json::from_slice(&bytes).expect("Body is not JSON.")
}

#[tokio::test]
async fn health_returns_ok() {
	let response = test_app()
		.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("Failed to build."))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn suggest_rejects_empty_text() {
	let response = test_app()
		.oneshot(json_request("/v1/suggest", serde_json::json!({ "text": "  " })))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = json_body(response).await;

	assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn suggest_returns_capped_ranked_list_with_debug_info() {
	let response = test_app()
		.oneshot(json_request("/v1/suggest", serde_json::json!({ "text": "pizza tonight?" })))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;
	let gifs = body["gifs"].as_array().expect("Expected gifs array.");

	assert_eq!(gifs.len(), 6);
	assert_eq!(body["debug"]["input_text"], "pizza tonight?");
	assert_eq!(body["debug"]["search_query"], "Sure! When?");
	assert_eq!(body["debug"]["replies"][0], "Sure! When?");
}

#[tokio::test]
async fn search_returns_capped_gif_list() {
	let response = test_app()
		.oneshot(json_request("/v1/search", serde_json::json!({ "text": "happy dance" })))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;
	let gifs = body["gifs"].as_array().expect("Expected gifs array.");

	assert_eq!(gifs.len(), 6);
	assert!(gifs.iter().all(|item| item["similarity_score"].is_number()));
}

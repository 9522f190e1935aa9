//! Shared fixtures for tests that exercise the suggestion pipeline without
//! touching the network.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde_json::Map;

use quip_config::{
	Config, EmbeddingProviderConfig, GifProviderConfig, LlmProviderConfig, ProviderConfig,
	Providers, Ranking, Service, Suggest,
};
use quip_providers::GifRecord;

pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		providers: Providers {
			sentiment: ProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:0".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/classify".to_string(),
				model: "test-sentiment".to_string(),
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:0".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test-embedding".to_string(),
				dimensions: 8,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			generative: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:0".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test-llm".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		gifs: GifProviderConfig {
			api_base: "http://127.0.0.1:0".to_string(),
			api_key: "test-key".to_string(),
			path: "/v1/gifs/search".to_string(),
			rating: "g".to_string(),
			lang: None,
			search_limit: 10,
			timeout_ms: 1_000,
		},
		suggest: Suggest::default(),
		ranking: Ranking::default(),
	}
}

/// Deterministic stand-in for a real embedding model: equal texts embed to
/// equal vectors, distinct texts almost surely do not.
pub fn hash_embedding(text: &str, dimensions: usize) -> Vec<f32> {
	let mut values = Vec::with_capacity(dimensions);

	for idx in 0..dimensions {
		let mut hasher = DefaultHasher::new();

		text.hash(&mut hasher);
		idx.hash(&mut hasher);

		let raw = hasher.finish();

		values.push(((raw % 2_000_000) as f32 / 1_000_000.0) - 1.0);
	}

	values
}

pub fn gif(id: &str, title: &str) -> GifRecord {
	GifRecord {
		id: id.to_string(),
		url: format!("https://gifs.example/{id}.gif"),
		preview: format!("https://gifs.example/{id}-still.gif"),
		title: title.to_string(),
	}
}

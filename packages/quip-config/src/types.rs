use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub gifs: GifProviderConfig,
	#[serde(default)]
	pub suggest: Suggest,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub sentiment: ProviderConfig,
	pub embedding: EmbeddingProviderConfig,
	pub generative: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// The GIF provider authenticates with a query-string key rather than a
/// bearer header, so it gets its own shape instead of reusing
/// [`ProviderConfig`].
#[derive(Debug, Deserialize)]
pub struct GifProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	#[serde(default = "default_rating")]
	pub rating: String,
	pub lang: Option<String>,
	pub search_limit: u32,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Suggest {
	pub max_results: u32,
	pub max_replies: u32,
}
impl Default for Suggest {
	fn default() -> Self {
		Self { max_results: 6, max_replies: 3 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub context_boost: f32,
	pub mood_boost: f32,
	pub shouting_penalty: f32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { context_boost: 0.10, mood_boost: 0.15, shouting_penalty: 0.15 }
	}
}

fn default_rating() -> String {
	"g".to_string()
}

pub mod rank;
pub mod reply;
pub mod suggest;

use std::{future::Future, pin::Pin, sync::Arc};

use quip_config::{
	Config, EmbeddingProviderConfig, GifProviderConfig, LlmProviderConfig, ProviderConfig,
};
use quip_domain::SentimentLabel;
use quip_providers::{GifRecord, embedding, generate, gifs, sentiment};

pub use rank::RankedGif;
pub use reply::MessageAnalysis;
pub use suggest::{DebugInfo, SuggestionResult};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}

pub trait SentimentProvider
where
	Self: Send + Sync,
{
	fn classify<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<SentimentLabel>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, quip_providers::Result<Vec<Vec<f32>>>>;
}

pub trait GenerativeProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<String>>;
}

pub trait GifSearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a GifProviderConfig,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, quip_providers::Result<Vec<GifRecord>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub sentiment: Arc<dyn SentimentProvider>,
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub generative: Arc<dyn GenerativeProvider>,
	pub gifs: Arc<dyn GifSearchProvider>,
}

/// The suggestion core. Holds only configuration and provider handles, so a
/// single instance serves concurrent requests without shared mutable state.
pub struct SuggestService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl SentimentProvider for DefaultProviders {
	fn classify<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<SentimentLabel>> {
		Box::pin(sentiment::classify(cfg, text))
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, quip_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl GenerativeProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, quip_providers::Result<String>> {
		Box::pin(generate::generate(cfg, prompt))
	}
}

impl GifSearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a GifProviderConfig,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, quip_providers::Result<Vec<GifRecord>>> {
		Box::pin(gifs::search(cfg, query, limit))
	}
}

impl Providers {
	pub fn new(
		sentiment: Arc<dyn SentimentProvider>,
		embedding: Arc<dyn EmbeddingProvider>,
		generative: Arc<dyn GenerativeProvider>,
		gifs: Arc<dyn GifSearchProvider>,
	) -> Self {
		Self { sentiment, embedding, generative, gifs }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			sentiment: provider.clone(),
			embedding: provider.clone(),
			generative: provider.clone(),
			gifs: provider,
		}
	}
}

impl SuggestService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}

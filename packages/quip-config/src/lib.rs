mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, GifProviderConfig, LlmProviderConfig, ProviderConfig,
	Providers, Ranking, Service, Suggest,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("sentiment", &cfg.providers.sentiment.api_key),
		("embedding", &cfg.providers.embedding.api_key),
		("generative", &cfg.providers.generative.api_key),
		("gifs", &cfg.gifs.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	for (label, timeout_ms) in [
		("providers.sentiment", cfg.providers.sentiment.timeout_ms),
		("providers.embedding", cfg.providers.embedding.timeout_ms),
		("providers.generative", cfg.providers.generative.timeout_ms),
		("gifs", cfg.gifs.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	if cfg.gifs.rating.trim().is_empty() {
		return Err(Error::Validation { message: "gifs.rating must be non-empty.".to_string() });
	}
	if cfg.gifs.search_limit == 0 {
		return Err(Error::Validation {
			message: "gifs.search_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.max_results == 0 {
		return Err(Error::Validation {
			message: "suggest.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.max_replies == 0 {
		return Err(Error::Validation {
			message: "suggest.max_replies must be greater than zero.".to_string(),
		});
	}

	for (label, weight) in [
		("ranking.context_boost", cfg.ranking.context_boost),
		("ranking.mood_boost", cfg.ranking.mood_boost),
		("ranking.shouting_penalty", cfg.ranking.shouting_penalty),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if weight < 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be zero or greater."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.gifs.lang.as_deref().map(|lang| lang.trim().is_empty()).unwrap_or(false) {
		cfg.gifs.lang = None;
	}
}

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Result, error::invalid_response};

/// A provider hit normalized down to the fields the ranker and clients care
/// about. Records that cannot resolve a playable `url` never leave the parse
/// layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GifRecord {
	pub id: String,
	pub url: String,
	pub preview: String,
	pub title: String,
}

// Fallback-preference order over the provider's named size variants.
const URL_VARIANTS: &[&str] = &["downsized_large", "downsized_medium", "downsized", "original"];
const PREVIEW_VARIANTS: &[&str] = &["fixed_width_still", "fixed_height_still"];

pub async fn search(
	cfg: &quip_config::GifProviderConfig,
	query: &str,
	limit: u32,
) -> Result<Vec<GifRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut request = client.get(url).query(&[
		("api_key", cfg.api_key.as_str()),
		("q", query),
		("rating", cfg.rating.as_str()),
	]);

	request = request.query(&[("limit", limit)]);

	if let Some(lang) = cfg.lang.as_deref() {
		request = request.query(&[("lang", lang)]);
	}

	let json: Value = request.send().await?.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<Vec<GifRecord>> {
	let data = json
		.get("data")
		.and_then(|v| v.as_array())
		.ok_or_else(|| invalid_response("GIF search response is missing data array."))?;
	let mut records = Vec::with_capacity(data.len());

	for hit in data {
		let Some(id) = hit.get("id").and_then(|v| v.as_str()).filter(|id| !id.is_empty()) else {
			continue;
		};
		// A hit with no resolvable url is dropped, not an error.
		let Some(url) = first_variant_url(hit.get("images"), URL_VARIANTS) else {
			continue;
		};
		let preview = first_variant_url(hit.get("images"), PREVIEW_VARIANTS).unwrap_or_default();
		let title = hit.get("title").and_then(|v| v.as_str()).unwrap_or_default().to_string();

		records.push(GifRecord { id: id.to_string(), url, preview, title });
	}

	Ok(records)
}

fn first_variant_url(images: Option<&Value>, variants: &[&str]) -> Option<String> {
	let images = images?;

	for variant in variants {
		if let Some(url) = images
			.get(variant)
			.and_then(|v| v.get("url"))
			.and_then(|v| v.as_str())
			.filter(|url| !url.is_empty())
		{
			return Some(url.to_string());
		}
	}

	None
}

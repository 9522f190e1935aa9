use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Result, error::invalid_response};

pub async fn embed(
	cfg: &quip_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_embedding_response(json)
}

// Items are returned in request order, but the wire format carries an index
// per item, so re-sort rather than trusting array order.
fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let data = json
		.get("data")
		.and_then(|v| v.as_array())
		.ok_or_else(|| invalid_response("Embedding response is missing data array."))?;
	let mut indexed = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let values = item
			.get("embedding")
			.and_then(|v| v.as_array())
			.ok_or_else(|| invalid_response("Embedding item is missing embedding array."))?;
		let mut vector = Vec::with_capacity(values.len());

		for value in values {
			let number = value
				.as_f64()
				.ok_or_else(|| invalid_response("Embedding values must be numeric."))?;

			vector.push(number as f32);
		}

		indexed.push((index, vector));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vector)| vector).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders_embeddings_by_reported_index() {
		let json = serde_json::json!({
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response(json).expect("Failed to parse.");

		assert_eq!(parsed, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
	}

	#[test]
	fn falls_back_to_array_order_without_indices() {
		let json = serde_json::json!({
			"data": [
				{ "embedding": [1.0] },
				{ "embedding": [2.0] }
			]
		});
		let parsed = parse_embedding_response(json).expect("Failed to parse.");

		assert_eq!(parsed, vec![vec![1.0], vec![2.0]]);
	}

	#[test]
	fn rejects_non_numeric_values() {
		let json = serde_json::json!({
			"data": [{ "index": 0, "embedding": ["oops"] }]
		});

		assert!(parse_embedding_response(json).is_err());
	}
}

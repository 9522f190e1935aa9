use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use quip_domain::SentimentLabel;

use crate::{Result, error::invalid_response};

pub async fn classify(cfg: &quip_config::ProviderConfig, text: &str) -> Result<SentimentLabel> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": text,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_sentiment_response(json)
}

fn parse_sentiment_response(json: Value) -> Result<SentimentLabel> {
	// Classifiers wrap scored labels in "results" or "data"; single-input
	// batch APIs nest the list one level deeper. Only the top-scored entry
	// matters here.
	let mut node = json.get("results").or_else(|| json.get("data")).unwrap_or(&json);

	while let Some(first) = node.as_array().and_then(|arr| arr.first()) {
		node = first;
	}

	let label = node
		.get("label")
		.and_then(|v| v.as_str())
		.ok_or_else(|| invalid_response("Sentiment response is missing a label."))?;

	SentimentLabel::from_provider_label(label)
		.ok_or_else(|| invalid_response(format!("Sentiment label {label:?} is not recognized.")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_top_scored_label() {
		let json = serde_json::json!({
			"results": [
				{ "label": "POSITIVE", "score": 0.98 },
				{ "label": "NEGATIVE", "score": 0.02 }
			]
		});

		assert_eq!(
			parse_sentiment_response(json).expect("Failed to parse."),
			SentimentLabel::Positive
		);
	}

	#[test]
	fn tolerates_nested_result_arrays() {
		let json = serde_json::json!({
			"data": [[{ "label": "negative", "score": 0.7 }]]
		});

		assert_eq!(
			parse_sentiment_response(json).expect("Failed to parse."),
			SentimentLabel::Negative
		);
	}

	#[test]
	fn rejects_labels_outside_the_taxonomy() {
		let json = serde_json::json!({
			"results": [{ "label": "LABEL_1", "score": 0.9 }]
		});

		assert!(parse_sentiment_response(json).is_err());
	}

	#[test]
	fn rejects_missing_label() {
		let json = serde_json::json!({ "results": [{ "score": 0.9 }] });

		assert!(parse_sentiment_response(json).is_err());
	}
}

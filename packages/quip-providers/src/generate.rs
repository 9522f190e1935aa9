use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Result, error::invalid_response};

/// Invokes the generative oracle with a single user prompt and deterministic,
/// non-streaming decoding. The returned text is free form; callers own any
/// structured parsing of it.
pub async fn generate(cfg: &quip_config::LlmProviderConfig, prompt: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"stream": false,
		"messages": [
			{ "role": "user", "content": prompt }
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_generation_response(json)
}

// Chat-completions shape first; local runners answer with a bare
// { "response": ... } object instead.
fn parse_generation_response(json: Value) -> Result<String> {
	if let Some(content) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
	{
		return Ok(content.to_string());
	}

	if let Some(response) = json.get("response").and_then(|v| v.as_str()) {
		return Ok(response.to_string());
	}

	Err(invalid_response("Generation response carries no text content."))
}

use serde_json::Value;

use crate::SuggestService;

/// Everything the reply generator learned about one message. Built fresh per
/// request and discarded once the orchestration call returns.
#[derive(Clone, Debug)]
pub struct MessageAnalysis {
	pub original_message: String,
	pub replies: Vec<String>,
	pub context_words: Vec<String>,
	pub mood_words: Vec<String>,
}

const REPLY_PROMPT: &str = "\
You are a helpful chat assistant that generates natural, conversational replies.
Generate 3 different casual, friendly responses that a person might say in a chat conversation.
Keep each reply short, like how friends text each other. For invitations or suggestions, start
with a clear yes/no or show enthusiasm first. The replies are used for searching GIFs, so
brevity matters.

Friend: \"{message}\"

Format as a JSON array. Example: [\"Yes, absolutely! What time?\", \"That sounds fun! Where at?\"]
Only output the JSON array, nothing else.";

const CONTEXT_PROMPT: &str = "\
You are helping understand the topic and tone of a short chat exchange.

Message: \"{message}\"
Replies: {replies}

Extract topic keywords and emotional-tone keywords. Format as a JSON object:
{\"context_words\": [\"topic keywords\"], \"mood_words\": [\"emotional tone words\"]}
Only output the JSON object, nothing else.";

impl SuggestService {
	/// Generates up to `suggest.max_replies` candidate replies. Any oracle
	/// failure or unparseable output is a valid "no replies" result, never an
	/// error.
	pub async fn generate_replies(&self, message: &str) -> Vec<String> {
		let prompt = REPLY_PROMPT.replace("{message}", message);
		let text = match self
			.providers
			.generative
			.generate(&self.cfg.providers.generative, &prompt)
			.await
		{
			Ok(text) => text,
			Err(err) => {
				tracing::warn!(error = %err, "Reply generation failed; continuing without replies.");

				return Vec::new();
			},
		};
		let mut replies = parse_reply_list(&text);

		replies.truncate(self.cfg.suggest.max_replies as usize);

		replies
	}

	/// Asks the oracle for topic and mood keywords describing the exchange.
	/// Shares the empty-on-failure contract with reply generation.
	pub async fn extract_context(
		&self,
		message: &str,
		replies: &[String],
	) -> (Vec<String>, Vec<String>) {
		let replies_json =
			serde_json::to_string(replies).unwrap_or_else(|_| "[]".to_string());
		let prompt =
			CONTEXT_PROMPT.replace("{message}", message).replace("{replies}", &replies_json);

		match self.providers.generative.generate(&self.cfg.providers.generative, &prompt).await {
			Ok(text) => parse_context_words(&text),
			Err(err) => {
				tracing::warn!(error = %err, "Context extraction failed; continuing without keywords.");

				(Vec::new(), Vec::new())
			},
		}
	}

	pub async fn analyze_message(&self, message: &str) -> MessageAnalysis {
		let replies = self.generate_replies(message).await;
		// Without replies there is no exchange to describe; skip the second
		// oracle round trip entirely.
		let (context_words, mood_words) = if replies.is_empty() {
			(Vec::new(), Vec::new())
		} else {
			self.extract_context(message, &replies).await
		};

		MessageAnalysis {
			original_message: message.to_string(),
			replies,
			context_words,
			mood_words,
		}
	}
}

// The oracle is prompted for JSON but not constrained to it, so parsing scans
// for the outermost bracket span and treats anything unparseable as empty.
fn parse_reply_list(text: &str) -> Vec<String> {
	let Some(span) = bracket_span(text, '[', ']') else {
		return Vec::new();
	};
	let Ok(value) = serde_json::from_str::<Value>(span) else {
		return Vec::new();
	};

	string_items(Some(&value))
}

fn parse_context_words(text: &str) -> (Vec<String>, Vec<String>) {
	let Some(span) = bracket_span(text, '{', '}') else {
		return (Vec::new(), Vec::new());
	};
	let Ok(value) = serde_json::from_str::<Value>(span) else {
		return (Vec::new(), Vec::new());
	};

	(string_items(value.get("context_words")), string_items(value.get("mood_words")))
}

fn bracket_span(text: &str, open: char, close: char) -> Option<&str> {
	let start = text.find(open)?;
	let end = text.rfind(close)?;

	(end > start).then(|| &text[start..=end])
}

fn string_items(value: Option<&Value>) -> Vec<String> {
	let Some(items) = value.and_then(|v| v.as_array()) else {
		return Vec::new();
	};
	let mut out = Vec::with_capacity(items.len());

	for item in items {
		let Some(text) = item.as_str().map(str::trim).filter(|text| !text.is_empty()) else {
			continue;
		};

		if !out.iter().any(|existing: &String| existing == text) {
			out.push(text.to_string());
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reply_parse_ignores_surrounding_prose() {
		let text = "Sure, here are some replies:\n[\"Yes!\", \"Sounds fun\"]\nHope that helps.";

		assert_eq!(parse_reply_list(text), vec!["Yes!", "Sounds fun"]);
	}

	#[test]
	fn reply_parse_skips_non_string_items() {
		assert_eq!(parse_reply_list("[\"Yes!\", 42, \" \"]"), vec!["Yes!"]);
	}

	#[test]
	fn reply_parse_yields_empty_on_malformed_output() {
		assert!(parse_reply_list("I could not think of anything.").is_empty());
		assert!(parse_reply_list("[\"unterminated").is_empty());
		assert!(parse_reply_list("] backwards [").is_empty());
	}

	#[test]
	fn context_parse_reads_both_lists() {
		let text = "{\"context_words\": [\"pizza\", \"dinner\"], \"mood_words\": [\"excited\"]}";
		let (context, mood) = parse_context_words(text);

		assert_eq!(context, vec!["pizza", "dinner"]);
		assert_eq!(mood, vec!["excited"]);
	}

	#[test]
	fn context_parse_dedupes_and_trims() {
		let text = "{\"context_words\": [\" pizza \", \"pizza\"], \"mood_words\": []}";
		let (context, mood) = parse_context_words(text);

		assert_eq!(context, vec!["pizza"]);
		assert!(mood.is_empty());
	}

	#[test]
	fn context_parse_yields_empty_on_failure() {
		let (context, mood) = parse_context_words("no json here");

		assert!(context.is_empty());
		assert!(mood.is_empty());
	}

	#[test]
	fn bracket_span_finds_outermost_pair() {
		assert_eq!(bracket_span("a [b [c] d] e", '[', ']'), Some("[b [c] d]"));
		assert_eq!(bracket_span("no brackets", '[', ']'), None);
	}
}

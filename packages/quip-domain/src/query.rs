use crate::sentiment::SentimentLabel;

/// Articles, pronouns, conjunctions, and common copulas that carry no search
/// signal on their own.
const STOP_WORDS: &[&str] = &[
	"this", "is", "that", "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
	"of", "with", "by", "i", "you", "he", "she", "it", "we", "they", "am", "are", "was", "were",
	"be", "been", "have", "has", "had",
];

const MAX_KEY_TERMS: usize = 3;

pub fn is_stop_word(token: &str) -> bool {
	STOP_WORDS.contains(&token)
}

/// Extracts up to three significant lower-cased terms, preserving original
/// order. Tokens of two characters or fewer are dropped along with stop
/// words.
pub fn key_terms(text: &str) -> Vec<String> {
	text.to_lowercase()
		.split_whitespace()
		.filter(|token| token.len() > 2 && !is_stop_word(token))
		.take(MAX_KEY_TERMS)
		.map(|token| token.to_string())
		.collect()
}

/// Builds a GIF search query from free text and its sentiment. Key terms are
/// augmented with the label's primary keyword; when filtering leaves nothing,
/// the label's first two keywords stand in so the query is never empty.
pub fn build_query(text: &str, label: SentimentLabel) -> String {
	let mut terms = key_terms(text);

	if terms.is_empty() {
		terms.push(label.primary_keyword().to_string());
		terms.push(label.secondary_keyword().to_string());
	} else {
		terms.push(label.primary_keyword().to_string());
	}

	terms.join(" ")
}

use std::collections::HashSet;

use quip_providers::GifRecord;

use crate::{RankedGif, ServiceError, ServiceResult, SuggestService};

/// Diagnostic echo of what the pipeline actually did: the query sent to the
/// GIF provider and the replies it was derived from, fallback path included.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DebugInfo {
	pub input_text: String,
	pub replies: Vec<String>,
	pub search_query: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SuggestionResult {
	pub gifs: Vec<RankedGif>,
	pub debug: DebugInfo,
}

impl SuggestService {
	/// The end-to-end "suggest GIFs for this message" operation.
	///
	/// When reply generation produced nothing, the message itself becomes the
	/// search query and ranking runs without keyword context; callers can see
	/// which path ran from `debug.search_query`.
	pub async fn suggest(&self, message: &str) -> ServiceResult<SuggestionResult> {
		let message = non_empty(message)?;
		let analysis = self.analyze_message(message).await;
		let (search_query, context_words, mood_words) = match analysis.replies.first() {
			Some(reply) => {
				(reply.clone(), analysis.context_words.clone(), analysis.mood_words.clone())
			},
			None => (message.to_string(), Vec::new(), Vec::new()),
		};
		let hits = self.search_gifs(&search_query).await;
		let mut ranked = self.rank(&search_query, hits, &context_words, &mood_words).await;

		ranked.truncate(self.cfg.suggest.max_results as usize);

		Ok(SuggestionResult {
			gifs: ranked,
			debug: DebugInfo {
				input_text: message.to_string(),
				replies: analysis.replies,
				search_query,
			},
		})
	}

	/// Sentiment-augmented search without reply generation: the raw query and
	/// a sentiment-enhanced variant are searched concurrently, merged by id,
	/// and ranked against the raw query. Failures along the enhanced path
	/// degrade to a single unranked raw search.
	pub async fn search_direct(&self, query: &str) -> ServiceResult<Vec<RankedGif>> {
		let query = non_empty(query)?;
		let label = match self
			.providers
			.sentiment
			.classify(&self.cfg.providers.sentiment, query)
			.await
		{
			Ok(label) => label,
			Err(err) => {
				tracing::warn!(error = %err, "Sentiment classification failed; searching raw query only.");

				return Ok(self.raw_search_fallback(query).await);
			},
		};
		let enhanced = quip_domain::build_query(query, label);
		let (raw_hits, enhanced_hits) =
			tokio::join!(self.search_gifs(query), self.search_gifs(&enhanced));
		let merged = dedupe_by_id(raw_hits, enhanced_hits);
		let context_words = quip_domain::key_terms(query);
		let mood_words: Vec<String> =
			label.mood_words().iter().map(|word| word.to_string()).collect();
		let mut ranked = self.rank(query, merged, &context_words, &mood_words).await;

		ranked.truncate(self.cfg.suggest.max_results as usize);

		Ok(ranked)
	}

	/// Provider failures never cross the service boundary; a failed search is
	/// an empty result.
	pub(crate) async fn search_gifs(&self, query: &str) -> Vec<GifRecord> {
		match self.providers.gifs.search(&self.cfg.gifs, query, self.cfg.gifs.search_limit).await {
			Ok(hits) => hits,
			Err(err) => {
				tracing::warn!(error = %err, query, "GIF search failed; continuing with no hits.");

				Vec::new()
			},
		}
	}

	async fn raw_search_fallback(&self, query: &str) -> Vec<RankedGif> {
		let mut gifs: Vec<RankedGif> = self
			.search_gifs(query)
			.await
			.into_iter()
			.map(|gif| RankedGif { gif, similarity_score: None })
			.collect();

		gifs.truncate(self.cfg.suggest.max_results as usize);

		gifs
	}
}

fn non_empty(text: &str) -> ServiceResult<&str> {
	let trimmed = text.trim();

	if trimmed.is_empty() {
		return Err(ServiceError::InvalidRequest {
			message: "Message text must be non-empty.".to_string(),
		});
	}

	Ok(trimmed)
}

// First occurrence wins, so raw-query hits keep their position ahead of
// enhanced-query hits.
fn dedupe_by_id(first: Vec<GifRecord>, second: Vec<GifRecord>) -> Vec<GifRecord> {
	let mut seen = HashSet::with_capacity(first.len() + second.len());
	let mut merged = Vec::with_capacity(first.len() + second.len());

	for gif in first.into_iter().chain(second) {
		if seen.insert(gif.id.clone()) {
			merged.push(gif);
		}
	}

	merged
}

use std::cmp::Ordering;

use quip_domain::is_shouting;
use quip_providers::GifRecord;

use crate::SuggestService;

/// A normalized GIF with its ranking score. `similarity_score` is an
/// unbounded comparator, not a probability: boosts can push it past 1 and
/// the shouting penalty below 0. It is `None` on the degraded path where
/// embedding failed and candidates pass through unranked.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedGif {
	#[serde(flatten)]
	pub gif: GifRecord,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub similarity_score: Option<f32>,
}

impl SuggestService {
	/// Scores candidates against `reference` and sorts them best first.
	///
	/// An empty candidate list short-circuits before any embedding call. An
	/// embedding failure degrades to the input order with no scores; search
	/// results are never thrown away because ranking broke.
	pub async fn rank(
		&self,
		reference: &str,
		gifs: Vec<GifRecord>,
		context_words: &[String],
		mood_words: &[String],
	) -> Vec<RankedGif> {
		if gifs.is_empty() {
			return Vec::new();
		}

		let mut texts = Vec::with_capacity(gifs.len() + 1);

		texts.push(reference_text(reference, context_words, mood_words));
		texts.extend(gifs.iter().map(|gif| gif.title.clone()));

		let vectors =
			match self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await {
				Ok(vectors) if vectors.len() == texts.len() => vectors,
				Ok(vectors) => {
					tracing::warn!(
						expected = texts.len(),
						got = vectors.len(),
						"Embedding count mismatch; returning candidates unranked.",
					);

					return unranked(gifs);
				},
				Err(err) => {
					tracing::warn!(error = %err, "Embedding failed; returning candidates unranked.");

					return unranked(gifs);
				},
			};

		score_and_sort(gifs, &vectors[0], &vectors[1..], context_words, mood_words, &self.cfg.ranking)
	}
}

fn reference_text(reference: &str, context_words: &[String], mood_words: &[String]) -> String {
	let mut text = reference.to_string();

	for word in context_words.iter().chain(mood_words) {
		text.push(' ');
		text.push_str(word);
	}

	text
}

fn unranked(gifs: Vec<GifRecord>) -> Vec<RankedGif> {
	gifs.into_iter().map(|gif| RankedGif { gif, similarity_score: None }).collect()
}

fn score_and_sort(
	gifs: Vec<GifRecord>,
	reference: &[f32],
	titles: &[Vec<f32>],
	context_words: &[String],
	mood_words: &[String],
	weights: &quip_config::Ranking,
) -> Vec<RankedGif> {
	let mut ranked: Vec<RankedGif> = gifs
		.into_iter()
		.zip(titles)
		.map(|(gif, title_vector)| {
			let mut score = cosine_similarity(reference, title_vector);
			let title_lower = gif.title.to_lowercase();

			for word in context_words {
				if title_lower.contains(&word.to_lowercase()) {
					score += weights.context_boost;
				}
			}
			for word in mood_words {
				if title_lower.contains(&word.to_lowercase()) {
					score += weights.mood_boost;
				}
			}
			if is_shouting(&gif.title) {
				score -= weights.shouting_penalty;
			}

			RankedGif { gif, similarity_score: Some(score) }
		})
		.collect();

	// Stable sort: ties keep their pre-rank order.
	ranked.sort_by(|a, b| {
		b.similarity_score.partial_cmp(&a.similarity_score).unwrap_or(Ordering::Equal)
	});

	ranked
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	let mut dot = 0.0f32;
	let mut norm_a = 0.0f32;
	let mut norm_b = 0.0f32;

	for (x, y) in a.iter().zip(b) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a.sqrt() * norm_b.sqrt())
}

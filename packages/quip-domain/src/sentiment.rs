/// Coarse polarity of a text span, as produced by the sentiment classifier.
///
/// Each label carries a fixed, ordered keyword list used to build search
/// queries, and a shorter mood-word list used to boost matching GIF titles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
	Positive,
	Negative,
	Neutral,
}

impl SentimentLabel {
	/// Ordered search keywords; the first entry is the label's primary keyword.
	pub fn keywords(self) -> &'static [&'static str] {
		match self {
			Self::Positive => {
				&["happy", "excited", "joy", "celebration", "awesome", "great", "love", "yes"]
			},
			Self::Negative => &["sad", "upset", "disappointed", "sorry", "no", "worried", "angry"],
			Self::Neutral => &["okay", "hmm", "interesting", "thinking", "maybe"],
		}
	}

	pub fn primary_keyword(self) -> &'static str {
		self.keywords()[0]
	}

	pub fn secondary_keyword(self) -> &'static str {
		self.keywords()[1]
	}

	pub fn mood_words(self) -> &'static [&'static str] {
		match self {
			Self::Positive => &["happy", "excited", "joy"],
			Self::Negative => &["sad", "upset", "sorry"],
			Self::Neutral => &["okay", "thinking", "maybe"],
		}
	}

	/// Maps a classifier's raw label onto the three-label taxonomy. Anything
	/// outside the taxonomy is a provider contract violation, not a fourth
	/// label.
	pub fn from_provider_label(raw: &str) -> Option<Self> {
		let trimmed = raw.trim();

		if trimmed.eq_ignore_ascii_case("positive") {
			Some(Self::Positive)
		} else if trimmed.eq_ignore_ascii_case("negative") {
			Some(Self::Negative)
		} else if trimmed.eq_ignore_ascii_case("neutral") {
			Some(Self::Neutral)
		} else {
			None
		}
	}
}

pub mod query;
pub mod sentiment;
pub mod title;

pub use query::{build_query, is_stop_word, key_terms};
pub use sentiment::SentimentLabel;
pub use title::is_shouting;

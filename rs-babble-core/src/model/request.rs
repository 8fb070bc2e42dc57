/// Shape of a generation request.
///
/// Each variant maps to one generation mode of
/// [`MarkovModel`](super::markov_model::MarkovModel).
///
/// # Variants
/// - `Speech`: random start, length bounded by the retry budget.
/// - `WithNumWords(n)`: random start, exactly `n` words.
/// - `BeginningWithWord(w)`: starts with `w`, length bounded by the retry budget.
/// - `BeginningWithWordAndNumWords(w, n)`: starts with `w`, exactly `n` words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
	Speech,
	WithNumWords(i64),
	BeginningWithWord(String),
	BeginningWithWordAndNumWords(String, i64),
}

impl Request {
	/// Builds the request matching an optional start word and word count.
	pub fn new(first_word: Option<String>, num_words: Option<i64>) -> Self {
		match (first_word, num_words) {
			(None, None) => Request::Speech,
			(None, Some(n)) => Request::WithNumWords(n),
			(Some(w), None) => Request::BeginningWithWord(w),
			(Some(w), Some(n)) => Request::BeginningWithWordAndNumWords(w, n),
		}
	}

	/// Returns the requested first word, if any.
	pub fn first_word(&self) -> Option<&str> {
		match self {
			Request::BeginningWithWord(w) | Request::BeginningWithWordAndNumWords(w, _) => Some(w),
			_ => None,
		}
	}

	/// Returns the requested word count, if any.
	pub fn num_words(&self) -> Option<i64> {
		match self {
			Request::WithNumWords(n) | Request::BeginningWithWordAndNumWords(_, n) => Some(*n),
			_ => None,
		}
	}
}

//! Error types for the rs-babble-core crate.

/// Error returned when a [`MarkovModel`](crate::MarkovModel) cannot be built.
///
/// No partial model is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	/// The corpus is empty or holds no word once tokenized.
	#[error("corpus is empty")]
	EmptyCorpus,

	/// The retry budget is negative.
	#[error("invalid retry budget: {max_retries} (must be >= 0)")]
	InvalidRetryBudget {
		/// The rejected value.
		max_retries: i64,
	},

	/// The corpus is too short to learn a single transition.
	#[error("corpus has {tokens} token(s), need at least 2 to learn a transition")]
	TooFewTokens {
		/// Number of tokens produced by the tokenizer.
		tokens: usize,
	},
}

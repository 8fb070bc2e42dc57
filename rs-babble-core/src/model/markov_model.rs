use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::sampler::{join_words, walk_num_words, walk_with_retries};
use super::token::{Token, tokenize};
use super::transition::TransitionTable;
use crate::error::ModelError;

/// Default length, in tokens, after which a sentence without a line break
/// is closed anyway.
pub const DEFAULT_MAX_SENTENCE_TOKENS: usize = 256;

/// A first-order Markov model trained on a corpus.
///
/// This struct holds:
/// - `transitions`: the successor distribution of every observed token.
/// - `line_starts`: tokens seen at the beginning of a line, duplicates kept.
/// - `max_retries`: the retry budget of the unconstrained generation modes.
/// - `max_sentence_tokens`: the longest run without a line break before a
///   boundary is forced.
///
/// The model is read-only once built. Every generation method takes the
/// random source explicitly, so sharing a model between threads needs no
/// locking; see [`Generator`](super::generator::Generator) for a wrapper
/// that owns its random source.
#[derive(Clone, Debug)]
pub struct MarkovModel {
	transitions: TransitionTable,
	line_starts: Vec<Token>,
	max_retries: usize,
	max_sentence_tokens: usize,
}

impl MarkovModel {
	/// Tokenizes `corpus` and trains a model on it.
	///
	/// # Errors
	/// Checked in this order:
	/// - [`ModelError::EmptyCorpus`] if the corpus holds no word
	/// - [`ModelError::InvalidRetryBudget`] if `max_retries < 0`
	/// - [`ModelError::TooFewTokens`] if no transition can be learned
	pub fn new(corpus: &str, max_retries: i64) -> Result<Self, ModelError> {
		let tokens = tokenize(corpus);
		Self::from_tokens(&tokens, max_retries)
	}

	/// Trains a model on an already tokenized corpus.
	///
	/// Same validation as [`MarkovModel::new`].
	pub fn from_tokens(tokens: &[Token], max_retries: i64) -> Result<Self, ModelError> {
		if !tokens.iter().any(Token::is_speakable) {
			return Err(ModelError::EmptyCorpus);
		}
		let max_retries =
			usize::try_from(max_retries).map_err(|_| ModelError::InvalidRetryBudget { max_retries })?;

		let (transitions, line_starts) = TransitionTable::build(tokens)?;
		if transitions.is_empty() {
			return Err(ModelError::TooFewTokens { tokens: tokens.len() });
		}

		debug!(
			"trained model on {} tokens: {} states, {} line starts",
			tokens.len(),
			transitions.len(),
			line_starts.len()
		);

		Ok(Self {
			transitions,
			line_starts,
			max_retries,
			max_sentence_tokens: DEFAULT_MAX_SENTENCE_TOKENS,
		})
	}

	/// Sets the sentence length after which a boundary is forced.
	///
	/// Values below 1 are raised to 1.
	pub fn with_max_sentence_tokens(mut self, max_sentence_tokens: usize) -> Self {
		self.max_sentence_tokens = max_sentence_tokens.max(1);
		self
	}

	/// Returns the learned transition table.
	pub fn transitions(&self) -> &TransitionTable {
		&self.transitions
	}

	/// Returns the line-start sequence, in corpus order.
	pub fn line_starts(&self) -> &[Token] {
		&self.line_starts
	}

	/// Returns the retry budget.
	pub fn max_retries(&self) -> usize {
		self.max_retries
	}

	/// Returns the forced-boundary sentence length.
	pub fn max_sentence_tokens(&self) -> usize {
		self.max_sentence_tokens
	}

	/// Generates speech of variable length from a random line start.
	///
	/// The first sentence is thrown away as warm-up; each following line
	/// break adds 1, 2 or 3 to a retry counter, and generation stops once
	/// the counter reaches the retry budget.
	pub fn generate_speech<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		let seed = self.random_line_start(rng);
		let speech = walk_with_retries(
			&self.transitions,
			seed,
			true,
			self.max_retries,
			self.max_sentence_tokens,
			rng,
		);
		join_words(&speech)
	}

	/// Generates exactly `num_words` words from a random line start.
	///
	/// Returns `""` when `num_words <= 0`.
	pub fn generate_speech_with_num_words<R: Rng + ?Sized>(&self, num_words: i64, rng: &mut R) -> String {
		let Ok(num_words) = usize::try_from(num_words) else {
			return String::new();
		};
		if num_words == 0 {
			return String::new();
		}
		let seed = self.random_line_start(rng);
		join_words(&walk_num_words(&self.transitions, seed, num_words, rng))
	}

	/// Generates speech starting with `first_word`, under the retry budget.
	///
	/// The word is used verbatim; the caller is expected to have lowercased
	/// it. Unlike [`MarkovModel::generate_speech`], the first sentence is
	/// kept. An unknown word is followed by a random corpus token.
	///
	/// A blank `first_word` cannot be spoken and is dropped from the output,
	/// so the speech then starts with whatever follows it. Callers that must
	/// echo the word reject blank input first, as
	/// [`CommandParser`](crate::command::CommandParser) does.
	pub fn generate_speech_beginning_with_word<R: Rng + ?Sized>(
		&self,
		first_word: &str,
		rng: &mut R,
	) -> String {
		let speech = walk_with_retries(
			&self.transitions,
			Token::word(first_word),
			false,
			self.max_retries,
			self.max_sentence_tokens,
			rng,
		);
		join_words(&speech)
	}

	/// Generates exactly `num_words` words starting with `first_word`.
	///
	/// Returns `""` when `num_words <= 0`. A blank `first_word` is rolled
	/// forward like any blank token, so all `num_words` words then come
	/// from the corpus.
	pub fn generate_speech_beginning_with_word_and_with_num_words<R: Rng + ?Sized>(
		&self,
		first_word: &str,
		num_words: i64,
		rng: &mut R,
	) -> String {
		let Ok(num_words) = usize::try_from(num_words) else {
			return String::new();
		};
		join_words(&walk_num_words(
			&self.transitions,
			Token::word(first_word),
			num_words,
			rng,
		))
	}

	/// Draws a token from the line-start sequence, weighted by duplicates.
	fn random_line_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Token {
		// Should not panic, the first corpus token is always a line start
		self.line_starts
			.choose(rng)
			.expect("line starts hold at least the first token")
			.clone()
	}
}

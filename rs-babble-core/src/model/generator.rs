use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::markov_model::MarkovModel;
use crate::model::request::Request;

/// High-level generator owning a model and its random source.
///
/// # Responsibilities
/// - Seed the random source once, explicitly
/// - Serve the four generation modes without threading an rng through callers
/// - Dispatch a [`Request`] to the matching mode
///
/// Use [`Generator::with_seed`] for reproducible output.
#[derive(Debug)]
pub struct Generator<R = StdRng> {
	model: MarkovModel,
	rng: R,
}

impl Generator<StdRng> {
	/// Creates a generator seeded from the operating system.
	pub fn new(model: MarkovModel) -> Self {
		Self::with_rng(model, StdRng::from_os_rng())
	}

	/// Creates a generator with a deterministic seed.
	pub fn with_seed(model: MarkovModel, seed: u64) -> Self {
		Self::with_rng(model, StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Generator<R> {
	/// Creates a generator drawing from the given random source.
	pub fn with_rng(model: MarkovModel, rng: R) -> Self {
		Self { model, rng }
	}

	/// Returns the underlying model.
	pub fn model(&self) -> &MarkovModel {
		&self.model
	}

	/// See [`MarkovModel::generate_speech`].
	pub fn generate_speech(&mut self) -> String {
		self.model.generate_speech(&mut self.rng)
	}

	/// See [`MarkovModel::generate_speech_with_num_words`].
	pub fn generate_speech_with_num_words(&mut self, num_words: i64) -> String {
		self.model.generate_speech_with_num_words(num_words, &mut self.rng)
	}

	/// See [`MarkovModel::generate_speech_beginning_with_word`].
	pub fn generate_speech_beginning_with_word(&mut self, first_word: &str) -> String {
		self.model.generate_speech_beginning_with_word(first_word, &mut self.rng)
	}

	/// See [`MarkovModel::generate_speech_beginning_with_word_and_with_num_words`].
	pub fn generate_speech_beginning_with_word_and_with_num_words(&mut self, first_word: &str, num_words: i64) -> String {
		self.model
			.generate_speech_beginning_with_word_and_with_num_words(first_word, num_words, &mut self.rng)
	}

	/// Runs the generation mode matching `request`.
	pub fn respond(&mut self, request: &Request) -> String {
		trace!("responding to {request:?}");
		match request {
			Request::Speech => self.generate_speech(),
			Request::WithNumWords(n) => self.generate_speech_with_num_words(*n),
			Request::BeginningWithWord(w) => self.generate_speech_beginning_with_word(w),
			Request::BeginningWithWordAndNumWords(w, n) => {
				self.generate_speech_beginning_with_word_and_with_num_words(w, *n)
			}
		}
	}
}

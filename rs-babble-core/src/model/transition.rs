use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::StateCounter;
use super::token::Token;
use crate::error::ModelError;

pub use super::state::State;

/// Learned first-order transition table.
///
/// Maps every token that was followed by something in the corpus to the
/// empirical distribution of what followed it.
///
/// # Responsibilities
/// - Count consecutive token pairs
/// - Normalize counts into per-token distributions
/// - Collect the tokens that start a line
///
/// # Invariants
/// - Every key has at least one successor
/// - Each distribution sums to 1.0
/// - `keys` lists the keys of `states`, in the same order
/// - `speakable` lists every distinct speakable token of the corpus,
///   successors included
/// - Immutable once built
#[derive(Clone, Debug)]
pub struct TransitionTable {
	/// Mapping from a source token to its successor distribution
	states: BTreeMap<Token, State>,

	/// Keys of `states`, kept as a slice for uniform selection
	keys: Vec<Token>,

	/// Vocabulary a walk can escape to when it is stuck among blanks
	speakable: Vec<Token>,
}

impl TransitionTable {
	/// Builds the table and the line-start sequence from a token sequence.
	///
	/// # Behavior
	/// - Counts each consecutive pair `(tokens[i], tokens[i + 1])`
	/// - Every token following a line break is appended to the line starts
	/// - The first token of the corpus is always the first line start
	///
	/// Line starts keep their duplicates: a token that starts three lines is
	/// three times as likely to be picked as a random start.
	///
	/// # Errors
	/// Returns [`ModelError::EmptyCorpus`] if `tokens` is empty.
	pub fn build(tokens: &[Token]) -> Result<(Self, Vec<Token>), ModelError> {
		let first = tokens.first().ok_or(ModelError::EmptyCorpus)?;

		let mut counters: BTreeMap<Token, StateCounter> = BTreeMap::new();
		let mut line_starts = vec![first.clone()];

		for pair in tokens.windows(2) {
			let (current, successor) = (&pair[0], &pair[1]);

			counters
				.entry(current.clone())
				.or_default()
				.add_transition(successor.clone());

			if current.is_line_break() {
				line_starts.push(successor.clone());
			}
		}

		let states: BTreeMap<Token, State> = counters
			.into_iter()
			.map(|(token, counter)| (token, counter.normalize()))
			.collect();
		let keys = states.keys().cloned().collect();
		let speakable = tokens
			.iter()
			.filter(|t| t.is_speakable())
			.cloned()
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect();

		Ok((Self { states, keys, speakable }, line_starts))
	}

	/// Returns the successor distribution of `token`, if it has one.
	pub fn get(&self, token: &Token) -> Option<&State> {
		self.states.get(token)
	}

	/// Returns `true` if `token` has observed successors.
	pub fn contains(&self, token: &Token) -> bool {
		self.states.contains_key(token)
	}

	/// Number of source tokens.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Returns `true` if no transition was learned.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Iterates over the source tokens in table order.
	pub fn keys(&self) -> impl Iterator<Item = &Token> {
		self.keys.iter()
	}

	/// Iterates over `(source, distribution)` pairs in table order.
	pub fn iter(&self) -> impl Iterator<Item = (&Token, &State)> {
		self.states.iter()
	}

	/// Picks a source token uniformly at random.
	///
	/// Returns `None` only for an empty table.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		self.keys.choose(rng)
	}

	/// Iterates over the distinct speakable tokens of the corpus.
	pub fn speakable(&self) -> impl Iterator<Item = &Token> {
		self.speakable.iter()
	}

	/// Picks a speakable corpus token uniformly at random.
	///
	/// Returns `None` if the corpus held only line breaks and blank words.
	pub fn random_speakable<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		self.speakable.choose(rng)
	}
}

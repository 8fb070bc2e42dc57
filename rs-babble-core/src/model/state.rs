use std::collections::BTreeMap;

use rand::Rng;

use super::token::Token;

/// Occurrence counts for one source token, gathered while learning.
///
/// Conceptually, this is a node in a Markov chain whose outgoing edges
/// are weighted by their number of observations. Counts are turned into
/// probabilities once, by [`StateCounter::normalize`].
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
#[derive(Clone, Debug, Default)]
pub(crate) struct StateCounter {
	/// Outgoing transitions indexed by the successor token.
	/// Example: { "up" => 1, "out" => 1 }
	transitions: BTreeMap<Token, usize>,
}

impl StateCounter {
	/// Records an occurrence of a transition toward `successor`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add_transition(&mut self, successor: Token) {
		*self.transitions.entry(successor).or_insert(0) += 1;
	}

	/// Divides every count by the total, producing the successor distribution.
	///
	/// Entries keep the token order of the counter, which makes the
	/// cumulative scan in [`State::sample`] stable.
	pub fn normalize(self) -> State {
		let total: usize = self.transitions.values().sum();
		let successors = self
			.transitions
			.into_iter()
			.map(|(successor, occurrence)| (successor, occurrence as f64 / total as f64))
			.collect();
		State { successors }
	}
}

/// Successor distribution of one source token.
///
/// ## Invariants
/// - At least one successor
/// - Every probability is in (0, 1] and they sum to 1.0
/// - Order is fixed at construction
#[derive(Clone, Debug, PartialEq)]
pub struct State {
	successors: Vec<(Token, f64)>,
}

impl State {
	#[cfg(test)]
	pub(crate) fn from_probabilities(successors: Vec<(Token, f64)>) -> Self {
		Self { successors }
	}

	/// Draws a successor using weighted random sampling.
	///
	/// A uniform `r` in `[0, 1)` is compared against the running sum of
	/// probabilities; the first successor whose cumulative mass reaches `r`
	/// wins. If rounding leaves the total just under `r`, the last
	/// successor covers the residual.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &Token {
		let r: f64 = rng.random();

		let mut cumulative = 0.0;
		for (successor, probability) in &self.successors {
			cumulative += probability;
			if cumulative >= r {
				return successor;
			}
		}

		// Residual mass lost to rounding belongs to the last entry
		&self.successors[self.successors.len() - 1].0
	}

	/// Returns the probability of moving to `successor`, if ever observed.
	pub fn probability(&self, successor: &Token) -> Option<f64> {
		self.successors
			.iter()
			.find(|(token, _)| token == successor)
			.map(|(_, p)| *p)
	}

	/// Iterates over `(successor, probability)` pairs in sampling order.
	pub fn successors(&self) -> impl Iterator<Item = (&Token, f64)> {
		self.successors.iter().map(|(t, p)| (t, *p))
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.successors.len()
	}
}

use log::trace;
use rand::Rng;

use super::token::Token;
use super::transition::TransitionTable;

/// Picks the token that follows `current`.
///
/// - If `current` has observed successors, one is drawn from its
///   distribution (see [`State::sample`](super::transition::State::sample)).
/// - Otherwise a source token is picked uniformly from the whole table and
///   returned as the "next" token. This is how an unknown starting word
///   escapes into the corpus.
///
/// # Panics
/// If the table is empty. [`MarkovModel`](super::markov_model::MarkovModel)
/// never builds one.
pub fn next_token<R: Rng + ?Sized>(current: &Token, table: &TransitionTable, rng: &mut R) -> Token {
	if let Some(state) = table.get(current) {
		return state.sample(rng).clone();
	}

	// Should not panic, tables are never empty once inside a model
	table
		.random_key(rng)
		.expect("transition table has at least one key")
		.clone()
}

/// Walks the table until the retry budget is spent.
///
/// # Parameters
/// - `seed`: first token of the walk
/// - `discard_first_sentence`: throw away everything up to the first
///   sentence boundary before the budget starts counting
/// - `max_retries`: stop once the retry counter reaches this value
/// - `max_sentence_tokens`: a run this long without a line break counts as
///   a boundary too
///
/// # Behavior
/// Every boundary after the (optionally discarded) first sentence adds a
/// random value from `{1, 2, 3}` to the retry counter. The seed is always
/// part of the walk, so a zero budget yields the seed alone.
pub fn walk_with_retries<R: Rng + ?Sized>(
	table: &TransitionTable,
	seed: Token,
	discard_first_sentence: bool,
	max_retries: usize,
	max_sentence_tokens: usize,
	rng: &mut R,
) -> Vec<Token> {
	let mut speech = vec![seed.clone()];
	let mut current = seed;
	let mut retries = 0;
	let mut sentence_len = 0;
	let mut first_sentence_pending = discard_first_sentence;

	while retries < max_retries {
		current = next_token(&current, table, rng);
		sentence_len += 1;

		if current.is_line_break() || sentence_len >= max_sentence_tokens {
			sentence_len = 0;
			if first_sentence_pending {
				first_sentence_pending = false;
				speech.clear();
			} else {
				retries += rng.random_range(1..=3);
			}
		}

		if retries < max_retries {
			speech.push(current.clone());
		}
	}

	trace!("walked {} tokens, retry counter at {retries}", speech.len());
	speech
}

/// Steps followed through line breaks and blank words before a walk jumps
/// to a random speakable token instead.
const MAX_BLANK_ROLLS: usize = 32;

/// Rolls `token` forward until a speakable token comes up.
///
/// A corpus ending in blank lines learns a closed loop of line breaks and
/// blank words. After [`MAX_BLANK_ROLLS`] steps the walk leaves it through
/// a uniformly drawn speakable token. Returns `None` only if the corpus
/// has no speakable token at all.
fn roll_to_speakable<R: Rng + ?Sized>(token: Token, table: &TransitionTable, rng: &mut R) -> Option<Token> {
	let mut current = token;
	for _ in 0..MAX_BLANK_ROLLS {
		if current.is_speakable() {
			return Some(current);
		}
		current = next_token(&current, table, rng);
	}
	if current.is_speakable() {
		return Some(current);
	}

	trace!("no word after {MAX_BLANK_ROLLS} steps, jumping to a random one");
	table.random_speakable(rng).cloned()
}

/// Walks the table until exactly `num_words` speakable tokens are collected.
///
/// Line breaks and blank words never take a slot: whenever one comes up,
/// the walk keeps rolling until a speakable token appears. The seed itself
/// is rolled forward the same way if it cannot be spoken.
///
/// The result is shorter than `num_words` only for a table without any
/// speakable token, which [`MarkovModel`](super::markov_model::MarkovModel)
/// never builds.
pub fn walk_num_words<R: Rng + ?Sized>(
	table: &TransitionTable,
	seed: Token,
	num_words: usize,
	rng: &mut R,
) -> Vec<Token> {
	// Sized by the walk, never by the caller's count
	let mut speech = Vec::new();
	if num_words == 0 {
		return speech;
	}

	let Some(mut current) = roll_to_speakable(seed, table, rng) else {
		return speech;
	};

	loop {
		let next = next_token(&current, table, rng);
		let Some(next) = roll_to_speakable(next, table, rng) else {
			return speech;
		};
		speech.push(std::mem::replace(&mut current, next));
		if speech.len() == num_words {
			break;
		}
	}

	speech
}

/// Joins the speakable tokens of a walk with single spaces.
///
/// Line breaks and blank words are dropped; the result is trimmed.
pub fn join_words(speech: &[Token]) -> String {
	speech
		.iter()
		.filter(|t| t.is_speakable())
		.filter_map(Token::as_word)
		.collect::<Vec<_>>()
		.join(" ")
		.trim()
		.to_owned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::token::tokenize;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn table(corpus: &str) -> TransitionTable {
		TransitionTable::build(&tokenize(corpus)).unwrap().0
	}

	#[test]
	fn next_token_follows_certain_transitions() {
		let t = table("roll up and roll out");
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..50 {
			assert_eq!(next_token(&Token::word("up"), &t, &mut rng), Token::word("and"));
		}
	}

	#[test]
	fn next_token_of_unknown_word_is_a_table_key() {
		let t = table("roll up and roll out");
		let mut rng = StdRng::seed_from_u64(2);
		for _ in 0..200 {
			let next = next_token(&Token::word("zebra"), &t, &mut rng);
			assert!(t.contains(&next), "{next} is not a key");
		}
	}

	#[test]
	fn dead_end_escapes_to_a_key() {
		// "out" ends the corpus and has no successors
		let t = table("roll up and roll out");
		let mut rng = StdRng::seed_from_u64(3);
		let next = next_token(&Token::word("out"), &t, &mut rng);
		assert!(t.contains(&next));
	}

	#[test]
	fn num_words_walk_has_exact_length() {
		let t = table("the quick brown fox\njumps over the lazy dog.\n");
		let mut rng = StdRng::seed_from_u64(4);
		for n in [1, 2, 17, 42, 300] {
			let speech = walk_num_words(&t, Token::word("the"), n, &mut rng);
			assert_eq!(speech.len(), n);
			assert!(speech.iter().all(Token::is_speakable));
		}
	}

	#[test]
	fn num_words_walk_rolls_blank_seed_forward() {
		let t = table("foo\n");
		let mut rng = StdRng::seed_from_u64(5);
		let speech = walk_num_words(&t, Token::word(""), 3, &mut rng);
		assert_eq!(speech, vec![Token::word("foo"); 3]);
	}

	#[test]
	fn zero_budget_keeps_only_the_seed() {
		let t = table("a b\nc d\n");
		let mut rng = StdRng::seed_from_u64(6);
		let speech = walk_with_retries(&t, Token::word("zzz"), false, 0, 256, &mut rng);
		assert_eq!(speech, vec![Token::word("zzz")]);
	}

	#[test]
	fn retry_walk_keeps_seed_first() {
		let t = table("a b\nc d\n");
		let mut rng = StdRng::seed_from_u64(7);
		let speech = walk_with_retries(&t, Token::word("c"), false, 10, 256, &mut rng);
		assert_eq!(speech[0], Token::word("c"));
	}

	#[test]
	fn retry_walk_discards_the_first_sentence() {
		let t = table("seed x y\nnext line here\n");
		let mut rng = StdRng::seed_from_u64(8);
		let speech = walk_with_retries(&t, Token::word("seed"), true, 10, 256, &mut rng);
		// The walk restarts at the first line break
		assert_eq!(speech[0], Token::LineBreak);
	}

	#[test]
	fn retry_walk_terminates_without_line_breaks() {
		let t = table("roll up and roll out");
		let mut rng = StdRng::seed_from_u64(9);
		let speech = walk_with_retries(&t, Token::word("roll"), true, 20, 16, &mut rng);
		assert!(!speech.is_empty());
		assert!(speech.len() <= 21 * 16);
	}

	#[test]
	fn join_drops_markers_and_blanks() {
		let speech = vec![
			Token::LineBreak,
			Token::word("hello"),
			Token::word(""),
			Token::LineBreak,
			Token::word("world"),
			Token::word(" "),
		];
		assert_eq!(join_words(&speech), "hello world");
		assert_eq!(join_words(&[]), "");
	}

	#[test]
	fn num_words_walk_leaves_blank_loops() {
		// Trailing blank lines learn LB -> "" -> LB with no word in reach
		for corpus in ["foo bar\n\n", "foo bar\n\n\n"] {
			let t = table(corpus);
			for seed in 0..20 {
				let mut rng = StdRng::seed_from_u64(seed);
				for start in [Token::word(""), Token::LineBreak, Token::word("bar")] {
					let speech = walk_num_words(&t, start, 25, &mut rng);
					assert_eq!(speech.len(), 25, "{corpus:?}");
					assert!(
						speech.iter().all(|w| *w == Token::word("foo") || *w == Token::word("bar")),
						"{corpus:?}: {speech:?}"
					);
				}
			}
		}
	}

	#[test]
	fn num_words_walk_keeps_a_speakable_seed() {
		let t = table("foo bar\n\n");
		let mut rng = StdRng::seed_from_u64(10);
		let speech = walk_num_words(&t, Token::word("bar"), 2, &mut rng);
		assert_eq!(speech[0], Token::word("bar"));
	}

	#[test]
	fn num_words_walk_without_vocabulary_stops() {
		let t = table(" \n ");
		let mut rng = StdRng::seed_from_u64(11);
		assert!(walk_num_words(&t, Token::word(""), 5, &mut rng).is_empty());
		// No storage is reserved up front for the requested count
		assert!(walk_num_words(&t, Token::word(""), usize::MAX, &mut rng).is_empty());
	}

	#[test]
	fn retry_walk_with_one_word_lines_counts_sentences() {
		// Every word is followed by a line break and every line break by a word
		let t = table("a\nb\nc\na");
		for seed in 0..100 {
			let mut rng = StdRng::seed_from_u64(seed);
			let speech = walk_with_retries(&t, Token::word("a"), true, 1, 256, &mut rng);
			// First sentence dropped, second one kept whole, budget spent at its end
			assert_eq!(speech.len(), 2, "{speech:?}");
			assert_eq!(speech[0], Token::LineBreak);
			assert!(speech[1].is_speakable());

			let speech = walk_with_retries(&t, Token::word("b"), false, 1, 256, &mut rng);
			assert_eq!(speech, vec![Token::word("b")]);
		}
	}
}

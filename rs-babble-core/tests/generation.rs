//! Integration tests for the generation modes and the command front end.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_babble_core::{CommandParser, Generator, MarkovModel, Request};

const CORPUS: &str = "the quick brown fox jumps over the lazy dog\n";

fn generator(seed: u64) -> Generator {
	Generator::with_seed(MarkovModel::new(CORPUS, 5).unwrap(), seed)
}

#[test]
fn foo_five_words_from_any_model() {
	for corpus in [CORPUS, "roll up and roll out", "multiline\ncorpus"] {
		let model = MarkovModel::new(corpus, 5).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		let speech = model.generate_speech_beginning_with_word_and_with_num_words("foo", 5, &mut rng);
		let words: Vec<&str> = speech.split(' ').collect();
		assert_eq!(words.len(), 5, "{speech:?}");
		assert_eq!(words[0], "foo");
	}
}

#[test]
fn unconstrained_speech_only_uses_corpus_words() {
	let mut generator = generator(11);
	let vocabulary: Vec<&str> = CORPUS.split_whitespace().collect();
	for _ in 0..20 {
		let speech = generator.generate_speech();
		for word in speech.split_whitespace() {
			assert!(vocabulary.contains(&word), "unexpected word {word:?}");
		}
	}
}

#[test]
fn single_line_corpus_terminates() {
	let model = MarkovModel::new("roll up and roll out", 20).unwrap();
	let mut rng = StdRng::seed_from_u64(5);
	let speech = model.generate_speech(&mut rng);
	assert!(!speech.is_empty());
}

#[test]
fn zero_retry_budget() {
	// Single line start, so the random start is known
	let model = MarkovModel::new("the quick brown fox", 0).unwrap();
	let mut rng = StdRng::seed_from_u64(5);
	assert_eq!(model.generate_speech(&mut rng), "the");
	assert_eq!(model.generate_speech_beginning_with_word("lazy", &mut rng), "lazy");
}

/// One word per line, every word followed by a line break and every line
/// break by a word: each sentence is exactly one spoken word.
const ONE_WORD_LINES: &str = "a\nb\nc\na";

/// Sentences spoken by unconstrained speech, one per seed.
fn sentence_counts(max_retries: i64, seeds: u64) -> Vec<usize> {
	let model = MarkovModel::new(ONE_WORD_LINES, max_retries).unwrap();
	(0..seeds)
		.map(|seed| {
			let speech = model.generate_speech(&mut StdRng::seed_from_u64(seed));
			speech.split_whitespace().count()
		})
		.collect()
}

#[test]
fn budget_of_one_speaks_the_second_sentence_only() {
	assert!(sentence_counts(1, 200).iter().all(|&n| n == 1));

	let model = MarkovModel::new(ONE_WORD_LINES, 1).unwrap();
	let mut rng = StdRng::seed_from_u64(1);
	// The first sentence is kept when the start word is given
	assert_eq!(model.generate_speech_beginning_with_word("b", &mut rng), "b");
}

#[test]
fn retry_increments_are_one_to_three() {
	// Budget 2: a first increment of 1 allows a second sentence
	let counts = sentence_counts(2, 300);
	assert!(counts.iter().all(|n| (1..=2).contains(n)), "{counts:?}");
	assert!(counts.contains(&1) && counts.contains(&2));

	// Budget 3: one, two or three sentences, all reachable
	let counts = sentence_counts(3, 300);
	assert!(counts.iter().all(|n| (1..=3).contains(n)), "{counts:?}");
	for n in 1..=3 {
		assert!(counts.contains(&n), "never spoke {n} sentence(s)");
	}

	// Budget 30: between 30 / 3 and 30 sentences, and increments of 3
	// do occur, otherwise no run could end before its 15th sentence
	let counts = sentence_counts(30, 300);
	assert!(counts.iter().all(|n| (10..=30).contains(n)), "{counts:?}");
	assert!(counts.iter().any(|&n| n < 15), "{counts:?}");
}

#[test]
fn trailing_blank_lines_do_not_stall_counted_speech() {
	for corpus in ["foo bar\n\n", "foo bar\n\n\n"] {
		let model = MarkovModel::new(corpus, 5).unwrap();
		for seed in 0..20 {
			let mut rng = StdRng::seed_from_u64(seed);
			let speech = model.generate_speech_with_num_words(3, &mut rng);
			assert_eq!(speech.split(' ').count(), 3, "{corpus:?}: {speech:?}");

			let speech = model.generate_speech_beginning_with_word_and_with_num_words("bar", 2, &mut rng);
			let words: Vec<&str> = speech.split(' ').collect();
			assert_eq!(words.len(), 2, "{corpus:?}: {speech:?}");
			assert_eq!(words[0], "bar");
			assert!(["foo", "bar"].contains(&words[1]));

			assert!(!model.generate_speech(&mut rng).contains('\n'));
		}
	}
}

#[test]
fn commands_drive_the_generator() {
	let parser = CommandParser::new("foo", "!");
	let mut generator = generator(21);

	let request = parser.parse("!foo42").unwrap().unwrap();
	assert_eq!(request, Request::WithNumWords(42));
	assert_eq!(generator.respond(&request).split(' ').count(), 42);

	let request = parser.parse("!foo FOO").unwrap().unwrap();
	assert!(generator.respond(&request).starts_with("foo"));

	let request = parser.parse("!foo foo 42 bar baz").unwrap().unwrap();
	let speech = generator.respond(&request);
	let words: Vec<&str> = speech.split(' ').collect();
	assert_eq!((words[0], words.len()), ("foo", 42));

	let request = parser.parse("!foo 0").unwrap().unwrap();
	assert_eq!(generator.respond(&request), "");
}

#[test]
fn shared_model_across_threads() {
	let model = std::sync::Arc::new(MarkovModel::new(CORPUS, 5).unwrap());
	let handles: Vec<_> = (0..4)
		.map(|i| {
			let model = std::sync::Arc::clone(&model);
			std::thread::spawn(move || {
				let mut rng = StdRng::seed_from_u64(i);
				model.generate_speech_with_num_words(10, &mut rng)
			})
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().unwrap().split(' ').count(), 10);
	}
}

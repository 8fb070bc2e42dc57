use std::fmt;

/// Text used when a line break has to be shown, e.g. in debug output.
pub const LINE_BREAK_MARKER: &str = "<LINEBREAK>";

/// Atomic unit processed by the model.
///
/// A token is either a case-folded word, kept exactly as it appeared
/// between single spaces (punctuation included), or the line-break marker.
/// Tokens compare by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
	Word(String),
	LineBreak,
}

impl Token {
	/// Creates a word token. The text is used verbatim.
	pub fn word(text: impl Into<String>) -> Self {
		Token::Word(text.into())
	}

	/// Returns `true` for the line-break marker.
	pub fn is_line_break(&self) -> bool {
		matches!(self, Token::LineBreak)
	}

	/// Returns the word text, or `None` for the line-break marker.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Token::Word(w) => Some(w),
			Token::LineBreak => None,
		}
	}

	/// Returns `true` if this token can appear in generated output.
	///
	/// Line breaks and words made only of whitespace (the empty strings left
	/// by consecutive spaces, stray tabs, ...) are never spoken.
	pub fn is_speakable(&self) -> bool {
		self.as_word().is_some_and(|w| !w.trim().is_empty())
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Word(w) => f.write_str(w),
			Token::LineBreak => f.write_str(LINE_BREAK_MARKER),
		}
	}
}

/// Splits a corpus into tokens.
///
/// - Every `\n` becomes its own [`Token::LineBreak`], padded with spaces
/// - The whole corpus is lowercased
/// - Splits on single spaces, so runs of spaces leave empty words behind
///
/// `""` yields a single empty word. Deterministic, no side effects.
pub fn tokenize(corpus: &str) -> Vec<Token> {
	let padded = corpus.replace('\n', " \n ");
	padded
		.to_lowercase()
		.split(' ')
		.map(|piece| match piece {
			"\n" => Token::LineBreak,
			word => Token::word(word),
		})
		.collect()
}

use regex::Regex;

use crate::model::request::Request;

/// Why a message addressed to the bot cannot be turned into a request.
///
/// The `Display` text is meant to be posted back as the reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
	/// The message mentions another user.
	#[error("@'ing people isn't supported yet :(")]
	MentionsUnsupported,

	/// Two arguments were given but the second is not a number.
	#[error("\"{arg}\" is not a number. Example usage: `{invocation} <firstWord> <numWords>`")]
	NotANumber {
		/// The offending argument.
		arg: String,
		/// Prefix and name that invoke the bot.
		invocation: String,
	},
}

/// Parses chat messages into generation requests.
///
/// A message invokes the bot when it starts with `<prefix><name>`. The rest
/// of the message is sanitized (trimmed, lowercased, stripped to ASCII
/// letters, digits and spaces) and read as up to two arguments:
///
/// | Arguments           | Request                              |
/// |---------------------|--------------------------------------|
/// | none                | `Speech`                             |
/// | `<n>`               | `WithNumWords(n)`                    |
/// | `<word>`            | `BeginningWithWord(word)`            |
/// | `<word> <n> ...`    | `BeginningWithWordAndNumWords`       |
///
/// Arguments after the second are ignored.
#[derive(Debug, Clone)]
pub struct CommandParser {
	invocation: String,
	mention: Regex,
	disallowed: Regex,
}

impl CommandParser {
	/// Creates a parser for a bot invoked as `<prefix><name>`.
	pub fn new(name: &str, prefix: &str) -> Self {
		Self {
			invocation: format!("{prefix}{name}"),
			// Should not panic, both patterns are constant
			mention: Regex::new(r"<@!?\d+>").expect("valid mention pattern"),
			disallowed: Regex::new(r"[^a-zA-Z0-9 ]+").expect("valid sanitizer pattern"),
		}
	}

	/// Returns the text that invokes the bot.
	pub fn invocation(&self) -> &str {
		&self.invocation
	}

	/// Parses a message.
	///
	/// # Returns
	/// - `None` if the message does not invoke the bot
	/// - `Some(Ok(request))` for a well-formed invocation
	/// - `Some(Err(e))` when the invocation cannot be served; `e` is the reply
	pub fn parse(&self, message: &str) -> Option<Result<Request, CommandError>> {
		let content = message.strip_prefix(&self.invocation)?;
		if self.mention.is_match(content) {
			return Some(Err(CommandError::MentionsUnsupported));
		}

		let content = content.trim().to_lowercase();
		let content = self.disallowed.replace_all(&content, "");
		let mut arguments = content.split_whitespace();

		let request = match (arguments.next(), arguments.next()) {
			(None, _) => Request::Speech,
			(Some(arg), None) => match arg.parse::<i64>() {
				Ok(num_words) => Request::WithNumWords(num_words),
				Err(_) => Request::BeginningWithWord(arg.to_owned()),
			},
			(Some(first_word), Some(arg)) => match arg.parse::<i64>() {
				Ok(num_words) => Request::BeginningWithWordAndNumWords(first_word.to_owned(), num_words),
				Err(_) => {
					return Some(Err(CommandError::NotANumber {
						arg: arg.to_owned(),
						invocation: self.invocation.clone(),
					}));
				}
			},
		};

		Some(Ok(request))
	}
}

use serde::Deserialize;
use serde::Serialize;

/// Default soft cap, in bytes, on the length of a single raw text token.
pub const DEFAULT_MAX_TEXT_CHUNK: usize = 42_000;

/// Construction-time settings of a [`Lexer`](crate::Lexer).
///
/// The settings are owned by whatever loads the template configuration; field
/// names follow the option names used in error messages:
///
/// ```toml
/// blockBegin = "{{"
/// blockContinue = "}|{"
/// blockEnd = "}}"
/// escape = "\\"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LexerConfig {
	/// Delimiter opening a block, `{` by default.
	pub block_begin: String,
	/// Delimiter separating two parts of a block, `|` by default.
	pub block_continue: String,
	/// Delimiter closing a block, `}` by default.
	pub block_end: String,
	/// Character taking the following character literally, `\` by default.
	pub escape: char,
	/// Raw text longer than this many bytes is split into several tokens,
	/// but never in the middle of a partial delimiter match.
	pub max_text_chunk: usize,
}

impl Default for LexerConfig {
	fn default() -> Self {
		Self {
			block_begin: "{".into(),
			block_continue: "|".into(),
			block_end: "}".into(),
			escape: '\\',
			max_text_chunk: DEFAULT_MAX_TEXT_CHUNK,
		}
	}
}

impl LexerConfig {
	pub fn new(
		block_begin: impl Into<String>,
		block_continue: impl Into<String>,
		block_end: impl Into<String>,
		escape: char,
	) -> Self {
		Self {
			block_begin: block_begin.into(),
			block_continue: block_continue.into(),
			block_end: block_end.into(),
			escape,
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_max_text_chunk(mut self, max_text_chunk: usize) -> Self {
		self.max_text_chunk = max_text_chunk;
		self
	}

	/// The delimiters paired with their option names, in registration order.
	pub(crate) fn delimiters(&self) -> [(&'static str, &str); 3] {
		[
			("blockBegin", self.block_begin.as_str()),
			("blockContinue", self.block_continue.as_str()),
			("blockEnd", self.block_end.as_str()),
		]
	}
}

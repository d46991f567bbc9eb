use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::LexerConfig;
use crate::LexerError;
use crate::LexerResult;
use crate::automaton::DelimiterAutomaton;
use crate::source::CharSource;
use crate::tokens::Token;
use crate::tokens::TokenKind;

/// Which tokenizer the parser wants for the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerMode {
	/// Expression tokens inside a block.
	Block,
	/// Literal text and block delimiters outside of blocks.
	Raw,
}

impl Display for LexerMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LexerMode::Block => write!(f, "block"),
			LexerMode::Raw => write!(f, "raw"),
		}
	}
}

impl FromStr for LexerMode {
	type Err = LexerError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"block" => Ok(LexerMode::Block),
			"raw" => Ok(LexerMode::Raw),
			other => {
				Err(LexerError::Parse {
					line: 0,
					column: 0,
					found: other.to_string(),
					expected: "block or raw text".to_string(),
				})
			}
		}
	}
}

/// Reads characters from the bound source and tracks their position.
struct Cursor<'a> {
	source: Option<Box<dyn CharSource + 'a>>,
	/// The character under the cursor, meaningless once `eof` is set.
	last: char,
	/// A character handed back by the block tokenizer, read again next.
	pushback: Option<char>,
	eof: bool,
	line: usize,
	column: usize,
}

impl<'a> Cursor<'a> {
	fn new(source: Option<Box<dyn CharSource + 'a>>) -> Self {
		Self {
			eof: source.is_none(),
			source,
			last: '\0',
			pushback: None,
			line: 1,
			column: 1,
		}
	}

	/// Move to the next character. Returns `false` at the end of the input.
	fn read(&mut self) -> LexerResult<bool> {
		if self.eof {
			return Ok(false);
		}

		if let Some(ch) = self.pushback.take() {
			self.last = ch;
			return Ok(true);
		}

		let next = match self.source.as_mut() {
			Some(source) => source.read_char()?,
			None => None,
		};

		let Some(ch) = next else {
			self.eof = true;
			return Ok(false);
		};

		self.last = ch;

		if ch == '\n' {
			self.column = 1;
			self.line += 1;
		} else {
			self.column += 1;
		}

		Ok(true)
	}

	/// Whether the next character can be read and equals `expected`.
	fn read_if(&mut self, expected: char) -> LexerResult<bool> {
		Ok(self.read()? && self.last == expected)
	}
}

impl std::fmt::Debug for Cursor<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Cursor")
			.field("last", &self.last)
			.field("pushback", &self.pushback)
			.field("eof", &self.eof)
			.field("line", &self.line)
			.field("column", &self.column)
			.finish_non_exhaustive()
	}
}

/// The dual mode scanner of the template language.
///
/// The lexer is driven by the parser: every call to [`next`](Self::next)
/// produces exactly one token for the requested [`LexerMode`]. Once the input
/// is exhausted every further call returns [`TokenKind::EndOfFile`].
///
/// ```rust
/// use blocklex_core::Lexer;
/// use blocklex_core::LexerConfig;
/// use blocklex_core::LexerMode;
/// use blocklex_core::StrSource;
/// use blocklex_core::TokenKind;
///
/// let config = LexerConfig::new("{{", "}{", "}}", '\\');
/// let mut lexer = Lexer::new(&config).unwrap();
/// lexer.reset(StrSource::new("Hello {{name}}")).unwrap();
///
/// assert_eq!(lexer.next(LexerMode::Raw).unwrap().text, "Hello ");
/// assert_eq!(lexer.next(LexerMode::Raw).unwrap().kind, TokenKind::BlockBegin);
/// assert_eq!(lexer.next(LexerMode::Block).unwrap().text, "name");
/// assert_eq!(lexer.next(LexerMode::Raw).unwrap().kind, TokenKind::BlockEnd);
/// assert!(lexer.next(LexerMode::Raw).unwrap().is_end_of_file());
/// ```
#[derive(Debug)]
pub struct Lexer<'a> {
	automaton: Arc<DelimiterAutomaton>,
	escape: char,
	max_text_chunk: usize,
	cursor: Cursor<'a>,
	/// Delimiter found right after raw text, returned by the next raw call.
	pending: Option<Token>,
	current: Token,
}

impl<'a> Lexer<'a> {
	/// Build the delimiter automaton described by `config` and a lexer using
	/// it. Fails when a delimiter is empty or used twice.
	pub fn new(config: &LexerConfig) -> LexerResult<Self> {
		let kinds = [
			TokenKind::BlockBegin,
			TokenKind::BlockContinue,
			TokenKind::BlockEnd,
		];
		let mut automaton = DelimiterAutomaton::new();

		for ((option, value), kind) in config.delimiters().into_iter().zip(kinds) {
			if value.is_empty() {
				return Err(LexerError::EmptyDelimiter { option });
			}

			if !automaton.register(value, kind) {
				return Err(LexerError::DuplicateDelimiter {
					option,
					value: value.to_string(),
				});
			}
		}

		automaton.build_fallbacks();

		Ok(Self::with_automaton(
			Arc::new(automaton),
			config.escape,
			config.max_text_chunk,
		))
	}

	/// Create a lexer over an automaton whose fallbacks are already built.
	pub fn with_automaton(
		automaton: Arc<DelimiterAutomaton>,
		escape: char,
		max_text_chunk: usize,
	) -> Self {
		tracing::debug!(
			states = automaton.len(),
			escape = %escape.escape_default(),
			max_text_chunk,
			"created lexer"
		);

		Self {
			automaton,
			escape,
			max_text_chunk,
			cursor: Cursor::new(None),
			pending: None,
			current: Token::end_of_file(),
		}
	}

	pub fn automaton(&self) -> &Arc<DelimiterAutomaton> {
		&self.automaton
	}

	/// Line of the cursor, starting at `1`.
	pub fn line(&self) -> usize {
		self.cursor.line
	}

	/// Column of the cursor, starting at `1` and reset on every `\n`.
	pub fn column(&self) -> usize {
		self.cursor.column
	}

	/// The token returned by the last call to [`next`](Self::next).
	pub fn current(&self) -> &Token {
		&self.current
	}

	/// Bind the lexer to a new input and read its first character.
	///
	/// All transient state is cleared; the automaton is kept. Returns whether
	/// the input holds at least one character.
	pub fn reset(&mut self, source: impl CharSource + 'a) -> LexerResult<bool> {
		self.cursor = Cursor::new(Some(Box::new(source)));
		self.pending = None;
		self.current = Token::end_of_file();

		let has_data = self.cursor.read()?;
		tracing::trace!(has_data, "lexer reset");

		Ok(has_data)
	}

	/// Produce the next token for the given mode.
	pub fn next(&mut self, mode: LexerMode) -> LexerResult<Token> {
		let token = match mode {
			LexerMode::Block => self.next_block()?,
			LexerMode::Raw => self.next_raw()?,
		};

		tracing::trace!(
			%mode,
			kind = ?token.kind,
			line = self.cursor.line,
			column = self.cursor.column,
			"token"
		);

		self.current.clone_from(&token);

		Ok(token)
	}

	fn next_block(&mut self) -> LexerResult<Token> {
		loop {
			if self.cursor.eof {
				return Ok(Token::end_of_file());
			}

			let token = match self.cursor.last {
				'\n' | '\r' | '\t' | ' ' => {
					while is_blank(self.cursor.last) && self.cursor.read()? {}
					continue;
				}
				'!' => self.next_pair('=', TokenKind::NotEqual, TokenKind::Bang)?,
				'<' => self.next_pair('=', TokenKind::LowerEqual, TokenKind::LowerThan)?,
				'>' => self.next_pair('=', TokenKind::GreaterEqual, TokenKind::GreaterThan)?,
				'&' => self.next_doubled('&', TokenKind::DoubleAmpersand)?,
				'|' => self.next_doubled('|', TokenKind::DoublePipe)?,
				'%' => self.next_char(TokenKind::Percent)?,
				'(' => self.next_char(TokenKind::ParenthesisBegin)?,
				')' => self.next_char(TokenKind::ParenthesisEnd)?,
				'*' => self.next_char(TokenKind::Star)?,
				'+' => self.next_char(TokenKind::Plus)?,
				',' => self.next_char(TokenKind::Comma)?,
				'-' => self.next_char(TokenKind::Minus)?,
				'.' => self.next_char(TokenKind::Dot)?,
				'/' => self.next_char(TokenKind::Slash)?,
				':' => self.next_char(TokenKind::Colon)?,
				'=' => self.next_char(TokenKind::Equal)?,
				'[' => self.next_char(TokenKind::BracketBegin)?,
				']' => self.next_char(TokenKind::BracketEnd)?,
				'0'..='9' => self.next_number()?,
				'A'..='Z' | 'a'..='z' | '_' => self.next_symbol()?,
				'\'' | '"' => self.next_string()?,
				// Left under the cursor so the parser reports its position.
				other => Token::new(TokenKind::None, other.to_string()),
			};

			return Ok(token);
		}
	}

	/// Consume the current character and return an operator token.
	fn next_char(&mut self, kind: TokenKind) -> LexerResult<Token> {
		self.cursor.read()?;

		Ok(Token::empty(kind))
	}

	/// Operators whose one character form is valid on its own.
	fn next_pair(
		&mut self,
		second: char,
		double: TokenKind,
		single: TokenKind,
	) -> LexerResult<Token> {
		if self.cursor.read_if(second)? {
			return self.next_char(double);
		}

		Ok(Token::empty(single))
	}

	/// Operators that only exist doubled. A lone `ch` is handed back to the
	/// parser as [`TokenKind::None`] and stays under the cursor.
	fn next_doubled(&mut self, ch: char, double: TokenKind) -> LexerResult<Token> {
		if self.cursor.read_if(ch)? {
			return self.next_char(double);
		}

		if !self.cursor.eof {
			self.cursor.pushback = Some(self.cursor.last);
			self.cursor.last = ch;
		}

		Ok(Token::new(TokenKind::None, ch.to_string()))
	}

	fn next_number(&mut self) -> LexerResult<Token> {
		let mut text = String::new();
		let mut dot = false;

		loop {
			dot |= self.cursor.last == '.';
			text.push(self.cursor.last);

			let continues = self.cursor.read()?
				&& (self.cursor.last.is_ascii_digit() || (self.cursor.last == '.' && !dot));

			if !continues {
				return Ok(Token::new(TokenKind::Number, text));
			}
		}
	}

	fn next_symbol(&mut self) -> LexerResult<Token> {
		let mut text = String::new();

		loop {
			text.push(self.cursor.last);

			let continues = self.cursor.read()?
				&& (self.cursor.last.is_ascii_alphanumeric() || self.cursor.last == '_');

			if !continues {
				return Ok(Token::new(TokenKind::Symbol, text));
			}
		}
	}

	fn next_string(&mut self) -> LexerResult<Token> {
		let quote = self.cursor.last;
		let mut text = String::new();

		while self.cursor.read()? && self.cursor.last != quote {
			// An escape takes whatever character follows it literally.
			if self.cursor.last != self.escape || self.cursor.read()? {
				text.push(self.cursor.last);
			}
		}

		if self.cursor.eof {
			return Err(self.unexpected("<eof>", "end of string"));
		}

		self.cursor.read()?;

		Ok(Token::new(TokenKind::String, text))
	}

	fn next_raw(&mut self) -> LexerResult<Token> {
		if let Some(token) = self.pending.take() {
			return Ok(token);
		}

		let automaton = &*self.automaton;
		let mut buffer = String::new();
		let mut node = automaton.root();

		while !self.cursor.eof {
			let current = self.cursor.last;

			self.cursor.read()?;

			if current == self.escape && !self.cursor.eof {
				// Break any partial match and keep the escaped character as is.
				automaton.flush(node, &mut buffer);
				buffer.push(self.cursor.last);
				node = automaton.root();

				self.cursor.read()?;
				continue;
			}

			node = automaton.move_to(node, current, &mut buffer);

			if let Some(kind) = automaton.kind(node) {
				let delimiter = Token::empty(kind);

				if buffer.is_empty() {
					return Ok(delimiter);
				}

				self.pending = Some(delimiter);

				return Ok(Token::new(TokenKind::Text, buffer));
			}

			if buffer.len() > self.max_text_chunk && automaton.is_root(node) {
				return Ok(Token::new(TokenKind::Text, buffer));
			}
		}

		automaton.flush(node, &mut buffer);

		if buffer.is_empty() {
			return Ok(Token::end_of_file());
		}

		Ok(Token::new(TokenKind::Text, buffer))
	}

	fn unexpected(&self, found: &str, expected: &str) -> LexerError {
		tracing::debug!(
			line = self.cursor.line,
			column = self.cursor.column,
			found,
			expected,
			"lexical error"
		);

		LexerError::Parse {
			line: self.cursor.line,
			column: self.cursor.column,
			found: found.to_string(),
			expected: expected.to_string(),
		}
	}
}

fn is_blank(ch: char) -> bool {
	matches!(ch, '\n' | '\r' | '\t' | ' ')
}

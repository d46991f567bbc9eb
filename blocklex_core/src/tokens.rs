use std::fmt::Display;

/// The classification of a [`Token`].
///
/// Grammar decisions are made on the kind alone; the token text only carries a
/// payload for [`TokenKind::Text`], [`TokenKind::Symbol`],
/// [`TokenKind::Number`], [`TokenKind::String`] and [`TokenKind::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// An unrecognised character. The parser rejects it.
	None,
	/// End of the input. Repeated on every further request.
	EndOfFile,
	/// Literal text found outside of blocks.
	Text,
	/// An identifier, e.g. `item_count`
	Symbol,
	/// A numeric literal, e.g. `12.5`
	Number,
	/// A quoted string with its quotes removed and escapes resolved.
	String,
	/// The configured block opening delimiter.
	BlockBegin,
	/// The configured block continuation delimiter.
	BlockContinue,
	/// The configured block closing delimiter.
	BlockEnd,
	/// `!`
	Bang,
	/// `:`
	Colon,
	/// `,`
	Comma,
	/// `.`
	Dot,
	/// `&&`
	DoubleAmpersand,
	/// `||`
	DoublePipe,
	/// `=`
	Equal,
	/// `>`
	GreaterThan,
	/// `>=`
	GreaterEqual,
	/// `<`
	LowerThan,
	/// `<=`
	LowerEqual,
	/// `-`
	Minus,
	/// `!=`
	NotEqual,
	/// `(`
	ParenthesisBegin,
	/// `)`
	ParenthesisEnd,
	/// `[`
	BracketBegin,
	/// `]`
	BracketEnd,
	/// `%`
	Percent,
	/// `+`
	Plus,
	/// `/`
	Slash,
	/// `*`
	Star,
}

impl TokenKind {
	/// Whether this kind is one of the three configurable block delimiters.
	pub fn is_delimiter(self) -> bool {
		matches!(
			self,
			TokenKind::BlockBegin | TokenKind::BlockContinue | TokenKind::BlockEnd
		)
	}

	/// The fixed source spelling of punctuation and operator kinds.
	pub fn spelling(self) -> Option<&'static str> {
		let spelling = match self {
			TokenKind::Bang => "!",
			TokenKind::Colon => ":",
			TokenKind::Comma => ",",
			TokenKind::Dot => ".",
			TokenKind::DoubleAmpersand => "&&",
			TokenKind::DoublePipe => "||",
			TokenKind::Equal => "=",
			TokenKind::GreaterThan => ">",
			TokenKind::GreaterEqual => ">=",
			TokenKind::LowerThan => "<",
			TokenKind::LowerEqual => "<=",
			TokenKind::Minus => "-",
			TokenKind::NotEqual => "!=",
			TokenKind::ParenthesisBegin => "(",
			TokenKind::ParenthesisEnd => ")",
			TokenKind::BracketBegin => "[",
			TokenKind::BracketEnd => "]",
			TokenKind::Percent => "%",
			TokenKind::Plus => "+",
			TokenKind::Slash => "/",
			TokenKind::Star => "*",
			_ => return None,
		};

		Some(spelling)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if let Some(spelling) = self.spelling() {
			return write!(f, "`{spelling}`");
		}

		match self {
			TokenKind::None => write!(f, "unknown character"),
			TokenKind::EndOfFile => write!(f, "<eof>"),
			TokenKind::Text => write!(f, "raw text"),
			TokenKind::Symbol => write!(f, "symbol"),
			TokenKind::Number => write!(f, "number"),
			TokenKind::String => write!(f, "string"),
			TokenKind::BlockBegin => write!(f, "block begin"),
			TokenKind::BlockContinue => write!(f, "block continue"),
			TokenKind::BlockEnd => write!(f, "block end"),
			_ => Ok(()),
		}
	}
}

/// A classified unit of the input stream. Tokens are produced by the
/// [`Lexer`](crate::Lexer) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
	pub kind: TokenKind,
	/// The literal payload, empty for punctuation and structural kinds.
	pub text: String,
}

impl Token {
	pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
		Self {
			kind,
			text: text.into(),
		}
	}

	/// A token without payload.
	pub fn empty(kind: TokenKind) -> Self {
		Self::new(kind, String::new())
	}

	pub fn end_of_file() -> Self {
		Self::empty(TokenKind::EndOfFile)
	}

	pub fn is_end_of_file(&self) -> bool {
		self.kind == TokenKind::EndOfFile
	}
}

impl Default for Token {
	fn default() -> Self {
		Self::end_of_file()
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			TokenKind::Text | TokenKind::Symbol | TokenKind::Number | TokenKind::None => {
				write!(f, "{:?}({})", self.kind, self.text)
			}
			TokenKind::String => write!(f, "String({:?})", self.text),
			kind => write!(f, "{kind:?}"),
		}
	}
}

use crate::Lexer;
use crate::LexerConfig;
use crate::LexerMode;
use crate::LexerResult;
use crate::StrSource;
use crate::Token;
use crate::TokenKind;

/// Double curly delimiters with a backslash escape.
pub(crate) fn curly_config() -> LexerConfig {
	LexerConfig::new("{{", "}{", "}}", '\\')
}

pub(crate) fn curly_lexer() -> Lexer<'static> {
	Lexer::new(&curly_config()).unwrap_or_else(|e| panic!("invalid config: {e}"))
}

/// Scan the whole input in one mode, up to and including the first
/// `EndOfFile`.
pub(crate) fn scan_all(
	lexer: &mut Lexer<'static>,
	input: &'static str,
	mode: LexerMode,
) -> LexerResult<Vec<Token>> {
	lexer.reset(StrSource::new(input))?;

	let mut tokens = vec![];

	loop {
		let token = lexer.next(mode)?;
		let done = token.is_end_of_file();
		tokens.push(token);

		if done {
			return Ok(tokens);
		}
	}
}

/// Scan the input requesting one token per mode, in order.
pub(crate) fn scan_modes(
	lexer: &mut Lexer<'static>,
	input: &'static str,
	modes: &[LexerMode],
) -> LexerResult<Vec<Token>> {
	lexer.reset(StrSource::new(input))?;

	modes.iter().map(|&mode| lexer.next(mode)).collect()
}

/// Join the tokens with their `Display` form.
pub(crate) fn render(tokens: &[Token]) -> String {
	tokens
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}

/// Rebuild raw input from raw mode tokens, writing every delimiter with its
/// configured spelling.
pub(crate) fn rebuild(tokens: &[Token], config: &LexerConfig) -> String {
	tokens
		.iter()
		.map(|token| {
			match token.kind {
				TokenKind::BlockBegin => config.block_begin.as_str(),
				TokenKind::BlockContinue => config.block_continue.as_str(),
				TokenKind::BlockEnd => config.block_end.as_str(),
				_ => token.text.as_str(),
			}
		})
		.collect()
}

pub(crate) fn text(value: &str) -> Token {
	Token::new(TokenKind::Text, value)
}

pub(crate) fn symbol(value: &str) -> Token {
	Token::new(TokenKind::Symbol, value)
}

pub(crate) fn number(value: &str) -> Token {
	Token::new(TokenKind::Number, value)
}

pub(crate) fn string(value: &str) -> Token {
	Token::new(TokenKind::String, value)
}

pub(crate) fn punct(kind: TokenKind) -> Token {
	Token::empty(kind)
}

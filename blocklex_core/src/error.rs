use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LexerError {
	#[error(transparent)]
	#[diagnostic(code(blocklex::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid `{option}` option `{value}`: block delimiter used twice")]
	#[diagnostic(
		code(blocklex::duplicate_delimiter),
		help("`blockBegin`, `blockContinue` and `blockEnd` must all be different")
	)]
	DuplicateDelimiter { option: &'static str, value: String },

	#[error("invalid `{option}` option: block delimiter is empty")]
	#[diagnostic(code(blocklex::empty_delimiter))]
	EmptyDelimiter { option: &'static str },

	#[error("{expected} expected at {found}")]
	#[diagnostic(code(blocklex::parse))]
	Parse {
		line: usize,
		column: usize,
		found: String,
		expected: String,
	},
}

impl LexerError {
	/// Build the structured diagnostic a parser surfaces for this error.
	/// Errors that are not tied to a position in the input report line and
	/// column `0`.
	pub fn report(&self) -> DocumentReport {
		let (line, column) = match self {
			LexerError::Parse { line, column, .. } => (*line, *column),
			_ => (0, 0),
		};

		DocumentReport {
			message: self.to_string(),
			line,
			column,
		}
	}
}

/// A document-level diagnostic: a message and the position it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
	pub message: String,
	pub line: usize,
	pub column: usize,
}

pub type LexerResult<T> = Result<T, LexerError>;

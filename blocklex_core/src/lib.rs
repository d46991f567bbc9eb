//! `blocklex_core` is the lexical front end of a block based template
//! language. It turns a stream of characters into the tokens consumed by a
//! template parser.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Characters (string or buffered reader)
//!   → Lexer, raw mode (literal text + configurable block delimiters)
//!   → Lexer, block mode (operators, numbers, symbols, quoted strings)
//!   → Parser (requests one token at a time, choosing the mode)
//! ```
//!
//! Block delimiters are recognised by a [`DelimiterAutomaton`]: a trie of the
//! three configured delimiters with fallback links, which matches all of them
//! in a single pass without reading any character twice.
//!
//! ## Modules
//!
//! - [`config`] — The construction-time settings: the three block delimiters,
//!   the escape character and the raw text chunk size.
//! - [`source`] — Character sources the lexer reads from.
//!
//! ## Key Types
//!
//! - [`Lexer`] — The dual mode scanner.
//! - [`LexerMode`] — Which tokenizer to use for the next token.
//! - [`Token`] and [`TokenKind`] — A classified piece of the input.
//! - [`LexerError`] — Configuration, lexical and I/O errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use blocklex_core::Lexer;
//! use blocklex_core::LexerConfig;
//! use blocklex_core::LexerMode;
//! use blocklex_core::StrSource;
//! use blocklex_core::TokenKind;
//!
//! let mut lexer = Lexer::new(&LexerConfig::default()).unwrap();
//! lexer.reset(StrSource::new("{x}")).unwrap();
//!
//! assert_eq!(lexer.next(LexerMode::Raw).unwrap().kind, TokenKind::BlockBegin);
//! assert_eq!(lexer.next(LexerMode::Block).unwrap().kind, TokenKind::Symbol);
//! assert_eq!(lexer.next(LexerMode::Raw).unwrap().kind, TokenKind::BlockEnd);
//! ```

pub use automaton::*;
pub use config::*;
pub use error::*;
pub use lexer::*;
pub use source::*;
pub use tokens::*;

mod automaton;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod lexer;
pub mod source;
mod tokens;

#[cfg(test)]
mod __fixtures;

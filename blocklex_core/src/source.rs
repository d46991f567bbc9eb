use std::io::BufRead;
use std::io::ErrorKind;
use std::str::Chars;

/// A forward-only supply of characters for the [`Lexer`](crate::Lexer).
///
/// Sources are never asked to seek; the lexer keeps its own one character
/// pushback.
pub trait CharSource {
	/// Read the next character, or `None` once the input is exhausted.
	fn read_char(&mut self) -> std::io::Result<Option<char>>;
}

/// Characters of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
	chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
	pub fn new(input: &'a str) -> Self {
		Self {
			chars: input.chars(),
		}
	}
}

impl<'a> From<&'a str> for StrSource<'a> {
	fn from(input: &'a str) -> Self {
		Self::new(input)
	}
}

impl CharSource for StrSource<'_> {
	fn read_char(&mut self) -> std::io::Result<Option<char>> {
		Ok(self.chars.next())
	}
}

/// Characters decoded as UTF-8 from a buffered reader, one at a time.
///
/// Reads block on the underlying reader. Malformed UTF-8 is reported as an
/// [`ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ReaderSource<R> {
	reader: R,
}

impl<R: BufRead> ReaderSource<R> {
	pub fn new(reader: R) -> Self {
		Self { reader }
	}

	pub fn into_inner(self) -> R {
		self.reader
	}

	fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
		loop {
			let byte = match self.reader.fill_buf() {
				Ok(buffer) => buffer.first().copied(),
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(error),
			};

			if byte.is_some() {
				self.reader.consume(1);
			}

			return Ok(byte);
		}
	}
}

impl<R: BufRead> CharSource for ReaderSource<R> {
	fn read_char(&mut self) -> std::io::Result<Option<char>> {
		let Some(first) = self.read_byte()? else {
			return Ok(None);
		};

		let width = match first {
			0x00..=0x7f => return Ok(Some(char::from(first))),
			0xc2..=0xdf => 2,
			0xe0..=0xef => 3,
			0xf0..=0xf4 => 4,
			_ => return Err(invalid_utf8()),
		};

		let mut bytes = [first, 0, 0, 0];

		for byte in bytes.iter_mut().take(width).skip(1) {
			*byte = self.read_byte()?.ok_or_else(invalid_utf8)?;
		}

		std::str::from_utf8(&bytes[..width])
			.ok()
			.and_then(|decoded| decoded.chars().next())
			.map(Some)
			.ok_or_else(invalid_utf8)
	}
}

fn invalid_utf8() -> std::io::Error {
	std::io::Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}

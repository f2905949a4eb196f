//! Text decoding for tag content
//!
//! ID3 text is prefixed with an encoding byte, but in practice that byte is wrong about as often
//! as it is right. Decoding here is therefore *total*: a declared encoding is attempted first,
//! then an ordered list of [`FallbackEncoding`]s, and if everything fails a
//! `<binary:N bytes>` placeholder is produced. No error is ever returned.

use crate::config::ParseOptions;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// The width of a null terminator in this encoding
	pub fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	fn name(self) -> &'static str {
		match self {
			Self::Latin1 => "Latin-1",
			Self::UTF16 => "UTF-16",
			Self::UTF16BE => "UTF-16 BE",
			Self::UTF8 => "UTF-8",
		}
	}
}

/// An encoding to try when text has no usable encoding
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
pub enum FallbackEncoding {
	/// UTF-8, rejects invalid sequences
	Utf8,
	/// EUC-KR, including the CP949 (Unified Hangul Code) extensions
	EucKr,
	/// UTF-16, using a byte order mark if present and little endian otherwise
	Utf16,
	/// ISO-8859-1, which can decode any input
	Latin1,
}

impl FallbackEncoding {
	fn decoder(self) -> fn(&[u8]) -> Option<String> {
		match self {
			Self::Utf8 => utf8_decode,
			Self::EucKr => euc_kr_decode,
			Self::Utf16 => utf16_default_le_decode,
			Self::Latin1 => latin1_decode,
		}
	}
}

/// Decodes text using a declared encoding, falling back to other encodings
///
/// # Examples
///
/// ```rust
/// use id3scan::config::ParseOptions;
/// use id3scan::util::text::TextDecoder;
///
/// let decoder = TextDecoder::new(&ParseOptions::new());
///
/// // Declared as UTF-8
/// assert_eq!(decoder.decode(b"Hello\0", Some(3)), "Hello");
///
/// // No encoding byte, the fallback encodings are tried
/// assert_eq!(decoder.decode("l\u{00f8}ft".as_bytes(), None), "l\u{00f8}ft");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TextDecoder {
	fallback: &'static [FallbackEncoding],
	redecode_mislabeled_latin1: bool,
}

impl TextDecoder {
	/// Create a new `TextDecoder` from the text related [`ParseOptions`]
	pub fn new(options: &ParseOptions) -> Self {
		Self {
			fallback: options.fallback_encodings,
			redecode_mislabeled_latin1: options.redecode_mislabeled_latin1,
		}
	}

	/// Decode `bytes` with an optional ID3v2 encoding selector
	///
	/// A selector outside of `0..=3` is treated the same as a missing one.
	/// Trailing null characters are always removed.
	pub fn decode(&self, bytes: &[u8], selector: Option<u8>) -> String {
		self.decode_with(bytes, selector.and_then(TextEncoding::from_u8))
	}

	/// Decode `bytes` with an optional [`TextEncoding`]
	pub fn decode_with(&self, bytes: &[u8], encoding: Option<TextEncoding>) -> String {
		self.decode_inner(bytes, encoding, None)
	}

	/// Decode a description and the value that follows it
	///
	/// Some encoders only write a byte order mark for the first UTF-16 string of a frame,
	/// so the value inherits the description's byte order if it doesn't have its own.
	pub fn decode_pair(
		&self,
		description: &[u8],
		value: &[u8],
		encoding: Option<TextEncoding>,
	) -> (String, String) {
		let bom = match description {
			[0xFF, 0xFE, ..] => Some(ByteOrder::Little),
			[0xFE, 0xFF, ..] => Some(ByteOrder::Big),
			_ => None,
		};

		(
			self.decode_inner(description, encoding, None),
			self.decode_inner(value, encoding, bom),
		)
	}

	fn decode_inner(
		&self,
		bytes: &[u8],
		encoding: Option<TextEncoding>,
		inherited_bom: Option<ByteOrder>,
	) -> String {
		if bytes.is_empty() {
			return String::new();
		}

		let Some(encoding) = encoding else {
			return self.decode_fallback(bytes);
		};

		if encoding == TextEncoding::Latin1 && self.redecode_mislabeled_latin1 && !bytes.is_ascii() {
			log::trace!("Retrying non-ASCII text labelled as Latin-1");
			return self.decode_fallback(bytes);
		}

		let decoded = match encoding {
			TextEncoding::Latin1 => latin1_decode(bytes),
			TextEncoding::UTF16 => match (bytes, inherited_bom) {
				([0xFF, 0xFE, rest @ ..], _) => utf16_decode(rest, ByteOrder::Little),
				([0xFE, 0xFF, rest @ ..], _) => utf16_decode(rest, ByteOrder::Big),
				(_, Some(order)) => utf16_decode(bytes, order),
				_ => None,
			},
			TextEncoding::UTF16BE => utf16_decode(bytes, ByteOrder::Big),
			TextEncoding::UTF8 => utf8_decode(bytes),
		};

		match decoded {
			Some(text) => text,
			None => {
				log::warn!(
					"Text is not valid {}, trying fallback encodings",
					encoding.name()
				);
				self.decode_fallback(bytes)
			},
		}
	}

	fn decode_fallback(&self, bytes: &[u8]) -> String {
		self.fallback
			.iter()
			.find_map(|encoding| encoding.decoder()(bytes))
			.unwrap_or_else(|| {
				log::warn!("Unable to decode {} bytes of text", bytes.len());
				binary_placeholder(bytes.len())
			})
	}
}

/// The placeholder used for content that can't be represented as text
pub fn binary_placeholder(len: usize) -> String {
	format!("<binary:{len} bytes>")
}

/// Find the position of the first null terminator for `encoding`
///
/// For UTF-16, only terminators aligned to a character boundary are considered.
pub(crate) fn find_terminator(bytes: &[u8], encoding: Option<TextEncoding>) -> Option<usize> {
	match encoding.map_or(1, TextEncoding::terminator_len) {
		2 => bytes
			.chunks_exact(2)
			.position(|c| c == [0, 0])
			.map(|pos| pos * 2),
		_ => bytes.iter().position(|&b| b == 0),
	}
}

/// Split `bytes` on the first null terminator for `encoding`
///
/// The terminator itself is not included in either side. If no terminator exists, `None`
/// is returned for the remainder.
pub(crate) fn split_terminated(
	bytes: &[u8],
	encoding: Option<TextEncoding>,
) -> (&[u8], Option<&[u8]>) {
	let terminator_len = encoding.map_or(1, TextEncoding::terminator_len);
	match find_terminator(bytes, encoding) {
		Some(pos) => (&bytes[..pos], Some(&bytes[pos + terminator_len..])),
		None => (bytes, None),
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ByteOrder {
	Little,
	Big,
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn latin1_decode(bytes: &[u8]) -> Option<String> {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	Some(text)
}

fn utf8_decode(bytes: &[u8]) -> Option<String> {
	let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
	std::str::from_utf8(bytes).ok().map(|text| {
		let mut text = text.to_owned();
		trim_end_nulls(&mut text);
		text
	})
}

fn euc_kr_decode(bytes: &[u8]) -> Option<String> {
	encoding_rs::EUC_KR
		.decode_without_bom_handling_and_without_replacement(bytes)
		.map(|text| {
			let mut text = text.into_owned();
			trim_end_nulls(&mut text);
			text
		})
}

fn utf16_default_le_decode(bytes: &[u8]) -> Option<String> {
	match bytes {
		[0xFE, 0xFF, rest @ ..] => utf16_decode(rest, ByteOrder::Big),
		[0xFF, 0xFE, rest @ ..] => utf16_decode(rest, ByteOrder::Little),
		_ => utf16_decode(bytes, ByteOrder::Little),
	}
}

fn utf16_decode(bytes: &[u8], order: ByteOrder) -> Option<String> {
	if bytes.len() % 2 != 0 {
		return None;
	}

	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| match order {
			ByteOrder::Little => u16::from_le_bytes([c[0], c[1]]),
			ByteOrder::Big => u16::from_be_bytes([c[0], c[1]]),
		})
		// In ID3v2.4, it is possible to have multiple UTF-16 strings separated by null.
		// This also makes it possible for us to encounter multiple BOMs in a single string.
		.filter(|unit| *unit != 0xFEFF && *unit != 0xFFFE)
		.collect();

	String::from_utf16(&units).ok().map(|mut text| {
		trim_end_nulls(&mut text);
		text
	})
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

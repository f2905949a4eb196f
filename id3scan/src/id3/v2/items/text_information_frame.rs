use super::split_encoding;
use crate::id3::v2::Id3v2Version;
use crate::util::text::TextDecoder;

/// The content of a text information frame (`T***`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TextInformationFrame {
	pub(crate) value: String,
}

impl TextInformationFrame {
	/// Decode a text information frame
	///
	/// ID3v2.4 allows multiple values separated by null, these are joined with `separator`.
	/// Earlier versions only ever have a single value, anything after a null is discarded.
	///
	/// Returns `None` if there is no text after the encoding byte.
	pub(crate) fn parse(
		content: &[u8],
		decoder: &TextDecoder,
		version: Id3v2Version,
		separator: &str,
	) -> Option<Self> {
		let (encoding, text) = split_encoding(content)?;
		if text.is_empty() {
			return None;
		}

		let mut value = decoder.decode_with(text, encoding);
		if value.contains('\0') {
			if version == Id3v2Version::V4 {
				value = value
					.split('\0')
					.filter(|v| !v.is_empty())
					.collect::<Vec<_>>()
					.join(separator);
			} else if let Some(pos) = value.find('\0') {
				log::warn!("Discarding text after a null in an ID3v2.{} frame", version.major());
				value.truncate(pos);
			}
		}

		Some(Self { value })
	}
}

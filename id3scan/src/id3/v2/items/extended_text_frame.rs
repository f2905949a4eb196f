use super::split_encoding;
use crate::util::text::{TextDecoder, latin1_decode, split_terminated};

/// The content of a user defined text (`TXXX`) or URL (`WXXX`) frame
///
/// Both are a description followed by a value, and are stored in a mapping keyed by
/// description, so any number of them can exist in a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ExtendedTextFrame {
	pub(crate) description: String,
	pub(crate) content: String,
}

impl ExtendedTextFrame {
	/// Decode a `TXXX` frame
	///
	/// If there is no terminator after the description, the entire frame is taken as the
	/// value with an empty description.
	pub(crate) fn parse(content: &[u8], decoder: &TextDecoder) -> Option<Self> {
		let (encoding, rest) = split_encoding(content)?;
		if rest.is_empty() {
			return None;
		}

		let (description, content) = match split_terminated(rest, encoding) {
			(description, Some(value)) => decoder.decode_pair(description, value, encoding),
			(value, None) => {
				log::warn!("No terminator found after the description, using it as the value");
				(String::new(), decoder.decode_with(value, encoding))
			},
		};

		Some(Self {
			description,
			content,
		})
	}

	/// Decode a `WXXX` frame
	///
	/// The URL is meant to always be Latin-1. Some encoders write it in the frame's encoding
	/// instead, which is assumed to be the case if it isn't plain ASCII.
	pub(crate) fn parse_url(content: &[u8], decoder: &TextDecoder) -> Option<Self> {
		let (encoding, rest) = split_encoding(content)?;
		if rest.is_empty() {
			return None;
		}

		let (description, url) = split_terminated(rest, encoding);
		let Some(url) = url else {
			return Some(Self {
				description: String::new(),
				content: decoder.decode_with(rest, encoding),
			});
		};

		// Trailing nulls are fine, any others mean the URL is multi-byte text
		let url_end = url.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
		if !url[..url_end].contains(&0) {
			return Some(Self {
				description: decoder.decode_with(description, encoding),
				content: latin1_decode(url).unwrap_or_default(),
			});
		}

		let (description, content) = decoder.decode_pair(description, url, encoding);
		Some(Self {
			description,
			content,
		})
	}
}

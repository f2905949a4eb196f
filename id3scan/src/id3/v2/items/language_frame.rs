use super::{split_all_terminated, split_encoding};
use crate::util::text::{TextDecoder, latin1_decode, split_terminated};

/// The language code used when a frame doesn't specify one
pub(crate) const UNKNOWN_LANGUAGE: &str = "XXX";

/// The content of a comment (`COMM`) or unsynchronised lyrics (`USLT`) frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LanguageFrame {
	pub(crate) language: String,
	pub(crate) description: String,
	pub(crate) content: String,
}

impl LanguageFrame {
	/// Decode a language frame
	///
	/// The language is always 3 bytes of Latin-1, regardless of the encoding byte.
	///
	/// Some encoders pad the description with extra terminators, so if the content still holds
	/// terminated strings after the description, the last non-empty one is used.
	pub(crate) fn parse(content: &[u8], decoder: &TextDecoder) -> Option<Self> {
		let (encoding, rest) = split_encoding(content)?;
		let Some((language, rest)) = rest.split_first_chunk::<3>() else {
			log::warn!("Language frame is too short to hold a language");
			return None;
		};

		if rest.is_empty() {
			return None;
		}

		let language = latin1_decode(language)
			.map(|lang| lang.trim().to_owned())
			.filter(|lang| !lang.is_empty())
			.unwrap_or_else(|| String::from(UNKNOWN_LANGUAGE));

		let (description, content) = match split_terminated(rest, encoding) {
			(description, Some(body)) => {
				let description_text = decoder.decode_with(description, encoding);
				let content = split_all_terminated(body, encoding)
					.into_iter()
					.rev()
					.map(|segment| decoder.decode_pair(description, segment, encoding).1)
					.find(|segment| !segment.is_empty())
					.unwrap_or_default();

				(description_text, content)
			},
			(body, None) => {
				log::warn!("No terminator found after the description, using it as the content");
				(String::new(), decoder.decode_with(body, encoding))
			},
		};

		Some(Self {
			language,
			description,
			content,
		})
	}

	/// The key this frame is stored under, `<id>::<language>`
	///
	/// The description is not part of the key, so frames of the same language share it.
	pub(crate) fn key(&self, id: &str) -> String {
		format!("{id}::{}", self.language)
	}
}

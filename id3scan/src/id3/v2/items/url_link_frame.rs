use crate::util::text::latin1_decode;

/// The content of a URL link frame (`W***`, other than `WXXX`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UrlLinkFrame {
	pub(crate) url: String,
}

impl UrlLinkFrame {
	/// Decode a URL link frame
	///
	/// These have no encoding byte, the URL is always Latin-1. Anything after a null is ignored.
	pub(crate) fn parse(content: &[u8]) -> Option<Self> {
		let end = content.iter().position(|&b| b == 0).unwrap_or(content.len());
		let url = latin1_decode(&content[..end])?;
		if url.is_empty() {
			return None;
		}

		Some(Self { url })
	}
}

use crate::util::text::{latin1_decode, split_terminated};

use data_encoding::BASE64;

/// The content of a private frame (`PRIV`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PrivateFrame {
	pub(crate) owner: String,
	/// The private data, BASE64 encoded
	pub(crate) data: String,
}

impl PrivateFrame {
	/// Decode a private frame
	///
	/// The data is never interpreted. Without an owner terminator, the whole frame is taken as data.
	pub(crate) fn parse(content: &[u8]) -> Self {
		let (owner, data) = match split_terminated(content, None) {
			(owner, Some(data)) => (latin1_decode(owner).unwrap_or_default(), data),
			(data, None) => {
				log::warn!("No terminator found after the PRIV owner");
				(String::new(), data)
			},
		};

		Self {
			owner,
			data: BASE64.encode(data),
		}
	}
}

use super::{split_all_terminated, split_encoding};
use crate::util::text::TextDecoder;

/// The content of an involved people list (`TIPL`, `TMCL`, and ID3v2.3 `IPLS`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyValueFrame {
	pub(crate) key_value_pairs: Vec<(String, String)>,
}

impl KeyValueFrame {
	/// Decode an involved people list
	///
	/// The list alternates between a role and a name. A role missing its name is kept with
	/// an empty one.
	pub(crate) fn parse(content: &[u8], decoder: &TextDecoder) -> Option<Self> {
		let (encoding, rest) = split_encoding(content)?;

		let strings = split_all_terminated(rest, encoding);
		let first = strings.first().copied()?;

		// Only the first string may have a BOM
		let decode = |bytes: &[u8]| decoder.decode_pair(first, bytes, encoding).1;

		let key_value_pairs: Vec<(String, String)> = strings
			.chunks(2)
			.map(|pair| match pair {
				[role, name] => (decode(role), decode(name)),
				[role] => (decode(role), String::new()),
				_ => (String::new(), String::new()),
			})
			.filter(|(role, name)| !role.is_empty() || !name.is_empty())
			.collect();

		if key_value_pairs.is_empty() {
			return None;
		}

		Some(Self { key_value_pairs })
	}
}

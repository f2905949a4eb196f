//! Decoders for the content of individual frame types
//!
//! Every decoder works on a frame's payload, as returned by [`RawFrame::payload`](crate::id3::v2::RawFrame::payload).

mod attached_picture_frame;
mod extended_text_frame;
mod key_value_frame;
mod language_frame;
mod private_frame;
mod text_information_frame;
mod url_link_frame;

pub(crate) use attached_picture_frame::AttachedPictureFrame;
pub(crate) use extended_text_frame::ExtendedTextFrame;
pub(crate) use key_value_frame::KeyValueFrame;
pub(crate) use language_frame::LanguageFrame;
pub(crate) use private_frame::PrivateFrame;
pub(crate) use text_information_frame::TextInformationFrame;
pub(crate) use url_link_frame::UrlLinkFrame;

use crate::util::text::{TextEncoding, split_terminated};

/// Split the encoding byte off of `content`
///
/// An unknown encoding byte is kept as `None`, and the fallback encodings will be tried.
pub(crate) fn split_encoding(content: &[u8]) -> Option<(Option<TextEncoding>, &[u8])> {
	let (&encoding_byte, rest) = content.split_first()?;

	let encoding = TextEncoding::from_u8(encoding_byte);
	if encoding.is_none() {
		log::warn!("Found an invalid text encoding byte ({encoding_byte}), trying fallback encodings");
	}

	Some((encoding, rest))
}

/// Split `bytes` into every null terminated string it holds
///
/// A missing terminator on the final string is allowed.
pub(crate) fn split_all_terminated(mut bytes: &[u8], encoding: Option<TextEncoding>) -> Vec<&[u8]> {
	let mut strings = Vec::new();
	while !bytes.is_empty() {
		let (string, rest) = split_terminated(bytes, encoding);
		strings.push(string);

		match rest {
			Some(rest) => bytes = rest,
			None => break,
		}
	}

	strings
}

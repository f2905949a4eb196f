use super::split_encoding;
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::{err, id3v2_err};
use crate::picture::{ExtractedImage, MimeType, PictureType};
use crate::util::text::{TextDecoder, latin1_decode, split_terminated};

/// Decoder for attached picture (`APIC`, ID3v2.2 `PIC`) frames
pub(crate) struct AttachedPictureFrame;

impl AttachedPictureFrame {
	/// Decode an attached picture
	///
	/// ID3v2.2 stores a 3 byte image format (`JPG`, `PNG`) where later versions store a
	/// null terminated MIME type.
	///
	/// # Errors
	///
	/// * The frame ends before the picture type
	/// * No terminator is found after the MIME type or description
	pub(crate) fn parse(
		content: &[u8],
		decoder: &TextDecoder,
		version: Id3v2Version,
	) -> Result<ExtractedImage> {
		let Some((encoding, rest)) = split_encoding(content) else {
			id3v2_err!(BadFrameLength);
		};

		let (mime_hint, rest) = if version == Id3v2Version::V2 {
			let Some((format, rest)) = rest.split_first_chunk::<3>() else {
				id3v2_err!(BadFrameLength);
			};

			(MimeType::from_image_format(*format), rest)
		} else {
			let (mime_type, rest) = split_terminated(rest, None);
			let Some(rest) = rest else {
				err!(TextDecode("APIC MIME type null byte not found"));
			};

			let mime_type = latin1_decode(mime_type).unwrap_or_default();
			(MimeType::from_str(&mime_type), rest)
		};

		let Some((&picture_type, rest)) = rest.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let (description, bytes) = split_terminated(rest, encoding);
		let Some(bytes) = bytes else {
			err!(TextDecode("APIC description null byte not found"));
		};

		let image = ExtractedImage {
			mime_hint,
			picture_type: PictureType::from_u8(picture_type),
			description: decoder.decode_with(description, encoding),
			bytes: bytes.to_vec(),
		};

		log::trace!(
			"Found picture, MIME type: {}, type: {:?}, size: {}",
			image.mime_hint,
			image.picture_type,
			image.bytes.len()
		);

		Ok(image)
	}
}

use super::FrameId;
use crate::id3::v2::Id3v2Version;
use crate::util::synchsafe::synchsafe_decode;

use byteorder::{BigEndian, ByteOrder};

/// The layout of a frame header
///
/// ID3v2.2 uses a different header from ID3v2.3 and ID3v2.4, so the layout is selected once per
/// tag rather than being checked for every frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameHeaderLayout {
	/// ID3v2.2: a 3 byte ID and a 3 byte size, no flags
	ThreeByte,
	/// ID3v2.3 and ID3v2.4: a 4 byte ID, a 4 byte size, and 2 flag bytes
	FourByteWithFlags {
		/// Whether the size is synchsafe (ID3v2.4)
		synchsafe: bool,
	},
}

/// The result of reading a frame header
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedHeader<'a> {
	/// The start of the padding, no more frames follow
	Padding,
	/// The ID contains invalid characters
	BadId(&'a [u8]),
	Header {
		id: FrameId<'a>,
		size: u32,
		raw_flags: Option<u16>,
	},
}

impl FrameHeaderLayout {
	/// Get the layout used by `version`
	pub fn for_version(version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V2 => Self::ThreeByte,
			Id3v2Version::V3 => Self::FourByteWithFlags { synchsafe: false },
			Id3v2Version::V4 => Self::FourByteWithFlags { synchsafe: true },
		}
	}

	/// The size of the frame header
	pub fn header_len(self) -> usize {
		match self {
			Self::ThreeByte => 6,
			Self::FourByteWithFlags { .. } => 10,
		}
	}

	/// Read a header from `header`, which must be exactly [`Self::header_len`] bytes
	pub(crate) fn parse(self, header: &[u8]) -> ParsedHeader<'_> {
		debug_assert_eq!(header.len(), self.header_len());

		// Assume we just started reading padding
		if header[0] == 0 {
			return ParsedHeader::Padding;
		}

		match self {
			Self::ThreeByte => {
				let id_bytes = &header[..3];
				let Some(id) = FrameId::from_bytes(id_bytes) else {
					return ParsedHeader::BadId(id_bytes);
				};

				ParsedHeader::Header {
					id,
					size: BigEndian::read_u24(&header[3..6]),
					// V2 doesn't store flags
					raw_flags: None,
				}
			},
			Self::FourByteWithFlags { synchsafe } => {
				// For some reason, some apps make v3 tags with v2 frame IDs.
				// The actual frame header is v3 though
				let mut id_end = 4;
				if header[3] == 0 && !synchsafe {
					log::warn!("Found a v2 frame ID in a v3 tag, attempting to upgrade");
					id_end = 3;
				}

				let id_bytes = &header[..id_end];
				let Some(id) = FrameId::from_bytes(id_bytes) else {
					return ParsedHeader::BadId(&header[..4]);
				};

				let size_bytes = [header[4], header[5], header[6], header[7]];
				let size = if synchsafe {
					synchsafe_decode(size_bytes)
				} else {
					u32::from_be_bytes(size_bytes)
				};

				ParsedHeader::Header {
					id,
					size,
					raw_flags: Some(BigEndian::read_u16(&header[8..])),
				}
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameHeaderLayout, ParsedHeader};
	use crate::id3::v2::FrameId;

	use std::borrow::Cow;

	#[test_log::test]
	fn three_byte() {
		let parsed = FrameHeaderLayout::ThreeByte.parse(b"TT2\x00\x01\x02");
		assert_eq!(
			parsed,
			ParsedHeader::Header {
				id: FrameId::Valid(Cow::Borrowed("TIT2")),
				size: 0x0102,
				raw_flags: None,
			}
		);
	}

	#[test_log::test]
	fn four_byte() {
		let header = b"TALB\x00\x00\x01\x7F\x40\x00";

		// ID3v2.3 sizes are plain integers
		let v3 = FrameHeaderLayout::FourByteWithFlags { synchsafe: false }.parse(header);
		assert_eq!(
			v3,
			ParsedHeader::Header {
				id: FrameId::Valid(Cow::Borrowed("TALB")),
				size: 0x017F,
				raw_flags: Some(0x4000),
			}
		);

		let v4 = FrameHeaderLayout::FourByteWithFlags { synchsafe: true }.parse(header);
		assert!(matches!(v4, ParsedHeader::Header { size: 0xFF, .. }));
	}

	#[test_log::test]
	fn v2_id_in_v3_tag() {
		let parsed =
			FrameHeaderLayout::FourByteWithFlags { synchsafe: false }.parse(b"COM\x00\x00\x00\x00\x05\x00\x00");
		assert!(matches!(
			parsed,
			ParsedHeader::Header { id: FrameId::Valid(ref id), .. } if id == "COMM"
		));
	}

	#[test_log::test]
	fn padding_and_garbage() {
		let layout = FrameHeaderLayout::FourByteWithFlags { synchsafe: true };

		assert_eq!(layout.parse(&[0; 10]), ParsedHeader::Padding);
		assert_eq!(
			layout.parse(b"\xFF\xFB\x90\x00\x00\x00\x00\x00\x00\x00"),
			ParsedHeader::BadId(b"\xFF\xFB\x90\x00")
		);
	}
}

use super::frame::FrameHeaderLayout;
use crate::error::Result;
use crate::macros::{err, id3v2_err};
use crate::util::synchsafe::synchsafe_decode;

use byteorder::{BigEndian, ByteOrder};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version number
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised. See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation)
	pub unsynchronisation: bool,
	/// Whether an extended header follows the tag header
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	pub footer: bool,
}

/// An ID3v2 tag header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The tag version
	pub version: Id3v2Version,
	/// The revision, this has no effect on parsing
	pub revision: u8,
	/// The flags byte, exactly as it appears in the header
	pub raw_flags: u8,
	/// The parsed flags
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	/// The number of bytes taken up by the extended header, if present
	pub extended_size: u32,
}

impl Id3v2Header {
	/// The size of the tag header
	pub const SIZE: usize = 10;

	/// Parse the header (and extended header) at the start of `data`
	///
	/// Tag sizes are synchsafe in ID3v2.4. In ID3v2.2 and ID3v2.3 they are read as plain
	/// big-endian integers with the high bit of every byte masked off.
	///
	/// # Errors
	///
	/// * `data` doesn't start with `ID3`
	/// * `data` is too short to hold the header or extended header
	/// * The major version is not 2, 3, or 4
	/// * The tag is a compressed ID3v2.2 tag
	/// * The extended header doesn't fit in the tag
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::id3::v2::{Id3v2Header, Id3v2Version};
	///
	/// # fn main() -> id3scan::error::Result<()> {
	/// let header = Id3v2Header::parse(b"ID3\x04\x00\x00\x00\x00\x02\x01")?;
	///
	/// assert_eq!(header.version, Id3v2Version::V4);
	/// assert_eq!(header.size, 257);
	/// assert_eq!(header.frames_start(), 10);
	/// assert_eq!(header.tag_end(), 267);
	/// # Ok(()) }
	/// ```
	pub fn parse(data: &[u8]) -> Result<Self> {
		log::debug!("Parsing ID3v2 header");

		let Some(header) = data.get(..Self::SIZE) else {
			if data.starts_with(b"ID3") {
				id3v2_err!(TruncatedHeader);
			}

			err!(FakeTag);
		};

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor], but here we don't care about minor revisions unless there's an error.
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(BadId3v2Version(major, header[4])),
		};
		let revision = header[4];

		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// No compression scheme was ever decided for ID3v2.2,
		// so the tag is ignored entirely.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			id3v2_err!(V2Compression);
		}

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version != Id3v2Version::V2 && flags & 0x40 == 0x40,
			experimental: version != Id3v2Version::V2 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = match version {
			Id3v2Version::V4 => synchsafe_decode([header[6], header[7], header[8], header[9]]),
			_ => BigEndian::read_u32(&header[6..]) & 0x7F7F_7F7F,
		};

		let mut extended_size = 0;
		if flags_parsed.extended_header {
			let Some(size_bytes) = data.get(Self::SIZE..Self::SIZE + 4) else {
				id3v2_err!(TruncatedHeader);
			};

			let declared = BigEndian::read_u32(size_bytes);
			extended_size = match version {
				// The size includes itself
				Id3v2Version::V4 => synchsafe_decode([
					size_bytes[0],
					size_bytes[1],
					size_bytes[2],
					size_bytes[3],
				]),
				// The size excludes itself
				_ => declared.saturating_add(4),
			};

			log::trace!("Skipping extended header of size {extended_size}");

			if extended_size < 6 || extended_size > size {
				id3v2_err!(BadExtendedHeaderSize);
			}
		}

		Ok(Id3v2Header {
			version,
			revision,
			raw_flags: flags,
			flags: flags_parsed,
			size,
			extended_size,
		})
	}

	/// The offset of the first frame
	pub fn frames_start(&self) -> usize {
		Self::SIZE + self.extended_size as usize
	}

	/// The offset immediately following the tag contents
	///
	/// This doesn't include the footer.
	pub fn tag_end(&self) -> usize {
		Self::SIZE + self.size as usize
	}

	/// The frame header layout used by this tag's version
	pub fn frame_header_layout(&self) -> FrameHeaderLayout {
		FrameHeaderLayout::for_version(self.version)
	}
}

//! ID3 specific items
//!
//! A buffer may hold an ID3v2 tag at its start, an ID3v1 trailer in its last 128 bytes, both,
//! or neither. When both are present, only the ID3v2 tag is read.

pub mod v1;
pub mod v2;

use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};

/// Where a tag was found in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLocation<'a> {
	/// The buffer starts with an ID3v2 header
	Id3v2,
	/// The buffer ends with an ID3v1 trailer
	Id3v1(&'a [u8; 128]),
	/// No tag was found
	None,
}

/// Find the tag in `data`
///
/// # Examples
///
/// ```rust
/// use id3scan::id3::{TagLocation, locate_tag};
///
/// assert_eq!(locate_tag(b"ID3\x04\x00\x00\x00\x00\x00\x00"), TagLocation::Id3v2);
/// assert_eq!(locate_tag(&[0; 64]), TagLocation::None);
/// ```
pub fn locate_tag(data: &[u8]) -> TagLocation<'_> {
	if data.starts_with(b"ID3") {
		log::debug!("Found an ID3v2 header");
		return TagLocation::Id3v2;
	}

	let Some(trailer_start) = data.len().checked_sub(ID3V1_TAG_SIZE) else {
		log::debug!("Buffer is too small to contain an ID3v1 tag");
		return TagLocation::None;
	};

	match <&[u8; 128]>::try_from(&data[trailer_start..]) {
		Ok(trailer) if trailer.starts_with(&ID3V1_TAG_MARKER) => {
			log::debug!("Found an ID3v1 tag");
			TagLocation::Id3v1(trailer)
		},
		_ => TagLocation::None,
	}
}

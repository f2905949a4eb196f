mod content;
pub(crate) mod header;
mod id;
mod scan;

pub use content::FrameInterpreter;
pub use header::FrameHeaderLayout;
pub use id::{FrameId, upgrade_v2};
pub use scan::{FrameScanner, ScanStop};

use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::synchsafe::{SynchsafeInteger, remove_unsynchronisation};

use std::borrow::Cow;

/// A frame as it appears in the tag, before interpretation
///
/// The content is a view into the buffer being scanned. Use [`RawFrame::payload`] to get the
/// content with the effects of the format flags (unsynchronisation, compression, etc.) removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame<'a> {
	/// The frame ID, upgraded to ID3v2.3 if possible
	pub id: FrameId<'a>,
	/// The size declared in the frame header
	pub size: u32,
	/// The flag bytes, `None` for ID3v2.2 frames
	pub raw_flags: Option<u16>,
	/// The parsed flags
	pub flags: FrameFlags,
	/// The frame content, exactly `size` bytes
	pub content: &'a [u8],
}

impl<'a> RawFrame<'a> {
	/// Get the frame content, with the format flags applied
	///
	/// This will:
	///
	/// * Strip the grouping identity, encryption method, and data length indicator bytes
	/// * Remove unsynchronisation
	/// * Decompress the content
	///
	/// # Errors
	///
	/// * The frame is too short to hold the data its flags describe
	/// * The frame is encrypted
	/// * The content fails to decompress, or decompression support is disabled
	/// * The content grows beyond `allocation_limit`
	pub fn payload(&self, allocation_limit: usize) -> Result<Cow<'a, [u8]>> {
		let flags = self.flags;
		let mut content = self.content;

		let mut data_length_indicator = None;
		match self.raw_flags {
			// Order: grouping identity, encryption method, data length indicator
			Some(_) if flags.synchsafe => {
				if flags.grouping_identity {
					log::trace!("Skipping group identifier");
					take_u8(&mut content)?;
				}

				if flags.encryption {
					log::trace!("Skipping encryption method symbol");
					take_u8(&mut content)?;
				}

				if flags.data_length_indicator || flags.compression {
					data_length_indicator = Some(take_u32(&mut content)?.unsynch());
				}
			},
			// Order: decompressed size, encryption method, grouping identity
			Some(_) => {
				if flags.compression {
					data_length_indicator = Some(take_u32(&mut content)?);
				}

				if flags.encryption {
					log::trace!("Skipping encryption method symbol");
					take_u8(&mut content)?;
				}

				if flags.grouping_identity {
					log::trace!("Skipping group identifier");
					take_u8(&mut content)?;
				}
			},
			None => {},
		}

		// Frames must have at least 1 byte, *after* all of the additional data flags can provide
		if content.is_empty() {
			id3v2_err!(BadFrameLength);
		}

		if flags.encryption {
			if data_length_indicator.is_none() && flags.synchsafe {
				id3v2_err!(MissingDataLengthIndicator);
			}

			// Nothing further we can do with encrypted frames
			id3v2_err!(EncryptedFrame(self.id.to_string()));
		}

		let mut payload = Cow::Borrowed(content);
		if flags.unsynchronisation {
			payload = Cow::Owned(remove_unsynchronisation(content, allocation_limit)?);
		}

		if flags.compression {
			payload = Cow::Owned(decompress(&payload, data_length_indicator, allocation_limit)?);
		}

		Ok(payload)
	}
}

fn take_u8(content: &mut &[u8]) -> Result<u8> {
	let Some((first, rest)) = content.split_first() else {
		id3v2_err!(BadFrameLength);
	};

	*content = rest;
	Ok(*first)
}

fn take_u32(content: &mut &[u8]) -> Result<u32> {
	let Some((bytes, rest)) = content.split_first_chunk::<4>() else {
		id3v2_err!(BadFrameLength);
	};

	*content = rest;
	Ok(u32::from_be_bytes(*bytes))
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8], expected_len: Option<u32>, allocation_limit: usize) -> Result<Vec<u8>> {
	use crate::error::{Id3v2Error, Id3v2ErrorKind};
	use crate::macros::err;
	use std::io::Read;

	log::trace!("Decompressing frame, expected size: {expected_len:?}");

	if expected_len.is_some_and(|len| len as usize > allocation_limit) {
		err!(TooMuchData);
	}

	let mut decompressed = Vec::with_capacity(expected_len.map_or(0, |len| len as usize));
	flate2::read::ZlibDecoder::new(content)
		.take((allocation_limit as u64).saturating_add(1))
		.read_to_end(&mut decompressed)
		.map_err(|e| Id3v2Error::new(Id3v2ErrorKind::Decompression(e)))?;

	if decompressed.len() > allocation_limit {
		err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
#[allow(clippy::unnecessary_wraps)]
fn decompress(_: &[u8], _: Option<u32>, _: usize) -> Result<Vec<u8>> {
	id3v2_err!(CompressedFrameEncountered);
}

/// Various flags to describe the content of a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The frame content is prefixed with a group identifier
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	pub compression: bool,
	/// The frame content is prefixed with an encryption method symbol
	///
	/// NOTE: Since the encryption method is unknown, id3scan cannot do anything with these frames
	pub encryption: bool,
	/// Frame is unsynchronised
	///
	/// In short, this makes all "0xFF X (X >= 0xE0)" combinations into "0xFF 0x00 X" to avoid confusion
	/// with the MPEG frame header, which is often identified by its "frame sync" (11 set bits).
	///
	/// This is set for every frame of an ID3v2.4 tag with the unsynchronisation flag set.
	pub unsynchronisation: bool,
	/// The frame content is prefixed with a data length indicator
	///
	/// The data length indicator is the size of the frame if the flags were all zeroed out.
	pub data_length_indicator: bool,
	/// Whether these flags came from an ID3v2.4 frame, which affects the order of the
	/// prefixed data
	pub synchsafe: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
			synchsafe: true,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
			synchsafe: false,
		}
	}
}

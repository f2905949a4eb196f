use super::frame::{FrameInterpreter, FrameScanner, ScanStop};
use super::header::{Id3v2Header, Id3v2Version};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::record::{MetadataRecord, TagFormat};
use crate::sink::ImageSink;
use crate::util::synchsafe::remove_unsynchronisation;

use std::borrow::Cow;

/// Read every frame of the tag described by `header` into `record`
///
/// `data` is the entire buffer, starting at the tag header. Problems with individual frames
/// are recorded as diagnostics, and never stop earlier frames from being kept.
pub(crate) fn read_id3v2(
	data: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
	sink: &mut dyn ImageSink,
	filename: &str,
	record: &mut MetadataRecord,
) -> Result<()> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	record.set_format(TagFormat::Id3v2 {
		major: header.version.major(),
		revision: header.revision,
	});

	let mut tag_len = (header.size - header.extended_size) as usize;
	let available = data.get(header.frames_start()..).unwrap_or_default();
	let truncated = available.len() < tag_len;

	let mut region = Cow::Borrowed(&available[..tag_len.min(available.len())]);

	// ID3v2.4 unsynchronisation is handled per frame, see `FrameFlags::unsynchronisation`
	if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		log::trace!("Removing unsynchronisation from the entire tag");
		region = Cow::Owned(remove_unsynchronisation(&region, parse_options.allocation_limit)?);

		// The declared size covers the unsynchronised bytes
		if !truncated {
			tag_len = region.len();
		}
	}

	let unsynchronised_frames =
		header.flags.unsynchronisation && header.version == Id3v2Version::V4;

	let mut interpreter = FrameInterpreter::new(header.version, parse_options, sink, filename);
	let mut scanner = FrameScanner::new(&region, tag_len, header.frame_header_layout());

	for mut frame in scanner.by_ref() {
		if unsynchronised_frames {
			frame.flags.unsynchronisation = true;
		}

		interpreter.interpret(&frame, record);
	}

	match scanner.into_stop_reason() {
		Some(ScanStop::Invalid(err)) => record.push_diagnostic(err.into()),
		Some(ScanStop::EndOfBuffer) => {
			log::warn!("Tag extends past the end of the buffer, some frames may be missing");
		},
		_ => {},
	}

	interpreter.finish(record);
	Ok(())
}

use super::header::{FrameHeaderLayout, ParsedHeader};
use super::{FrameFlags, RawFrame};
use crate::error::{Id3v2Error, Id3v2ErrorKind};

/// Why a [`FrameScanner`] stopped
#[derive(Debug)]
pub enum ScanStop {
	/// The end of the tag was reached
	EndOfTag,
	/// The tag continues past the end of the buffer
	EndOfBuffer,
	/// The remainder of the tag is padding
	Padding,
	/// A frame header or size is invalid
	///
	/// Every frame before this one is still valid.
	Invalid(Id3v2Error),
}

/// A cursor over the frames in a tag
///
/// Scanning is lazy. Any structural problem (an invalid ID, a frame that doesn't fit) ends the
/// scan rather than failing it, and the reason can be checked with [`FrameScanner::stop_reason`].
///
/// # Examples
///
/// ```rust
/// use id3scan::id3::v2::{FrameHeaderLayout, FrameScanner, ScanStop};
///
/// let frames = b"TIT2\x00\x00\x00\x03\x00\x00\x00Hi\x00\x00\x00\x00";
/// let layout = FrameHeaderLayout::FourByteWithFlags { synchsafe: true };
///
/// let mut scanner = FrameScanner::new(frames, frames.len(), layout);
///
/// let frame = scanner.next().unwrap();
/// assert_eq!(frame.id.as_str(), "TIT2");
/// assert_eq!(frame.content, b"\x00Hi");
///
/// assert!(scanner.next().is_none());
/// assert!(matches!(scanner.stop_reason(), Some(ScanStop::EndOfTag)));
/// ```
pub struct FrameScanner<'a> {
	data: &'a [u8],
	tag_len: usize,
	layout: FrameHeaderLayout,
	cursor: usize,
	stop: Option<ScanStop>,
}

impl<'a> FrameScanner<'a> {
	/// Create a new `FrameScanner`
	///
	/// * `data` - The frame region, starting at the first frame
	/// * `tag_len` - The declared length of the frame region, this may be longer than `data`
	/// * `layout` - The frame header layout, see [`FrameHeaderLayout::for_version`]
	pub fn new(data: &'a [u8], tag_len: usize, layout: FrameHeaderLayout) -> Self {
		log::debug!(
			"Scanning frames, region size: {}, available: {}",
			tag_len,
			data.len()
		);

		Self {
			data,
			tag_len,
			layout,
			cursor: 0,
			stop: None,
		}
	}

	/// The reason the scan ended, `None` if it hasn't
	pub fn stop_reason(&self) -> Option<&ScanStop> {
		self.stop.as_ref()
	}

	/// Consume the scanner, returning the reason the scan ended
	pub fn into_stop_reason(self) -> Option<ScanStop> {
		self.stop
	}

	fn stop(&mut self, reason: ScanStop) -> Option<RawFrame<'a>> {
		match &reason {
			ScanStop::Invalid(err) => log::warn!("Stopped scanning frames: {err}"),
			ScanStop::EndOfBuffer => log::warn!("Buffer ended before the tag, stopped scanning frames"),
			_ => log::trace!("Stopped scanning frames: {reason:?}"),
		}

		self.stop = Some(reason);
		None
	}
}

impl<'a> Iterator for FrameScanner<'a> {
	type Item = RawFrame<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.stop.is_some() {
			return None;
		}

		let header_len = self.layout.header_len();
		let header_end = self.cursor + header_len;
		if header_end > self.tag_len {
			return self.stop(ScanStop::EndOfTag);
		}

		let Some(header) = self.data.get(self.cursor..header_end) else {
			return self.stop(ScanStop::EndOfBuffer);
		};

		let (id, size, raw_flags) = match self.layout.parse(header) {
			ParsedHeader::Padding => return self.stop(ScanStop::Padding),
			ParsedHeader::BadId(id) => {
				let kind = Id3v2ErrorKind::BadFrameId(id.to_vec());
				return self.stop(ScanStop::Invalid(Id3v2Error::new(kind)));
			},
			ParsedHeader::Header {
				id,
				size,
				raw_flags,
			} => (id, size, raw_flags),
		};

		if size == 0 {
			let kind = Id3v2ErrorKind::EmptyFrame(id.to_string());
			return self.stop(ScanStop::Invalid(Id3v2Error::new(kind)));
		}

		let content_end = header_end.saturating_add(size as usize);
		if content_end > self.tag_len {
			let kind = Id3v2ErrorKind::OversizedFrame {
				id: id.to_string(),
				declared: size,
				remaining: self.tag_len - header_end,
			};
			return self.stop(ScanStop::Invalid(Id3v2Error::new(kind)));
		}

		let Some(content) = self.data.get(header_end..content_end) else {
			let kind = Id3v2ErrorKind::TruncatedFrame {
				id: id.to_string(),
				declared: size,
				available: self.data.len().saturating_sub(header_end),
			};
			return self.stop(ScanStop::Invalid(Id3v2Error::new(kind)));
		};

		let flags = match (self.layout, raw_flags) {
			(FrameHeaderLayout::FourByteWithFlags { synchsafe: true }, Some(flags)) => {
				FrameFlags::parse_id3v24(flags)
			},
			(_, Some(flags)) => FrameFlags::parse_id3v23(flags),
			(_, None) => FrameFlags::default(),
		};

		log::trace!("Found frame `{id}`, size: {size}");

		self.cursor = content_end;
		Some(RawFrame {
			id,
			size,
			raw_flags,
			flags,
			content,
		})
	}
}

impl std::iter::FusedIterator for FrameScanner<'_> {}

//! Contains the errors that can arise within id3scan
//!
//! The primary error is [`TagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Note that extraction itself never fails. Every error produced while reading a tag is
//! attached to the resulting [`MetadataRecord`](crate::record::MetadataRecord) as a diagnostic,
//! see [`MetadataRecord::diagnostics`](crate::record::MetadataRecord::diagnostics).

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// Neither an ID3v2 header nor an ID3v1 trailer was found
	///
	/// This is not a failure, the buffer simply has no metadata.
	NoTagFound,
	/// Arises when a tag is expected (Ex. the buffer starts with "ID3"), but isn't found
	FakeTag,
	/// Attempting to allocate more than [`ParseOptions::allocation_limit`](crate::config::ParseOptions::allocation_limit)
	TooMuchData,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// The image sink failed to persist an attached picture
	ImagePersist(std::io::Error),
	/// Errors that arise while reading ID3v2 tags
	Id3v2(Id3v2Error),
}

/// The types of errors that can occur while reading ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// No compression scheme was ever decided for ID3v2.2.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,
	/// Arises when the buffer ends before the 10 byte header does
	TruncatedHeader,
	/// Arises when an extended header has an invalid size (it must fit inside of the tag)
	BadExtendedHeaderSize,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	BadFrameId(Vec<u8>),
	/// Arises when a frame declares a size of zero
	EmptyFrame(String),
	/// Arises when a frame's content would read past the end of the buffer
	TruncatedFrame {
		/// The frame ID
		id: String,
		/// The size declared in the frame header
		declared: u32,
		/// The number of bytes actually available
		available: usize,
	},
	/// Arises when a frame's content would read past the end of the tag
	OversizedFrame {
		/// The frame ID
		id: String,
		/// The size declared in the frame header
		declared: u32,
		/// The number of bytes remaining in the tag
		remaining: usize,
	},
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when reading a compressed or encrypted frame with no data length indicator
	MissingDataLengthIndicator,
	/// Arises when an encrypted frame is encountered, these can never be interpreted
	EncryptedFrame(String),

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::TruncatedHeader => write!(f, "The tag header is incomplete"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::EmptyFrame(id) => write!(f, "Frame `{id}` is empty"),
			Self::TruncatedFrame {
				id,
				declared,
				available,
			} => write!(
				f,
				"Frame `{id}` declares {declared} bytes, but only {available} bytes remain in the \
				 buffer"
			),
			Self::OversizedFrame {
				id,
				declared,
				remaining,
			} => write!(
				f,
				"Frame `{id}` declares {declared} bytes, but only {remaining} bytes remain in the tag"
			),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::MissingDataLengthIndicator => write!(
				f,
				"Encountered a compressed or encrypted frame without a data length indicator"
			),
			Self::EncryptedFrame(id) => write!(f, "Frame `{id}` is encrypted"),

			// Compression
			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while reading an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within id3scan
pub struct TagError {
	pub(crate) kind: ErrorKind,
}

impl TagError {
	/// Create a `TagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::error::{ErrorKind, TagError};
	///
	/// let no_tag = TagError::new(ErrorKind::NoTagFound);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::error::{ErrorKind, TagError};
	///
	/// let no_tag = TagError::new(ErrorKind::NoTagFound);
	/// if let ErrorKind::NoTagFound = no_tag.kind() {
	/// 	println!("Nothing to see here");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Returns the [`Id3v2ErrorKind`], if this is an ID3v2 error
	pub fn id3v2_kind(&self) -> Option<&Id3v2ErrorKind> {
		match &self.kind {
			ErrorKind::Id3v2(err) => Some(err.kind()),
			_ => None,
		}
	}
}

impl std::error::Error for TagError {}

impl Debug for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TagError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl Display for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			ErrorKind::NoTagFound => write!(f, "No ID3v1 or ID3v2 tag was found"),
			ErrorKind::FakeTag => write!(f, "Reading: Expected a tag, found invalid data"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read an abnormally large amount of data"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::ImagePersist(ref err) => write!(f, "Failed to persist image: {err}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
		}
	}
}

//! Attached picture handling
//!
//! Pictures are never written anywhere by id3scan itself. Each one is extracted into an
//! [`ExtractedImage`] and handed to an [`ImageSink`](crate::sink::ImageSink), which decides
//! where (and if) it is stored.

use std::fmt::{Display, Formatter};
use std::path::Path;

/// MIME types for pictures
///
/// Only the types that affect the proposed file extension are distinguished.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// Matching is lenient, as encoders write all sorts of variations (`image/jpg`, `JPEG`, `image/x-png`).
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_str("image/JPG"), MimeType::Jpeg);
	/// assert_eq!(
	/// 	MimeType::from_str("image/webp"),
	/// 	MimeType::Unknown(String::from("image/webp"))
	/// );
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		let lowercase = mime_type.to_ascii_lowercase();
		if lowercase.contains("jpeg") || lowercase.contains("jpg") {
			Self::Jpeg
		} else if lowercase.contains("png") {
			Self::Png
		} else {
			Self::Unknown(mime_type.to_owned())
		}
	}

	/// Get a `MimeType` from an ID3v2.2 `PIC` image format (Ex. `"JPG"`)
	pub fn from_image_format(mut format: [u8; 3]) -> Self {
		format.make_ascii_uppercase();
		match &format {
			b"JPG" => Self::Jpeg,
			b"PNG" => Self::Png,
			other => Self::Unknown(other.iter().map(|c| char::from(*c)).collect()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Returns the file extension to propose for this `MimeType`
	///
	/// Anything other than JPEG or PNG is stored as `bin`.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.ext(), "jpg");
	/// assert_eq!(MimeType::Png.ext(), "png");
	/// assert_eq!(MimeType::from_str("image/gif").ext(), "bin");
	/// ```
	pub fn ext(&self) -> &'static str {
		match self {
			MimeType::Jpeg => "jpg",
			MimeType::Png => "png",
			MimeType::Unknown(_) => "bin",
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// A picture pulled out of an `APIC` (or ID3v2.2 `PIC`) frame
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExtractedImage {
	/// The MIME type declared by the frame
	pub mime_hint: MimeType,
	/// The picture type
	pub picture_type: PictureType,
	/// The picture's description, possibly empty
	pub description: String,
	/// The raw image data
	pub bytes: Vec<u8>,
}

impl ExtractedImage {
	/// The file name to propose to an [`ImageSink`](crate::sink::ImageSink)
	///
	/// The stem is taken from the audio file's name, and the extension from [`MimeType::ext`].
	/// The `index` is 1 for the first picture in a tag, later pictures get a `_<index>` suffix.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::picture::{ExtractedImage, MimeType, PictureType};
	///
	/// let image = ExtractedImage {
	/// 	mime_hint: MimeType::Png,
	/// 	picture_type: PictureType::CoverFront,
	/// 	description: String::new(),
	/// 	bytes: Vec::new(),
	/// };
	///
	/// assert_eq!(image.proposed_filename("music/track01.mp3", 1), "track01.png");
	/// assert_eq!(image.proposed_filename("music/track01.mp3", 2), "track01_2.png");
	/// ```
	pub fn proposed_filename(&self, filename_hint: &str, index: usize) -> String {
		let stem = Path::new(filename_hint)
			.file_stem()
			.map(|stem| stem.to_string_lossy())
			.filter(|stem| !stem.is_empty())
			.unwrap_or(std::borrow::Cow::Borrowed("cover"));

		let ext = self.mime_hint.ext();
		if index <= 1 {
			format!("{stem}.{ext}")
		} else {
			format!("{stem}_{index}.{ext}")
		}
	}
}

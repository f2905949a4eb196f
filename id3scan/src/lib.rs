//! Tolerant extraction of ID3v1 and ID3v2 metadata from MP3 buffers.
//!
//! id3scan reads the tag at the start (ID3v2.2, ID3v2.3, ID3v2.4) or end (ID3v1, ID3v1.1) of a
//! buffer and turns it into a flat [`MetadataRecord`](record::MetadataRecord). Extraction never
//! fails. Malformed input results in as much metadata as could be recovered, with every problem
//! recorded as a [diagnostic](record::MetadataRecord::diagnostics).
//!
//! id3scan does no I/O of its own. Attached pictures are handed to an [`ImageSink`](sink::ImageSink),
//! and the duration of the audio comes from an optional [`DurationEstimator`](duration::DurationEstimator).
//!
//! # Examples
//!
//! ## Reading a buffer
//!
//! ```rust
//! use id3scan::config::ParseOptions;
//! use id3scan::read_from_slice;
//!
//! // An ID3v2.4 tag with a single TIT2 frame
//! let data = b"ID3\x04\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x03Title";
//!
//! let record = read_from_slice(data, "song.mp3", ParseOptions::new());
//! assert_eq!(record.get_text("TIT2"), Some("Title"));
//! assert!(record.diagnostics().is_empty());
//! ```
//!
//! ## Storing pictures
//!
//! ```rust,no_run
//! use id3scan::picture::ExtractedImage;
//! use id3scan::{Extractor, TagSource};
//!
//! # fn main() -> std::io::Result<()> {
//! let data = std::fs::read("song.mp3")?;
//!
//! let mut sink = |name: &str, image: &ExtractedImage| -> std::io::Result<String> {
//! 	let path = format!("thumbs/{name}");
//! 	std::fs::write(&path, &image.bytes)?;
//! 	Ok(path)
//! };
//!
//! let record = Extractor::new(&mut sink).extract(TagSource::new(&data, "song.mp3"));
//! for (key, value) in &record {
//! 	println!("{key}: {value}");
//! }
//! # Ok(()) }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod duration;
pub mod error;
pub mod id3;
pub(crate) mod macros;
pub mod picture;
pub mod record;
pub mod sink;
pub mod util;

use crate::config::ParseOptions;
use crate::duration::{DurationEstimator, format_duration};
use crate::error::{ErrorKind, Result, TagError};
use crate::id3::v1::read_id3v1;
use crate::id3::v2::Id3v2Header;
use crate::id3::v2::read::read_id3v2;
use crate::id3::{TagLocation, locate_tag};
use crate::record::{MetadataRecord, MetadataValue, TagFormat};
use crate::sink::{ImageSink, NullSink};
use crate::util::text::TextDecoder;

/// A buffer to extract metadata from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagSource<'a> {
	/// The contents of the file, or at least enough of it to cover the tag
	pub data: &'a [u8],
	/// The name of the file, only used to name extracted pictures
	pub filename: &'a str,
}

impl<'a> TagSource<'a> {
	/// Create a new `TagSource`
	pub fn new(data: &'a [u8], filename: &'a str) -> Self {
		Self { data, filename }
	}
}

/// Extracts metadata from [`TagSource`]s
///
/// An `Extractor` can be reused for any number of sources, each extraction is independent.
///
/// # Examples
///
/// ```rust
/// use id3scan::config::ParseOptions;
/// use id3scan::sink::MemorySink;
/// use id3scan::{Extractor, TagSource};
/// use std::time::Duration;
///
/// let estimator = |_: &[u8]| Some(Duration::from_secs(90));
///
/// let mut sink = MemorySink::new();
/// let mut extractor = Extractor::new(&mut sink)
/// 	.options(ParseOptions::new().read_cover_art(false))
/// 	.duration_estimator(&estimator);
///
/// let record = extractor.extract(TagSource::new(b"ID3\x03\x00\x00\x00\x00\x00\x00", "a.mp3"));
/// assert_eq!(record.get_text("DURATION"), Some("01:30.00"));
/// assert_eq!(record.duration(), Some(Duration::from_secs(90)));
/// ```
pub struct Extractor<'a> {
	sink: &'a mut dyn ImageSink,
	options: ParseOptions,
	estimator: Option<&'a dyn DurationEstimator>,
}

impl<'a> Extractor<'a> {
	/// Create a new `Extractor`, storing pictures in `sink`
	pub fn new(sink: &'a mut dyn ImageSink) -> Self {
		Self {
			sink,
			options: ParseOptions::new(),
			estimator: None,
		}
	}

	/// Set the [`ParseOptions`] to use
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = options;
		self
	}

	/// Set the [`DurationEstimator`] used to fill in `DURATION`
	///
	/// Without one, the record has no `DURATION` key.
	pub fn duration_estimator(mut self, estimator: &'a dyn DurationEstimator) -> Self {
		self.estimator = Some(estimator);
		self
	}

	/// Extract the metadata from `source`
	///
	/// An ID3v2 tag takes precedence over an ID3v1 trailer. If the ID3v2 tag is unreadable
	/// (Ex. an unsupported version), the ID3v1 trailer is **not** used instead.
	pub fn extract(&mut self, source: TagSource<'_>) -> MetadataRecord {
		let TagSource { data, filename } = source;
		log::debug!("Extracting metadata from `{filename}`, size: {}", data.len());

		let mut record = MetadataRecord::default();
		match locate_tag(data) {
			TagLocation::Id3v2 => {
				if let Err(err) = self.read_id3v2_tag(data, filename, &mut record) {
					log::warn!("Unable to read ID3v2 tag: {err}");
					record.push_diagnostic(err);
				}
			},
			TagLocation::Id3v1(trailer) => {
				record.set_format(TagFormat::Id3v1);

				let decoder = TextDecoder::new(&self.options);
				for (key, value) in read_id3v1(trailer, &decoder) {
					record.insert(key, value);
				}
			},
			TagLocation::None => {
				log::debug!("No tag found in `{filename}`");
				record.push_diagnostic(TagError::new(ErrorKind::NoTagFound));
			},
		}

		if let Some(estimator) = self.estimator {
			let duration = estimator.estimate(data);
			log::trace!("Estimated duration: {duration:?}");

			record.set_duration(duration);
			record.insert("DURATION", MetadataValue::Text(format_duration(duration)));
		}

		record
	}

	fn read_id3v2_tag(&mut self, data: &[u8], filename: &str, record: &mut MetadataRecord) -> Result<()> {
		let header = Id3v2Header::parse(data)?;
		read_id3v2(data, header, self.options, &mut *self.sink, filename, record)
	}
}

/// Extract the metadata from `data`, without storing pictures
///
/// Pictures are still available through [`MetadataRecord::images`], and the `APIC` key holds
/// the file name that would have been proposed to an [`ImageSink`].
///
/// # Examples
///
/// ```rust
/// use id3scan::config::ParseOptions;
/// use id3scan::error::ErrorKind;
/// use id3scan::read_from_slice;
///
/// let record = read_from_slice(&[0; 1024], "silence.mp3", ParseOptions::new());
///
/// assert!(record.is_empty());
/// assert!(matches!(record.diagnostics()[0].kind(), ErrorKind::NoTagFound));
/// ```
pub fn read_from_slice(data: &[u8], filename: &str, options: ParseOptions) -> MetadataRecord {
	Extractor::new(&mut NullSink)
		.options(options)
		.extract(TagSource::new(data, filename))
}

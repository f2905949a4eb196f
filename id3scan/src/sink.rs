//! Destinations for extracted pictures
//!
//! The extractor never touches the file system. Every picture it finds is offered to an
//! [`ImageSink`], which stores it and reports back where it went. That location ends up in
//! the record under the `APIC` key.

use crate::picture::ExtractedImage;

use std::io;

/// Stores extracted pictures
///
/// Any `FnMut(&str, &ExtractedImage) -> io::Result<String>` closure is an `ImageSink`.
///
/// # Examples
///
/// ```rust
/// use id3scan::config::ParseOptions;
/// use id3scan::picture::ExtractedImage;
/// use id3scan::{Extractor, TagSource};
///
/// let mut sink = |name: &str, image: &ExtractedImage| -> std::io::Result<String> {
/// 	// Write `image.bytes` somewhere...
/// 	Ok(format!("/thumbs/{name}"))
/// };
///
/// let record = Extractor::new(&mut sink)
/// 	.options(ParseOptions::new())
/// 	.extract(TagSource::new(&[], "song.mp3"));
/// assert!(record.is_empty());
/// ```
pub trait ImageSink {
	/// Store `image`, returning the path or URL it can be found at
	///
	/// `proposed_filename` is made up of the audio file's stem and an extension
	/// derived from the picture's MIME type (Ex. `"song.jpg"`).
	///
	/// # Errors
	///
	/// The image couldn't be stored. This is recorded as `APIC_ERROR`, extraction continues.
	fn persist(&mut self, proposed_filename: &str, image: &ExtractedImage) -> io::Result<String>;
}

impl<F> ImageSink for F
where
	F: FnMut(&str, &ExtractedImage) -> io::Result<String>,
{
	fn persist(&mut self, proposed_filename: &str, image: &ExtractedImage) -> io::Result<String> {
		self(proposed_filename, image)
	}
}

/// A sink that stores nothing
///
/// The proposed file name is reported back as the location.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;

impl ImageSink for NullSink {
	fn persist(&mut self, proposed_filename: &str, _: &ExtractedImage) -> io::Result<String> {
		Ok(proposed_filename.to_owned())
	}
}

/// A sink that keeps every picture in memory
///
/// # Examples
///
/// ```rust
/// use id3scan::sink::MemorySink;
/// use id3scan::{Extractor, TagSource};
///
/// let mut sink = MemorySink::new();
/// let _record = Extractor::new(&mut sink).extract(TagSource::new(&[], "song.mp3"));
///
/// assert!(sink.images().is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
	stored: Vec<(String, ExtractedImage)>,
}

impl MemorySink {
	/// Create an empty `MemorySink`
	pub fn new() -> Self {
		Self::default()
	}

	/// The stored pictures, along with their proposed file names
	pub fn images(&self) -> &[(String, ExtractedImage)] {
		&self.stored
	}

	/// Take the stored pictures out of the sink
	pub fn into_images(self) -> Vec<(String, ExtractedImage)> {
		self.stored
	}
}

impl ImageSink for MemorySink {
	fn persist(&mut self, proposed_filename: &str, image: &ExtractedImage) -> io::Result<String> {
		self.stored
			.push((proposed_filename.to_owned(), image.clone()));
		Ok(format!("memory:{proposed_filename}"))
	}
}

//! The result of an extraction
//!
//! A [`MetadataRecord`] is an insertion-ordered mapping of keys (frame IDs or composite keys
//! such as `COMM::eng`) to [`MetadataValue`]s, along with any pictures that were found and every
//! problem that was recovered from along the way.

use crate::error::TagError;
use crate::picture::ExtractedImage;
use crate::util::text::binary_placeholder;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// The kind of tag a [`MetadataRecord`] was read from
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TagFormat {
	/// An ID3v1 (or ID3v1.1) trailer
	Id3v1,
	/// An ID3v2 tag
	Id3v2 {
		/// The major version (2, 3, or 4)
		major: u8,
		/// The revision
		revision: u8,
	},
}

impl Display for TagFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Id3v1 => f.write_str("ID3v1"),
			Self::Id3v2 { major, revision } => write!(f, "ID3v2.{major}.{revision}"),
		}
	}
}

/// A decoded value
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MetadataValue {
	/// Plain text
	Text(String),
	/// A nested, insertion-ordered mapping
	///
	/// This is used for frames that may appear multiple times with different descriptions,
	/// such as `TXXX` (description → value) and `PRIV` (owner → base64 data).
	Map(Vec<(String, String)>),
	/// The location an [`ImageSink`](crate::sink::ImageSink) stored a picture at
	Stored(String),
	/// Content that isn't interpreted, only its size is kept
	Opaque {
		/// The size of the content in bytes
		size: usize,
	},
}

impl MetadataValue {
	/// Whether the value has no content
	///
	/// [`MetadataValue::Opaque`] is only considered empty if its size is 0.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(text) | Self::Stored(text) => text.is_empty(),
			Self::Map(entries) => entries.is_empty(),
			Self::Opaque { size } => *size == 0,
		}
	}

	/// Returns the text, if this is a [`MetadataValue::Text`] or [`MetadataValue::Stored`]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) | Self::Stored(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the entries, if this is a [`MetadataValue::Map`]
	pub fn as_map(&self) -> Option<&[(String, String)]> {
		match self {
			Self::Map(entries) => Some(entries),
			_ => None,
		}
	}
}

impl Display for MetadataValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(text) | Self::Stored(text) => f.write_str(text),
			Self::Map(entries) => {
				f.write_str("{")?;
				for (i, (key, value)) in entries.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key:?}: {value:?}")?;
				}
				f.write_str("}")
			},
			Self::Opaque { size } => f.write_str(&binary_placeholder(*size)),
		}
	}
}

/// Metadata extracted from a single file
///
/// Extraction never fails, so an empty record is a perfectly valid result. Use
/// [`MetadataRecord::format`] to tell whether a tag was found at all, and
/// [`MetadataRecord::diagnostics`] to see what went wrong.
#[derive(Debug, Default)]
pub struct MetadataRecord {
	format: Option<TagFormat>,
	items: Vec<(String, MetadataValue)>,
	// Key -> position in `items`
	index: HashMap<String, usize>,
	// Key -> (entry key -> position in the nested mapping)
	entry_index: HashMap<String, HashMap<String, usize>>,
	images: Vec<ExtractedImage>,
	diagnostics: Vec<TagError>,
	duration: Option<Duration>,
}

impl MetadataRecord {
	/// The tag format the record was read from, `None` if no tag was found
	pub fn format(&self) -> Option<TagFormat> {
		self.format
	}

	/// Get the value of a key
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// let record = id3scan::read_from_slice(&[0; 16], "silence.mp3", ParseOptions::new());
	/// assert!(record.get("TIT2").is_none());
	/// ```
	pub fn get(&self, key: &str) -> Option<&MetadataValue> {
		self.index.get(key).map(|&pos| &self.items[pos].1)
	}

	/// Get the text of a key
	///
	/// This returns `None` if the key doesn't exist, or the value isn't text.
	/// See [`MetadataValue::as_text`].
	pub fn get_text(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(MetadataValue::as_text)
	}

	/// Whether the record contains `key`
	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// An iterator over the keys and values, in insertion order
	pub fn items(&self) -> impl Iterator<Item = (&str, &MetadataValue)> + '_ {
		self.items.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// The number of keys in the record
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the record has no keys
	///
	/// Note that a record may be empty even if a tag was found.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Every picture found in the tag, in order of appearance
	pub fn images(&self) -> &[ExtractedImage] {
		&self.images
	}

	/// Take the pictures out of the record
	pub fn take_images(&mut self) -> Vec<ExtractedImage> {
		std::mem::take(&mut self.images)
	}

	/// Problems that were recovered from while extracting
	///
	/// Nothing here is fatal, the record holds everything that could be read.
	pub fn diagnostics(&self) -> &[TagError] {
		&self.diagnostics
	}

	/// The duration of the audio, if a [`DurationEstimator`](crate::duration::DurationEstimator)
	/// was provided and able to estimate one
	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	pub(crate) fn set_format(&mut self, format: TagFormat) {
		self.format = Some(format);
	}

	pub(crate) fn set_duration(&mut self, duration: Option<Duration>) {
		self.duration = duration;
	}

	pub(crate) fn push_image(&mut self, image: ExtractedImage) {
		self.images.push(image);
	}

	pub(crate) fn push_diagnostic(&mut self, diagnostic: TagError) {
		log::debug!("Recording diagnostic: {diagnostic}");
		self.diagnostics.push(diagnostic);
	}

	/// Insert a value, replacing any existing value of the same key in place
	///
	/// An empty value will never replace a non-empty one. Returns `true` if the value was stored.
	pub(crate) fn insert(&mut self, key: impl Into<String>, value: MetadataValue) -> bool {
		let key = key.into();
		let Some(&position) = self.index.get(&key) else {
			self.index_entries(&key, &value);
			self.index.insert(key.clone(), self.items.len());
			self.items.push((key, value));
			return true;
		};

		// Duplicate frames are not allowed. But if this occurs we try
		// to keep the frame with the non-empty content. Superfluous,
		// duplicate frames that follow the first frame are often empty.
		if value.is_empty() && !self.items[position].1.is_empty() {
			log::warn!("Keeping non-empty value for \"{key}\" over an empty duplicate");
			return false;
		}

		log::warn!("Replaced value for \"{key}\" with a later value of the same key");
		self.index_entries(&key, &value);
		self.items[position].1 = value;
		true
	}

	/// Insert an entry into the nested mapping under `key`
	///
	/// The same duplicate rules as [`MetadataRecord::insert`] apply to `entry_key`.
	/// If `key` holds something other than a mapping, it is replaced.
	pub(crate) fn insert_entry(&mut self, key: &str, entry_key: String, entry_value: String) {
		let position = match self.index.get(key) {
			Some(&pos) => pos,
			None => {
				self.index.insert(key.to_owned(), self.items.len());
				self.items
					.push((key.to_owned(), MetadataValue::Map(Vec::new())));
				self.items.len() - 1
			},
		};

		let value = &mut self.items[position].1;
		if !matches!(value, MetadataValue::Map(_)) {
			log::warn!("Replacing non-map value for \"{key}\" with a mapping");
			*value = MetadataValue::Map(Vec::new());
		}

		let MetadataValue::Map(entries) = value else {
			return;
		};

		if !self.entry_index.contains_key(key) {
			self.entry_index.insert(key.to_owned(), HashMap::new());
		}

		let Some(indices) = self.entry_index.get_mut(key) else {
			return;
		};

		match indices.get(&entry_key) {
			Some(&pos) if entry_value.is_empty() && !entries[pos].1.is_empty() => {
				log::warn!("Keeping non-empty \"{key}\" entry \"{entry_key}\" over an empty duplicate");
			},
			Some(&pos) => entries[pos].1 = entry_value,
			None => {
				indices.insert(entry_key.clone(), entries.len());
				entries.push((entry_key, entry_value));
			},
		}
	}

	// Keep the nested index in line with a value about to be stored under `key`
	fn index_entries(&mut self, key: &str, value: &MetadataValue) {
		match value {
			MetadataValue::Map(entries) => {
				let indices = entries
					.iter()
					.enumerate()
					.map(|(pos, (entry_key, _))| (entry_key.clone(), pos))
					.collect();
				self.entry_index.insert(key.to_owned(), indices);
			},
			_ => {
				self.entry_index.remove(key);
			},
		}
	}
}

impl<'a> IntoIterator for &'a MetadataRecord {
	type Item = (&'a str, &'a MetadataValue);
	type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

	fn into_iter(self) -> Self::IntoIter {
		Box::new(self.items())
	}
}

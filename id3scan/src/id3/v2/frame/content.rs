use super::RawFrame;
use crate::config::ParseOptions;
use crate::error::{ErrorKind, Result, TagError};
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, ExtendedTextFrame, KeyValueFrame, LanguageFrame, PrivateFrame,
	TextInformationFrame, UrlLinkFrame,
};
use crate::record::{MetadataRecord, MetadataValue};
use crate::sink::ImageSink;
use crate::util::text::TextDecoder;

/// `T***` frames that are not plain text
pub(crate) const STRUCTURED_TEXT_FRAMES: [&str; 3] = ["TXXX", "TIPL", "TMCL"];

/// The key used to report picture errors
pub(crate) const PICTURE_ERROR_KEY: &str = "APIC_ERROR";

/// Turns [`RawFrame`]s into entries of a [`MetadataRecord`]
///
/// Each frame is decoded according to its ID:
///
/// * `T***` - Plain text, see [`ParseOptions::multi_value_separator`]
/// * `TXXX`, `WXXX` - A mapping of description to value
/// * `COMM`, `USLT` - Stored under `<id>::<language>`, a later frame of the same language replaces
///   an earlier one
/// * `TIPL`, `TMCL`, `IPLS` - A mapping of role to name
/// * `W***` - A URL
/// * `APIC` - The picture is handed to the [`ImageSink`], and the location is stored
/// * `PRIV` - A mapping of owner to BASE64 encoded data
///
/// Anything else is stored as a [`MetadataValue::Opaque`] placeholder.
///
/// Once every frame is interpreted, [`FrameInterpreter::finish`] must be called to select the
/// bare `COMM` and `USLT` entries.
pub struct FrameInterpreter<'a> {
	version: Id3v2Version,
	options: ParseOptions,
	decoder: TextDecoder,
	sink: &'a mut dyn ImageSink,
	filename: &'a str,
	pictures_found: usize,
	pictures_stored: usize,
	language_frames: Vec<(String, LanguageFrame)>,
}

impl<'a> FrameInterpreter<'a> {
	/// Create a new `FrameInterpreter`
	///
	/// * `version` - The version of the tag being read, this affects text and picture frames
	/// * `sink` - Where to store pictures
	/// * `filename` - The name of the audio file, used to name pictures
	pub fn new(
		version: Id3v2Version,
		options: ParseOptions,
		sink: &'a mut dyn ImageSink,
		filename: &'a str,
	) -> Self {
		Self {
			version,
			options,
			decoder: TextDecoder::new(&options),
			sink,
			filename,
			pictures_found: 0,
			pictures_stored: 0,
			language_frames: Vec::new(),
		}
	}

	/// Interpret a single frame, storing the result in `record`
	///
	/// This never fails. Frames that can't be read are stored as a [`MetadataValue::Opaque`]
	/// placeholder, with the reason added to the record's diagnostics.
	pub fn interpret(&mut self, frame: &RawFrame<'_>, record: &mut MetadataRecord) {
		let id = frame.id.as_str();

		if frame.id.is_outdated() {
			log::warn!("Unable to upgrade ID3v2.2 frame `{id}`, storing it as binary");
			record.insert(id, MetadataValue::Opaque {
				size: frame.content.len(),
			});
			return;
		}

		let payload = match frame.payload(self.options.allocation_limit) {
			Ok(payload) => payload,
			Err(err) => {
				log::warn!("Unable to read the content of frame `{id}`: {err}");
				record.insert(id, MetadataValue::Opaque {
					size: frame.content.len(),
				});
				record.push_diagnostic(err);
				return;
			},
		};

		if let Err(err) = self.interpret_content(id, &payload, record) {
			log::warn!("Failed to interpret frame `{id}`: {err}");
			record.push_diagnostic(err);
		}
	}

	#[rustfmt::skip]
	fn interpret_content(&mut self, id: &str, content: &[u8], record: &mut MetadataRecord) -> Result<()> {
		log::trace!("Interpreting frame `{id}`, content size: {}", content.len());

		let decoder = self.decoder;
		match id {
			"APIC" => return self.interpret_picture(content, record),
			"TXXX" => {
				if let Some(frame) = ExtendedTextFrame::parse(content, &decoder) {
					record.insert_entry(id, frame.description, frame.content);
				}
			},
			"WXXX" => {
				if let Some(frame) = ExtendedTextFrame::parse_url(content, &decoder) {
					record.insert_entry(id, frame.description, frame.content);
				}
			},
			"COMM" | "USLT" => {
				if let Some(frame) = LanguageFrame::parse(content, &decoder) {
					record.insert(frame.key(id), MetadataValue::Text(frame.content.clone()));
					self.language_frames.push((id.to_owned(), frame));
				}
			},
			"TIPL" | "TMCL" | "IPLS" => {
				if let Some(frame) = KeyValueFrame::parse(content, &decoder) {
					for (role, name) in frame.key_value_pairs {
						record.insert_entry(id, role, name);
					}
				}
			},
			"PRIV" => {
				let frame = PrivateFrame::parse(content);
				record.insert_entry(id, frame.owner, frame.data);
			},
			// Apple proprietary frames
			// GRP1 (Grouping), MVNM (Movement Name), MVIN (Movement Number)
			i if (i.starts_with('T') && !STRUCTURED_TEXT_FRAMES.contains(&i)) || matches!(i, "GRP1" | "MVNM" | "MVIN") => {
				let separator = self.options.multi_value_separator;
				if let Some(frame) = TextInformationFrame::parse(content, &decoder, self.version, separator) {
					record.insert(id, MetadataValue::Text(frame.value));
				}
			},
			i if i.starts_with('W') => {
				if let Some(frame) = UrlLinkFrame::parse(content) {
					record.insert(id, MetadataValue::Text(frame.url));
				}
			},
			// SYLT, GEOB, and any unknown frames
			_ => {
				record.insert(id, MetadataValue::Opaque { size: content.len() });
			},
		}

		Ok(())
	}

	fn interpret_picture(&mut self, content: &[u8], record: &mut MetadataRecord) -> Result<()> {
		self.pictures_found += 1;

		if !self.options.read_cover_art {
			log::trace!("Skipping picture, cover art reading is disabled");
			record.insert(picture_key(self.pictures_found), MetadataValue::Opaque {
				size: content.len(),
			});
			return Ok(());
		}

		let image = match AttachedPictureFrame::parse(content, &self.decoder, self.version) {
			Ok(image) => image,
			Err(err) => {
				let message = match err.kind() {
					ErrorKind::TextDecode(message) => (*message).to_owned(),
					_ => err.to_string(),
				};

				record.insert(PICTURE_ERROR_KEY, MetadataValue::Text(message));
				return Err(err);
			},
		};

		let proposed_filename = image.proposed_filename(self.filename, self.pictures_found);
		log::debug!("Offering picture to the image sink as `{proposed_filename}`");

		match self.sink.persist(&proposed_filename, &image) {
			Ok(location) => {
				self.pictures_stored += 1;
				record.insert(
					picture_key(self.pictures_stored),
					MetadataValue::Stored(location),
				);
			},
			Err(err) => {
				log::warn!("Failed to save image `{proposed_filename}`: {err}");
				record.insert(
					PICTURE_ERROR_KEY,
					MetadataValue::Text(format!("Failed to save image: {err}")),
				);
				record.push_diagnostic(TagError::new(ErrorKind::ImagePersist(err)));
			},
		}

		record.push_image(image);
		Ok(())
	}

	/// Finish interpreting, selecting the bare `COMM` and `USLT` entries
	///
	/// For each, the frame is chosen by [`ParseOptions::language_priority`]. Frames without a
	/// description are preferred, and if no language matches, the first frame is used.
	/// The description of the chosen frame, if any, is stored under `<id>_DESC`.
	pub fn finish(self, record: &mut MetadataRecord) {
		for id in ["COMM", "USLT"] {
			let preferred = self
				.language_frames
				.iter()
				.filter(|(frame_id, _)| frame_id == id)
				.map(|(_, frame)| frame)
				.min_by_key(|frame| {
					(
						self.language_rank(&frame.language),
						!frame.description.is_empty(),
					)
				});

			if let Some(frame) = preferred {
				log::trace!("Using `{}` as the bare `{id}`", frame.key(id));
				record.insert(id, MetadataValue::Text(frame.content.clone()));

				if !frame.description.is_empty() {
					record.insert(
						format!("{id}_DESC"),
						MetadataValue::Text(frame.description.clone()),
					);
				}
			}
		}
	}

	fn language_rank(&self, language: &str) -> usize {
		let priority = self.options.language_priority;
		priority
			.iter()
			.position(|preferred| preferred.eq_ignore_ascii_case(language))
			.unwrap_or(priority.len())
	}
}

fn picture_key(index: usize) -> String {
	if index <= 1 {
		String::from("APIC")
	} else {
		format!("APIC:{index}")
	}
}

use crate::util::{TagBuilder, latin1, utf8, utf16};

use id3scan::config::ParseOptions;
use id3scan::error::Id3v2ErrorKind;
use id3scan::read_from_slice;
use id3scan::record::{MetadataRecord, MetadataValue, TagFormat};

fn read(data: &[u8]) -> MetadataRecord {
	read_from_slice(data, "track.mp3", ParseOptions::new())
}

fn map(entries: &[(&str, &str)]) -> MetadataValue {
	MetadataValue::Map(
		entries
			.iter()
			.map(|(k, v)| (String::from(*k), String::from(*v)))
			.collect(),
	)
}

#[test_log::test]
fn empty_tag() {
	let record = read(b"ID3\x04\x00\x00\x00\x00\x00\x00");

	assert_eq!(record.format(), Some(TagFormat::Id3v2 { major: 4, revision: 0 }));
	assert!(record.is_empty());
	assert!(record.diagnostics().is_empty());
}

#[test_log::test]
fn comment_with_padded_description() {
	let data = TagBuilder::new(3)
		.frame("COMM", b"\x00eng\x00\x00description\x00Hello")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("COMM::eng"), Some("Hello"));
	assert_eq!(record.get_text("COMM"), Some("Hello"));
	assert_eq!(record.len(), 2);
}

#[test_log::test]
fn text_frames_round_trip() {
	let frames = [
		("TIT2", "Title"),
		("TPE1", "Artist"),
		("TALB", "Album \u{00e9}"),
		("TRCK", "3/12"),
		("TCON", "\u{c778}\u{b514}"),
	];

	for major in [3, 4] {
		let mut builder = TagBuilder::new(major);
		for (i, (id, value)) in frames.iter().enumerate() {
			let content = match i % 3 {
				0 => latin1(value),
				1 => utf16(value),
				_ if major == 4 => utf8(value),
				_ => utf16(value),
			};
			builder = builder.frame(id, &content);
		}

		let record = read(&builder.padding(16).build());
		let decoded: Vec<(&str, &str)> = record
			.items()
			.map(|(k, v)| (k, v.as_text().unwrap()))
			.collect();

		assert_eq!(decoded, frames, "ID3v2.{major}");
		assert!(record.diagnostics().is_empty());
	}
}

#[test_log::test]
fn multi_value_text() {
	let data = TagBuilder::new(4).frame("TPE1", &utf8("A\0B\0C")).build();

	let record = read(&data);
	assert_eq!(record.get_text("TPE1"), Some("A / B / C"));

	let options = ParseOptions::new().multi_value_separator("; ");
	let record = read_from_slice(&data, "track.mp3", options);
	assert_eq!(record.get_text("TPE1"), Some("A; B; C"));
}

#[test_log::test]
fn truncated_frame_keeps_earlier_frames() {
	let mut data = TagBuilder::new(4)
		.frame("TIT2", &utf8("Title"))
		.frame("TPE1", &utf8("Artist"))
		.frame("TALB", &utf8("An album with a long name"))
		.build();
	data.truncate(data.len() - 10);

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert_eq!(record.get_text("TPE1"), Some("Artist"));
	assert!(!record.contains_key("TALB"));

	assert_eq!(record.diagnostics().len(), 1);
	assert!(matches!(
		record.diagnostics()[0].id3v2_kind(),
		Some(Id3v2ErrorKind::TruncatedFrame { .. })
	));
}

#[test_log::test]
fn oversized_frame_keeps_earlier_frames() {
	// The TALB frame claims to be larger than the rest of the tag
	let data = TagBuilder::new(3)
		.frame("TIT2", &latin1("Title"))
		.raw(b"TALB\x00\x00\x01\x00\x00\x00\x00Album")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert!(matches!(
		record.diagnostics()[0].id3v2_kind(),
		Some(Id3v2ErrorKind::OversizedFrame { declared: 256, .. })
	));
}

#[test_log::test]
fn garbage_after_frames() {
	let data = TagBuilder::new(4)
		.frame("TIT2", &utf8("Title"))
		.raw(b"\xFF\xFB\x90\x64\x00\x00\x00\x00\x00\x00")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert!(matches!(
		record.diagnostics()[0].id3v2_kind(),
		Some(Id3v2ErrorKind::BadFrameId(_))
	));
}

#[test_log::test]
fn unsupported_version() {
	let mut data = b"ID3\x05\x00\x00\x00\x00\x00\x00".to_vec();
	data.extend_from_slice(&crate::util::id3v1_trailer("Song", "", "", "", ""));

	let record = read(&data);
	assert!(record.is_empty());
	assert_eq!(record.format(), None);
	assert!(matches!(
		record.diagnostics()[0].id3v2_kind(),
		Some(Id3v2ErrorKind::BadId3v2Version(5, 0))
	));
}

#[test_log::test]
fn id3v2_2() {
	let data = TagBuilder::new(2)
		.frame("TT2", &latin1("Title"))
		.frame("TP1", &utf16("Artist"))
		.frame("COM", b"\x00eng\x00Comment")
		.frame("XYZ", b"abc")
		.build();

	let record = read(&data);
	assert_eq!(record.format(), Some(TagFormat::Id3v2 { major: 2, revision: 0 }));
	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert_eq!(record.get_text("TPE1"), Some("Artist"));
	assert_eq!(record.get_text("COMM::eng"), Some("Comment"));
	assert_eq!(record.get("XYZ"), Some(&MetadataValue::Opaque { size: 3 }));
}

#[test_log::test]
fn v2_ids_in_v3_tag() {
	let data = TagBuilder::new(3).frame("TT2\0", &latin1("Title")).build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("Title"));
}

#[test_log::test]
fn extended_headers() {
	// ID3v2.3, the size excludes itself
	let data = TagBuilder::new(3)
		.flags(0x40)
		.raw(&[0, 0, 0, 6, 0, 0, 0, 0, 0, 0])
		.frame("TIT2", &latin1("Title"))
		.build();
	assert_eq!(read(&data).get_text("TIT2"), Some("Title"));

	// ID3v2.4, the size includes itself
	let data = TagBuilder::new(4)
		.flags(0x40)
		.raw(&[0, 0, 0, 6, 1, 0])
		.frame("TIT2", &utf8("Title"))
		.build();
	assert_eq!(read(&data).get_text("TIT2"), Some("Title"));
}

#[test_log::test]
fn unsynchronisation() {
	// ID3v2.3, the entire tag is unsynchronised
	let data = TagBuilder::new(3)
		.flags(0x80)
		.raw(b"TIT2\x00\x00\x00\x04\x00\x00\x00\xFF\x00\xFEx")
		.build();
	assert_eq!(read(&data).get_text("TIT2"), Some("\u{ff}\u{fe}x"));

	// ID3v2.4, each frame is unsynchronised
	let data = TagBuilder::new(4)
		.frame_with_flags("TIT2", 0x0002, b"\x00\xFF\x00\xFEx")
		.build();
	assert_eq!(read(&data).get_text("TIT2"), Some("\u{ff}\u{fe}x"));
}

#[test_log::test]
fn user_defined_frames() {
	let data = TagBuilder::new(4)
		.frame("TXXX", b"\x03MOOD\x00Calm")
		.frame("TXXX", b"\x03REPLAYGAIN_TRACK_GAIN\x00-6.5 dB")
		.frame("WXXX", b"\x00Home\x00https://example.com")
		.frame("TIPL", b"\x03producer\x00Foo\x00engineer\x00Bar")
		.frame("PRIV", b"owner\x00\x01\x02\x03")
		.frame("WOAR", b"https://example.com/artist")
		.build();

	let record = read(&data);
	assert_eq!(
		record.get("TXXX"),
		Some(&map(&[("MOOD", "Calm"), ("REPLAYGAIN_TRACK_GAIN", "-6.5 dB")]))
	);
	assert_eq!(record.get("WXXX"), Some(&map(&[("Home", "https://example.com")])));
	assert_eq!(
		record.get("TIPL"),
		Some(&map(&[("producer", "Foo"), ("engineer", "Bar")]))
	);
	assert_eq!(record.get("PRIV"), Some(&map(&[("owner", "AQID")])));
	assert_eq!(record.get_text("WOAR"), Some("https://example.com/artist"));
}

#[test_log::test]
fn lyrics_and_comments() {
	let data = TagBuilder::new(3)
		.frame("COMM", b"\x00fra\x00Bonjour")
		.frame("COMM", b"\x00eng\x00Hello")
		.frame("USLT", b"\x00eng\x00La la la")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("COMM::fra"), Some("Bonjour"));
	assert_eq!(record.get_text("COMM"), Some("Hello"));
	assert_eq!(record.get_text("USLT::eng"), Some("La la la"));
	assert_eq!(record.get_text("USLT"), Some("La la la"));
}

#[test_log::test]
fn duplicate_frames() {
	let data = TagBuilder::new(4)
		.frame("TIT2", &utf8("First"))
		.frame("TIT2", &utf8("Second"))
		.frame("TALB", &utf8("Album"))
		.frame("TALB", b"\x03\x00")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("Second"));
	assert_eq!(record.get_text("TALB"), Some("Album"));
	assert_eq!(record.len(), 2);
}

#[test_log::test]
fn mislabeled_encoding() {
	// Declared as UTF-8, but EUC-KR
	let data = TagBuilder::new(4)
		.frame("TIT2", b"\x03\xC7\xD1\xB1\xB9")
		.build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("\u{d55c}\u{ad6d}"));
}

#[test_log::test]
fn encrypted_frame() {
	let data = TagBuilder::new(3)
		.frame_with_flags("TIT2", 0x0040, b"\x80\x00Secret")
		.frame("TALB", &latin1("Album"))
		.build();

	let record = read(&data);
	assert_eq!(record.get("TIT2"), Some(&MetadataValue::Opaque { size: 8 }));
	assert_eq!(record.get_text("TALB"), Some("Album"));
	assert!(matches!(
		record.diagnostics()[0].id3v2_kind(),
		Some(Id3v2ErrorKind::EncryptedFrame(id)) if id == "TIT2"
	));
}

#[test_log::test]
#[cfg(feature = "id3v2_compression_support")]
fn compressed_frame() {
	use flate2::Compression;
	use flate2::write::ZlibEncoder;
	use std::io::Write;

	let text = latin1("A compressed title");
	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(&text).unwrap();

	// ID3v2.4, the data length indicator is required
	let mut content = (text.len() as u32).to_be_bytes().to_vec();
	content.extend(encoder.finish().unwrap());

	let data = TagBuilder::new(4).frame_with_flags("TIT2", 0x0009, &content).build();

	let record = read(&data);
	assert_eq!(record.get_text("TIT2"), Some("A compressed title"));

	let record = read_from_slice(&data, "track.mp3", ParseOptions::new().allocation_limit(4));
	assert!(matches!(record.diagnostics()[0].kind(), id3scan::error::ErrorKind::TooMuchData));
}

use crate::util::{TagBuilder, id3v1_trailer, utf8};

use id3scan::config::ParseOptions;
use id3scan::read_from_slice;
use id3scan::record::TagFormat;

fn audio_with_trailer(trailer: &[u8; 128]) -> Vec<u8> {
	let mut data = vec![0xFF, 0xFB, 0x90, 0x64];
	data.resize(4096, 0x55);
	data.extend_from_slice(trailer);
	data
}

#[test_log::test]
fn id3v1_fields() {
	let trailer = id3v1_trailer("Song", "Artist", "Album", "2001", "Comment");
	let record = read_from_slice(&audio_with_trailer(&trailer), "a.mp3", ParseOptions::new());

	assert_eq!(record.format(), Some(TagFormat::Id3v1));
	assert_eq!(record.get_text("TIT2"), Some("Song"));
	assert_eq!(record.get_text("TPE1"), Some("Artist"));
	assert_eq!(record.get_text("TALB"), Some("Album"));
	assert_eq!(record.get_text("TYER"), Some("2001"));
	assert_eq!(record.get_text("COMM"), Some("Comment"));
	assert!(!record.contains_key("TCON"));
	assert!(record.diagnostics().is_empty());
}

#[test_log::test]
fn id3v1_1_track_and_genre() {
	let mut trailer = id3v1_trailer("Song", "", "", "", "Short comment");
	trailer[126] = 7;
	trailer[127] = 17;

	let record = read_from_slice(&audio_with_trailer(&trailer), "a.mp3", ParseOptions::new());
	assert_eq!(record.get_text("COMM"), Some("Short comment"));
	assert_eq!(record.get_text("TRCK"), Some("7"));
	assert_eq!(record.get_text("TCON"), Some("Rock"));
	assert!(!record.contains_key("TPE1"));
}

#[test_log::test]
fn trailer_only_buffer() {
	let trailer = id3v1_trailer("Song", "Artist", "", "", "");
	let record = read_from_slice(&trailer, "a.mp3", ParseOptions::new());

	assert_eq!(record.get_text("TIT2"), Some("Song"));
}

#[test_log::test]
fn id3v2_takes_precedence() {
	let mut data = TagBuilder::new(4).frame("TIT2", &utf8("From ID3v2")).build();
	data.extend_from_slice(&id3v1_trailer("From ID3v1", "Artist", "", "", ""));

	let record = read_from_slice(&data, "a.mp3", ParseOptions::new());
	assert_eq!(record.get_text("TIT2"), Some("From ID3v2"));
	assert!(!record.contains_key("TPE1"));
}

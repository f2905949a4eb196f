use crate::util::{TagBuilder, utf8};

use id3scan::config::ParseOptions;
use id3scan::picture::{ExtractedImage, MimeType, PictureType};
use id3scan::record::MetadataValue;
use id3scan::sink::MemorySink;
use id3scan::{Extractor, TagSource, read_from_slice};

use std::cell::RefCell;

fn apic(mime_type: &str, picture_type: u8, data: &[u8]) -> Vec<u8> {
	let mut content = vec![0];
	content.extend_from_slice(mime_type.as_bytes());
	content.push(0);
	content.push(picture_type);
	content.extend_from_slice(b"Cover\0");
	content.extend_from_slice(data);
	content
}

#[test_log::test]
fn proposed_extensions() {
	for (mime_type, expected) in [
		("image/jpeg", "cover.jpg"),
		("image/jpg", "cover.jpg"),
		("image/png", "cover.png"),
		("image/gif", "cover.bin"),
		("", "cover.bin"),
	] {
		let data = TagBuilder::new(4)
			.frame("APIC", &apic(mime_type, 3, b"\x01\x02\x03"))
			.build();

		let proposed = RefCell::new(Vec::new());
		let mut sink = |name: &str, _: &ExtractedImage| -> std::io::Result<String> {
			proposed.borrow_mut().push(name.to_owned());
			Ok(format!("/thumbs/{name}"))
		};

		let record = Extractor::new(&mut sink).extract(TagSource::new(&data, "music/cover.mp3"));

		assert_eq!(*proposed.borrow(), [expected], "MIME type: {mime_type:?}");
		assert_eq!(
			record.get("APIC"),
			Some(&MetadataValue::Stored(format!("/thumbs/{expected}")))
		);
	}
}

#[test_log::test]
fn multiple_pictures() {
	let data = TagBuilder::new(4)
		.frame("TIT2", &utf8("Title"))
		.frame("APIC", &apic("image/jpeg", 3, b"\xFF\xD8\xFF"))
		.frame("APIC", &apic("image/png", 4, b"\x89PNG"))
		.build();

	let mut sink = MemorySink::new();
	let record = Extractor::new(&mut sink).extract(TagSource::new(&data, "track.mp3"));

	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert_eq!(
		record.get("APIC"),
		Some(&MetadataValue::Stored(String::from("memory:track.jpg")))
	);
	assert_eq!(
		record.get("APIC:2"),
		Some(&MetadataValue::Stored(String::from("memory:track_2.png")))
	);

	let images = sink.into_images();
	assert_eq!(images.len(), 2);

	let (name, front) = &images[0];
	assert_eq!(name, "track.jpg");
	assert_eq!(front.mime_hint, MimeType::Jpeg);
	assert_eq!(front.picture_type, PictureType::CoverFront);
	assert_eq!(front.description, "Cover");
	assert_eq!(front.bytes, b"\xFF\xD8\xFF");

	assert_eq!(images[1].1.picture_type, PictureType::CoverBack);
	assert_eq!(record.images(), [front.clone(), images[1].1.clone()]);
}

#[test_log::test]
fn sink_failure_is_not_fatal() {
	let data = TagBuilder::new(4)
		.frame("APIC", &apic("image/png", 3, b"\x89PNG"))
		.frame("TIT2", &utf8("Title"))
		.build();

	let mut sink = |_: &str, _: &ExtractedImage| -> std::io::Result<String> {
		Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
	};

	let record = Extractor::new(&mut sink).extract(TagSource::new(&data, "track.mp3"));
	assert_eq!(record.get_text("TIT2"), Some("Title"));
	assert_eq!(record.get_text("APIC_ERROR"), Some("Failed to save image: read-only"));
	assert!(!record.contains_key("APIC"));
	assert_eq!(record.images().len(), 1);
}

#[test_log::test]
fn id3v2_2_pictures() {
	let mut content = b"\x00JPG\x03Cover\x00".to_vec();
	content.extend_from_slice(b"\xFF\xD8\xFF");

	let data = TagBuilder::new(2).frame("PIC", &content).build();

	let record = read_from_slice(&data, "old.mp3", ParseOptions::new());
	assert_eq!(
		record.get("APIC"),
		Some(&MetadataValue::Stored(String::from("old.jpg")))
	);
	assert_eq!(record.images()[0].mime_hint, MimeType::Jpeg);
}

#[test_log::test]
fn cover_art_disabled() {
	let data = TagBuilder::new(3)
		.frame("APIC", &apic("image/png", 3, b"\x89PNG"))
		.build();

	let mut sink = MemorySink::new();
	let record = Extractor::new(&mut sink)
		.options(ParseOptions::new().read_cover_art(false))
		.extract(TagSource::new(&data, "track.mp3"));

	assert_eq!(record.get("APIC"), Some(&MetadataValue::Opaque { size: 22 }));
	assert!(record.images().is_empty());
	assert!(sink.images().is_empty());
}

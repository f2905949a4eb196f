#![allow(missing_docs)]

use id3scan::config::ParseOptions;
use id3scan::error::ErrorKind;
use id3scan::read_from_slice;
use id3scan::record::{MetadataRecord, MetadataValue};
use id3scan::util::synchsafe::SynchsafeInteger;

use std::thread;
use std::time::{Duration, Instant};

/// Simple xorshift, so the noise is the same on every run
fn noise(len: usize, mut state: u64) -> Vec<u8> {
	(0..len)
		.map(|_| {
			state ^= state << 13;
			state ^= state >> 7;
			state ^= state << 17;
			state as u8
		})
		.collect()
}

/// Run `f` on another thread, failing if it takes longer than 3 seconds
fn bounded_test<F>(f: F) -> MetadataRecord
where
	F: FnOnce() -> MetadataRecord + Send + 'static,
{
	let instant = Instant::now();
	let thread = thread::spawn(f);

	while instant.elapsed() < Duration::from_secs(3) {
		if thread.is_finished() {
			return thread.join().unwrap();
		}

		thread::sleep(Duration::from_millis(1));
	}

	panic!("Failed to run test");
}

#[test_log::test]
fn random_noise() {
	let mut data = noise(10_000, 0x9E37_79B9_7F4A_7C15);

	// Make sure neither tag can be detected
	data[0] = 0;
	data[10_000 - 128] = 0;

	let record = bounded_test(move || read_from_slice(&data, "noise.mp3", ParseOptions::new()));

	assert!(record.is_empty());
	assert_eq!(record.format(), None);
	assert_eq!(record.diagnostics().len(), 1);
	assert!(matches!(record.diagnostics()[0].kind(), ErrorKind::NoTagFound));
}

#[test_log::test]
fn noise_after_header() {
	for seed in 1..64_u64 {
		let mut data = b"ID3\x04\x00\x00\x00\x00\x7F\x7F".to_vec();
		data.extend(noise(20_000, seed));

		bounded_test(move || read_from_slice(&data, "noise.mp3", ParseOptions::new()));
	}
}

#[test_log::test]
fn huge_declared_size() {
	// The tag claims to be ~256MB, but the buffer is tiny
	let data = b"ID3\x04\x00\x00\x7F\x7F\x7F\x7FTIT2\x00\x00\x00\x03\x00\x00\x03Hi".to_vec();

	let record = bounded_test(move || read_from_slice(&data, "a.mp3", ParseOptions::new()));
	assert_eq!(record.get_text("TIT2"), Some("Hi"));
}

#[test_log::test]
fn every_truncation() {
	let mut tag = b"ID3\x03\x00\x00\x00\x00\x00\x3C".to_vec();
	tag.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x00Title");
	tag.extend_from_slice(b"COMM\x00\x00\x00\x09\x00\x00\x00eng\x00Text");
	tag.extend_from_slice(b"APIC\x00\x00\x00\x0F\x00\x00\x00image/png\x00\x03\x00\x89P");

	for len in 0..=tag.len() {
		let record = read_from_slice(&tag[..len], "a.mp3", ParseOptions::new());
		if len >= 26 {
			assert_eq!(record.get_text("TIT2"), Some("Title"), "length: {len}");
		}
	}
}

#[test_log::test]
fn many_unique_user_text_frames() {
	const FRAME_COUNT: usize = 50_000;

	let mut body = Vec::new();
	for i in 0..FRAME_COUNT {
		let content = format!("\x03DESCRIPTION{i}\x00value");
		body.extend_from_slice(b"TXXX");
		body.extend_from_slice(&(content.len() as u32).synch().unwrap().to_be_bytes());
		body.extend_from_slice(&[0, 0]);
		body.extend_from_slice(content.as_bytes());
	}

	let mut tag = b"ID3\x04\x00\x00".to_vec();
	tag.extend_from_slice(&(body.len() as u32).synch().unwrap().to_be_bytes());
	tag.extend(body);

	let record = bounded_test(move || read_from_slice(&tag, "a.mp3", ParseOptions::new()));

	let entries = record.get("TXXX").and_then(MetadataValue::as_map).unwrap();
	assert_eq!(entries.len(), FRAME_COUNT);
	assert_eq!(
		entries.last(),
		Some(&(String::from("DESCRIPTION49999"), String::from("value")))
	);
	assert!(record.diagnostics().is_empty());
}

#![no_main]

use id3scan::config::ParseOptions;
use id3scan::sink::MemorySink;
use id3scan::{Extractor, TagSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let mut sink = MemorySink::new();
	let record = Extractor::new(&mut sink)
		.options(ParseOptions::new().allocation_limit(1024 * 1024))
		.extract(TagSource::new(data, "fuzz.mp3"));

	for (key, value) in &record {
		let _ = format!("{key}: {value}");
	}
});

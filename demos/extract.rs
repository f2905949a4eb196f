#![allow(missing_docs)]

use id3scan::config::ParseOptions;
use id3scan::picture::ExtractedImage;
use id3scan::record::MetadataRecord;
use id3scan::{Extractor, TagSource};

use structopt::StructOpt;

use std::fmt::Write as _;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, StructOpt)]
#[structopt(name = "extract", about = "Print the ID3 metadata of MP3 files")]
struct Opt {
	/// Directory to save cover art in
	#[structopt(short, long, parse(from_os_str), default_value = "thumbs")]
	thumbs: PathBuf,

	/// Don't extract cover art
	#[structopt(long)]
	no_cover_art: bool,

	/// Estimate durations assuming a constant bitrate (in kbps)
	#[structopt(short, long)]
	bitrate: Option<NonZeroU32>,

	#[structopt(parse(from_os_str), required = true)]
	paths: Vec<PathBuf>,
}

fn extract(opt: &Opt, path: &Path) -> std::io::Result<MetadataRecord> {
	let data = std::fs::read(path)?;
	let filename = path.to_string_lossy();

	let mut sink = |name: &str, image: &ExtractedImage| -> std::io::Result<String> {
		let destination = opt.thumbs.join(name);
		std::fs::write(&destination, &image.bytes)?;
		Ok(destination.to_string_lossy().into_owned())
	};

	let bitrate = opt.bitrate;
	let estimator = move |data: &[u8]| Some(constant_bitrate_duration(bitrate?, data.len()));

	let options = ParseOptions::new().read_cover_art(!opt.no_cover_art);

	let mut extractor = Extractor::new(&mut sink).options(options);
	if opt.bitrate.is_some() {
		extractor = extractor.duration_estimator(&estimator);
	}

	Ok(extractor.extract(TagSource::new(&data, &filename)))
}

// A zero bitrate can't be parsed, so the division is always finite
fn constant_bitrate_duration(kbps: NonZeroU32, len: usize) -> Duration {
	let bytes_per_second = f64::from(kbps.get()) * 1000.0 / 8.0;
	Duration::from_secs_f64(len as f64 / bytes_per_second)
}

fn format_record(path: &Path, record: &MetadataRecord) -> String {
	let mut out = format!("--- {} ---\n", path.display());

	match record.format() {
		Some(format) => {
			let _ = writeln!(out, "EXPL: {format}");
		},
		None => out.push_str("EXPL: None\n"),
	}

	for (key, value) in record {
		let _ = writeln!(out, "{key}: {value}");
	}

	for diagnostic in record.diagnostics() {
		let _ = writeln!(out, "WARN: {diagnostic}");
	}

	out
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	if !opt.no_cover_art {
		std::fs::create_dir_all(&opt.thumbs).expect("ERROR: Failed to create thumbnail directory!");
	}

	std::thread::scope(|s| {
		let handles: Vec<_> = opt
			.paths
			.iter()
			.map(|path| {
				let opt = &opt;
				s.spawn(move || match extract(opt, path) {
					Ok(record) => format_record(path, &record),
					Err(e) => format!("--- {} ---\nERROR: {e}\n", path.display()),
				})
			})
			.collect();

		for handle in handles {
			print!("{}", handle.join().expect("ERROR: Extraction thread panicked!"));
		}
	});
}

#[cfg(test)]
mod tests {
	use super::{Opt, constant_bitrate_duration};

	use std::num::NonZeroU32;
	use std::time::Duration;

	use structopt::StructOpt;

	#[test_log::test]
	fn zero_bitrate_is_rejected() {
		let result = Opt::from_iter_safe(["extract", "--bitrate", "0", "song.mp3"]);
		assert!(result.is_err());
	}

	#[test_log::test]
	fn duration_from_bitrate() {
		let kbps = NonZeroU32::new(128).unwrap();
		assert_eq!(constant_bitrate_duration(kbps, 16_000), Duration::from_secs(1));
		assert_eq!(constant_bitrate_duration(kbps, 0), Duration::ZERO);
	}
}

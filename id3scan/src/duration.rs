//! Duration enrichment
//!
//! Decoding audio is out of scope for id3scan, so the duration of a file comes from an
//! external [`DurationEstimator`]. When one is provided, the record gains a `DURATION` key.

use std::time::Duration;

/// Estimates the duration of the audio in a buffer
///
/// Any `Fn(&[u8]) -> Option<Duration>` closure is a `DurationEstimator`.
///
/// # Examples
///
/// ```rust
/// use id3scan::duration::DurationEstimator;
/// use std::time::Duration;
///
/// // Assume 128 kbps CBR
/// let estimator = |data: &[u8]| Some(Duration::from_secs_f64(data.len() as f64 / 16_000.0));
/// assert_eq!(estimator.estimate(&[0; 32_000]), Some(Duration::from_secs(2)));
/// ```
pub trait DurationEstimator {
	/// Estimate the duration of the audio in `data`
	///
	/// `data` is the same buffer given to the extractor. `None` means the duration is unavailable.
	fn estimate(&self, data: &[u8]) -> Option<Duration>;
}

impl<F> DurationEstimator for F
where
	F: Fn(&[u8]) -> Option<Duration>,
{
	fn estimate(&self, data: &[u8]) -> Option<Duration> {
		self(data)
	}
}

/// Format a duration as `MM:SS.ss`
///
/// A missing or zero duration is formatted as `N/A`.
///
/// # Examples
///
/// ```rust
/// use id3scan::duration::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Some(Duration::from_millis(245_500))), "04:05.50");
/// assert_eq!(format_duration(None), "N/A");
/// ```
pub fn format_duration(duration: Option<Duration>) -> String {
	let Some(duration) = duration.filter(|d| !d.is_zero()) else {
		return String::from("N/A");
	};

	let minutes = duration.as_secs() / 60;
	let seconds = duration.as_secs_f64() - (minutes * 60) as f64;
	format!("{minutes:02}:{seconds:05.2}")
}

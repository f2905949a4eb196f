use crate::util::text::FallbackEncoding;

/// Options to control how id3scan extracts metadata
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_cover_art: bool,
	pub(crate) language_priority: &'static [&'static str],
	pub(crate) multi_value_separator: &'static str,
	pub(crate) fallback_encodings: &'static [FallbackEncoding],
	pub(crate) redecode_mislabeled_latin1: bool,
	pub(crate) allocation_limit: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_cover_art: true,
	/// 	language_priority: &["kor", "eng"],
	/// 	multi_value_separator: " / ",
	/// 	fallback_encodings: &[Utf8, EucKr, Utf16, Latin1],
	/// 	redecode_mislabeled_latin1: false,
	/// 	allocation_limit: 16 * 1024 * 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default language priority for choosing the bare `COMM`/`USLT` entries
	pub const DEFAULT_LANGUAGE_PRIORITY: &'static [&'static str] = &["kor", "eng"];

	/// Default separator for multi-value ID3v2.4 text frames
	pub const DEFAULT_MULTI_VALUE_SEPARATOR: &'static str = " / ";

	/// Default order of encodings to try when a text encoding is missing or wrong
	pub const DEFAULT_FALLBACK_ENCODINGS: &'static [FallbackEncoding] = &[
		FallbackEncoding::Utf8,
		FallbackEncoding::EucKr,
		FallbackEncoding::Utf16,
		FallbackEncoding::Latin1,
	];

	/// Default allocation limit, 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_cover_art: true,
			language_priority: Self::DEFAULT_LANGUAGE_PRIORITY,
			multi_value_separator: Self::DEFAULT_MULTI_VALUE_SEPARATOR,
			fallback_encodings: Self::DEFAULT_FALLBACK_ENCODINGS,
			redecode_mislabeled_latin1: false,
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// Whether or not to read cover art
	///
	/// When disabled, attached pictures are recorded as opaque placeholders and the image sink
	/// is never called.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// // Thumbnails are expensive to store, and I do not need them!
	/// let parsing_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}

	/// The order in which comment and lyrics languages are preferred
	///
	/// Every `COMM`/`USLT` frame is always stored under its `<id>::<lang>` key. The bare `COMM`
	/// and `USLT` keys hold the frame whose language appears first in this list. If none of the
	/// languages match, the first frame found is used.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().language_priority(&["eng", "deu"]);
	/// ```
	pub fn language_priority(&mut self, language_priority: &'static [&'static str]) -> Self {
		self.language_priority = language_priority;
		*self
	}

	/// The separator to use when joining multi-value ID3v2.4 text frames
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().multi_value_separator("; ");
	/// ```
	pub fn multi_value_separator(&mut self, multi_value_separator: &'static str) -> Self {
		self.multi_value_separator = multi_value_separator;
		*self
	}

	/// The encodings to try, in order, when text has no usable encoding
	///
	/// If none of the encodings can decode the text, a `<binary:N bytes>` placeholder is used instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	/// use id3scan::util::text::FallbackEncoding;
	///
	/// // My library has no Korean tags
	/// let parsing_options = ParseOptions::new()
	/// 	.fallback_encodings(&[FallbackEncoding::Utf8, FallbackEncoding::Latin1]);
	/// ```
	pub fn fallback_encodings(&mut self, fallback_encodings: &'static [FallbackEncoding]) -> Self {
		self.fallback_encodings = fallback_encodings;
		*self
	}

	/// Whether to distrust the Latin-1 encoding byte
	///
	/// Many legacy encoders write the system code page (Ex. EUC-KR) while labelling the text
	/// as Latin-1. With this enabled, Latin-1 text containing non-ASCII bytes is decoded through
	/// the [fallback encodings](Self::fallback_encodings) first.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().redecode_mislabeled_latin1(true);
	/// ```
	pub fn redecode_mislabeled_latin1(&mut self, redecode_mislabeled_latin1: bool) -> Self {
		self.redecode_mislabeled_latin1 = redecode_mislabeled_latin1;
		*self
	}

	/// The maximum number of bytes a single buffer may grow to while parsing
	///
	/// This applies to decompressed frames and de-unsynchronised tag regions.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::config::ParseOptions;
	///
	/// // No frame in my collection should ever be larger than 1 MiB
	/// let parsing_options = ParseOptions::new().allocation_limit(1024 * 1024);
	/// ```
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// An `ID3v2` frame ID
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub enum FrameId<'a> {
	/// A valid `ID3v2.3/4` frame
	Valid(Cow<'a, str>),
	/// When an `ID3v2.2` key couldn't be upgraded
	///
	/// The content of these frames is never interpreted, see [`MetadataValue::Opaque`](crate::record::MetadataValue::Opaque).
	Outdated(Cow<'a, str>),
}

impl<'a> FrameId<'a> {
	/// Attempts to create a `FrameId` from the raw ID bytes
	///
	/// 3 byte IDs are upgraded with [`upgrade_v2`] where possible. Lowercase letters are accepted,
	/// but no standard frame uses them.
	///
	/// Returns `None` if `id` contains anything other than ASCII letters and digits, or is not
	/// 3 or 4 bytes long.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::id3::v2::FrameId;
	///
	/// assert_eq!(FrameId::from_bytes(b"TPE1").unwrap().as_str(), "TPE1");
	///
	/// // Upgraded from ID3v2.2
	/// assert_eq!(FrameId::from_bytes(b"TP1").unwrap().as_str(), "TPE1");
	///
	/// // No upgrade exists
	/// assert!(FrameId::from_bytes(b"XYZ").unwrap().is_outdated());
	///
	/// assert!(FrameId::from_bytes(b"T\xFFE1").is_none());
	/// ```
	pub fn from_bytes(id: &'a [u8]) -> Option<Self> {
		if !id.iter().all(u8::is_ascii_alphanumeric) {
			return None;
		}

		// Only ASCII at this point
		let id_str = std::str::from_utf8(id).ok()?;
		match id_str.len() {
			3 => Some(upgrade_v2(id_str).map_or_else(
				|| FrameId::Outdated(Cow::Borrowed(id_str)),
				|upgraded| FrameId::Valid(Cow::Borrowed(upgraded)),
			)),
			4 => Some(FrameId::Valid(Cow::Borrowed(id_str))),
			_ => None,
		}
	}

	/// Whether this frame ID represents an outdated (ID3v2.2) ID
	pub fn is_outdated(&self) -> bool {
		matches!(self, FrameId::Outdated(_))
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		match self {
			FrameId::Valid(v) | FrameId::Outdated(v) => v,
		}
	}
}

impl Display for FrameId<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Upgrade an ID3v2.2 frame ID to its ID3v2.3 equivalent
///
/// # Examples
///
/// ```rust
/// use id3scan::id3::v2::upgrade_v2;
///
/// assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
/// assert_eq!(upgrade_v2("PIC"), Some("APIC"));
/// assert_eq!(upgrade_v2("ZZZ"), None);
/// ```
pub fn upgrade_v2(key: &str) -> Option<&'static str> {
	Some(match key {
		"BUF" => "RBUF",
		"CNT" => "PCNT",
		"COM" => "COMM",
		"CRA" => "AENC",
		"ETC" => "ETCO",
		"GEO" => "GEOB",
		"IPL" => "IPLS",
		"MCI" => "MCDI",
		"MLL" => "MLLT",
		"PIC" => "APIC",
		"POP" => "POPM",
		"REV" => "RVRB",
		"SLT" => "SYLT",
		"STC" => "SYTC",
		"TAL" => "TALB",
		"TBP" => "TBPM",
		"TCM" => "TCOM",
		"TCO" => "TCON",
		"TCP" => "TCMP",
		"TCR" => "TCOP",
		"TDA" => "TDAT",
		"TDY" => "TDLY",
		"TEN" => "TENC",
		"TFT" => "TFLT",
		"TIM" => "TIME",
		"TKE" => "TKEY",
		"TLA" => "TLAN",
		"TLE" => "TLEN",
		"TMT" => "TMED",
		"TOA" => "TOPE",
		"TOF" => "TOFN",
		"TOL" => "TOLY",
		"TOR" => "TORY",
		"TOT" => "TOAL",
		"TP1" => "TPE1",
		"TP2" => "TPE2",
		"TP3" => "TPE3",
		"TP4" => "TPE4",
		"TPA" => "TPOS",
		"TPB" => "TPUB",
		"TRC" => "TSRC",
		"TRD" => "TRDA",
		"TRK" => "TRCK",
		"TS2" => "TSO2",
		"TSA" => "TSOA",
		"TSC" => "TSOC",
		"TSI" => "TSIZ",
		"TSP" => "TSOP",
		"TSS" => "TSSE",
		"TST" => "TSOT",
		"TT1" => "TIT1",
		"TT2" => "TIT2",
		"TT3" => "TIT3",
		"TXT" => "TEXT",
		"TXX" => "TXXX",
		"TYE" => "TYER",
		"UFI" => "UFID",
		"ULT" => "USLT",
		"WAF" => "WOAF",
		"WAR" => "WOAR",
		"WAS" => "WOAS",
		"WCM" => "WCOM",
		"WCP" => "WCOP",
		"WPB" => "WPUB",
		"WXX" => "WXXX",
		_ => return None,
	})
}

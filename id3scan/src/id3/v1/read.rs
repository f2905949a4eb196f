use super::constants::GENRES;
use crate::record::MetadataValue;
use crate::util::text::TextDecoder;

/// Read an ID3v1 trailer
///
/// Each field has its null padding stripped, and is decoded with the
/// [fallback encodings](crate::config::ParseOptions::fallback_encodings), as ID3v1 has no
/// encoding byte. Empty fields are left out.
///
/// NOTE: This does not verify the `TAG` marker, see [`locate_tag`](crate::id3::locate_tag).
///
/// # Examples
///
/// ```rust
/// use id3scan::config::ParseOptions;
/// use id3scan::id3::v1::read_id3v1;
/// use id3scan::record::MetadataValue;
/// use id3scan::util::text::TextDecoder;
///
/// let mut trailer = [0; 128];
/// trailer[..3].copy_from_slice(b"TAG");
/// trailer[3..7].copy_from_slice(b"Song");
///
/// let fields = read_id3v1(&trailer, &TextDecoder::new(&ParseOptions::new()));
/// assert_eq!(
/// 	fields,
/// 	[(String::from("TIT2"), MetadataValue::Text(String::from("Song")))]
/// );
/// ```
pub fn read_id3v1(trailer: &[u8; 128], decoder: &TextDecoder) -> Vec<(String, MetadataValue)> {
	let mut fields = Vec::with_capacity(7);
	let mut push_text = |key: &str, raw: &[u8]| {
		if let Some(text) = decode_text(raw, decoder) {
			fields.push((key.to_owned(), MetadataValue::Text(text)));
		}
	};

	let reader = &trailer[3..];

	push_text("TIT2", &reader[..30]);
	push_text("TPE1", &reader[30..60]);
	push_text("TALB", &reader[60..90]);
	push_text("TYER", &reader[90..94]);

	// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
	// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
	// A track number of 0 is invalid.
	let mut track_number = None;
	let range = if reader[122] == 0 && reader[123] != 0 {
		track_number = Some(reader[123]);

		94_usize..123
	} else {
		94..124
	};

	push_text("COMM", &reader[range]);

	if let Some(track_number) = track_number {
		fields.push((
			String::from("TRCK"),
			MetadataValue::Text(track_number.to_string()),
		));
	}

	match GENRES.get(usize::from(reader[124])) {
		Some(genre) => fields.push((String::from("TCON"), MetadataValue::Text((*genre).to_owned()))),
		None => log::trace!("ID3v1 genre {} is not in the genre list", reader[124]),
	}

	fields
}

fn decode_text(data: &[u8], decoder: &TextDecoder) -> Option<String> {
	// Null padding is stripped from both ends, some encoders leave a leading null
	let start = data.iter().position(|&b| b != 0)?;
	let end = data.iter().rposition(|&b| b != 0).map_or(start, |pos| pos + 1);
	let mut field = &data[start..end];

	if let Some(null_pos) = field.iter().position(|&b| b == 0) {
		log::warn!("ID3v1 text field contains trailing junk, skipping");
		field = &field[..null_pos];
	}

	// Some encoders pad with spaces rather than nulls
	let text = decoder.decode(field, None);
	let trimmed = text.trim_end_matches(' ');
	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
	use super::read_id3v1;
	use crate::config::ParseOptions;
	use crate::record::MetadataValue;
	use crate::util::text::TextDecoder;

	fn trailer() -> [u8; 128] {
		let mut trailer = [0; 128];
		trailer[..3].copy_from_slice(b"TAG");
		trailer[3..7].copy_from_slice(b"Song");
		trailer[33..39].copy_from_slice(b"Artist");
		trailer[63..68].copy_from_slice(b"Album");
		trailer[93..97].copy_from_slice(b"1999");
		trailer[97..104].copy_from_slice(b"Comment");
		// No genre
		trailer[127] = 0xFF;
		trailer
	}

	fn text(key: &str, value: &str) -> (String, MetadataValue) {
		(key.to_owned(), MetadataValue::Text(value.to_owned()))
	}

	#[test_log::test]
	fn id3v1() {
		let fields = read_id3v1(&trailer(), &TextDecoder::new(&ParseOptions::new()));

		assert_eq!(
			fields,
			[
				text("TIT2", "Song"),
				text("TPE1", "Artist"),
				text("TALB", "Album"),
				text("TYER", "1999"),
				text("COMM", "Comment"),
			]
		);
	}

	#[test_log::test]
	fn id3v1_1_track_and_genre() {
		let mut trailer = trailer();
		trailer[125] = 0;
		trailer[126] = 7;
		trailer[127] = 17;

		let fields = read_id3v1(&trailer, &TextDecoder::new(&ParseOptions::new()));

		assert!(fields.contains(&text("TRCK", "7")));
		assert!(fields.contains(&text("TCON", "Rock")));
	}

	#[test_log::test]
	fn null_padding_is_stripped() {
		let mut trailer = trailer();
		// Leading null before the title
		trailer[3..8].copy_from_slice(b"\x00Song");
		// Junk after the artist's terminator
		trailer[39..44].copy_from_slice(b"\x00junk");

		let fields = read_id3v1(&trailer, &TextDecoder::new(&ParseOptions::new()));

		assert!(fields.contains(&text("TIT2", "Song")));
		assert!(fields.contains(&text("TPE1", "Artist")));
	}

	#[test_log::test]
	fn space_padded_and_legacy_text() {
		let mut trailer = [0; 128];
		trailer[..3].copy_from_slice(b"TAG");
		// "노래" in EUC-KR, padded with spaces
		trailer[3..7].copy_from_slice(&[0xB3, 0xEB, 0xB7, 0xA1]);
		trailer[7..33].fill(b' ');
		trailer[127] = 0xFF;

		let fields = read_id3v1(&trailer, &TextDecoder::new(&ParseOptions::new()));
		assert_eq!(fields, [text("TIT2", "노래")]);
	}
}

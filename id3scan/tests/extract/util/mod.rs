use id3scan::util::synchsafe::SynchsafeInteger;

/// Builds an ID3v2 tag byte by byte
pub struct TagBuilder {
	major: u8,
	flags: u8,
	body: Vec<u8>,
}

impl TagBuilder {
	pub fn new(major: u8) -> Self {
		Self {
			major,
			flags: 0,
			body: Vec::new(),
		}
	}

	pub fn flags(mut self, flags: u8) -> Self {
		self.flags = flags;
		self
	}

	/// Add a frame with no flags
	pub fn frame(self, id: &str, content: &[u8]) -> Self {
		self.frame_with_flags(id, 0, content)
	}

	/// Add a frame, `id` must be 3 characters for ID3v2.2 and 4 otherwise
	pub fn frame_with_flags(mut self, id: &str, flags: u16, content: &[u8]) -> Self {
		self.body.extend_from_slice(id.as_bytes());

		let size = content.len() as u32;
		match self.major {
			2 => self.body.extend_from_slice(&size.to_be_bytes()[1..]),
			3 => self.body.extend_from_slice(&size.to_be_bytes()),
			_ => self.body.extend_from_slice(&size.synch().unwrap().to_be_bytes()),
		}

		if self.major > 2 {
			self.body.extend_from_slice(&flags.to_be_bytes());
		}

		self.body.extend_from_slice(content);
		self
	}

	/// Append bytes without any framing
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.body.extend_from_slice(bytes);
		self
	}

	pub fn padding(mut self, len: usize) -> Self {
		self.body.resize(self.body.len() + len, 0);
		self
	}

	pub fn build(self) -> Vec<u8> {
		let size = self.body.len() as u32;
		let size_bytes = if self.major == 4 {
			size.synch().unwrap().to_be_bytes()
		} else {
			// Read as a plain integer with the high bits masked off
			let bytes = size.to_be_bytes();
			assert!(
				bytes.iter().all(|b| b & 0x80 == 0),
				"tag size {size} can't be represented"
			);
			bytes
		};

		let mut tag = vec![b'I', b'D', b'3', self.major, 0, self.flags];
		tag.extend_from_slice(&size_bytes);
		tag.extend(self.body);
		tag
	}
}

/// Latin-1 text frame content
pub fn latin1(text: &str) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(text.chars().map(|c| c as u8));
	content
}

/// UTF-8 text frame content
pub fn utf8(text: &str) -> Vec<u8> {
	let mut content = vec![3];
	content.extend_from_slice(text.as_bytes());
	content
}

/// UTF-16 (with BOM) text frame content
pub fn utf16(text: &str) -> Vec<u8> {
	let mut content = vec![1, 0xFF, 0xFE];
	content.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
	content
}

/// Build a 128 byte ID3v1 trailer
pub fn id3v1_trailer(title: &str, artist: &str, album: &str, year: &str, comment: &str) -> [u8; 128] {
	fn field(trailer: &mut [u8], text: &str) {
		trailer[..text.len()].copy_from_slice(text.as_bytes());
	}

	let mut trailer = [0; 128];
	trailer[..3].copy_from_slice(b"TAG");
	field(&mut trailer[3..33], title);
	field(&mut trailer[33..63], artist);
	field(&mut trailer[63..93], album);
	field(&mut trailer[93..97], year);
	field(&mut trailer[97..127], comment);
	trailer[127] = 0xFF;
	trailer
}

//! Utilities for working with synchsafe integers and unsynchronised content
//!
//! ID3v2 avoids false MPEG sync patterns (`0xFF 0xE0`) by either reducing integers to 7 bits
//! per byte ("synchsafe"), or by inserting a `0x00` after every `0xFF` byte ("unsynchronisation").

use crate::error::Result;
use crate::macros::err;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3scan::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// The most significant bit of every byte is ignored.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3scan::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3scan::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Now, our re-unsynchronized number should match our original
	/// assert_eq!(synch_number.unsynch(), unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		// 7 bits are available per byte
		const MAXIMUM_INTEGER: u32 = u32::MAX >> 4;

		if self > MAXIMUM_INTEGER {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

/// Decode a 4 byte synchsafe integer
///
/// # Examples
///
/// ```rust
/// use id3scan::util::synchsafe::synchsafe_decode;
///
/// assert_eq!(synchsafe_decode([0x00, 0x00, 0x02, 0x01]), 257);
/// ```
pub fn synchsafe_decode(bytes: [u8; 4]) -> u32 {
	u32::from_be_bytes(bytes).unsynch()
}

/// Remove unsynchronisation from `content`
///
/// Every `0xFF 0x00` pair is replaced with `0xFF`. A `0xFF` followed by anything else is left alone.
///
/// # Errors
///
/// `content` is larger than `allocation_limit`
///
/// # Examples
///
/// ```rust
/// use id3scan::util::synchsafe::remove_unsynchronisation;
///
/// # fn main() -> id3scan::error::Result<()> {
/// // The content has two `0xFF 0x00` pairs, which will be removed
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// let restored = remove_unsynchronisation(&content, 1024)?;
/// assert_eq!(restored, [0xFF, 0x1A, 0xFF, 0x15]);
/// # Ok(()) }
/// ```
pub fn remove_unsynchronisation(content: &[u8], allocation_limit: usize) -> Result<Vec<u8>> {
	if content.len() > allocation_limit {
		err!(TooMuchData);
	}

	let mut restored = Vec::with_capacity(content.len());
	let mut encountered_ff = false;
	for &byte in content {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the byte if this is valid unsynchronisation
			if byte == 0 {
				continue;
			}
		}

		restored.push(byte);
		encountered_ff = byte == 0xFF;
	}

	Ok(restored)
}

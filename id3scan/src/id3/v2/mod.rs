//! ID3v2 items and utilities
//!
//! Reading a tag happens in three steps:
//!
//! * [`Id3v2Header::parse`] reads the header, and locates the frames
//! * [`FrameScanner`] walks the frames, stopping at padding or anything malformed
//! * [`FrameInterpreter`] decodes each frame into the [`MetadataRecord`](crate::record::MetadataRecord)

mod frame;
mod header;
mod items;
pub(crate) mod read;

// Exports

pub use header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};

pub use frame::{
	FrameFlags, FrameHeaderLayout, FrameId, FrameInterpreter, FrameScanner, RawFrame, ScanStop,
	upgrade_v2,
};

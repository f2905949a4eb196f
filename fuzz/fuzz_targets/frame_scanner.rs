#![no_main]

use id3scan::id3::v2::{FrameHeaderLayout, FrameScanner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	for layout in [
		FrameHeaderLayout::ThreeByte,
		FrameHeaderLayout::FourByteWithFlags { synchsafe: false },
		FrameHeaderLayout::FourByteWithFlags { synchsafe: true },
	] {
		for frame in FrameScanner::new(data, data.len(), layout) {
			let _ = frame.payload(1024 * 1024);
		}
	}
});

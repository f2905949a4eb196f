//! Various configuration options to control id3scan

mod parse_options;

pub use parse_options::ParseOptions;

//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! ID3v1 is a fixed 128 byte trailer with no text encoding. Its fields are mapped to the
//! equivalent ID3v2 frame IDs (`TIT2`, `TPE1`, `TALB`, `TYER`, `COMM`, `TRCK`, `TCON`) so a record
//! looks the same regardless of the tag it came from.

pub(crate) mod constants;
mod read;

pub use constants::GENRES;
pub use read::read_id3v1;

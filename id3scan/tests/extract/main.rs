#![allow(missing_docs)]

mod id3v1;
mod id3v2;
mod pictures;
pub(crate) mod util;

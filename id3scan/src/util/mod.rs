//! Shared helpers for decoding tag content

pub mod synchsafe;
pub mod text;

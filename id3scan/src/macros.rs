// Shorthand for return Err(TagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for return Err(Id3v2Error::new(Id3v2ErrorKind::Foo).into())
//
// Usage:
// - id3v2_err!(Variant)           -> return Err(... Id3v2ErrorKind::Variant ...)
// - id3v2_err!(Variant(args...))  -> return Err(... Id3v2ErrorKind::Variant(args...) ...)
macro_rules! id3v2_err {
	($variant:ident) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant,
		)
		.into())
	};
	($variant:ident($($arg:expr),+)) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant($($arg),+),
		)
		.into())
	};
}

pub(crate) use {err, id3v2_err};

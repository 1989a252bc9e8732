use std::fmt;

use crate::address::ParseAddressError;

/// A result type hardwired to use [`Error`] as its error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by everything in this crate.
///
/// `Debug` prints the same message as `Display`, so returning it from `main` stays readable.
pub struct Error {
    inner: ErrorKind,
}

impl Error {
    pub(crate) fn from(e: impl Into<ErrorKind>) -> Self {
        Self { inner: e.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorKind::Zbus(e) => e.fmt(f),
            ErrorKind::Fdo(e) => e.fmt(f),
            ErrorKind::ParseAddress(e) => e.fmt(f),
            ErrorKind::Other(e) => e.fmt(f),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner {
            ErrorKind::Zbus(e) => Some(e),
            ErrorKind::Fdo(e) => Some(e),
            ErrorKind::ParseAddress(e) => Some(e),
            ErrorKind::Other(_) => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Zbus(zbus::Error),
    Fdo(zbus::fdo::Error),
    ParseAddress(ParseAddressError),
    Other(String),
}

impl From<zbus::Error> for ErrorKind {
    fn from(value: zbus::Error) -> Self {
        Self::Zbus(value)
    }
}

impl From<zbus::fdo::Error> for ErrorKind {
    fn from(value: zbus::fdo::Error) -> Self {
        Self::Fdo(value)
    }
}

impl From<zbus::names::Error> for ErrorKind {
    fn from(value: zbus::names::Error) -> Self {
        Self::Zbus(value.into())
    }
}

impl From<zbus::zvariant::Error> for ErrorKind {
    fn from(value: zbus::zvariant::Error) -> Self {
        Self::Zbus(value.into())
    }
}

impl From<ParseAddressError> for ErrorKind {
    fn from(value: ParseAddressError) -> Self {
        Self::ParseAddress(value)
    }
}

impl From<String> for ErrorKind {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<&str> for ErrorKind {
    fn from(value: &str) -> Self {
        Self::Other(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn message_has_no_source() {
        let e = Error::from("no adapter found");
        assert_eq!(e.to_string(), "no adapter found");
        assert_eq!(format!("{:?}", e), "no adapter found");
        assert!(e.source().is_none());
    }

    #[test]
    fn wrapped_error_is_source() {
        let parse = "zz:00:00:00:00:00"
            .parse::<crate::address::Address>()
            .unwrap_err();
        let e = Error::from(parse);
        assert!(e.source().is_some());
    }
}

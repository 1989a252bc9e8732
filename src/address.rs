//! Bluetooth device addresses, as reported by an adapter's `Address` property.

use std::{fmt, num::ParseIntError, str::FromStr};

/// How the bytes of an [`Address`] were assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressType {
    /// An IEEE-assigned MAC address (vendor prefix followed by device part).
    Public,
    /// A static or private random address.
    Random,
}

impl AddressType {
    pub(crate) fn from_bluez(s: &str) -> crate::Result<Self> {
        match s {
            "public" => Ok(Self::Public),
            "random" => Ok(Self::Random),
            _ => Err(crate::Error::from(format!("invalid address type '{}'", s))),
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Random => "random",
        })
    }
}

/// A 6-Byte Bluetooth device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 6]);

impl Address {
    pub const LEN: usize = 6;

    #[inline]
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for Address {
    #[inline]
    fn from(value: [u8; 6]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

/// Parses colon-separated hex, eg. `aa:ff:00:33:22:11`.
impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; Self::LEN];
        let mut groups = s.split(':');
        for byte in &mut bytes {
            let group = groups.next().ok_or(ParseAddressError::Malformed)?;
            // `from_str_radix` accepts a leading `+`, so check the digits ourselves.
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseAddressError::Malformed);
            }
            *byte = u8::from_str_radix(group, 16).map_err(ParseAddressError::Int)?;
        }
        if groups.next().is_some() {
            return Err(ParseAddressError::Malformed);
        }

        Ok(Address(bytes))
    }
}

/// The error returned when an [`Address`] string is malformed.
#[derive(Debug)]
pub enum ParseAddressError {
    Int(ParseIntError),
    Malformed,
}

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(e) => write!(f, "invalid device address: {}", e),
            Self::Malformed => f.write_str("invalid device address"),
        }
    }
}

impl std::error::Error for ParseAddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Int(e) => Some(e),
            Self::Malformed => None,
        }
    }
}

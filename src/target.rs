//! Where to look for an adapter: a bus name plus an object path.

use std::fmt;

use zbus::{
    names::{BusName, OwnedBusName, WellKnownName},
    zvariant::{ObjectPath, OwnedObjectPath},
};

use crate::{Error, Result};

/// Well-known bus name of the BlueZ daemon.
pub const BLUEZ_SERVICE: &str = "org.bluez";
/// Adapters are exported as direct children of this path.
pub const ADAPTER_PATH_PREFIX: &str = "/org/bluez/";
/// Adapter used when none is requested.
pub const DEFAULT_ADAPTER: &str = "hci0";
/// Object path of [`DEFAULT_ADAPTER`].
pub const DEFAULT_ADAPTER_PATH: &str = "/org/bluez/hci0";

/// A validated (service, object path) pair identifying an adapter object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    service: OwnedBusName,
    path: OwnedObjectPath,
}

impl Target {
    /// Creates a target from a bus name and an object path, validating both.
    pub fn new(service: &str, path: &str) -> Result<Self> {
        let service = BusName::try_from(service.to_string()).map_err(Error::from)?;
        let path = ObjectPath::try_from(path.to_string()).map_err(Error::from)?;
        Ok(Self {
            service: service.into(),
            path: path.into(),
        })
    }

    /// Targets the BlueZ adapter with the given device name (eg. `hci1`).
    pub fn for_adapter(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::from(format!("invalid adapter name '{}'", name)));
        }
        Self::new(BLUEZ_SERVICE, &format!("{}{}", ADAPTER_PATH_PREFIX, name))
    }

    /// Interprets a user-supplied argument.
    ///
    /// Anything starting with `/` is taken as an object path on [`BLUEZ_SERVICE`], everything else
    /// as an adapter name.
    pub fn parse(arg: &str) -> Result<Self> {
        if arg.starts_with('/') {
            Self::new(BLUEZ_SERVICE, arg)
        } else {
            Self::for_adapter(arg)
        }
    }

    pub fn service(&self) -> &str {
        self.service.as_str()
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the adapter's device name if the path is a direct child of
    /// [`ADAPTER_PATH_PREFIX`].
    pub fn adapter_name(&self) -> Option<&str> {
        adapter_name(self.path())
    }
}

impl Default for Target {
    fn default() -> Self {
        Self {
            service: BusName::from(WellKnownName::from_static_str_unchecked(BLUEZ_SERVICE)).into(),
            path: ObjectPath::from_static_str_unchecked(DEFAULT_ADAPTER_PATH).into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.path(), self.service())
    }
}

pub(crate) fn adapter_name(path: &str) -> Option<&str> {
    path.strip_prefix(ADAPTER_PATH_PREFIX)
        .filter(|name| !name.is_empty() && !name.contains('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_hci0() {
        let target = Target::default();
        assert_eq!(target.service(), BLUEZ_SERVICE);
        assert_eq!(target.path(), DEFAULT_ADAPTER_PATH);
        assert_eq!(target.adapter_name(), Some(DEFAULT_ADAPTER));
        assert_eq!(target.to_string(), "/org/bluez/hci0 on org.bluez");
        assert_eq!(target, Target::for_adapter(DEFAULT_ADAPTER).unwrap());
    }

    #[test]
    fn parse_name_or_path() {
        let by_name = Target::parse("hci1").unwrap();
        assert_eq!(by_name.path(), "/org/bluez/hci1");
        assert_eq!(by_name.adapter_name(), Some("hci1"));

        let by_path = Target::parse("/org/bluez/hci1/dev_00_11").unwrap();
        assert_eq!(by_path.service(), BLUEZ_SERVICE);
        assert_eq!(by_path.path(), "/org/bluez/hci1/dev_00_11");
        assert_eq!(by_path.adapter_name(), None);
    }

    #[test]
    fn rejects_invalid() {
        Target::for_adapter("").unwrap_err();
        Target::for_adapter("hci0/dev").unwrap_err();
        Target::for_adapter("hci-0").unwrap_err();
        Target::parse("/org/bluez/").unwrap_err();
        Target::new("not a bus name", "/org/bluez/hci0").unwrap_err();
        Target::new(BLUEZ_SERVICE, "org/bluez/hci0").unwrap_err();
    }

    #[test]
    fn accepts_unique_names() {
        let target = Target::new(":1.42", "/org/bluez/hci0").unwrap();
        assert_eq!(target.service(), ":1.42");
    }

    #[test]
    fn adapter_names() {
        assert_eq!(adapter_name("/org/bluez/hci0"), Some("hci0"));
        assert_eq!(adapter_name("/org/bluez"), None);
        assert_eq!(adapter_name("/org/bluez/"), None);
        assert_eq!(adapter_name("/org/bluez/hci0/dev_AA"), None);
        assert_eq!(adapter_name("/org/other/hci0"), None);
    }
}

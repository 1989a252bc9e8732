use std::fmt;

use zbus::{dbus_proxy, CacheProperties};

use crate::{
    address::{Address, AddressType},
    target::{self, Target},
    Error, Result, Session,
};

const ADAPTER_INTERFACE: &str = "org.bluez.Adapter1";

#[dbus_proxy(
    interface = "org.bluez.Adapter1",
    default_service = "org.bluez",
    assume_defaults = false
)]
trait Adapter {
    #[dbus_proxy(property)]
    fn address(&self) -> zbus::Result<String>;

    #[dbus_proxy(property)]
    fn address_type(&self) -> zbus::Result<String>;

    #[dbus_proxy(property)]
    fn name(&self) -> zbus::Result<String>;

    #[dbus_proxy(property)]
    fn alias(&self) -> zbus::Result<String>;

    #[dbus_proxy(property)]
    fn class(&self) -> zbus::Result<u32>;

    #[dbus_proxy(property)]
    fn powered(&self) -> zbus::Result<bool>;

    #[dbus_proxy(property)]
    fn discoverable(&self) -> zbus::Result<bool>;

    #[dbus_proxy(property)]
    fn pairable(&self) -> zbus::Result<bool>;

    #[dbus_proxy(property)]
    fn discovering(&self) -> zbus::Result<bool>;
}

/// A proxy for a BlueZ Bluetooth adapter object.
///
/// All access is read-only; this type never changes the adapter's state.
pub struct Adapter {
    target: Target,
    interfaces: Vec<String>,
    proxy: AdapterProxy<'static>,
}

impl Adapter {
    /// Opens the adapter at [`target::DEFAULT_ADAPTER_PATH`].
    pub async fn open(session: &Session) -> Result<Self> {
        Self::get(session, &Target::default()).await
    }

    /// Requests a proxy for the adapter object identified by `target`.
    ///
    /// Fails if the service does not export an object at the target path, or if that object does
    /// not implement `org.bluez.Adapter1`.
    pub async fn get(session: &Session, target: &Target) -> Result<Self> {
        log::debug!(
            "looking up {} on connection {}",
            target,
            session.conn.server_guid()
        );

        let manager = session.object_manager(target.service()).await?;
        let objects = manager.get_managed_objects().await.map_err(Error::from)?;

        let Some((_, intfs)) = objects
            .iter()
            .find(|(path, _)| path.as_str() == target.path())
        else {
            let names = adapter_names(
                objects
                    .iter()
                    .map(|(path, intfs)| (path.as_str(), intfs.contains_key(ADAPTER_INTERFACE))),
            );
            return Err(missing_object(target, &names));
        };

        let mut interfaces = intfs.keys().map(|i| i.to_string()).collect::<Vec<_>>();
        interfaces.sort();
        log::debug!("{} implements {:?}", target.path(), interfaces);
        if !interfaces.iter().any(|i| i == ADAPTER_INTERFACE) {
            return Err(Error::from(format!(
                "object at {} is not a Bluetooth adapter",
                target
            )));
        }

        // No property cache: it would subscribe to `PropertiesChanged` and we only ever read.
        let proxy = AdapterProxy::builder(&session.conn)
            .destination(target.service().to_string())
            .map_err(Error::from)?
            .path(target.path().to_string())
            .map_err(Error::from)?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(Error::from)?;

        Ok(Self {
            target: target.clone(),
            interfaces,
            proxy,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn path(&self) -> &str {
        self.target.path()
    }

    /// Returns the D-Bus interfaces implemented by the adapter object, sorted by name.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Returns the adapter's device name (eg. `hci0`), if it lives at the usual BlueZ path.
    pub fn device_name(&self) -> Option<&str> {
        self.target.adapter_name()
    }

    /// Returns the Bluetooth device [`Address`] of this [`Adapter`].
    pub async fn address(&self) -> Result<Address> {
        let string = self.proxy.address().await.map_err(Error::from)?;
        string.parse().map_err(Error::from)
    }

    pub async fn address_type(&self) -> Result<AddressType> {
        let string = self.proxy.address_type().await.map_err(Error::from)?;
        AddressType::from_bluez(&string)
    }

    /// Returns the system name (pretty hostname) of the adapter.
    pub async fn name(&self) -> Result<String> {
        self.proxy.name().await.map_err(Error::from)
    }

    /// Returns the user-friendly name of the adapter.
    pub async fn alias(&self) -> Result<String> {
        self.proxy.alias().await.map_err(Error::from)
    }

    /// Returns the Bluetooth class of device.
    pub async fn class(&self) -> Result<u32> {
        self.proxy.class().await.map_err(Error::from)
    }

    pub async fn is_powered(&self) -> Result<bool> {
        self.proxy.powered().await.map_err(Error::from)
    }

    pub async fn is_discoverable(&self) -> Result<bool> {
        self.proxy.discoverable().await.map_err(Error::from)
    }

    pub async fn is_pairable(&self) -> Result<bool> {
        self.proxy.pairable().await.map_err(Error::from)
    }

    /// Returns whether a device discovery procedure is active.
    pub async fn is_discovering(&self) -> Result<bool> {
        self.proxy.discovering().await.map_err(Error::from)
    }

    /// Reads all adapter properties.
    pub async fn info(&self) -> Result<AdapterInfo> {
        let (address, address_type, name, alias, class) = futures_util::try_join!(
            self.address(),
            self.address_type(),
            self.name(),
            self.alias(),
            self.class(),
        )?;
        let (powered, discoverable, pairable, discovering) = futures_util::try_join!(
            self.is_powered(),
            self.is_discoverable(),
            self.is_pairable(),
            self.is_discovering(),
        )?;

        Ok(AdapterInfo {
            address,
            address_type,
            name,
            alias,
            class,
            powered,
            discoverable,
            pairable,
            discovering,
        })
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(&self.interfaces, &self.target))
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("target", &self.target)
            .field("interfaces", &self.interfaces)
            .finish()
    }
}

/// A snapshot of an [`Adapter`]'s properties, returned by [`Adapter::info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub address: Address,
    pub address_type: AddressType,
    pub name: String,
    pub alias: String,
    pub class: u32,
    pub powered: bool,
    pub discoverable: bool,
    pub pairable: bool,
    pub discovering: bool,
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  address: {} ({})", self.address, self.address_type)?;
        writeln!(f, "  name: {}", self.name)?;
        writeln!(f, "  alias: {}", self.alias)?;
        writeln!(f, "  class: 0x{:06x}", self.class)?;
        writeln!(f, "  powered: {}", self.powered)?;
        writeln!(f, "  discoverable: {}", self.discoverable)?;
        writeln!(f, "  pairable: {}", self.pairable)?;
        write!(f, "  discovering: {}", self.discovering)
    }
}

fn describe(interfaces: &[String], target: &Target) -> String {
    format!("<Adapter({}) at {}>", interfaces.join(", "), target)
}

fn missing_object(target: &Target, available: &[String]) -> Error {
    let available = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };
    Error::from(format!(
        "no object at {} (available adapters: {})",
        target.path(),
        available
    ))
}

/// Collects the names of adapter objects from `(path, implements Adapter1)` pairs.
fn adapter_names<'a>(objects: impl IntoIterator<Item = (&'a str, bool)>) -> Vec<String> {
    let mut names = Vec::new();
    for (path, is_adapter) in objects {
        if !is_adapter {
            continue;
        }
        match target::adapter_name(path) {
            Some(name) => names.push(name.to_string()),
            None => log::warn!("skipping adapter with unexpected path {}", path),
        }
    }
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted_and_filtered() {
        let names = adapter_names([
            ("/org/bluez", false),
            ("/org/bluez/hci1", true),
            ("/org/bluez/hci0", true),
            ("/org/bluez/hci0/dev_00_1A_7D_DA_71_13", false),
            ("/org/bluez/hci2", false),
            ("/somewhere/else", true),
        ]);
        assert_eq!(names, ["hci0", "hci1"]);
    }

    #[test]
    fn no_adapters() {
        assert!(adapter_names([("/org/bluez", false)]).is_empty());
    }

    #[test]
    fn adapter_representation() {
        let interfaces = [
            "org.bluez.Adapter1",
            "org.bluez.GattManager1",
            "org.freedesktop.DBus.Properties",
        ]
        .map(String::from);
        assert_eq!(
            describe(&interfaces, &Target::default()),
            "<Adapter(org.bluez.Adapter1, org.bluez.GattManager1, \
             org.freedesktop.DBus.Properties) at /org/bluez/hci0 on org.bluez>"
        );
    }

    #[test]
    fn missing_object_lists_adapters() {
        let target = Target::for_adapter("hci3").unwrap();
        let e = missing_object(&target, &["hci0".to_string(), "hci1".to_string()]);
        assert_eq!(
            e.to_string(),
            "no object at /org/bluez/hci3 (available adapters: hci0, hci1)"
        );

        let e = missing_object(&target, &[]);
        assert_eq!(
            e.to_string(),
            "no object at /org/bluez/hci3 (available adapters: none)"
        );
    }

    #[test]
    fn info_display() {
        let info = AdapterInfo {
            address: "00:1a:7d:da:71:13".parse().unwrap(),
            address_type: AddressType::Public,
            name: "laptop".into(),
            alias: "laptop #1".into(),
            class: 0x6c010c,
            powered: true,
            discoverable: false,
            pairable: true,
            discovering: false,
        };
        assert_eq!(
            info.to_string(),
            "  address: 00:1A:7D:DA:71:13 (public)\n\
             \x20 name: laptop\n\
             \x20 alias: laptop #1\n\
             \x20 class: 0x6c010c\n\
             \x20 powered: true\n\
             \x20 discoverable: false\n\
             \x20 pairable: true\n\
             \x20 discovering: false"
        );
    }
}

//! Looks up BlueZ adapter objects on the system D-Bus.
//!
//! ```no_run
//! # #[pollster::main]
//! # async fn main() -> bluez_probe::Result<()> {
//! use bluez_probe::{Adapter, Session};
//!
//! let session = Session::new().await?;
//! let adapter = Adapter::open(&session).await?;
//! println!("{}", session);
//! println!("{}", adapter);
//! # Ok(())
//! # }
//! ```

mod adapter;
pub mod address;
mod error;
pub mod target;

pub use adapter::{Adapter, AdapterInfo};
pub use error::{Error, Result};
pub use target::Target;

use std::fmt;

use zbus::{fdo::ObjectManagerProxy, Connection};

/// A cloneable handle to a system bus connection.
#[derive(Clone)]
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Connects to the system bus.
    pub async fn new() -> Result<Self> {
        let conn = Connection::system().await.map_err(Error::from)?;
        log::debug!(
            "connected to system bus as {:?} (server {})",
            conn.unique_name().map(|name| name.as_str()),
            conn.server_guid()
        );
        Ok(Self { conn })
    }

    /// Connects to the object manager at the root of `service`.
    async fn object_manager(&self, service: &str) -> Result<ObjectManagerProxy<'static>> {
        ObjectManagerProxy::builder(&self.conn)
            .destination(service.to_string())
            .map_err(Error::from)?
            .path("/")
            .map_err(Error::from)?
            .build()
            .await
            .map_err(Error::from)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.conn.unique_name().map(|name| name.as_str());
        f.write_str(&describe_session(name, self.conn.server_guid()))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("unique_name", &self.conn.unique_name())
            .field("server_guid", &self.conn.server_guid())
            .finish()
    }
}

fn describe_session(unique_name: Option<&str>, server_guid: &str) -> String {
    format!(
        "system bus (unique name {}, server {})",
        unique_name.unwrap_or("<none>"),
        server_guid
    )
}

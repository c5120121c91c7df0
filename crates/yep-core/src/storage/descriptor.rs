use std::fmt;

use crate::config::ServerSettings;

/// Port that is left out of the descriptor.
pub const DEFAULT_DB_PORT: &str = "5432";

/// Connection string handed to the storage driver, recomputed on every start.
///
/// Segments are appended in a fixed order and only when set:
/// `dbname=<name> sslmode=disable[ user=..][ password=..][ host=..][ port=..]`.
/// The port is included only when it differs from [`DEFAULT_DB_PORT`].
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    driver: String,
    dsn: String,
    redacted: String,
}

impl ConnectionDescriptor {
    pub fn from_settings(server: &ServerSettings) -> Self {
        let mut dsn = format!("dbname={} sslmode=disable", server.db_name);
        let mut redacted = dsn.clone();

        if !server.db_user.is_empty() {
            let segment = format!(" user={}", server.db_user);
            dsn.push_str(&segment);
            redacted.push_str(&segment);
        }
        if !server.db_password.is_empty() {
            dsn.push_str(&format!(" password={}", server.db_password));
            redacted.push_str(" password=****");
        }
        if !server.db_host.is_empty() {
            let segment = format!(" host={}", server.db_host);
            dsn.push_str(&segment);
            redacted.push_str(&segment);
        }
        if server.db_port != DEFAULT_DB_PORT {
            let segment = format!(" port={}", server.db_port);
            dsn.push_str(&segment);
            redacted.push_str(&segment);
        }

        Self {
            driver: server.db_driver.clone(),
            dsn,
            redacted,
        }
    }

    /// Name of the driver the descriptor is meant for.
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// The full connection string, password included.
    pub fn as_str(&self) -> &str {
        &self.dsn
    }

    /// The connection string with the password masked, for logs and errors.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("driver", &self.driver)
            .field("dsn", &self.redacted)
            .finish()
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted)
    }
}

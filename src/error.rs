//! Unified error type.

use std::fmt;

use crate::method::Method;

/// The error type returned by postboard's fallible operations.
///
/// Request-level failures (404, 422, a missing body key) are expressed as
/// HTTP [`Response`](crate::Response) values, not as `Error`s. This type
/// surfaces startup and infrastructure failures: configuration, address
/// resolution, route registration, binding to a port or accepting a connection.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The configured host resolved to no address.
    Resolve(String),
    Config(config::ConfigError),
    /// A route could not be registered, most often because the same
    /// method + path was already taken.
    Route {
        method: Method,
        path: String,
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Resolve(host) => write!(f, "host `{host}` resolved to no address"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Route { method, path, reason } => {
                write!(f, "cannot register {method} {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Resolve(_) | Self::Route { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e)
    }
}

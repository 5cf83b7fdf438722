//! Layered configuration: defaults, then an optional `postboard.toml`,
//! then `POSTBOARD__*` environment variables.
//!
//! Deployment plumbing only: nothing here changes the HTTP contract.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::api::Variant;
use crate::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub posts: PostsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP literal or a hostname resolved at startup.
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostsConfig {
    pub variant: Variant,
}

impl Config {
    /// Loads `postboard.toml` (if present) and the environment.
    ///
    /// `POSTBOARD__SERVER__PORT=9000` sets `server.port`,
    /// `POSTBOARD__POSTS__VARIANT=append` sets `posts.variant`.
    pub fn load() -> Result<Self, Error> {
        Self::load_from("postboard")
    }

    /// Like [`load`](Self::load) with a different file stem.
    pub fn load_from(file: &str) -> Result<Self, Error> {
        Self::layered(file, environment())
    }

    fn layered(file: &str, env: config::Environment) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("posts.variant", "extended")?
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolves `server.host:server.port`, taking the first address.
    pub async fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let host = self.server.host.as_str();
        tokio::net::lookup_host((host, self.server.port))
            .await?
            .next()
            .ok_or_else(|| Error::Resolve(host.to_owned()))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("POSTBOARD").separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reads variables from `vars` instead of the process environment, so
    // these tests never race each other.
    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        environment().source(Some(source))
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::layered("does-not-exist", env(&[])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.posts.variant, Variant::Extended);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::layered(
            "does-not-exist",
            env(&[("POSTBOARD__POSTS__VARIANT", "append"), ("POSTBOARD__SERVER__PORT", "9001")]),
        )
        .unwrap();
        assert_eq!(config.posts.variant, Variant::Append);
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn environment_overrides_the_file() {
        let stem = std::env::temp_dir().join(format!("postboard-config-{}", std::process::id()));
        let path = stem.with_extension("toml");
        std::fs::write(
            &path,
            "[server]\nport = 7000\n\n[posts]\nvariant = \"basic\"\n",
        )
        .unwrap();

        let from_file = Config::layered(stem.to_str().unwrap(), env(&[]));
        let with_env = Config::layered(
            stem.to_str().unwrap(),
            env(&[("POSTBOARD__POSTS__VARIANT", "append")]),
        );
        std::fs::remove_file(&path).unwrap();

        let from_file = from_file.unwrap();
        assert_eq!(from_file.server.port, 7000);
        assert_eq!(from_file.posts.variant, Variant::Basic);

        let with_env = with_env.unwrap();
        assert_eq!(with_env.server.port, 7000);
        assert_eq!(with_env.posts.variant, Variant::Append);
    }

    #[test]
    fn unknown_variant_is_a_config_error() {
        let err = Config::layered("does-not-exist", env(&[("POSTBOARD__POSTS__VARIANT", "sideways")]));
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn ip_literal_resolves_as_is() {
        let config = Config::layered("does-not-exist", env(&[])).unwrap();
        assert_eq!(config.socket_addr().await.unwrap(), "127.0.0.1:8000".parse().unwrap());
    }

    #[tokio::test]
    async fn hostnames_are_resolved() {
        let mut config = Config::layered("does-not-exist", env(&[])).unwrap();
        config.server.host = "localhost".to_owned();
        let addr = config.socket_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }
}

//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::{Error, Result};

/// Environment variable overriding the listen port.
pub const PORT_VAR: &str = "STEPGRAPH_PORT";
/// Environment variable overriding the initial sample graph.
pub const SAMPLE_VAR: &str = "STEPGRAPH_SAMPLE";

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Address to bind
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Built-in sample loaded at startup
    pub sample: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            sample: "weighted".to_owned(),
        }
    }
}

impl VisConfig {
    /// Defaults, then environment, then positional `[sample] [port]` args.
    ///
    /// `args` excludes the program name. `env` looks a variable up.
    pub fn resolve<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(sample) = env(SAMPLE_VAR) {
            config.sample = sample;
        }
        if let Some(port) = env(PORT_VAR) {
            config.port = parse_port(&port)?;
        }

        let mut args = args.into_iter();
        if let Some(sample) = args.next() {
            config.sample = sample;
        }
        if let Some(port) = args.next() {
            config.port = parse_port(&port)?;
        }
        Ok(config)
    }

    /// Read the real process arguments and environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("port must be 0-65535, got {value:?}")))
}

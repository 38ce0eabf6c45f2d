use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use color_eyre::{eyre::WrapErr, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `HOST` and `PORT` from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if either variable is set to something unparsable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Fails if either variable is set to something unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host
                .trim()
                .parse()
                .wrap_err_with(|| format!("HOST={host:?} is not an IP address"))?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .wrap_err_with(|| format!("PORT={port:?} is not a port number"))?;
        }

        Ok(config)
    }

    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_all_interfaces_on_8000() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults load");
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn reads_host_and_port() {
        let config =
            Config::from_lookup(lookup(&[("HOST", "127.0.0.1"), ("PORT", " 6502 ")]))
                .expect("config loads");
        assert_eq!(config.addr().to_string(), "127.0.0.1:6502");
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "snek")]))
            .expect_err("port should be rejected");
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_bad_host() {
        assert!(Config::from_lookup(lookup(&[("HOST", "localhost")])).is_err());
    }
}

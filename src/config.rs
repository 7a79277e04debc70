use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};

use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// JSON file holding the clubs
    pub clubs_path: PathBuf,
    /// JSON file holding the competitions
    pub competitions_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct Error {
    key: &'static str,
    value: String,
    reason: String,
}

impl Config {
    /// Read the configuration from the environment
    pub fn load() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        Ok(Self {
            host: try_load(&lookup, "GUDLFT_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "GUDLFT_PORT", "5000")?,
            clubs_path: try_load(&lookup, "GUDLFT_CLUBS_PATH", "data/clubs.json")?,
            competitions_path: try_load(
                &lookup,
                "GUDLFT_COMPETITIONS_PATH",
                "data/competitions.json",
            )?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, Error>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| Error {
        key,
        reason: e.to_string(),
        value,
    })
}

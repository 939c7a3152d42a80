use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use reqwest::Url;

use crate::{store::LEADERBOARD_SIZE, Error, Result};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

pub const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 6502);
pub const DEFAULT_SERVER_URL: &str = "http://localhost:6502";
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// How long to wait after submitting a score before reading the leaderboard,
/// so the fresh score is usually included.
pub const LEADERBOARD_DELAY: Duration = Duration::from_millis(500);

const BIND_VAR: &str = "RAINBOW_SNAKE_BIND";
const SERVER_URL_VAR: &str = "RAINBOW_SNAKE_SERVER_URL";
const TICK_MS_VAR: &str = "RAINBOW_SNAKE_TICK_MS";
const LEADERBOARD_SIZE_VAR: &str = "RAINBOW_SNAKE_LEADERBOARD_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the server listens.
    pub bind:             SocketAddr,
    /// Where clients find the server.
    pub server_url:       Url,
    pub tick:             Duration,
    pub leaderboard_size: usize,
}

impl Config {
    /// Reads the `RAINBOW_SNAKE_*` environment variables, falling back to
    /// defaults for any that are unset.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a variable is set to something unparseable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// [`Error::Config`] if a value can't be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = parse(&lookup, BIND_VAR)?
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND));

        let server_url = match lookup(SERVER_URL_VAR) {
            Some(raw) => Url::parse(&raw).map_err(|e| {
                Error::Config(format!("{SERVER_URL_VAR}={raw:?}: {e}"))
            })?,
            None => Url::parse(DEFAULT_SERVER_URL)
                .map_err(|e| Error::Config(e.to_string()))?,
        };

        let tick = match parse::<u64, _>(&lookup, TICK_MS_VAR)? {
            Some(0) => {
                return Err(Error::Config(format!(
                    "{TICK_MS_VAR} must be greater than zero"
                )))
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_TICK,
        };

        let leaderboard_size =
            parse(&lookup, LEADERBOARD_SIZE_VAR)?.unwrap_or(LEADERBOARD_SIZE);

        Ok(Self {
            bind,
            server_url,
            tick,
            leaderboard_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind:             SocketAddr::from(DEFAULT_BIND),
            server_url:       Url::parse(DEFAULT_SERVER_URL)
                .unwrap_or_else(|_| unreachable!("default url is valid")),
            tick:             DEFAULT_TICK,
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}

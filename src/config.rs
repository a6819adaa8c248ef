use std::collections::BTreeMap;
use std::ffi::OsString;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

const IF_PREFIX: &str = "IF_";
const ADDR_PREFIX: &str = "ADDR_";

/// Environment variable naming the address file written by the test harness.
pub const ADDR_FILE_ENV: &str = "ADDR_FILE";
const DEFAULT_ADDR_FILE: &str = "addr.py";

/// The interface/address pair a test index selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub index: String,
    pub interface: String,
    pub address: Ipv4Addr,
}

/// Harness provided `IF_<N>` and `ADDR_<N>` assignments.
#[derive(Debug, Default)]
pub struct Config {
    vars: BTreeMap<String, String>,
}

impl Config {
    /// Reads the address file, then overlays `IF_*`/`ADDR_*` from the environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(ADDR_FILE_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => match std::fs::read_to_string(DEFAULT_ADDR_FILE) {
                Ok(text) => Self::parse(&text),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!("no {} in working directory", DEFAULT_ADDR_FILE);
                    Self::default()
                }
                Err(err) => return Err(err.into()),
            },
        };
        config.overlay(utf8_vars(std::env::vars_os()));
        Ok(config)
    }

    fn from_file(path: PathBuf) -> Result<Self> {
        debug!(?path, "reading address file");
        let text = std::fs::read_to_string(&path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            if let Some((name, value)) = parse_assignment(line) {
                config.vars.insert(name.to_string(), value.to_string());
            }
        }
        debug!(vars = config.vars.len(), "parsed address file");
        config
    }

    pub fn overlay<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if is_case_var(&name) {
                debug!(%name, %value, "from environment");
                self.vars.insert(name, value);
            }
        }
    }

    pub fn resolve(&self, index: &str) -> Result<TestCase> {
        let interface = self.lookup(IF_PREFIX, index)?;
        let addr_name = format!("{ADDR_PREFIX}{index}");
        let value = self.lookup(ADDR_PREFIX, index)?;
        let address = value
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidAddress {
                name: addr_name,
                value: value.to_string(),
            })?;

        Ok(TestCase {
            index: index.to_string(),
            interface: interface.to_string(),
            address,
        })
    }

    fn lookup(&self, prefix: &str, index: &str) -> Result<&str> {
        let name = format!("{prefix}{index}");
        match self.vars.get(&name) {
            Some(value) => Ok(value.as_str()),
            None => Err(Error::UnknownTestCase {
                index: index.to_string(),
                name,
            }),
        }
    }
}

/// Drops environment entries that are not valid UTF-8.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
}

fn is_case_var(name: &str) -> bool {
    [IF_PREFIX, ADDR_PREFIX].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .map_or(false, |index| !index.is_empty())
    })
}

fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = value.trim();
    let value = match value.chars().next() {
        Some(q @ ('"' | '\'')) => match value[1..].find(q) {
            Some(end) => &value[1..end + 1],
            None => value,
        },
        _ => value.split('#').next().unwrap_or_default(),
    };
    Some((name, value.trim().trim_end_matches(';').trim()))
}

//! Demonstration routine: fills a map with random keys, prints it, deletes a
//! random key and prints it again.

use std::io::{self, Write};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::Level;

use crate::{error::Error, seperate_chaining::FixedBucketHashMap, DEFAULT_CAPACITY};

/// value stored under every demo key
pub const DEMO_VALUE: &str = "atongmu";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value:?}")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
    #[error("--key-range must be at least 1")]
    EmptyKeyRange,
    #[error(transparent)]
    Map(#[from] Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub capacity: usize,
    pub inserts: usize,
    /// keys are drawn from `[0, key_range)`
    pub key_range: i64,
    /// `None` seeds from system entropy
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            inserts: 100,
            key_range: 100,
            seed: None,
            verbose: false,
        }
    }
}

impl DemoConfig {
    /// Parses `--capacity N`, `--inserts N`, `--key-range N`, `--seed N` and
    /// `--verbose`. The program name must already be stripped.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(flag) = args.next() {
            if flag == "--verbose" {
                config.verbose = true;
                continue;
            }
            if !matches!(
                flag.as_str(),
                "--capacity" | "--inserts" | "--key-range" | "--seed"
            ) {
                return Err(ConfigError::UnknownArgument(flag));
            }
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
            match flag.as_str() {
                "--capacity" => config.capacity = parse(&flag, &value)?,
                "--inserts" => config.inserts = parse(&flag, &value)?,
                "--key-range" => config.key_range = parse(&flag, &value)?,
                _ => config.seed = Some(parse(&flag, &value)?),
            }
        }
        if config.key_range < 1 {
            return Err(ConfigError::EmptyKeyRange);
        }
        if config.capacity == 0 {
            return Err(Error::ZeroCapacity.into());
        }
        Ok(config)
    }

    pub fn max_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

fn parse<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// What the demo did, for callers that want more than the printed output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoReport {
    pub size_after_inserts: usize,
    pub deleted_key: i64,
    pub deleted: bool,
    pub size_after_delete: usize,
}

pub fn run<W: Write>(config: &DemoConfig, out: &mut W) -> Result<DemoReport, DemoError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut map = FixedBucketHashMap::with_capacity(config.capacity)?;

    for _ in 0..config.inserts {
        map.put(rng.gen_range(0..config.key_range), DEMO_VALUE);
    }
    let size_after_inserts = map.len();
    tracing::info!(
        inserts = config.inserts,
        distinct = size_after_inserts,
        "filled map"
    );

    writeln!(out, "map after {} inserts:", config.inserts)?;
    write!(out, "{map}")?;
    writeln!(out)?;

    let key = rng.gen_range(0..config.key_range);
    writeln!(out, "deleting key: {key}")?;
    let deleted = match map.entry_handle(key) {
        Some(handle) => {
            if let Some(entry) = map.get(key) {
                writeln!(out, "found entry in bucket {}: {entry}", handle.index())?;
            }
            map.delete_entry(handle).is_some()
        }
        None => false,
    };
    if deleted {
        writeln!(out, "deleted")?;
    } else {
        writeln!(out, "not found, nothing deleted")?;
    }
    tracing::debug!(key, deleted, size = map.len(), "delete finished");
    write!(out, "{map}")?;

    Ok(DemoReport {
        size_after_inserts,
        deleted_key: key,
        deleted,
        size_after_delete: map.len(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Map(#[from] Error),
    #[error("failed to write demo output")]
    Io(#[from] io::Error),
}

use std::ffi::OsString;
use std::time::Duration;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::ValidationError;

/// Long flags that are also accepted with a single leading dash.
const SINGLE_DASH_FLAGS: [&str; 7] = [
    "totalCalls",
    "numThreads",
    "sleepTime",
    "requestTimeOut",
    "connectTimeOut",
    "reuseConnects",
    "keepConnectsOpen",
];

const HELP_TOKENS: [&str; 3] = ["-?", "--help", "-h"];

/// Rewrites `-totalCalls` style tokens to `--totalCalls` and `-?` to
/// `--help` so clap can parse them. Everything else passes through.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "-?" {
                return OsString::from("--help");
            }
            match text.strip_prefix('-') {
                Some(name) if SINGLE_DASH_FLAGS.contains(&name) => {
                    OsString::from(format!("--{}", name))
                }
                Some(_) | None => arg,
            }
        })
        .collect()
}

/// True when any argument after the program name asks for usage.
#[must_use]
pub fn wants_help(raw_args: &[OsString]) -> bool {
    raw_args
        .iter()
        .skip(1)
        .any(|arg| HELP_TOKENS.iter().any(|token| arg == token))
}

pub(crate) fn parse_target_url(s: &str) -> Result<String, ValidationError> {
    if s.starts_with("http") {
        Ok(s.to_owned())
    } else {
        Err(ValidationError::InvalidUrl {
            value: s.to_owned(),
        })
    }
}

pub(super) fn parse_call_count(s: &str) -> Result<u64, ValidationError> {
    s.trim()
        .parse()
        .map_err(|err| ValidationError::InvalidInteger {
            value: s.to_owned(),
            source: err,
        })
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

pub(super) fn parse_millis(s: &str) -> Result<Duration, ValidationError> {
    parse_call_count(s).map(Duration::from_millis)
}

pub(super) fn parse_positive_millis(s: &str) -> Result<Duration, ValidationError> {
    s.parse::<PositiveU64>()
        .map(|millis| Duration::from_millis(millis.get()))
}

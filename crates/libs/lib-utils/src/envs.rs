//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.
//!
//! In the browser there is no process environment, so every lookup reports
//! [`Error::MissingEnv`] and callers fall back to their defaults.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, or `default` when it is unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match get_env(name) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get a comma-separated environment variable as a list.
///
/// Empty items are dropped, so `"a,,b, "` yields `["a", "b"]`. A variable
/// that contains no items at all is reported as [`Error::WrongFormat`].
pub fn get_env_list(name: &'static str) -> Result<Vec<String>, Error> {
    let val = get_env(name)?;
    let items: Vec<String> = val
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(Error::WrongFormat(name));
    }
    Ok(items)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_DEFINITELY_UNSET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_DEFINITELY_UNSET"))
        );
        assert_eq!(get_env_or("LIB_UTILS_TEST_DEFINITELY_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_env_list() {
        env::set_var("LIB_UTILS_TEST_LIST", "https://a.example/, ,https://b.example/");
        assert_eq!(
            get_env_list("LIB_UTILS_TEST_LIST").unwrap(),
            vec!["https://a.example/".to_string(), "https://b.example/".to_string()]
        );

        env::set_var("LIB_UTILS_TEST_EMPTY_LIST", " , ");
        assert_eq!(
            get_env_list("LIB_UTILS_TEST_EMPTY_LIST"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_EMPTY_LIST"))
        );
    }

    #[test]
    fn test_env_parse() {
        env::set_var("LIB_UTILS_TEST_NUMBER", " 56 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_NUMBER"), Ok(56));

        env::set_var("LIB_UTILS_TEST_NOT_NUMBER", "bsc");
        assert_eq!(
            get_env_parse::<u64>("LIB_UTILS_TEST_NOT_NUMBER"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_NOT_NUMBER"))
        );
    }
}

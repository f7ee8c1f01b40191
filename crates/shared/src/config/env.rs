use anyhow::{Context, Result, anyhow};
use std::{fmt::Display, str::FromStr};

pub fn env_required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing environment variable: {key}"))
}

pub fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("Unable to parse {key}='{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

pub fn env_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
        },
        Err(_) => Ok(default),
    }
}

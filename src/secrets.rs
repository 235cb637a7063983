//! Typed access to secrets supplied through the process environment.
//!
//! Configuration can declare environment variables that must be present
//! before anything is planned or run, deployment credentials being the
//! usual case. Lookups return a result rather than panicking, and the
//! value itself is wrapped so it cannot leak through `Debug` output.

use std::env;
use std::fmt;

use thiserror::Error;

/// A secret read from the environment. Never printed in full.
pub struct Secret(String);

impl Secret {
    /// Access the underlying value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("no value set for required environment variable `{var}`")]
    Missing { var: String },
    #[error("environment variable `{var}` is not valid unicode")]
    NotUnicode { var: String },
}

/// Read one required secret, treating empty values as missing.
pub fn require(var: &str) -> Result<Secret, SecretError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(Secret(value)),
        Ok(_) => Err(SecretError::Missing {
            var: var.to_string(),
        }),
        Err(env::VarError::NotPresent) => Err(SecretError::Missing {
            var: var.to_string(),
        }),
        Err(env::VarError::NotUnicode(_)) => Err(SecretError::NotUnicode {
            var: var.to_string(),
        }),
    }
}

/// Check that every named secret is present, failing on the first that is
/// not. Values are read and immediately dropped.
pub fn require_all<'a>(vars: impl IntoIterator<Item = &'a str>) -> Result<(), SecretError> {
    for var in vars {
        require(var)?;
    }
    Ok(())
}

use std::fmt;

use thiserror::Error;

/// Where a rejected setting value came from.
#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Tracks which settings were supplied on the command line so validation
/// failures can point at the right origin.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) presets: Option<SettingSource>,
    pub(crate) required_env: Option<SettingSource>,
}

impl ConfigSources {
    pub(crate) fn source_for_presets(&self) -> SettingSource {
        self.presets
            .clone()
            .unwrap_or(SettingSource::ConfigKey("presets"))
    }

    pub(crate) fn source_for_required_env(&self) -> SettingSource {
        self.required_env
            .clone()
            .unwrap_or(SettingSource::ConfigKey("env.required"))
    }
}

#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct SettingsError {
    pub(crate) key: &'static str,
    pub(crate) value: String,
    pub(crate) origin: SettingSource,
    pub(crate) reason: String,
}

impl SettingsError {
    pub(crate) fn invalid<V, R>(key: &'static str, value: V, origin: SettingSource, reason: R) -> Self
    where
        V: Into<String>,
        R: Into<String>,
    {
        Self {
            key,
            value: value.into(),
            origin,
            reason: reason.into(),
        }
    }
}

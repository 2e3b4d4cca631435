use std::error::Error;
use std::fmt;
use std::io;

/// The dataset artifact could not be turned into a usable table.
#[derive(Debug)]
pub enum LoadError {
    Io { path: String, source: io::Error },
    Csv { path: String, source: csv::Error },
    Empty { path: String },
    Inconsistent { path: String, line: u64, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "can't read dataset '{}': {}", path, source),
            LoadError::Csv { path, source } => write!(f, "malformed dataset '{}': {}", path, source),
            LoadError::Empty { path } => write!(f, "dataset '{}' holds no observations", path),
            LoadError::Inconsistent { path, line, reason } => {
                write!(f, "inconsistent row at {}:{}: {}", path, line, reason)
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv { source, .. } => Some(source),
            LoadError::Empty { .. } | LoadError::Inconsistent { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "can't read settings file: {}", e),
            SettingsError::Parse(e) => write!(f, "can't parse TOML settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

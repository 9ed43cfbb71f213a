use crate::core::config::ConfigError;
use crate::signal::SignalError;

#[derive(Debug)]
pub enum RelayError {
    ConfigError(ConfigError),
    SignalError(SignalError),
    FlagError(String),
}

impl From<ConfigError> for RelayError {
    fn from(err: ConfigError) -> Self {
        RelayError::ConfigError(err)
    }
}

impl From<SignalError> for RelayError {
    fn from(err: SignalError) -> Self {
        RelayError::SignalError(err)
    }
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::ConfigError(e) => write!(f, "Config error: {}", e),
            RelayError::SignalError(e) => write!(f, "Signal error: {}", e),
            RelayError::FlagError(msg) => write!(f, "Flag error: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

use std::{fmt, time::Duration};

mod loader;
mod paths;

use crate::flags::Flags;
use crate::signal::{SignalError, SignalSet};
use loader::ConfigLoader;
pub use paths::ConfigPaths;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Config {
    paths: ConfigPaths,
    pub signals: SignalSet,
    pub quiet: bool,
    /// Seconds between `SIGALRM`s; 0 disables the alarm.
    pub alarm: u32,
    pub poll_interval: Duration,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_paths(ConfigPaths::new()?))
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Config {
            paths,
            signals: SignalSet::monitored(),
            quiet: false,
            alarm: 0,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn load(&mut self) -> Result<(), ConfigError> {
        let paths = self.paths.clone();
        let loader = ConfigLoader::new(&paths);
        loader.load_configs(self)?;
        Ok(())
    }

    /// Re-reads the rc file on top of the defaults, keeping `flags` on top.
    pub fn reload(&self, flags: &Flags) -> Result<Self, ConfigError> {
        let mut fresh = Self::with_paths(self.paths.clone());
        fresh.load()?;
        fresh.apply_flags(flags)?;
        Ok(fresh)
    }

    pub fn apply_flags(&mut self, flags: &Flags) -> Result<(), ConfigError> {
        if flags.is_set("quiet") {
            self.quiet = true;
        }
        if let Some(list) = flags.get_value("signals") {
            self.signals = SignalSet::parse(list)?;
        }
        if let Some(secs) = flags.get_value("alarm") {
            self.alarm = parse_value("alarm", secs)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), value.to_string()))
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    ConfigFileNotFound(String),
    InvalidValue(String, String),
    IoError(std::io::Error),
    SignalError(SignalError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<SignalError> for ConfigError {
    fn from(e: SignalError) -> Self {
        ConfigError::SignalError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: {}", key, value)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::SignalError(e) => write!(f, "Signal error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    fn flags(args: &[&str]) -> Flags {
        let mut flags = Flags::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        flags.parse(&args).expect("valid flags");
        flags
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_paths(ConfigPaths::in_dir("/nonexistent"));
        assert_eq!(config.signals, SignalSet::monitored());
        assert!(!config.quiet);
        assert_eq!(config.alarm, 0);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_flags_override() {
        let mut config = Config::with_paths(ConfigPaths::in_dir("/nonexistent"));
        config
            .apply_flags(&flags(&["-q", "--signals", "int,alrm", "-a", "5"]))
            .expect("flags apply");

        assert!(config.quiet);
        assert_eq!(config.alarm, 5);
        assert!(!config.signals.contains(Signal::Hangup));
        assert!(config.signals.contains(Signal::Interrupt));
    }

    #[test]
    fn test_bad_alarm_flag() {
        let mut config = Config::with_paths(ConfigPaths::in_dir("/nonexistent"));
        assert!(matches!(
            config.apply_flags(&flags(&["--alarm", "soon"])),
            Err(ConfigError::InvalidValue(key, _)) if key == "alarm"
        ));
    }

    #[test]
    fn test_missing_rc_is_not_an_error() {
        let mut config = Config::with_paths(ConfigPaths::in_dir("/nonexistent"));
        config.load().expect("missing rc file is skipped");
        assert_eq!(config.signals, SignalSet::monitored());
    }
}

use std::{fs, path::Path, time::Duration};

use super::{parse_value, Config, ConfigError, ConfigPaths};
use crate::signal::SignalSet;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            for line in content.lines() {
                self.process_line(line, config)?;
            }
            tracing::debug!(path = %path.display(), "config loaded");
        }
        Ok(())
    }

    fn process_line(&self, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            return Ok(());
        };
        let key = key.trim();
        let value = unquote(value.trim());

        match key {
            "signals" => config.signals = SignalSet::parse(value)?,
            "quiet" => config.quiet = parse_value(key, value)?,
            "alarm" => config.alarm = parse_value(key, value)?,
            "poll_interval_ms" => {
                let ms: u64 = parse_value(key, value)?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue(key.to_string(), value.to_string()));
                }
                config.poll_interval = Duration::from_millis(ms);
            }
            _ => tracing::debug!(key, "ignoring unknown config key"),
        }
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use std::env;
    use std::path::PathBuf;

    fn setup_test_config() -> Config {
        Config::with_paths(ConfigPaths::in_dir("/nonexistent"))
    }

    fn create_temp_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = env::temp_dir().join(format!("sigrelay_{}_{}", name, std::process::id()));
        fs::write(&file_path, content).expect("write temp config");
        file_path
    }

    #[test]
    fn test_process_line_keys() {
        let paths = ConfigPaths::in_dir("/nonexistent");
        let loader = ConfigLoader::new(&paths);
        let mut config = setup_test_config();

        loader.process_line("signals = \"HUP ALRM\"", &mut config).expect("signals");
        loader.process_line("quiet=true", &mut config).expect("quiet");
        loader.process_line("alarm = 3", &mut config).expect("alarm");
        loader.process_line("poll_interval_ms = 250", &mut config).expect("poll");

        assert!(config.signals.contains(Signal::Alarm));
        assert!(!config.signals.contains(Signal::Interrupt));
        assert!(config.quiet);
        assert_eq!(config.alarm, 3);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_comments_and_unknown_keys_skipped() {
        let paths = ConfigPaths::in_dir("/nonexistent");
        let loader = ConfigLoader::new(&paths);
        let mut config = setup_test_config();

        loader.process_line("# alarm = 9", &mut config).expect("comment");
        loader.process_line("colour = always", &mut config).expect("unknown");
        loader.process_line("no separator here", &mut config).expect("no separator");
        assert_eq!(config.alarm, 0);
    }

    #[test]
    fn test_invalid_values() {
        let paths = ConfigPaths::in_dir("/nonexistent");
        let loader = ConfigLoader::new(&paths);
        let mut config = setup_test_config();

        assert!(matches!(
            loader.process_line("quiet = maybe", &mut config),
            Err(ConfigError::InvalidValue(..))
        ));
        assert!(matches!(
            loader.process_line("poll_interval_ms = 0", &mut config),
            Err(ConfigError::InvalidValue(..))
        ));
        assert!(matches!(
            loader.process_line("signals = TERM", &mut config),
            Err(ConfigError::SignalError(_))
        ));
    }

    #[test]
    fn test_source_if_exists() {
        let content = r#"
            # relay only the alarm
            signals = ALRM
            alarm = 2
        "#;
        let file_path = create_temp_config_file("source", content);

        let paths = ConfigPaths::with_rc(&file_path);
        let mut config = Config::with_paths(paths);
        config.load().expect("load rc");

        assert_eq!(config.signals.iter().collect::<Vec<_>>(), vec![Signal::Alarm]);
        assert_eq!(config.alarm, 2);

        // Cleanup
        let _ = fs::remove_file(file_path);
    }
}
